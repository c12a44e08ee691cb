//! Explicit shape check for the model's JSON output.
//!
//! The model is asked for schema-constrained output, but nothing stops it from
//! returning something else. Every field is checked here before the content is
//! shown or stored.

use serde_json::Value;
use thiserror::Error;

use super::types::{GeneratedContent, TextSegment};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("response is not valid JSON: {0}")]
    NotJson(String),

    #[error("response is not a JSON object")]
    NotObject,

    #[error("missing or empty 'title'")]
    MissingTitle,

    #[error("'english_text_segments' is missing or not an array")]
    SegmentsNotArray,

    #[error("segment {index} is malformed: {reason}")]
    MalformedSegment { index: usize, reason: &'static str },

    #[error("missing or empty 'vietnamese_text'")]
    MissingTranslation,
}

/// Parse raw model text into `GeneratedContent`.
pub fn parse_generated_content(raw: &str) -> Result<GeneratedContent, ValidationError> {
    let text = strip_markdown_json(raw);
    let json: Value = serde_json::from_str(&text).map_err(|e| {
        let truncated: String = text.chars().take(500).collect();
        ValidationError::NotJson(format!("{} (first 500 chars: {})", e, truncated))
    })?;
    validate_generated_content(&json)
}

/// Check a decoded JSON value against the `GeneratedContent` shape.
pub fn validate_generated_content(json: &Value) -> Result<GeneratedContent, ValidationError> {
    let obj = json.as_object().ok_or(ValidationError::NotObject)?;

    let title = non_empty_str(obj.get("title")).ok_or(ValidationError::MissingTitle)?;

    let raw_segments = obj
        .get("english_text_segments")
        .and_then(Value::as_array)
        .ok_or(ValidationError::SegmentsNotArray)?;

    let english_text_segments = raw_segments
        .iter()
        .enumerate()
        .map(|(index, seg)| parse_segment(index, seg))
        .collect::<Result<Vec<_>, _>>()?;

    let vietnamese_text =
        non_empty_str(obj.get("vietnamese_text")).ok_or(ValidationError::MissingTranslation)?;

    Ok(GeneratedContent {
        title,
        english_text_segments,
        vietnamese_text,
    })
}

fn parse_segment(index: usize, seg: &Value) -> Result<TextSegment, ValidationError> {
    let malformed = |reason| ValidationError::MalformedSegment { index, reason };

    let obj = seg.as_object().ok_or_else(|| malformed("not an object"))?;
    let text = obj
        .get("text")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("'text' is not a string"))?
        .to_string();
    // A missing flag just means "not highlighted".
    let highlight = match obj.get("highlight") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => return Err(malformed("'highlight' is not a boolean")),
    };

    Ok(TextSegment { text, highlight })
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Strip markdown code fences from model output if present.
fn strip_markdown_json(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }
    let after_open = match trimmed.find('\n') {
        Some(pos) => &trimmed[pos + 1..],
        None => trimmed.trim_start_matches('`'),
    };
    let cleaned = after_open.trim_end();
    cleaned
        .strip_suffix("```")
        .unwrap_or(cleaned)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "title": "The Digital Classroom",
        "english_text_segments": [
            {"text": "Technology has ", "highlight": false},
            {"text": "transformed the way", "highlight": true},
            {"text": " students learn.", "highlight": false}
        ],
        "vietnamese_text": "Công nghệ đã thay đổi cách học sinh học tập."
    }"#;

    #[test]
    fn test_parse_valid_content() {
        let content = parse_generated_content(VALID).unwrap();
        assert_eq!(content.title, "The Digital Classroom");
        assert_eq!(content.english_text_segments.len(), 3);
        assert!(content.english_text_segments[1].highlight);
        assert_eq!(
            content.english_text(),
            "Technology has transformed the way students learn."
        );
    }

    #[test]
    fn test_parse_fenced_content() {
        let fenced = format!("```json\n{}\n```", VALID);
        assert!(parse_generated_content(&fenced).is_ok());
    }

    #[test]
    fn test_not_json() {
        let err = parse_generated_content("Sure! Here is your paragraph.").unwrap_err();
        assert!(matches!(err, ValidationError::NotJson(_)));
    }

    #[test]
    fn test_missing_title() {
        let err = parse_generated_content(
            r#"{"english_text_segments": [], "vietnamese_text": "x"}"#,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingTitle);

        let err = parse_generated_content(
            r#"{"title": "", "english_text_segments": [], "vietnamese_text": "x"}"#,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingTitle);
    }

    #[test]
    fn test_segments_must_be_array() {
        let err = parse_generated_content(
            r#"{"title": "T", "english_text_segments": "one two", "vietnamese_text": "x"}"#,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::SegmentsNotArray);
    }

    #[test]
    fn test_malformed_segment_reports_index() {
        let err = parse_generated_content(
            r#"{"title": "T", "english_text_segments": [{"text": "a", "highlight": false}, {"text": 3}], "vietnamese_text": "x"}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MalformedSegment { index: 1, reason: "'text' is not a string" }
        );
    }

    #[test]
    fn test_missing_highlight_defaults_false() {
        let content = parse_generated_content(
            r#"{"title": "T", "english_text_segments": [{"text": "a"}], "vietnamese_text": "x"}"#,
        )
        .unwrap();
        assert!(!content.english_text_segments[0].highlight);
    }

    #[test]
    fn test_missing_translation() {
        let err = parse_generated_content(
            r#"{"title": "T", "english_text_segments": []}"#,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingTranslation);
    }

    #[test]
    fn test_top_level_array_rejected() {
        let err = parse_generated_content("[1, 2]").unwrap_err();
        assert_eq!(err, ValidationError::NotObject);
    }
}
