//! Prompt and response schema for bilingual passage generation.

use super::types::GenerationRequest;

const FALLBACK_TOPIC: &str = "a topic of general interest";

/// Response schema in Gemini's OpenAPI subset (upper-case type names).
/// Mirrors `GeneratedContent` field for field.
pub fn generated_content_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": "A concise and relevant title for the text in English."
            },
            "english_text_segments": {
                "type": "ARRAY",
                "description": "The English text broken down into meaningful chunks or phrases, each with a 'text' and a 'highlight' property.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "text": {
                            "type": "STRING",
                            "description": "A segment of the English paragraph."
                        },
                        "highlight": {
                            "type": "BOOLEAN",
                            "description": "True if this segment is a key phrase a student should focus on."
                        }
                    },
                    "required": ["text", "highlight"]
                }
            },
            "vietnamese_text": {
                "type": "STRING",
                "description": "The full Vietnamese translation of the entire English text as a single string."
            }
        },
        "required": ["title", "english_text_segments", "vietnamese_text"]
    })
}

/// Build the generation instruction for one request.
pub fn build_generation_prompt(request: &GenerationRequest) -> String {
    let topic = match request.topic.trim() {
        "" => FALLBACK_TOPIC,
        t => t,
    };

    format!(
        r#"Act as an expert English language teacher specializing in IELTS preparation.
Your task is to generate a cohesive English paragraph suitable for a student at an IELTS band level of {band}.
The total word count should be approximately {words} words.
The topic of the text should be: "{topic}".

You must structure your response strictly as a JSON object that conforms to the provided schema. Do not add any text before or after the JSON object.

Instructions for JSON content:
1. Create a single JSON object.
2. "title": A concise and relevant title for the text in English.
3. "english_text_segments": Break the entire English paragraph down into an array of meaningful phrases or "chunks". For each chunk, create an object with "text" and "highlight" properties. Set "highlight" to true for the most important phrases that a student should focus on. Keep the original spacing and punctuation inside the chunks: the combined text of all segments must form the complete, original paragraph.
4. "vietnamese_text": A full, natural-sounding Vietnamese translation for the ENTIRE English paragraph as a single string."#,
        band = request.band,
        words = request.word_count.get(),
        topic = topic,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::types::{Band, WordCount};

    fn request(topic: &str) -> GenerationRequest {
        GenerationRequest {
            band: Band::Band6Half,
            word_count: WordCount::new(150).unwrap(),
            topic: topic.to_string(),
        }
    }

    #[test]
    fn test_prompt_embeds_parameters() {
        let prompt = build_generation_prompt(&request("Urban farming"));
        assert!(prompt.contains("IELTS band level of 6.5 - 7.0"));
        assert!(prompt.contains("approximately 150 words"));
        assert!(prompt.contains("\"Urban farming\""));
    }

    #[test]
    fn test_blank_topic_falls_back() {
        let prompt = build_generation_prompt(&request("   "));
        assert!(prompt.contains("\"a topic of general interest\""));
    }

    #[test]
    fn test_schema_requires_all_fields() {
        let schema = generated_content_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(
            required,
            vec!["title", "english_text_segments", "vietnamese_text"]
        );
        assert_eq!(
            schema["properties"]["english_text_segments"]["items"]["required"],
            serde_json::json!(["text", "highlight"])
        );
    }
}
