//! Generation settings.
//!
//! Provides two loading methods:
//! - `default_config()` - Settings embedded in the binary
//! - `load_config(path)` - Settings read from a TOML file

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;
use tracing::{info, warn};

/// Loaded from `src-tauri/config/generation.toml` at compile time.
const DEFAULT_CONFIG: &str = include_str!("../config/generation.toml");

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerationConfig {
    /// Gemini model identifier, e.g. "gemini-2.5-flash".
    pub model: String,
    /// API base URL without a trailing slash.
    pub endpoint: String,
    pub temperature: f32,
}

/// Load settings from a TOML file at the given path.
pub fn load_config(path: &Path) -> Result<GenerationConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: GenerationConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Settings embedded in the binary.
///
/// # Panics
/// Panics if the embedded TOML is invalid (this would be a compile-time bug).
pub fn default_config() -> GenerationConfig {
    toml::from_str(DEFAULT_CONFIG).expect("embedded generation.toml must be valid TOML")
}

/// Where a user override is looked for.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ielts-reader").join("generation.toml"))
}

/// User override if present and valid, embedded defaults otherwise.
pub fn resolve_config(override_path: Option<&Path>) -> GenerationConfig {
    let Some(path) = override_path.filter(|p| p.exists()) else {
        return default_config();
    };
    match load_config(path) {
        Ok(config) => {
            info!("Loaded generation config from {:?} (model: {})", path, config.model);
            config
        }
        Err(e) => {
            warn!("Ignoring invalid generation config at {:?}: {}", path, e);
            default_config()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = default_config();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!(config.endpoint.starts_with("https://generativelanguage.googleapis.com"));
        assert!((config.temperature - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_override_file_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("generation.toml");
        std::fs::write(
            &path,
            "model = \"gemini-2.5-pro\"\nendpoint = \"http://localhost:9000\"\ntemperature = 0.3\n",
        )
        .unwrap();

        let config = resolve_config(Some(&path));
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.endpoint, "http://localhost:9000");
    }

    #[test]
    fn test_invalid_override_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("generation.toml");
        std::fs::write(&path, "model = 42").unwrap();

        assert!(load_config(&path).is_err());
        assert_eq!(resolve_config(Some(&path)), default_config());
    }

    #[test]
    fn test_missing_override_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert_eq!(resolve_config(Some(&path)), default_config());
        assert_eq!(resolve_config(None), default_config());
    }
}
