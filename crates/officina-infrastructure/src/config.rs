//! Application configuration.
//!
//! Read from `config.toml` in the Officina config directory. A missing
//! file yields the built-in defaults; a file that exists but cannot be
//! parsed is an error (silently ignoring a user's config is worse than
//! failing loudly).

use crate::paths::OfficinaPaths;
use officina_core::chat::Language;
use officina_core::error::{OfficinaError, Result};
use serde::{Deserialize, Serialize};
use std::fs;

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_api_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_model() -> String {
    "magicoder:7b-s-cl".to_string()
}

fn default_request_timeout_secs() -> u64 {
    900
}

/// Top-level configuration for the Officina binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfficinaConfig {
    /// Base URL of the Ollama inference server
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,
    /// Base URL of the authenticated backend (auth + VCS routes)
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Model used when a session does not specify one
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Default interface language for new sessions
    #[serde(default)]
    pub language: Language,
    /// Per-request timeout towards the inference server. Large models on
    /// CPU-only hosts can take minutes.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for OfficinaConfig {
    fn default() -> Self {
        Self {
            ollama_url: default_ollama_url(),
            api_url: default_api_url(),
            default_model: default_model(),
            language: Language::default(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl OfficinaConfig {
    /// Loads the configuration from `paths`, falling back to defaults
    /// when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the file exists but cannot be read or
    /// parsed.
    pub fn load(paths: &OfficinaPaths) -> Result<Self> {
        let path = paths.config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            OfficinaError::Config(format!("failed to read config file {:?}: {}", path, e))
        })?;
        toml::from_str(&content).map_err(|e| {
            OfficinaError::Config(format!("failed to parse config file {:?}: {}", path, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = OfficinaPaths::new(temp_dir.path());

        let config = OfficinaConfig::load(&paths).unwrap();
        assert_eq!(config.ollama_url, "http://localhost:11434");
        assert_eq!(config.default_model, "magicoder:7b-s-cl");
        assert_eq!(config.language, Language::It);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = OfficinaPaths::new(temp_dir.path());
        fs::write(
            paths.config_file(),
            "ollama_url = \"http://ollama.local:11434\"\nlanguage = \"en\"\n",
        )
        .unwrap();

        let config = OfficinaConfig::load(&paths).unwrap();
        assert_eq!(config.ollama_url, "http://ollama.local:11434");
        assert_eq!(config.language, Language::En);
        assert_eq!(config.request_timeout_secs, 900);
    }

    #[test]
    fn test_unparseable_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = OfficinaPaths::new(temp_dir.path());
        fs::write(paths.config_file(), "not = [valid").unwrap();

        assert!(matches!(
            OfficinaConfig::load(&paths),
            Err(OfficinaError::Config(_))
        ));
    }
}
