//! Configuration management for Nexus
//!
//! This module handles loading, parsing, and validating configuration
//! from a YAML file with per-field defaults. The Gemini API key is
//! deliberately not part of the file: it is read from the environment
//! by the client so credentials never land on disk.

use crate::error::{NexusError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Nexus
///
/// Holds the Gemini endpoint/model settings and speech defaults.
/// Every field has a default, so running without a config file works.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Gemini API configuration
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Speech synthesis defaults
    #[serde(default)]
    pub speech: SpeechConfig,
}

/// Gemini API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Base URL for the Gemini API (useful for tests and local mocks)
    ///
    /// When set to a non-default value, all `generateContent` endpoints are
    /// built against this base, which allows tests to point the client at a
    /// mock server.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Model used for chat and image analysis
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Model used for image generation
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Model used for speech synthesis
    #[serde(default = "default_speech_model")]
    pub speech_model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_chat_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_speech_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            chat_model: default_chat_model(),
            image_model: default_image_model(),
            speech_model: default_speech_model(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Speech synthesis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Default prebuilt voice (Kore, Puck, Charon, Fenrir, Zephyr)
    #[serde(default = "default_voice")]
    pub voice: String,
}

fn default_voice() -> String {
    "Kore".to_string()
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            voice: default_voice(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// A missing file is not an error: defaults are applied so the CLI
    /// works out of the box. A present but malformed file is an error.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    ///
    /// # Examples
    ///
    /// ```
    /// use nexus::config::Config;
    ///
    /// let config = Config::load("does/not/exist.yaml").unwrap();
    /// assert_eq!(config.gemini.chat_model, "gemini-3-flash-preview");
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| NexusError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: Config = serde_yaml::from_str(&contents)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a model name is empty or the
    /// request timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.gemini.chat_model.is_empty() {
            return Err(NexusError::Config("chat_model must not be empty".to_string()).into());
        }
        if self.gemini.image_model.is_empty() {
            return Err(NexusError::Config("image_model must not be empty".to_string()).into());
        }
        if self.gemini.speech_model.is_empty() {
            return Err(NexusError::Config("speech_model must not be empty".to_string()).into());
        }
        if self.gemini.timeout_seconds == 0 {
            return Err(
                NexusError::Config("timeout_seconds must be greater than zero".to_string()).into(),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(
            config.gemini.api_base,
            "https://generativelanguage.googleapis.com"
        );
        assert_eq!(config.gemini.chat_model, "gemini-3-flash-preview");
        assert_eq!(config.gemini.image_model, "gemini-2.5-flash-image");
        assert_eq!(config.gemini.speech_model, "gemini-2.5-flash-preview-tts");
        assert_eq!(config.gemini.timeout_seconds, 120);
        assert_eq!(config.speech.voice, "Kore");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load("no/such/config.yaml").unwrap();
        assert_eq!(config.speech.voice, "Kore");
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gemini:\n  chat_model: custom-model").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.gemini.chat_model, "custom-model");
        // Untouched fields keep their defaults
        assert_eq!(config.gemini.image_model, "gemini-2.5-flash-image");
        assert_eq!(config.speech.voice, "Kore");
    }

    #[test]
    fn test_load_malformed_file_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gemini: [not, a, map").unwrap();

        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_model() {
        let mut config = Config::default();
        config.gemini.chat_model = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.gemini.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.gemini.chat_model, config.gemini.chat_model);
        assert_eq!(parsed.speech.voice, config.speech.voice);
    }
}
