//! Error types for Nexus
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Nexus operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, Gemini API interactions, audio decoding,
/// and history persistence.
#[derive(Error, Debug)]
pub enum NexusError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Gemini API errors (request failures, non-success responses, missing payloads)
    #[error("API error: {0}")]
    Api(String),

    /// Missing credentials for the Gemini API
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Audio decoding or playback errors
    #[error("Audio error: {0}")]
    Audio(String),

    /// File loading errors (unreadable or unsupported input files)
    #[error("File load error: {0}")]
    FileLoad(String),

    /// History persistence errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Nexus operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = NexusError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_api_error_display() {
        let error = NexusError::Api("no image data found in response".to_string());
        assert_eq!(
            error.to_string(),
            "API error: no image data found in response"
        );
    }

    #[test]
    fn test_missing_credentials_error_display() {
        let error = NexusError::MissingCredentials("GEMINI_API_KEY".to_string());
        assert_eq!(error.to_string(), "Missing credentials: GEMINI_API_KEY");
    }

    #[test]
    fn test_audio_error_display() {
        let error = NexusError::Audio("malformed audio payload: odd byte length".to_string());
        assert_eq!(
            error.to_string(),
            "Audio error: malformed audio payload: odd byte length"
        );
    }

    #[test]
    fn test_file_load_error_display() {
        let error = NexusError::FileLoad("unsupported image format".to_string());
        assert_eq!(
            error.to_string(),
            "File load error: unsupported image format"
        );
    }

    #[test]
    fn test_storage_error_display() {
        let error = NexusError::Storage("could not determine data directory".to_string());
        assert_eq!(
            error.to_string(),
            "Storage error: could not determine data directory"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: NexusError = io_error.into();
        assert!(matches!(error, NexusError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: NexusError = json_error.into();
        assert!(matches!(error, NexusError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: : yaml";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: NexusError = yaml_error.into();
        assert!(matches!(error, NexusError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NexusError>();
    }
}
