//! Error types for alt text generation.
//!
//! Errors are split by concern so callers can tell a missing credential from
//! an unreadable image from a failed API call without matching on message text.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::ResultSet;

/// Top-level error type for alttext operations.
#[derive(Error, Debug)]
pub enum AltTextError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Single-image pipeline errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// A batch stopped at a failing image
    #[error(transparent)]
    Batch(#[from] Box<BatchError>),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// Endpoint or API key is not set
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),
}

/// Errors for a single image, from reading the file to parsing the model's reply.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// File not found
    #[error("Image file not found at path: {0}")]
    FileNotFound(PathBuf),

    /// File exists but could not be read
    #[error("Error reading image file {path}: {message}")]
    Unreadable { path: PathBuf, message: String },

    /// File has no content
    #[error("Image file is empty: {0}")]
    EmptyImage(PathBuf),

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Inference API failed (network, HTTP status, or malformed body)
    #[error("LLM error: {message}")]
    Llm {
        message: String,
        status_code: Option<u16>,
    },

    /// Operation timed out
    #[error("Timeout in {stage} stage for {path} after {timeout_ms}ms")]
    Timeout {
        path: PathBuf,
        stage: String,
        timeout_ms: u64,
    },
}

/// A batch aborted at its first failing image.
///
/// `completed` holds the images described before the failure; the failing
/// image is never part of it.
#[derive(Error, Debug)]
#[error("Failed to describe {file_name}: {source}")]
pub struct BatchError {
    /// Filename of the image that failed
    pub file_name: String,
    /// Underlying failure
    #[source]
    pub source: PipelineError,
    /// Results for images processed before the failure
    pub completed: ResultSet,
}

/// Convenience type alias for alttext results.
pub type Result<T> = std::result::Result<T, AltTextError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_names_path() {
        let err = PipelineError::FileNotFound(PathBuf::from("/tmp/missing.png"));
        let msg = err.to_string();
        assert!(msg.contains("not found"));
        assert!(msg.contains("/tmp/missing.png"));
    }

    #[test]
    fn test_batch_error_message_names_file() {
        let err = BatchError {
            file_name: "cat.jpg".to_string(),
            source: PipelineError::Llm {
                message: "HTTP 401".to_string(),
                status_code: Some(401),
            },
            completed: ResultSet::new(),
        };
        let msg = err.to_string();
        assert!(msg.contains("cat.jpg"));
        assert!(msg.contains("HTTP 401"));
    }

    #[test]
    fn test_missing_credentials_converts_to_top_level() {
        let err: AltTextError =
            ConfigError::MissingCredentials("AZURE_OPENAI_API_KEY not set".into()).into();
        assert!(err.to_string().contains("AZURE_OPENAI_API_KEY"));
    }
}
