//! Error types for voicedesk
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in voicedesk
#[derive(Debug, Error)]
pub enum VoiceDeskError {
    /// Agent name did not match any known agent
    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    /// Tool arguments or a tool-call line could not be understood
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON file persistence error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be loaded or is invalid
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML config parse error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for voicedesk operations
pub type Result<T> = std::result::Result<T, VoiceDeskError>;
