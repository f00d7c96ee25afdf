//! Error types for stagehand
//!
//! Provides a unified error type used across all stagehand crates.

use std::path::PathBuf;

/// Main error type for stagehand operations
#[derive(Debug, thiserror::Error)]
pub enum StagehandError {
    // === IO Errors ===

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    // === Settings Document Errors ===

    #[error("Failed to parse settings document {path}: {source}")]
    SettingsParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Settings document {path} is not a JSON object")]
    SettingsNotObject { path: PathBuf },

    // === Connection Errors ===

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Connection closed unexpectedly")]
    ConnectionClosed,

    #[error("Login rejected: {0}")]
    LoginRejected(String),

    // === Protocol Errors ===

    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    // === Configuration Errors ===

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration at {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    // === Internal Errors ===

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StagehandError {
    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid-message error
    pub fn invalid_message(msg: impl Into<String>) -> Self {
        Self::InvalidMessage(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Check if the error is worth retrying the connection over
    ///
    /// Transport-level failures are transient; everything else
    /// (bad config, rejected login) needs operator attention.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StagehandError::Io(_)
                | StagehandError::Connection(_)
                | StagehandError::ConnectionClosed
        )
    }
}

/// Result type alias using StagehandError
pub type Result<T> = std::result::Result<T, StagehandError>;
