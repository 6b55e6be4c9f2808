//! Error types for FlowCanvas.
//!
//! All errors in FlowCanvas are represented by the `FlowCanvasError` enum,
//! which provides specific variants for different error categories.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all FlowCanvas operations.
///
/// Graph mutations never produce an error; unknown ids are reported through
/// return values. Errors come from the edges of the system: configuration,
/// import decoding, the command queue and the HTTP collaborators.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum FlowCanvasError {
    /// Configuration parsing or validation errors.
    #[error("{0}")]
    Config(String),

    /// Data conversion errors (JSON, TOML).
    #[error("{0}")]
    Convert(String),

    /// Incoming workflow document does not match any known shape.
    #[error("{0}")]
    Import(String),

    /// Command queue errors.
    #[error("{0}")]
    Queue(String),

    /// Transport level HTTP errors.
    #[error("{0}")]
    Http(String),

    /// Backend rejected the workflow with a non-2xx status.
    #[error("status: {status}, message: {message}")]
    Save {
        status: u16,
        message: String,
    },

    /// Document failed a precondition before it was sent.
    #[error("{0}")]
    Validation(String),

    /// Request was abandoned because the client was closed.
    #[error("{0}")]
    Cancelled(String),

    /// I/O operation errors.
    #[error("{0}")]
    IoError(String),
}

impl From<std::io::Error> for FlowCanvasError {
    fn from(error: std::io::Error) -> Self {
        FlowCanvasError::IoError(error.to_string())
    }
}

impl From<serde_json::Error> for FlowCanvasError {
    fn from(error: serde_json::Error) -> Self {
        FlowCanvasError::Convert(error.to_string())
    }
}

impl From<toml::de::Error> for FlowCanvasError {
    fn from(error: toml::de::Error) -> Self {
        FlowCanvasError::Config(error.to_string())
    }
}

impl From<reqwest::Error> for FlowCanvasError {
    fn from(error: reqwest::Error) -> Self {
        FlowCanvasError::Http(error.to_string())
    }
}

impl From<jsonschema::ValidationError<'_>> for FlowCanvasError {
    fn from(error: jsonschema::ValidationError<'_>) -> Self {
        FlowCanvasError::Import(error.to_string())
    }
}
