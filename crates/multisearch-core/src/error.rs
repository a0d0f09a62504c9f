//! Error types for Multisearch.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Classification of a failure, independent of its message.
///
/// The kind is what the state store and the UI reason about; the message is
/// only ever shown to a human.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchErrorKind {
    /// Empty or invalid raw input. Rejected before a request exists.
    Validation,
    /// The image could not be read or encoded.
    Encoding,
    /// The remote endpoint answered with a non-success status or a malformed body.
    Remote,
    /// The remote endpoint could not be reached.
    Transport,
    /// The orchestrator gave up waiting for the remote endpoint.
    Timeout,
    /// A resolution arrived for a request that is no longer active.
    StaleResponse,
    Config,
    Io,
    Serialization,
    Internal,
}

/// A shared error type for the entire Multisearch client.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum SearchError {
    /// Raw input rejected before building a request
    #[error("Invalid search input: {0}")]
    Validation(String),

    /// Image file unreadable or not encodable
    #[error("Failed to encode image '{file_name}': {message}")]
    Encoding { file_name: String, message: String },

    /// Non-success HTTP status, or a body that does not match the expected shape
    #[error("Remote search failed{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Remote {
        status: Option<u16>,
        message: String,
        body: Option<String>,
    },

    /// Network-level failure (DNS, connect, reset)
    #[error("Could not reach search service: {0}")]
    Transport(String),

    /// No answer within the allotted time
    #[error("Search timed out after {:?}", .0)]
    Timeout(Duration),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SearchError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn encoding(file_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Encoding {
            file_name: file_name.into(),
            message: message.into(),
        }
    }

    /// Creates a Remote error from an HTTP status and the raw response body.
    pub fn remote(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = if body.trim().is_empty() {
            "empty response body".to_string()
        } else {
            body.clone()
        };
        Self::Remote {
            status: Some(status),
            message,
            body: Some(body),
        }
    }

    /// Creates a Remote error for a successful status whose body cannot be understood.
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::Remote {
            status: None,
            message: message.into(),
            body: None,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Returns the classification of this error.
    pub fn kind(&self) -> SearchErrorKind {
        match self {
            Self::Validation(_) => SearchErrorKind::Validation,
            Self::Encoding { .. } => SearchErrorKind::Encoding,
            Self::Remote { .. } => SearchErrorKind::Remote,
            Self::Transport(_) => SearchErrorKind::Transport,
            Self::Timeout(_) => SearchErrorKind::Timeout,
            Self::Config(_) => SearchErrorKind::Config,
            Self::Io { .. } => SearchErrorKind::Io,
            Self::Serialization { .. } => SearchErrorKind::Serialization,
            Self::Internal(_) => SearchErrorKind::Internal,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_encoding(&self) -> bool {
        matches!(self, Self::Encoding { .. })
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// HTTP status attached to a Remote error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => *status,
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SearchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SearchError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for SearchError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for SearchError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, SearchError>`.
pub type Result<T> = std::result::Result<T, SearchError>;
