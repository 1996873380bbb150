//! Error types for the Carfinder client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every Carfinder crate.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum CarfinderError {
    /// Request failed at the transport level or returned a non-success status
    #[error("HTTP error{}: {}", .status.map(|s| format!(" ({s})")).unwrap_or_default(), .message)]
    Http {
        status: Option<u16>,
        message: String,
    },

    /// Response body could not be decoded into the expected shape
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// A facet name outside the fixed facet set
    #[error("Unknown facet: '{0}'")]
    UnknownFacet(String),

    /// A query the catalog cannot evaluate
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CarfinderError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an Http error
    pub fn http(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an InvalidQuery error
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an HTTP error
    pub fn is_http(&self) -> bool {
        matches!(self, Self::Http { .. })
    }

    /// HTTP status code carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => *status,
            _ => None,
        }
    }

    /// Check if this is a decode error
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CarfinderError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CarfinderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CarfinderError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CarfinderError>`.
pub type Result<T> = std::result::Result<T, CarfinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_display_with_status() {
        let err = CarfinderError::http(Some(502), "bad gateway");
        assert_eq!(err.to_string(), "HTTP error (502): bad gateway");
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn test_http_display_without_status() {
        let err = CarfinderError::http(None, "connection refused");
        assert_eq!(err.to_string(), "HTTP error: connection refused");
        assert!(err.is_http());
    }

    #[test]
    fn test_from_serde_json_error() {
        let err: CarfinderError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.is_serialization());
    }
}
