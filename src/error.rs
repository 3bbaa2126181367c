//! Error handling types for dank-ls
//!
//! Resolution itself never fails from the client's point of view: every
//! problem collapses to "no link". These errors describe what went wrong
//! around it (settings, URIs, the document store) so it can be logged.

use thiserror::Error;

/// Comprehensive error type for server operations
#[derive(Debug, Error)]
pub enum DankError {
    /// Configuration could not be read or parsed
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// A URI could not be converted between representations
    #[error("Invalid URI: {uri}")]
    InvalidUri { uri: String },

    /// Document not found in store
    #[error("Document not found: {uri}")]
    DocumentNotFound { uri: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for server operations
pub type DankResult<T> = Result<T, DankError>;

/// Helper functions for common error patterns
impl DankError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        DankError::Config {
            message: message.into(),
        }
    }

    /// Create an invalid URI error
    pub fn invalid_uri(uri: impl Into<String>) -> Self {
        DankError::InvalidUri { uri: uri.into() }
    }

    /// Create a document not found error
    pub fn document_not_found(uri: impl Into<String>) -> Self {
        DankError::DocumentNotFound { uri: uri.into() }
    }
}
