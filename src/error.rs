//! Error types and handling for EPEX Monitor
//!
//! Every fallible operation in the crate returns [`Result`]. The price cycle
//! catches all of these at its boundary and turns them into the fallback price,
//! so none of them ever reaches a price consumer.

use thiserror::Error;

/// Result type alias for EPEX Monitor operations
pub type Result<T> = std::result::Result<T, EpexError>;

/// Main error type for EPEX Monitor
#[derive(Debug, Error)]
pub enum EpexError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Serialization/deserialization errors (YAML, JSON)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Publication document could not be read
    #[error("Document error: {message}")]
    Document { message: String },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Transport-level failures talking to the price API
    #[error("Network error: {message}")]
    Network { message: String },

    /// The price API answered, but not with a usable response
    #[error("API error: {message}")]
    Api { message: String },

    /// HTTP server errors
    #[error("Web server error: {message}")]
    Web { message: String },

    /// Validation errors
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },
}

impl EpexError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        EpexError::Config {
            message: message.into(),
        }
    }

    /// Create a new document error
    pub fn document<S: Into<String>>(message: S) -> Self {
        EpexError::Document {
            message: message.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        EpexError::Io {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        EpexError::Network {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        EpexError::Api {
            message: message.into(),
        }
    }

    /// Create a new web error
    pub fn web<S: Into<String>>(message: S) -> Self {
        EpexError::Web {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        EpexError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for EpexError {
    fn from(err: std::io::Error) -> Self {
        EpexError::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for EpexError {
    fn from(err: serde_yaml::Error) -> Self {
        EpexError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for EpexError {
    fn from(err: serde_json::Error) -> Self {
        EpexError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<quick_xml::de::DeError> for EpexError {
    fn from(err: quick_xml::de::DeError) -> Self {
        EpexError::document(err.to_string())
    }
}

impl From<reqwest::Error> for EpexError {
    fn from(err: reqwest::Error) -> Self {
        EpexError::network(err.to_string())
    }
}
