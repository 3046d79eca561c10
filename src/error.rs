// src/error.rs

//! Unified error handling for the gvp client.

use std::fmt;

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, GvpError>;

/// Unified client error type.
#[derive(Error, Debug)]
pub enum GvpError {
    /// The API envelope carried a non-empty `error` field
    #[error("Request failed: {0}")]
    Remote(String),

    /// A payload did not have the expected shape
    #[error("Decoding error in {context}: {message}")]
    Decoding { context: String, message: String },

    /// The operation cannot be performed on this value
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl GvpError {
    /// Create a remote error from the server-provided message.
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }

    /// Create a decoding error with context.
    pub fn decoding(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Decoding {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create an unsupported-operation error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// True for errors that indicate the remote schema has drifted.
    pub fn is_decoding(&self) -> bool {
        matches!(self, Self::Decoding { .. })
    }
}

impl From<serde_json::Error> for GvpError {
    fn from(error: serde_json::Error) -> Self {
        Self::decoding("json", error)
    }
}
