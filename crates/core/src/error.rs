//! Error types for Catalog Admin
//!
//! This module provides unified error handling across the workspace:
//! local validation failures, backend and network failures, response
//! parsing, and configuration errors.

use thiserror::Error;

/// The main error type for Catalog Admin
#[derive(Debug, Error)]
pub enum CatalogError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// One or more required form fields are empty
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    // ========================================================================
    // Backend Errors
    // ========================================================================
    /// The request never produced a response (connect, timeout, ...)
    #[error("Request failed: {message}")]
    Request {
        message: String,
        timeout: bool,
        connect: bool,
    },

    /// The backend answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// A record referenced by id does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Missing required configuration
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl CatalogError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        CatalogError::Validation(msg.into())
    }

    /// Create a request error that is neither a timeout nor a connect failure
    pub fn request(msg: impl Into<String>) -> Self {
        CatalogError::Request {
            message: msg.into(),
            timeout: false,
            connect: false,
        }
    }

    /// Create an API status error
    pub fn api(status: u16, msg: impl Into<String>) -> Self {
        CatalogError::Api {
            status,
            message: msg.into(),
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        CatalogError::Internal(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        CatalogError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error was raised locally, before any backend call
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CatalogError::Validation(_) | CatalogError::MissingFields(_)
        )
    }

    /// Check if this error came from the network or the backend
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            CatalogError::Request { .. } | CatalogError::Api { .. } | CatalogError::Parse(_)
        )
    }

    /// Check if this error is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::NotFound(_) | CatalogError::Api { status: 404, .. }
        )
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            CatalogError::InvalidConfig(_) | CatalogError::MissingConfig(_)
        )
    }

    /// Text suitable for a notification shown to the user
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Validation(msg) => msg.clone(),
            CatalogError::MissingFields(fields) => {
                format!("Please complete all fields ({}).", fields.join(", "))
            }
            CatalogError::Request { timeout: true, .. } => {
                "Request timed out. Please try again.".to_string()
            }
            CatalogError::Request { connect: true, .. } => {
                "Unable to connect to the server. Please check your connection.".to_string()
            }
            CatalogError::Request { .. } => "An unexpected network error occurred.".to_string(),
            CatalogError::Api { message, .. } => message.clone(),
            CatalogError::Parse(_) => "Received an unexpected response from the server.".to_string(),
            CatalogError::NotFound(what) => format!("{} was not found.", what),
            other => other.to_string(),
        }
    }
}

/// Result type alias using CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> CatalogResult<T>;
}

impl<T, E: Into<CatalogError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> CatalogResult<T> {
        self.map_err(|e| {
            let err: CatalogError = e.into();
            CatalogError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
