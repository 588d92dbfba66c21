//! Application error types for the PortfolioGen client data layer.
//!
//! These errors are serializable so an embedding shell can forward them to
//! its UI as structured JSON with meaningful messages.

use serde::Serialize;
use thiserror::Error;

/// Errors produced by the API client and the dashboard controller.
///
/// All variants serialize to a structured JSON object for frontend consumption.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
    /// The backend rejected the session (401). The caller must navigate to
    /// `login_url`; this is never shown as an error state.
    #[error("Authentication required")]
    AuthRequired { login_url: String },

    /// The backend answered with a non-success status other than 401.
    #[error("API error ({status}): {message}")]
    Http {
        status: u16,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        endpoint: Option<String>,
    },

    /// A success response carried a body that could not be parsed as the
    /// expected JSON shape.
    #[error("Decode error: {message}")]
    Decode {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        endpoint: Option<String>,
    },

    /// Network-level failure (DNS, connection refused, timeout).
    #[error("Network error: {message}")]
    Transport { message: String },

    /// A local precondition failed before any request was issued.
    #[error("Invalid input: {message}")]
    Validation {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        field: Option<String>,
    },
}

impl ApiError {
    /// Create an authentication-required error carrying the login URL.
    pub fn auth_required(login_url: impl Into<String>) -> Self {
        Self::AuthRequired {
            login_url: login_url.into(),
        }
    }

    /// Create an HTTP error without endpoint context.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            endpoint: None,
        }
    }

    /// Create an HTTP error with endpoint context.
    pub fn http_full(status: u16, message: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            endpoint: Some(endpoint.into()),
        }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            endpoint: None,
        }
    }

    /// Create a decode error with endpoint context.
    pub fn decode_at(message: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            endpoint: Some(endpoint.into()),
        }
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a validation error with field name.
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Check if this error requires re-authentication.
    pub fn is_auth_required(&self) -> bool {
        matches!(self, Self::AuthRequired { .. })
    }

    /// Get the login URL if this is an authentication-required error.
    pub fn login_url(&self) -> Option<&str> {
        match self {
            Self::AuthRequired { login_url } => Some(login_url),
            _ => None,
        }
    }

    /// Check if this is a premium-gated rejection.
    ///
    /// The backend signals the gate either with 402 Payment Required or with
    /// a message mentioning the premium tier; it is a convention layered on
    /// top of a plain HTTP error, not a distinct wire kind.
    pub fn is_premium_gated(&self) -> bool {
        match self {
            Self::Http { status, message, .. } => {
                *status == 402 || message.to_lowercase().contains("premium")
            }
            _ => false,
        }
    }
}

// Conversions from common error types

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::transport("Request timed out")
        } else if err.is_connect() {
            Self::transport("Failed to connect to server")
        } else if err.is_decode() {
            Self::decode(err.to_string())
        } else {
            Self::transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(format!("JSON error: {}", err))
    }
}
