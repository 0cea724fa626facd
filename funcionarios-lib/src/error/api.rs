//! API error types

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use super::FieldValidationError;

/// Errors that can occur during API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP error response from the API.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },

    /// The backend rejected the payload (HTTP 422).
    #[error("Validation failed: {message}")]
    Validation {
        /// Summary message from the backend.
        message: String,
        /// Per-field errors, in field order.
        fields: Vec<FieldValidationError>,
    },

    /// Network error during API call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse API response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

/// Error body shape returned by the backend.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: BTreeMap<String, Vec<String>>,
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Builds an error from a non-success status and its raw body.
    ///
    /// A 422 with an `errors` map becomes [`ApiError::Validation`]; anything
    /// else becomes [`ApiError::Http`] carrying the backend message if one
    /// was sent, or the raw body otherwise.
    pub fn from_status(status: u16, body: &str) -> Self {
        let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();

        match parsed {
            Some(parsed) if status == 422 => {
                let fields = parsed
                    .errors
                    .into_iter()
                    .flat_map(|(field, messages)| {
                        messages
                            .into_iter()
                            .map(move |message| FieldValidationError::new(field.clone(), message))
                    })
                    .collect();
                Self::Validation {
                    message: parsed
                        .message
                        .unwrap_or_else(|| "The given data was invalid".to_string()),
                    fields,
                }
            }
            Some(ErrorBody {
                message: Some(message),
                ..
            }) => Self::http(status, message),
            _ => Self::http(status, body.trim()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Validation { .. } => Some(422),
            _ => None,
        }
    }

    /// Returns the per-field validation errors, if any.
    pub fn field_errors(&self) -> &[FieldValidationError] {
        match self {
            Self::Validation { fields, .. } => fields,
            _ => &[],
        }
    }

    /// Returns `true` if this error is potentially retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::Network(_) => true,
            Self::Timeout(_) => true,
            _ => false,
        }
    }
}
