//! Error types

mod api;
mod auth;
mod validation;

pub use api::*;
pub use auth::*;
pub use validation::*;

/// Top-level error returned by client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backend rejected or failed the request.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// No usable access token.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Failed to serialize a request body.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failed to encode or decode a cached collection.
    #[error("Cache error: {0}")]
    Cache(String),

    /// Local filesystem error (downloads).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the HTTP status code if the backend answered with an error status.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(api) => api.status_code(),
            _ => None,
        }
    }

    /// Returns `true` if retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(api) => api.is_retryable(),
            _ => false,
        }
    }
}
