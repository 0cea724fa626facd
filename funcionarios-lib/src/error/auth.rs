//! Authentication error types

/// Errors raised while obtaining an access token.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No token is available (user not logged in).
    #[error("No access token available")]
    MissingToken,

    /// The token has expired and cannot be refreshed here.
    #[error("Access token expired")]
    TokenExpired,
}
