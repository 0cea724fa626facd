//! Authentication
//!
//! Login and session storage live outside this crate; the client only needs
//! something that hands it a bearer token before each request.

mod token;

pub use token::AccessToken;
pub use token::StaticTokenProvider;
pub use token::TokenProvider;
