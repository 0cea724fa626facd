//! REST API operations

mod collection;
mod download;
mod mutation;
mod request;

pub use download::*;
pub use mutation::*;
