//! HR dashboard data library
//!
//! Client-side tabular engine (filter, sort, paginate, entity stores and
//! table rendering) for the funcionarios HR backend, plus the REST client
//! that feeds it.

pub mod api;
pub mod auth;
pub mod cache;
pub mod error;
pub mod model;
pub mod response;
pub mod table;

mod client;

pub use client::*;
pub use response::CacheStatus;
pub use response::Response;
