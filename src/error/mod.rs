//! Error handling
//!
//! Defines error types for the credential store, the command bridge and the
//! HTTP layer, and maps them onto HTTP responses.

pub mod handlers;
pub mod types;

pub use types::*;
