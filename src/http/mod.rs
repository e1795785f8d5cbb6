//! HTTP interface
//!
//! Wires the JSON endpoints and static asset serving onto the service context.

pub mod handlers;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod static_files;

pub use routes::build_router;
