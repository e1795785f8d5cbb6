//! Request bodies
//!
//! Absent fields deserialize as empty strings so that validation, not JSON
//! parsing, reports missing credentials.

use serde::Deserialize;

/// Body of `POST /register` and `POST /login`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /run-backend`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CommandRequest {
    pub command: String,
}
