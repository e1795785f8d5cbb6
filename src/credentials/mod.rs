//! Credential store
//!
//! Handles user registration, credential validation and password hashing
//! against the flat-file user registry.

pub mod hashing;
pub mod store;
pub mod validator;

pub use store::{CredentialStore, FileCredentialStore};
pub use validator::{Credentials, validate_credentials};
