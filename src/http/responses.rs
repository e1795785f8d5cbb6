//! Response texts
//!
//! Plain-text bodies returned by the endpoints.

pub const ACCOUNT_CREATED: &str = "Account created.";
pub const LOGIN_SUCCESSFUL: &str = "Login successful.";

pub const CREDENTIALS_REQUIRED: &str = "Username and password required.";
pub const INVALID_USERNAME: &str = "Invalid username.";
pub const USERNAME_EXISTS: &str = "Username already exists.";
pub const NO_USERS: &str = "No users registered.";
pub const INCORRECT_PASSWORD: &str = "Incorrect password.";
pub const USER_NOT_FOUND: &str = "User not found.";

pub const BACKEND_ERROR_PREFIX: &str = "Error running backend: ";
pub const INTERNAL_ERROR: &str = "Internal server error.";
pub const NOT_FOUND: &str = "Not Found";
