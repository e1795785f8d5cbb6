//! Credential validation
//!
//! Normalizes the raw username/password pair received from a client. The
//! username is trimmed; the password is kept verbatim.

use crate::error::StoreError;

/// A validated username/password pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Validates raw client input and returns normalized credentials.
///
/// Fails with `MissingCredentials` when the trimmed username or the password
/// is empty, and with `InvalidUsername` when the username contains a line
/// break or NUL, which would split a log line in two.
pub fn validate_credentials(username: &str, password: &str) -> Result<Credentials, StoreError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(StoreError::MissingCredentials);
    }

    if username.contains(['\r', '\n', '\0']) {
        return Err(StoreError::InvalidUsername(username.to_string()));
    }

    Ok(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_username_but_not_password() {
        let creds = validate_credentials("  alice \t", " secret ").unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, " secret ");
    }

    #[test]
    fn rejects_missing_fields() {
        assert!(matches!(
            validate_credentials("", "pw"),
            Err(StoreError::MissingCredentials)
        ));
        assert!(matches!(
            validate_credentials("   ", "pw"),
            Err(StoreError::MissingCredentials)
        ));
        assert!(matches!(
            validate_credentials("alice", ""),
            Err(StoreError::MissingCredentials)
        ));
    }

    #[test]
    fn whitespace_password_is_accepted() {
        assert!(validate_credentials("alice", "   ").is_ok());
    }

    #[test]
    fn rejects_embedded_line_breaks() {
        assert!(matches!(
            validate_credentials("ali\nce", "pw"),
            Err(StoreError::InvalidUsername(_))
        ));
    }
}
