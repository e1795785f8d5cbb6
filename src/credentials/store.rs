//! Flat-file credential storage
//!
//! Users are kept in two append-only logs: the usernames log holds one
//! username per line in registration order, the hash log holds one
//! `username:hash` pair per line. Lines are never rewritten or removed.

use log::{debug, info, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::credentials::hashing::{hash_password, verify_password};
use crate::credentials::validator::Credentials;
use crate::error::StoreError;

/// Storage capability set behind the registration and login endpoints.
///
/// Implementations do no locking of their own: callers hold the service-wide
/// critical section for the duration of each call.
pub trait CredentialStore: Send + Sync {
    /// Adds a new user. Fails with `DuplicateUser` if the username is taken.
    fn register(&self, credentials: &Credentials) -> Result<(), StoreError>;

    /// Checks a username/password pair against the stored hash.
    fn verify(&self, credentials: &Credentials) -> Result<(), StoreError>;

    /// Returns every registered username in registration order.
    fn list(&self) -> Result<Vec<String>, StoreError>;
}

/// Credential store backed by the usernames log and the hash log.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    users_path: PathBuf,
    passwords_path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(users_path: impl Into<PathBuf>, passwords_path: impl Into<PathBuf>) -> Self {
        Self {
            users_path: users_path.into(),
            passwords_path: passwords_path.into(),
        }
    }

    pub fn users_path(&self) -> &Path {
        &self.users_path
    }

    pub fn passwords_path(&self) -> &Path {
        &self.passwords_path
    }

    /// Reads the non-blank, trimmed usernames. A missing log reads as empty.
    fn read_usernames(&self) -> io::Result<Vec<String>> {
        match fs::read_to_string(&self.users_path) {
            Ok(contents) => Ok(contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn register(&self, credentials: &Credentials) -> Result<(), StoreError> {
        let username = &credentials.username;

        if self.read_usernames()?.iter().any(|existing| existing == username) {
            return Err(StoreError::DuplicateUser(username.clone()));
        }

        let hash = hash_password(&credentials.password);
        let users_len = file_len(&self.users_path)?;
        append_line(&self.users_path, username)?;

        // Both logs must grow together: undo the username if the hash fails.
        if let Err(e) = append_line(&self.passwords_path, &format!("{}:{}", username, hash)) {
            warn!(
                "Failed to append to {}, rolling back {}: {}",
                self.passwords_path.display(),
                self.users_path.display(),
                e
            );
            OpenOptions::new()
                .write(true)
                .open(&self.users_path)?
                .set_len(users_len)?;
            return Err(StoreError::from(e));
        }

        info!("Registered user {}", username);
        Ok(())
    }

    fn verify(&self, credentials: &Credentials) -> Result<(), StoreError> {
        let file = match File::open(&self.passwords_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(StoreError::NoUsers),
            Err(e) => return Err(StoreError::from(e)),
        };

        let mut saw_entry = false;
        for line in BufReader::new(file).lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            saw_entry = true;

            // The hash never contains a colon, so the last one is the separator.
            let Some((username, stored_hash)) = line.rsplit_once(':') else {
                warn!(
                    "Skipping malformed entry in {}",
                    self.passwords_path.display()
                );
                continue;
            };

            if username == credentials.username {
                return if verify_password(&credentials.password, stored_hash) {
                    debug!("Password verified for {}", username);
                    Ok(())
                } else {
                    Err(StoreError::IncorrectPassword(username.to_string()))
                };
            }
        }

        if saw_entry {
            Err(StoreError::UserNotFound(credentials.username.clone()))
        } else {
            Err(StoreError::NoUsers)
        }
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.read_usernames()?)
    }
}

/// Current length of `path`, zero if it does not exist yet.
fn file_len(path: &Path) -> io::Result<u64> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(metadata.len()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
        Err(e) => Err(e),
    }
}

/// Appends `line` plus a newline, creating the file if needed.
fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, FileCredentialStore) {
        let dir = TempDir::new().expect("tempdir");
        let store = FileCredentialStore::new(
            dir.path().join("users.txt"),
            dir.path().join("passwords.txt"),
        );
        (dir, store)
    }

    fn creds(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }

    #[test]
    fn register_writes_both_logs() {
        let (_dir, store) = store();
        store.register(&creds("alice", "secret1")).unwrap();

        let users = fs::read_to_string(store.users_path()).unwrap();
        let passwords = fs::read_to_string(store.passwords_path()).unwrap();
        assert_eq!(users, "alice\n");
        assert_eq!(passwords, format!("alice:{}\n", hash_password("secret1")));
    }

    #[test]
    fn duplicate_registration_fails_and_leaves_logs_untouched() {
        let (_dir, store) = store();
        store.register(&creds("alice", "secret1")).unwrap();
        let err = store.register(&creds("alice", "other")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateUser(ref u) if u == "alice"));

        let users = fs::read_to_string(store.users_path()).unwrap();
        let passwords = fs::read_to_string(store.passwords_path()).unwrap();
        assert_eq!(users.lines().count(), 1);
        assert_eq!(passwords.lines().count(), 1);
    }

    #[test]
    fn failed_hash_append_rolls_back_username() {
        let (_dir, store) = store();
        store.register(&creds("bob", "pw")).unwrap();
        fs::remove_file(store.passwords_path()).unwrap();
        fs::create_dir(store.passwords_path()).unwrap();

        let err = store.register(&creds("alice", "secret1")).unwrap_err();
        assert!(matches!(err, StoreError::IoError(_)));
        assert_eq!(fs::read_to_string(store.users_path()).unwrap(), "bob\n");

        fs::remove_dir(store.passwords_path()).unwrap();
        store.register(&creds("alice", "secret1")).unwrap();
        assert!(store.verify(&creds("alice", "secret1")).is_ok());
        assert_eq!(store.list().unwrap(), vec!["bob", "alice"]);
    }

    #[test]
    fn usernames_are_case_sensitive() {
        let (_dir, store) = store();
        store.register(&creds("alice", "pw")).unwrap();
        store.register(&creds("Alice", "pw")).unwrap();
        assert_eq!(store.list().unwrap(), vec!["alice", "Alice"]);
    }

    #[test]
    fn verify_distinguishes_failure_kinds() {
        let (_dir, store) = store();
        assert!(matches!(
            store.verify(&creds("bob", "x")),
            Err(StoreError::NoUsers)
        ));

        store.register(&creds("alice", "secret1")).unwrap();
        assert!(store.verify(&creds("alice", "secret1")).is_ok());
        assert!(matches!(
            store.verify(&creds("alice", "wrong")),
            Err(StoreError::IncorrectPassword(_))
        ));
        assert!(matches!(
            store.verify(&creds("bob", "x")),
            Err(StoreError::UserNotFound(_))
        ));
    }

    #[test]
    fn empty_hash_log_means_no_users() {
        let (_dir, store) = store();
        fs::write(store.passwords_path(), "\n\n").unwrap();
        assert!(matches!(
            store.verify(&creds("alice", "pw")),
            Err(StoreError::NoUsers)
        ));
    }

    #[test]
    fn first_matching_entry_wins() {
        let (_dir, store) = store();
        let contents = format!(
            "alice:{}\nalice:{}\n",
            hash_password("first"),
            hash_password("second")
        );
        fs::write(store.passwords_path(), contents).unwrap();

        assert!(store.verify(&creds("alice", "first")).is_ok());
        assert!(matches!(
            store.verify(&creds("alice", "second")),
            Err(StoreError::IncorrectPassword(_))
        ));
    }

    #[test]
    fn usernames_with_colons_round_trip() {
        let (_dir, store) = store();
        store.register(&creds("team:ops", "pw")).unwrap();
        assert!(store.verify(&creds("team:ops", "pw")).is_ok());
        assert!(matches!(
            store.verify(&creds("team", "pw")),
            Err(StoreError::UserNotFound(_))
        ));
    }

    #[test]
    fn list_skips_blank_lines_and_keeps_order() {
        let (_dir, store) = store();
        assert!(store.list().unwrap().is_empty());

        fs::write(store.users_path(), "u1\n\n  u2  \nu3\n").unwrap();
        assert_eq!(store.list().unwrap(), vec!["u1", "u2", "u3"]);
    }
}
