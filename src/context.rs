//! Service context
//!
//! Owns the process-wide lock together with the credential store and the
//! command bridge. Every operation runs inside one critical section, so a
//! login, a registration and a backend run never overlap.

use log::{info, warn};
use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::bridge::CommandBridge;
use crate::config::ServerConfig;
use crate::credentials::{CredentialStore, FileCredentialStore, validate_credentials};
use crate::error::{BridgeError, StoreError};

pub struct ServiceContext {
    lock: Mutex<()>,
    store: Box<dyn CredentialStore>,
    bridge: CommandBridge,
}

impl ServiceContext {
    pub fn new(store: Box<dyn CredentialStore>, bridge: CommandBridge) -> Self {
        Self {
            lock: Mutex::new(()),
            store,
            bridge,
        }
    }

    /// Builds the file-backed store and the bridge from configuration.
    ///
    /// Paths are made absolute up front so the executable launch does not
    /// depend on the server's working directory.
    pub fn from_config(config: &ServerConfig) -> io::Result<Self> {
        let backend_dir = std::path::absolute(config.backend_dir_path())?;

        let store = FileCredentialStore::new(
            backend_dir.join(&config.users_file),
            backend_dir.join(&config.passwords_file),
        );
        let bridge = CommandBridge::new(
            backend_dir.join(&config.executable),
            backend_dir.join(&config.input_file),
            backend_dir.join(&config.output_file),
        );

        info!(
            "Backend executable: {}, credential logs: {} / {}",
            bridge.executable().display(),
            store.users_path().display(),
            store.passwords_path().display()
        );

        Ok(Self::new(Box::new(store), bridge))
    }

    /// Acquires the critical section. The lock guards no data, so a panic in
    /// a previous holder leaves nothing inconsistent and poisoning is ignored.
    fn critical_section(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register(&self, username: &str, password: &str) -> Result<(), StoreError> {
        let credentials = validate_credentials(username, password)?;
        let _guard = self.critical_section();
        self.store.register(&credentials)
    }

    pub fn login(&self, username: &str, password: &str) -> Result<(), StoreError> {
        let credentials = validate_credentials(username, password)?;
        let _guard = self.critical_section();
        self.store.verify(&credentials)?;
        info!("User {} logged in", credentials.username);
        Ok(())
    }

    /// Lists usernames in registration order. Read failures yield an empty
    /// list and are only logged.
    pub fn list_users(&self) -> Vec<String> {
        let _guard = self.critical_section();
        match self.store.list() {
            Ok(users) => users,
            Err(e) => {
                warn!("User list unavailable, returning empty list: {}", e);
                Vec::new()
            }
        }
    }

    /// Runs one backend command. The lock stays held for the whole
    /// write-run-read cycle.
    pub fn execute(&self, command: &str) -> Result<String, BridgeError> {
        let _guard = self.critical_section();
        self.bridge.execute(command)
    }
}
