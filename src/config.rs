//! Configuration management for the batch bridge server
//!
//! Values come from built-in defaults, an optional `config.toml`, and
//! `BRIDGE__*` environment overrides, in increasing order of precedence.

use config::{Config, Environment, File};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Locations searched for the configuration file, without extension
const CONFIG_PATHS: [&str; 2] = [
    "batch-bridge-server/config", // container layout: /app/batch-bridge-server/config.toml
    "config",                     // local development: ./config.toml
];

const ENV_PREFIX: &str = "BRIDGE";

/// Complete server configuration. Changes require a restart.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    // ═══ NETWORK ═══
    /// IP address the HTTP listener binds to
    pub bind_address: String,

    /// HTTP port
    pub port: u16,

    /// Directory served for static asset requests
    pub static_root: String,

    // ═══ BACKEND HANDOFF ═══
    /// Directory holding the executable, its handoff files and the credential logs
    pub backend_dir: String,

    /// Executable file name inside `backend_dir`
    pub executable: String,

    /// Command input file, overwritten per run
    pub input_file: String,

    /// Result output file, overwritten per run
    pub output_file: String,

    // ═══ CREDENTIAL LOGS ═══
    /// Usernames log, one username per line
    pub users_file: String,

    /// Hash log, one `username:hash` per line
    pub passwords_file: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 3000,
            static_root: ".".to_string(),
            backend_dir: "backend".to_string(),
            executable: "main.exe".to_string(),
            input_file: "input.txt".to_string(),
            output_file: "output.txt".to_string(),
            users_file: "users.txt".to_string(),
            passwords_file: "passwords.txt".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        match CONFIG_PATHS
            .iter()
            .find(|path| Path::new(&format!("{path}.toml")).is_file())
        {
            Some(path) => {
                info!("Loading configuration from {}.toml", path);
                builder = builder.add_source(File::with_name(path));
            }
            None => warn!(
                "No config.toml found (tried {:?}), using defaults",
                CONFIG_PATHS
            ),
        }

        let config: ServerConfig = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration rooted at `backend_dir`, listening on an
    /// ephemeral port.
    pub fn with_backend_dir(backend_dir: impl AsRef<Path>) -> Self {
        Self {
            port: 0,
            backend_dir: backend_dir.as_ref().to_string_lossy().into_owned(),
            ..Self::default()
        }
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.port == 0 {
            return Err(config::ConfigError::Message("port cannot be 0".into()));
        }

        if self.bind_address.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "bind_address cannot be empty".into(),
            ));
        }

        let required = [
            ("static_root", &self.static_root),
            ("backend_dir", &self.backend_dir),
            ("executable", &self.executable),
            ("input_file", &self.input_file),
            ("output_file", &self.output_file),
            ("users_file", &self.users_file),
            ("passwords_file", &self.passwords_file),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(config::ConfigError::Message(format!(
                    "{key} cannot be empty"
                )));
            }
        }

        if self.input_file == self.output_file {
            return Err(config::ConfigError::Message(
                "input_file and output_file must differ".into(),
            ));
        }

        if self.users_file == self.passwords_file {
            return Err(config::ConfigError::Message(
                "users_file and passwords_file must differ".into(),
            ));
        }

        Ok(())
    }

    /// Get bind address and port as socket address
    pub fn bind_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn static_root_path(&self) -> PathBuf {
        PathBuf::from(&self.static_root)
    }

    pub fn backend_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.backend_dir)
    }
}
