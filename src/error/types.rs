//! Error types
//!
//! Defines domain-specific error types for each component of the server.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Credential store errors
#[derive(Debug)]
pub enum StoreError {
    /// Username or password missing after trimming.
    MissingCredentials,
    /// Username carries characters that would corrupt the line-oriented logs.
    InvalidUsername(String),
    DuplicateUser(String),
    NoUsers,
    UserNotFound(String),
    IncorrectPassword(String),
    IoError(io::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::MissingCredentials => write!(f, "Username and password required"),
            StoreError::InvalidUsername(u) => write!(f, "Invalid username: {:?}", u),
            StoreError::DuplicateUser(u) => write!(f, "Username already exists: {}", u),
            StoreError::NoUsers => write!(f, "No users registered"),
            StoreError::UserNotFound(u) => write!(f, "User not found: {}", u),
            StoreError::IncorrectPassword(u) => write!(f, "Incorrect password for user: {}", u),
            StoreError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(error: io::Error) -> Self {
        StoreError::IoError(error)
    }
}

/// Command bridge errors
///
/// `OutputUnreadable` never leaves the bridge as an error: it is downgraded to
/// a placeholder output and logged as a warning.
#[derive(Debug)]
pub enum BridgeError {
    InputWriteFailed(PathBuf, io::Error),
    LaunchFailed(PathBuf, io::Error),
    ExitFailure(PathBuf, ExitStatus),
    OutputUnreadable(PathBuf, io::Error),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::InputWriteFailed(path, e) => {
                write!(f, "failed to write {}: {}", path.display(), e)
            }
            BridgeError::LaunchFailed(path, e) => {
                write!(f, "failed to launch {}: {}", path.display(), e)
            }
            BridgeError::ExitFailure(path, status) => {
                write!(f, "{} exited with {}", path.display(), status)
            }
            BridgeError::OutputUnreadable(path, e) => {
                write!(f, "failed to read {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for BridgeError {}

/// Static asset errors
#[derive(Debug)]
pub enum StaticFileError {
    InvalidPath(String),
    NotFound(String),
    IoError(io::Error),
}

impl fmt::Display for StaticFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaticFileError::InvalidPath(p) => write!(f, "Invalid path: {}", p),
            StaticFileError::NotFound(p) => write!(f, "File not found: {}", p),
            StaticFileError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StaticFileError {}

impl From<io::Error> for StaticFileError {
    fn from(error: io::Error) -> Self {
        StaticFileError::IoError(error)
    }
}

/// General server error that encompasses all error types
#[derive(Debug)]
pub enum ServiceError {
    Store(StoreError),
    Bridge(BridgeError),
    StaticFile(StaticFileError),
    /// A blocking worker task panicked or was cancelled.
    WorkerFailed(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Store(e) => write!(f, "Credential store error: {}", e),
            ServiceError::Bridge(e) => write!(f, "Command bridge error: {}", e),
            ServiceError::StaticFile(e) => write!(f, "Static file error: {}", e),
            ServiceError::WorkerFailed(e) => write!(f, "Worker task failed: {}", e),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<StoreError> for ServiceError {
    fn from(error: StoreError) -> Self {
        ServiceError::Store(error)
    }
}

impl From<BridgeError> for ServiceError {
    fn from(error: BridgeError) -> Self {
        ServiceError::Bridge(error)
    }
}

impl From<StaticFileError> for ServiceError {
    fn from(error: StaticFileError) -> Self {
        ServiceError::StaticFile(error)
    }
}
