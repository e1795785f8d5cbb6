//! Bridge executor
//!
//! Runs one write-run-read cycle against the external executable. The
//! executable is a single shared resource with no reentrancy guarantee; the
//! caller must hold the service-wide critical section across `execute`.

use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::bridge::state::Invocation;
use crate::error::BridgeError;

/// Prefix of the output returned when the output file cannot be read.
pub const OUTPUT_PLACEHOLDER_PREFIX: &str = "Error reading output: ";

/// Handoff to the external batch executable through its input/output files.
#[derive(Debug)]
pub struct CommandBridge {
    executable: PathBuf,
    working_dir: PathBuf,
    input_path: PathBuf,
    output_path: PathBuf,
    invocations: AtomicU64,
}

impl CommandBridge {
    /// Creates a bridge for `executable`, which runs in its own directory.
    pub fn new(
        executable: impl Into<PathBuf>,
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        let executable = executable.into();
        let working_dir = executable
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            executable,
            working_dir,
            input_path: input_path.into(),
            output_path: output_path.into(),
            invocations: AtomicU64::new(0),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Number of invocations started so far.
    #[cfg(test)]
    fn invocation_count(&self) -> u64 {
        self.invocations.load(Ordering::Relaxed)
    }

    /// Writes `command` to the input file, runs the executable to completion
    /// and returns the output file's contents verbatim.
    ///
    /// Launch failures and non-zero exits are errors. An unreadable output
    /// file is not: its error text comes back as the output instead.
    pub fn execute(&self, command: &str) -> Result<String, BridgeError> {
        let id = self.invocations.fetch_add(1, Ordering::Relaxed) + 1;
        let mut invocation = Invocation::new(id);

        let result = self.run_cycle(&mut invocation, command);
        if result.is_err() {
            invocation.fail();
        }
        result
    }

    fn run_cycle(&self, invocation: &mut Invocation, command: &str) -> Result<String, BridgeError> {
        invocation.advance();
        self.write_input(command)?;

        invocation.advance();
        self.run_executable()?;

        invocation.advance();
        let output = match self.read_output() {
            Ok(output) => output,
            Err(e) => {
                warn!("Backend output unreadable, returning placeholder: {}", e);
                format!("{}{}", OUTPUT_PLACEHOLDER_PREFIX, e)
            }
        };

        invocation.advance();
        Ok(output)
    }

    fn write_input(&self, command: &str) -> Result<(), BridgeError> {
        fs::write(&self.input_path, format!("{}\n", command))
            .map_err(|e| BridgeError::InputWriteFailed(self.input_path.clone(), e))?;
        debug!(
            "Wrote {} bytes of command text to {}",
            command.len() + 1,
            self.input_path.display()
        );
        Ok(())
    }

    fn run_executable(&self) -> Result<(), BridgeError> {
        info!(
            "Running {} in {}",
            self.executable.display(),
            self.working_dir.display()
        );

        let status = Command::new(&self.executable)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .status()
            .map_err(|e| BridgeError::LaunchFailed(self.executable.clone(), e))?;

        if status.success() {
            Ok(())
        } else {
            Err(BridgeError::ExitFailure(self.executable.clone(), status))
        }
    }

    fn read_output(&self) -> Result<String, BridgeError> {
        fs::read_to_string(&self.output_path)
            .map_err(|e| BridgeError::OutputUnreadable(self.output_path.clone(), e))
    }
}
