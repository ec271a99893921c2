//! Invocation of the external `brew` executable
//!
//! Every operation talks to Homebrew through [`CommandRunner`] so that the
//! process boundary can be swapped out in tests.

use crate::error::{RebrewError, Result};
use std::process::Command;
use tracing::debug;

/// Captured result of one external command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// Stdout followed by stderr, as one text blob
    pub fn combined(&self) -> String {
        let mut bytes = self.stdout.clone();
        bytes.extend_from_slice(&self.stderr);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Turn a non-zero exit into an `ExternalCommand` error naming `command`
    pub fn into_success(self, command: &str) -> Result<Self> {
        if self.success {
            return Ok(self);
        }

        let stderr = String::from_utf8_lossy(&self.stderr).trim().to_string();
        let message = if stderr.is_empty() {
            "exited with non-zero status".to_string()
        } else {
            stderr
        };

        Err(RebrewError::ExternalCommand {
            command: command.to_string(),
            message,
        })
    }
}

/// Runs the package manager with a list of arguments
pub trait CommandRunner: Send + Sync + 'static {
    /// Spawn the program and wait for it, capturing all output.
    ///
    /// Only a failure to spawn is an error here; exit status is reported
    /// through [`CommandOutput::success`].
    fn run(&self, args: &[&str]) -> Result<CommandOutput>;

    /// Human-readable command line, used in error messages
    fn command_line(&self, args: &[&str]) -> String;
}

/// Runner backed by a real executable on `PATH`
#[derive(Debug, Clone)]
pub struct BrewRunner {
    program: String,
}

impl BrewRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for BrewRunner {
    fn default() -> Self {
        Self::new("brew")
    }
}

impl CommandRunner for BrewRunner {
    fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        debug!(program = %self.program, ?args, "spawning");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| RebrewError::ExternalCommand {
                command: self.command_line(args),
                message: e.to_string(),
            })?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    fn command_line(&self, args: &[&str]) -> String {
        let mut line = self.program.clone();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}
