//! Command execution.

use crate::error::{ProvisionError, Result};
use std::fmt;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// A program and its argument vector.
///
/// Programs are spawned directly, never through a shell, so package names
/// are passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Executable name, resolved against PATH by the OS.
    pub program: String,

    /// Arguments, in order.
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a command from a program and its arguments.
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Human-readable reason for a failed command.
    ///
    /// Includes the exit status and the last non-empty line of stderr,
    /// which is where package managers put their one-line diagnosis.
    pub fn failure_reason(&self, command: &CommandSpec) -> String {
        let status = match self.exit_code {
            Some(code) => format!("'{}' returned non-zero exit status {}", command, code),
            None => format!("'{}' was terminated by a signal", command),
        };

        match self.stderr.lines().rev().find(|l| !l.trim().is_empty()) {
            Some(line) => format!("{} ({})", status, line.trim()),
            None => status,
        }
    }
}

/// Runs external commands.
///
/// Implementations must be shareable across the install worker pool.
pub trait CommandRunner: Sync {
    /// Run a command to completion.
    ///
    /// Returns `Err` only when the process could not be started; a process
    /// that starts and exits non-zero is an `Ok` result with
    /// `success == false`.
    fn run(&self, command: &CommandSpec) -> Result<CommandResult>;

    /// Run a command, folding spawn errors and non-zero exits into a
    /// failure reason suitable for logging.
    fn run_checked(&self, command: &CommandSpec) -> std::result::Result<CommandResult, String> {
        match self.run(command) {
            Ok(result) if result.success => Ok(result),
            Ok(result) => Err(result.failure_reason(command)),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CommandSpec) -> Result<CommandResult> {
        let start = Instant::now();

        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                tracing::debug!("Failed to spawn {}: {}", command.program, e);
                ProvisionError::CommandFailed {
                    command: command.to_string(),
                    code: None,
                }
            })?;

        let duration = start.elapsed();
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        tracing::debug!(
            "{} finished in {:?} with status {:?}",
            command,
            duration,
            output.status.code()
        );

        if output.status.success() {
            Ok(CommandResult::success(stdout, stderr, duration))
        } else {
            Ok(CommandResult::failure(
                output.status.code(),
                stdout,
                stderr,
                duration,
            ))
        }
    }
}
