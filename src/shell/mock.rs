//! Mock command runner for testing.
//!
//! `MockRunner` implements [`CommandRunner`] without spawning anything. It
//! records every command it is asked to run and can be told to fail
//! commands that mention a given argument.
//!
//! # Example
//!
//! ```
//! use devprov::shell::{CommandRunner, CommandSpec, MockRunner};
//!
//! let runner = MockRunner::new().failing_on("nano");
//!
//! assert!(runner.run_checked(&CommandSpec::new("apt", ["install", "git"])).is_ok());
//! assert!(runner.run_checked(&CommandSpec::new("apt", ["uninstall", "nano"])).is_err());
//! assert_eq!(runner.commands().len(), 2);
//! ```

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::error::Result;

use super::command::{CommandResult, CommandRunner, CommandSpec};

/// Exit code reported for commands configured to fail.
pub const MOCK_FAILURE_CODE: i32 = 100;

/// Recording command runner.
///
/// Safe to share across the install worker pool; it also tracks the peak
/// number of commands in flight at once.
#[derive(Debug, Default)]
pub struct MockRunner {
    commands: Mutex<Vec<CommandSpec>>,
    fail_args: HashSet<String>,
    delay: Duration,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockRunner {
    /// Create a runner where every command succeeds immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any command whose arguments include `arg`.
    pub fn failing_on(mut self, arg: &str) -> Self {
        self.fail_args.insert(arg.to_string());
        self
    }

    /// Sleep for `delay` inside every command.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Commands run so far, in the order they started.
    pub fn commands(&self) -> Vec<CommandSpec> {
        self.commands
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Commands run so far, rendered as strings.
    pub fn command_lines(&self) -> Vec<String> {
        self.commands().iter().map(ToString::to_string).collect()
    }

    /// Highest number of commands that were running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, command: &CommandSpec) -> Result<CommandResult> {
        self.commands
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(command.clone());

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);

        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if command.args.iter().any(|arg| self.fail_args.contains(arg)) {
            Ok(CommandResult::failure(
                Some(MOCK_FAILURE_CODE),
                String::new(),
                format!("E: mock failure for {}", command),
                self.delay,
            ))
        } else {
            Ok(CommandResult::success(String::new(), String::new(), self.delay))
        }
    }
}
