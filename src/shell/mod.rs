//! Subprocess execution.
//!
//! Every external program the provisioner touches (package managers, the
//! WSL installer) goes through the [`CommandRunner`] trait so that tests can
//! substitute a [`MockRunner`] for the real [`SystemRunner`].

pub mod command;
pub mod mock;

pub use command::{CommandResult, CommandRunner, CommandSpec, SystemRunner};
pub use mock::MockRunner;
