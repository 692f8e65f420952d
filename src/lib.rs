//! devprov - developer machine provisioning.
//!
//! devprov checks that a machine is ready to be set up (required tools on
//! PATH, free disk, available memory, network reachability), then installs
//! and removes packages with the platform's native package manager and, on
//! Windows, starts a WSL install.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Package list loading
//! - [`detection`] - OS family, package manager backend, host summary
//! - [`error`] - Error types and result aliases
//! - [`logging`] - Log file and stdout sinks
//! - [`packages`] - Concurrent installs and sequential removals
//! - [`requirements`] - Tool, resource and connectivity checks
//! - [`runner`] - Run orchestration and exit codes
//! - [`shell`] - Subprocess execution
//! - [`wsl`] - Windows Subsystem for Linux setup
//!
//! # Example
//!
//! ```
//! use devprov::detection::{OsFamily, PackageManager};
//!
//! let manager = PackageManager::for_os(&OsFamily::Linux).unwrap();
//! assert_eq!(manager.install_command("git").to_string(), "apt install git");
//! ```

pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod logging;
pub mod packages;
pub mod requirements;
pub mod runner;
pub mod shell;
pub mod wsl;

pub use error::{ProvisionError, Result};
