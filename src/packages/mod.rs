//! Package installation and removal through the native package manager.
//!
//! Installs run concurrently on a bounded pool; removals run one at a
//! time. Both return a [`BatchReport`] so the caller can decide the exit
//! status.

pub mod install;
pub mod pool;
pub mod remove;
pub mod report;

pub use install::install_packages;
pub use pool::{default_jobs, run_bounded};
pub use remove::remove_packages;
pub use report::{BatchReport, PackageAction, PackageOutcome, PackageStatus};
