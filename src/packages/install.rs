//! Concurrent package installation.

use tracing::{error, info};

use super::pool::run_bounded;
use super::report::{BatchReport, PackageAction, PackageOutcome};
use crate::detection::{OsFamily, PackageManager};
use crate::error::Result;
use crate::shell::CommandRunner;

/// Install `packages` with the host's package manager on up to `jobs`
/// worker threads.
///
/// Each package is attempted independently; a failure is logged and
/// recorded in the report without affecting the others. If the worker pool
/// cannot be started, every package is recorded as failed. On an
/// unsupported platform nothing is run and the error is logged and
/// returned.
pub fn install_packages(
    os: &OsFamily,
    packages: &[String],
    runner: &dyn CommandRunner,
    jobs: usize,
) -> Result<BatchReport> {
    let manager = PackageManager::for_os(os).inspect_err(|e| error!("{}", e))?;

    let outcomes = run_bounded(packages, jobs, |package| {
        install_one(manager, package, runner)
    })
    .unwrap_or_else(|e| {
        error!("Could not start install workers: {}", e);
        packages
            .iter()
            .map(|package| PackageOutcome::failed(package, PackageAction::Install, e.to_string()))
            .collect()
    });

    Ok(BatchReport::new(outcomes))
}

fn install_one(
    manager: PackageManager,
    package: &str,
    runner: &dyn CommandRunner,
) -> PackageOutcome {
    info!("Installing {} with {}...", package, manager);

    match runner.run_checked(&manager.install_command(package)) {
        Ok(_) => {
            info!("{} installed successfully", package);
            PackageOutcome::succeeded(package, PackageAction::Install)
        }
        Err(reason) => {
            error!("Failed to install {}: {}", package, reason);
            PackageOutcome::failed(package, PackageAction::Install, reason)
        }
    }
}
