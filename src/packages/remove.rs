//! Sequential package removal.

use tracing::{error, info};

use super::report::{BatchReport, PackageAction, PackageOutcome};
use crate::detection::{OsFamily, PackageManager};
use crate::error::Result;
use crate::shell::CommandRunner;

/// Uninstall `packages` one at a time, in list order.
///
/// A failed removal is logged and recorded; the remaining packages are
/// still attempted.
pub fn remove_packages(
    os: &OsFamily,
    packages: &[String],
    runner: &dyn CommandRunner,
) -> Result<BatchReport> {
    let manager = PackageManager::for_os(os).inspect_err(|e| error!("{}", e))?;

    let mut outcomes = Vec::with_capacity(packages.len());
    for package in packages {
        info!("Removing {}...", package);

        let outcome = match runner.run_checked(&manager.uninstall_command(package)) {
            Ok(_) => {
                info!("{} removed successfully", package);
                PackageOutcome::succeeded(package, PackageAction::Remove)
            }
            Err(reason) => {
                error!("Failed to remove {}: {}", package, reason);
                PackageOutcome::failed(package, PackageAction::Remove, reason)
            }
        };
        outcomes.push(outcome);
    }

    Ok(BatchReport::new(outcomes))
}
