//! Windows Subsystem for Linux setup.

use tracing::{error, info};

use crate::detection::OsFamily;
use crate::shell::{CommandRunner, CommandSpec};

/// How the WSL step ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WslOutcome {
    /// Not a Windows host, or the step was disabled.
    Skipped,
    Succeeded,
    Failed { reason: String },
}

impl WslOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, WslOutcome::Failed { .. })
    }
}

/// Command that starts a WSL install.
pub fn wsl_install_command() -> CommandSpec {
    CommandSpec::new("wsl", ["--install"])
}

/// Start a WSL install on Windows; log and skip on every other platform.
///
/// There is no check for an existing installation, so re-running on a host
/// that already has WSL may report a failure. Failures are never fatal.
pub fn setup_wsl(os: &OsFamily, runner: &dyn CommandRunner) -> WslOutcome {
    if !os.is_windows() {
        info!("WSL is only supported on Windows.");
        return WslOutcome::Skipped;
    }

    info!("Setting up Windows Subsystem for Linux (WSL)...");
    match runner.run_checked(&wsl_install_command()) {
        Ok(_) => {
            info!("WSL installation initiated. A system restart may be required.");
            WslOutcome::Succeeded
        }
        Err(reason) => {
            error!("Failed to install WSL: {}", reason);
            WslOutcome::Failed { reason }
        }
    }
}
