//! Package manager backends.

use std::fmt;

use super::platform::OsFamily;
use crate::error::{ProvisionError, Result};
use crate::shell::CommandSpec;

/// Native package manager used to install and remove packages.
///
/// The set is closed: each supported [`OsFamily`] maps to exactly one
/// backend, and every other platform is rejected by [`PackageManager::for_os`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Winget,
    Apt,
    Homebrew,
}

impl PackageManager {
    /// Select the backend for an operating system family.
    pub fn for_os(os: &OsFamily) -> Result<Self> {
        match os {
            OsFamily::Windows => Ok(PackageManager::Winget),
            OsFamily::Linux => Ok(PackageManager::Apt),
            OsFamily::MacOs => Ok(PackageManager::Homebrew),
            OsFamily::Other(name) => Err(ProvisionError::UnsupportedPlatform { os: name.clone() }),
        }
    }

    /// Executable name of the backend.
    pub fn binary(self) -> &'static str {
        match self {
            PackageManager::Winget => "winget",
            PackageManager::Apt => "apt",
            PackageManager::Homebrew => "brew",
        }
    }

    /// Command that installs a single package.
    pub fn install_command(self, package: &str) -> CommandSpec {
        match self {
            PackageManager::Winget => CommandSpec::new(
                self.binary(),
                ["install", "--id", package, "-e", "--silent"],
            ),
            PackageManager::Apt | PackageManager::Homebrew => {
                CommandSpec::new(self.binary(), ["install", package])
            }
        }
    }

    /// Command that removes a single package.
    pub fn uninstall_command(self, package: &str) -> CommandSpec {
        CommandSpec::new(self.binary(), ["uninstall", package])
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}
