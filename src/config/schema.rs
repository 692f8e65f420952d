//! Configuration schema.

use serde::{Deserialize, Serialize};

/// Packages to install and remove.
///
/// Both lists are optional in the file and default to empty. Entries are
/// kept in file order; duplicates are passed through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupConfig {
    /// Packages to install.
    #[serde(default)]
    pub install: Vec<String>,

    /// Packages to uninstall.
    #[serde(default)]
    pub remove: Vec<String>,
}

impl SetupConfig {
    /// Whether there is nothing to install or remove.
    pub fn is_empty(&self) -> bool {
        self.install.is_empty() && self.remove.is_empty()
    }
}
