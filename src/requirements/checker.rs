//! Required tool checks.
//!
//! A provisioning run shells out to the platform package manager, so the
//! first thing it does is confirm those executables are reachable. The
//! lookup walks PATH directly rather than invoking `which`, whose behavior
//! varies across systems.

use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::detection::{OsFamily, PackageManager};
use crate::error::{ProvisionError, Result};

/// Finds executables by name.
pub trait ToolLocator {
    /// Full path to `tool`, or `None` if it cannot be found.
    fn locate(&self, tool: &str) -> Option<PathBuf>;
}

/// Resolves tools against a list of PATH directories.
#[derive(Debug, Clone, Default)]
pub struct PathLocator {
    entries: Vec<PathBuf>,
    extensions: Vec<String>,
}

impl PathLocator {
    /// Locator over the process PATH (and PATHEXT on Windows).
    pub fn from_env() -> Self {
        let entries = std::env::var_os("PATH")
            .map(|path| std::env::split_paths(&path).collect())
            .unwrap_or_default();

        let extensions = if cfg!(windows) {
            std::env::var("PATHEXT")
                .unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string())
                .split(';')
                .filter(|ext| !ext.is_empty())
                .map(|ext| ext.to_lowercase())
                .collect()
        } else {
            Vec::new()
        };

        Self {
            entries,
            extensions,
        }
    }

    /// Locator over explicit directories, with no extension probing.
    pub fn new(entries: Vec<PathBuf>) -> Self {
        Self {
            entries,
            extensions: Vec::new(),
        }
    }

    fn candidates(&self, dir: &Path, tool: &str) -> Vec<PathBuf> {
        let mut candidates = vec![dir.join(tool)];
        for ext in &self.extensions {
            candidates.push(dir.join(format!("{}{}", tool, ext)));
        }
        candidates
    }
}

impl ToolLocator for PathLocator {
    fn locate(&self, tool: &str) -> Option<PathBuf> {
        self.entries
            .iter()
            .flat_map(|dir| self.candidates(dir, tool))
            .find(|candidate| candidate.is_file() && is_executable(candidate))
    }
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    true
}

/// Tools a run needs: the host's package manager (when the platform has
/// one) followed by any extra names, without duplicates.
pub fn required_tools(os: &OsFamily, extra: &[String]) -> Vec<String> {
    let mut tools: Vec<String> = Vec::new();

    if let Ok(manager) = PackageManager::for_os(os) {
        tools.push(manager.binary().to_string());
    }

    for tool in extra {
        if !tools.contains(tool) {
            tools.push(tool.clone());
        }
    }

    tools
}

/// Verify every required tool can be located.
///
/// Stops at the first missing tool, logging it at ERROR level.
pub fn check_dependencies(required: &[String], locator: &dyn ToolLocator) -> Result<()> {
    for tool in required {
        match locator.locate(tool) {
            Some(path) => debug!("Found {} at {}", tool, path.display()),
            None => {
                error!(
                    "Missing required tool: {}. Please install it before running devprov.",
                    tool
                );
                return Err(ProvisionError::MissingDependency { name: tool.clone() });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::capture::capture_logs;
    use std::fs;
    use tempfile::TempDir;

    struct FixedLocator(&'static [&'static str]);

    impl ToolLocator for FixedLocator {
        fn locate(&self, tool: &str) -> Option<PathBuf> {
            self.0
                .contains(&tool)
                .then(|| PathBuf::from("/usr/bin").join(tool))
        }
    }

    fn make_executable(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
        path
    }

    #[test]
    fn required_tools_starts_with_package_manager() {
        let tools = required_tools(&OsFamily::Linux, &["git".to_string()]);
        assert_eq!(tools, ["apt", "git"]);
    }

    #[test]
    fn required_tools_skips_duplicates() {
        let tools = required_tools(&OsFamily::MacOs, &["brew".to_string(), "curl".to_string()]);
        assert_eq!(tools, ["brew", "curl"]);
    }

    #[test]
    fn required_tools_on_unsupported_platform_has_only_extras() {
        let tools = required_tools(&OsFamily::from_name("plan9"), &[]);
        assert!(tools.is_empty());
    }

    #[test]
    fn check_passes_when_all_tools_found() {
        let required = vec!["apt".to_string(), "git".to_string()];
        assert!(check_dependencies(&required, &FixedLocator(&["apt", "git"])).is_ok());
    }

    #[test]
    fn check_fails_on_first_missing_tool_and_logs_error() {
        let required = vec!["apt".to_string(), "psutil".to_string(), "requests".to_string()];

        let (result, logs) = capture_logs(|| check_dependencies(&required, &FixedLocator(&["apt"])));

        let err = result.unwrap_err();
        assert!(matches!(err, ProvisionError::MissingDependency { ref name } if name == "psutil"));
        assert!(logs.contains("[ERROR] Missing required tool: psutil"));
        assert!(!logs.contains("requests"));
    }

    #[test]
    fn empty_requirement_list_passes() {
        assert!(check_dependencies(&[], &FixedLocator(&[])).is_ok());
    }

    #[test]
    fn path_locator_finds_executable() {
        let temp = TempDir::new().unwrap();
        let expected = make_executable(temp.path(), "apt");

        let locator = PathLocator::new(vec![temp.path().to_path_buf()]);

        assert_eq!(locator.locate("apt"), Some(expected));
        assert_eq!(locator.locate("brew"), None);
    }

    #[cfg(unix)]
    #[test]
    fn path_locator_ignores_non_executable_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("apt"), "").unwrap();

        let locator = PathLocator::new(vec![temp.path().to_path_buf()]);

        assert_eq!(locator.locate("apt"), None);
    }

    #[test]
    fn path_locator_uses_first_matching_directory() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let expected = make_executable(first.path(), "winget");
        make_executable(second.path(), "winget");

        let locator = PathLocator::new(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);

        assert_eq!(locator.locate("winget"), Some(expected));
    }
}
