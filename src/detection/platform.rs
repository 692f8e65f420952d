//! Operating system family detection.

use std::fmt;

/// Operating system family of the host.
///
/// Detected once at startup and passed by reference to every stage that
/// needs to dispatch on the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    Linux,
    MacOs,
    /// Any platform without a package manager backend.
    Other(String),
}

impl OsFamily {
    /// Detect the family of the running host.
    pub fn detect() -> Self {
        Self::from_name(std::env::consts::OS)
    }

    /// Parse an OS family from a platform name.
    ///
    /// Accepts both Rust's `std::env::consts::OS` names and the
    /// `uname`-style `darwin`. Matching is case-insensitive.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "windows" => OsFamily::Windows,
            "linux" => OsFamily::Linux,
            "macos" | "darwin" => OsFamily::MacOs,
            other => OsFamily::Other(other.to_string()),
        }
    }

    /// Lowercase platform name.
    pub fn name(&self) -> &str {
        match self {
            OsFamily::Windows => "windows",
            OsFamily::Linux => "linux",
            OsFamily::MacOs => "darwin",
            OsFamily::Other(name) => name,
        }
    }

    /// Whether this is a Windows host.
    pub fn is_windows(&self) -> bool {
        matches!(self, OsFamily::Windows)
    }
}

impl fmt::Display for OsFamily {
    /// Capitalized name, as shown in the system summary line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => write!(f, "{}{}", first.to_uppercase(), chars.as_str()),
            None => Ok(()),
        }
    }
}
