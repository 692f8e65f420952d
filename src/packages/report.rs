//! Per-package results.

use std::fmt;

/// What was attempted for a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageAction {
    Install,
    Remove,
}

impl fmt::Display for PackageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageAction::Install => f.write_str("install"),
            PackageAction::Remove => f.write_str("remove"),
        }
    }
}

/// How an individual package operation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageStatus {
    Succeeded,
    Failed { reason: String },
}

/// Result of installing or removing one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutcome {
    pub package: String,
    pub action: PackageAction,
    pub status: PackageStatus,
}

impl PackageOutcome {
    pub fn succeeded(package: &str, action: PackageAction) -> Self {
        Self {
            package: package.to_string(),
            action,
            status: PackageStatus::Succeeded,
        }
    }

    pub fn failed(package: &str, action: PackageAction, reason: String) -> Self {
        Self {
            package: package.to_string(),
            action,
            status: PackageStatus::Failed { reason },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == PackageStatus::Succeeded
    }
}

/// Results of one batch, in the order the packages were listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    outcomes: Vec<PackageOutcome>,
}

impl BatchReport {
    pub fn new(outcomes: Vec<PackageOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[PackageOutcome] {
        &self.outcomes
    }

    /// Outcomes that did not succeed.
    pub fn failures(&self) -> impl Iterator<Item = &PackageOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// True when every package succeeded (vacuously true when empty).
    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_success() {
        let report = BatchReport::default();
        assert!(report.is_success());
        assert!(report.is_empty());
        assert_eq!(report.failure_count(), 0);
    }

    #[test]
    fn failures_are_counted() {
        let report = BatchReport::new(vec![
            PackageOutcome::succeeded("git", PackageAction::Install),
            PackageOutcome::failed("curl", PackageAction::Install, "exit 100".into()),
        ]);

        assert!(!report.is_success());
        assert_eq!(report.len(), 2);
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.failures().next().unwrap().package, "curl");
    }

    #[test]
    fn action_display() {
        assert_eq!(PackageAction::Install.to_string(), "install");
        assert_eq!(PackageAction::Remove.to_string(), "remove");
    }
}
