//! Provisioning run orchestration.

use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::config::{load_config, SetupConfig, DEFAULT_CONFIG_FILE};
use crate::detection::{OsFamily, SystemInfo};
use crate::error::ProvisionError;
use crate::packages::{default_jobs, install_packages, remove_packages, BatchReport};
use crate::requirements::{
    check_dependencies, check_resources, required_tools, ConnectivityProbe, ResourceSource,
    ResourceThresholds, ToolLocator,
};
use crate::shell::CommandRunner;
use crate::wsl::{setup_wsl, WslOutcome};

/// Process exit codes derived from a [`RunReport`].
pub mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const MISSING_DEPENDENCY: u8 = 1;
    pub const CONFIG_ERROR: u8 = 2;
    pub const INSUFFICIENT_RESOURCES: u8 = 3;
    pub const ACTION_FAILED: u8 = 4;
}

/// Everything that shapes a run, resolved from the command line.
#[derive(Debug, Clone)]
pub struct ProvisionSettings {
    /// Platform to provision for.
    pub os: OsFamily,
    /// Path of the JSON package lists.
    pub config_path: PathBuf,
    /// Log what would happen without installing or removing anything.
    pub dry_run: bool,
    pub thresholds: ResourceThresholds,
    /// Upper bound on concurrent installs.
    pub jobs: usize,
    /// Tools required in addition to the package manager.
    pub extra_requirements: Vec<String>,
    pub skip_wsl: bool,
}

impl Default for ProvisionSettings {
    fn default() -> Self {
        Self {
            os: OsFamily::detect(),
            config_path: PathBuf::from(DEFAULT_CONFIG_FILE),
            dry_run: true,
            thresholds: ResourceThresholds::default(),
            jobs: default_jobs(),
            extra_requirements: Vec::new(),
            skip_wsl: false,
        }
    }
}

/// Mockable collaborators for a run.
pub struct HostContext<'a> {
    /// Finds required tools.
    pub locator: &'a dyn ToolLocator,
    /// Measures free disk and memory.
    pub resources: &'a dyn ResourceSource,
    /// Checks network reachability.
    pub probe: &'a dyn ConnectivityProbe,
    /// Runs package manager and WSL commands.
    pub runner: &'a dyn CommandRunner,
}

/// Where a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// A required tool was not found; nothing else ran.
    MissingDependency { tool: String },
    /// Resource or connectivity check failed.
    InsufficientResources,
    /// The config file was missing or invalid.
    ConfigError { message: String },
    /// Dry run: lists were logged, nothing was changed.
    DryRun,
    /// Install, remove and WSL stages all ran.
    Completed,
}

/// Outcome of a full run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub status: RunStatus,
    /// Config as loaded, if the run got that far.
    pub config: Option<SetupConfig>,
    pub install: BatchReport,
    pub remove: BatchReport,
    pub wsl: WslOutcome,
    /// No package manager backend for the platform.
    pub unsupported_platform: bool,
}

impl RunReport {
    fn stopped(status: RunStatus) -> Self {
        Self {
            status,
            config: None,
            install: BatchReport::default(),
            remove: BatchReport::default(),
            wsl: WslOutcome::Skipped,
            unsupported_platform: false,
        }
    }

    /// Failed packages and steps in a completed run.
    pub fn failure_count(&self) -> usize {
        self.install.failure_count()
            + self.remove.failure_count()
            + usize::from(self.wsl.is_failure())
            + usize::from(self.unsupported_platform)
    }

    /// Exit code for the process.
    pub fn exit_code(&self) -> u8 {
        match &self.status {
            RunStatus::MissingDependency { .. } => exit_codes::MISSING_DEPENDENCY,
            RunStatus::ConfigError { .. } => exit_codes::CONFIG_ERROR,
            RunStatus::InsufficientResources => exit_codes::INSUFFICIENT_RESOURCES,
            RunStatus::DryRun => exit_codes::SUCCESS,
            RunStatus::Completed if self.failure_count() > 0 => exit_codes::ACTION_FAILED,
            RunStatus::Completed => exit_codes::SUCCESS,
        }
    }
}

/// Runs the provisioning stages in order.
///
/// Dependency check → system summary → resource check → config load →
/// dry-run stop, or install → remove → WSL setup.
pub struct Provisioner<'a> {
    settings: ProvisionSettings,
    host: HostContext<'a>,
}

impl<'a> Provisioner<'a> {
    pub fn new(settings: ProvisionSettings, host: HostContext<'a>) -> Self {
        Self { settings, host }
    }

    pub fn settings(&self) -> &ProvisionSettings {
        &self.settings
    }

    /// Execute the run. Never panics on host failures; every outcome is
    /// reported through the returned [`RunReport`].
    pub fn run(&self) -> RunReport {
        let os = &self.settings.os;

        let required = required_tools(os, &self.settings.extra_requirements);
        if let Err(e) = check_dependencies(&required, self.host.locator) {
            let tool = match e {
                ProvisionError::MissingDependency { name } => name,
                other => other.to_string(),
            };
            return RunReport::stopped(RunStatus::MissingDependency { tool });
        }

        SystemInfo::collect(os).log_summary();

        if !check_resources(
            &self.settings.thresholds,
            self.host.resources,
            self.host.probe,
        ) {
            return RunReport::stopped(RunStatus::InsufficientResources);
        }

        let config = match load_config(&self.settings.config_path) {
            Ok(config) => config,
            Err(e) => {
                error!("{}", e);
                if matches!(e, ProvisionError::ConfigNotFound { .. }) {
                    error!(r#"Create it with: {{"install": [...], "remove": [...]}}"#);
                }
                return RunReport::stopped(RunStatus::ConfigError {
                    message: e.to_string(),
                });
            }
        };

        if self.settings.dry_run {
            info!(
                "Dry run mode enabled. Applications to install: {:?}, to remove: {:?}",
                config.install, config.remove
            );
            let mut report = RunReport::stopped(RunStatus::DryRun);
            report.config = Some(config);
            return report;
        }

        let mut unsupported_platform = false;

        let install = install_packages(os, &config.install, self.host.runner, self.settings.jobs)
            .unwrap_or_else(|_| {
                unsupported_platform = true;
                BatchReport::default()
            });

        let remove = remove_packages(os, &config.remove, self.host.runner).unwrap_or_else(|_| {
            unsupported_platform = true;
            BatchReport::default()
        });

        let wsl = if self.settings.skip_wsl {
            info!("Skipping WSL setup.");
            WslOutcome::Skipped
        } else {
            setup_wsl(os, self.host.runner)
        };

        let report = RunReport {
            status: RunStatus::Completed,
            config: Some(config),
            install,
            remove,
            wsl,
            unsupported_platform,
        };

        match report.failure_count() {
            0 => info!("Environment setup completed successfully"),
            n => warn!("Environment setup completed with {} failure(s)", n),
        }

        report
    }
}
