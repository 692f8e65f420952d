//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::builder::BoolishValueParser;
use clap::Parser;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;
use crate::detection::OsFamily;
use crate::logging::{LoggingOptions, DEFAULT_LOG_FILE};
use crate::packages::default_jobs;
use crate::requirements::{ResourceThresholds, DEFAULT_PROBE_URL};
use crate::runner::ProvisionSettings;

/// devprov - Developer machine provisioning.
///
/// Checks host resources, then installs and removes packages with the
/// platform's native package manager (winget, apt or brew). Runs as a dry
/// run unless --execute is given.
#[derive(Debug, Parser)]
#[command(name = "devprov")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Package list: JSON with optional "install" and "remove" arrays
    #[arg(short, long, env = "DEVPROV_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Log file, overwritten on every run
    #[arg(long, env = "DEVPROV_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Install and remove packages for real (the default is a dry run)
    #[arg(long, env = "DEVPROV_EXECUTE", value_parser = BoolishValueParser::new())]
    pub execute: bool,

    /// Minimum free disk space, in GB
    #[arg(long, default_value_t = 10)]
    pub min_disk_gb: u64,

    /// Minimum available memory, in MB
    #[arg(long, default_value_t = 1024)]
    pub min_ram_mb: u64,

    /// URL fetched to check network connectivity
    #[arg(long, env = "DEVPROV_PROBE_URL", default_value = DEFAULT_PROBE_URL)]
    pub probe_url: String,

    /// Maximum concurrent installs (defaults to the number of CPUs; use 1 with apt)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Additional tool that must be on PATH (repeatable)
    #[arg(long = "require", value_name = "TOOL")]
    pub require: Vec<String>,

    /// Do not attempt WSL setup on Windows
    #[arg(long)]
    pub skip_wsl: bool,

    /// Only write to the log file
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Run settings for the host this process is running on.
    pub fn settings(&self) -> ProvisionSettings {
        ProvisionSettings {
            os: OsFamily::detect(),
            config_path: self.config.clone(),
            dry_run: !self.execute,
            thresholds: ResourceThresholds {
                min_disk_gb: self.min_disk_gb,
                min_ram_mb: self.min_ram_mb,
            },
            jobs: self.jobs.unwrap_or_else(default_jobs),
            extra_requirements: self.require.clone(),
            skip_wsl: self.skip_wsl,
        }
    }

    /// Log sink options.
    pub fn logging_options(&self) -> LoggingOptions {
        LoggingOptions {
            file: self.log_file.clone(),
            debug: self.debug,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_are_a_safe_dry_run() {
        let cli = Cli::try_parse_from(["devprov"]).unwrap();
        let settings = cli.settings();

        assert!(settings.dry_run);
        assert_eq!(settings.config_path, PathBuf::from("config.json"));
        assert_eq!(settings.thresholds, ResourceThresholds::default());
        assert_eq!(settings.os, OsFamily::detect());
        assert!(settings.jobs >= 1);
        assert!(settings.extra_requirements.is_empty());
        assert_eq!(cli.probe_url, "https://www.google.com");
        assert_eq!(cli.log_file, PathBuf::from("setup_environment.log"));
    }

    #[test]
    fn execute_disables_dry_run() {
        let cli = Cli::try_parse_from(["devprov", "--execute"]).unwrap();
        assert!(!cli.settings().dry_run);
    }

    #[test]
    fn thresholds_and_jobs_are_configurable() {
        let cli = Cli::try_parse_from([
            "devprov",
            "--min-disk-gb",
            "50",
            "--min-ram-mb",
            "4096",
            "-j",
            "2",
        ])
        .unwrap();
        let settings = cli.settings();

        assert_eq!(settings.thresholds.min_disk_gb, 50);
        assert_eq!(settings.thresholds.min_ram_mb, 4096);
        assert_eq!(settings.jobs, 2);
    }

    #[test]
    fn require_is_repeatable() {
        let cli =
            Cli::try_parse_from(["devprov", "--require", "git", "--require", "curl"]).unwrap();
        assert_eq!(cli.settings().extra_requirements, ["git", "curl"]);
    }

    #[test]
    fn logging_options_follow_flags() {
        let cli =
            Cli::try_parse_from(["devprov", "--log-file", "run.log", "--quiet", "--debug"]).unwrap();
        let options = cli.logging_options();

        assert_eq!(options.file, PathBuf::from("run.log"));
        assert!(options.quiet);
        assert!(options.debug);
    }

    #[test]
    fn rejects_non_numeric_threshold() {
        assert!(Cli::try_parse_from(["devprov", "--min-disk-gb", "lots"]).is_err());
    }
}
