//! Integration tests for the provisioning public API.

use devprov::detection::OsFamily;
use devprov::requirements::{ConnectivityProbe, ResourceSource, ToolLocator};
use devprov::runner::{
    exit_codes, HostContext, ProvisionSettings, Provisioner, RunReport, RunStatus,
};
use devprov::shell::MockRunner;
use devprov::wsl::WslOutcome;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct EverythingInstalled;

impl ToolLocator for EverythingInstalled {
    fn locate(&self, tool: &str) -> Option<PathBuf> {
        Some(PathBuf::from("/usr/local/bin").join(tool))
    }
}

struct RoomyHost;

impl ResourceSource for RoomyHost {
    fn free_disk_bytes(&self) -> u64 {
        256 << 30
    }

    fn available_ram_bytes(&self) -> u64 {
        32 << 30
    }
}

struct AlwaysOnline;

impl ConnectivityProbe for AlwaysOnline {
    fn probe(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

fn project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("config.json"), config).unwrap();
    temp
}

fn run(temp: &TempDir, os: OsFamily, dry_run: bool, runner: &MockRunner) -> RunReport {
    let settings = ProvisionSettings {
        os,
        config_path: temp.path().join("config.json"),
        dry_run,
        jobs: 2,
        ..Default::default()
    };
    let host = HostContext {
        locator: &EverythingInstalled,
        resources: &RoomyHost,
        probe: &AlwaysOnline,
        runner,
    };
    Provisioner::new(settings, host).run()
}

#[test]
fn linux_run_installs_then_removes() {
    let temp = project(r#"{"install": ["git", "curl"], "remove": ["nano"]}"#);
    let runner = MockRunner::new();

    let report = run(&temp, OsFamily::Linux, false, &runner);

    assert_eq!(report.status, RunStatus::Completed);
    assert_eq!(report.exit_code(), exit_codes::SUCCESS);
    assert_eq!(report.install.len(), 2);
    assert_eq!(report.remove.len(), 1);
    assert_eq!(report.wsl, WslOutcome::Skipped);

    let lines = runner.command_lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[..2].contains(&"apt install git".to_string()));
    assert!(lines[..2].contains(&"apt install curl".to_string()));
    assert_eq!(lines[2], "apt uninstall nano");
}

#[test]
fn dry_run_reports_config_without_running_anything() {
    let temp = project(r#"{"install": ["wget"], "remove": ["nano"]}"#);
    let runner = MockRunner::new();

    let report = run(&temp, OsFamily::MacOs, true, &runner);

    assert_eq!(report.status, RunStatus::DryRun);
    assert!(runner.commands().is_empty());
    let config = report.config.unwrap();
    assert_eq!(config.install, ["wget"]);
    assert_eq!(config.remove, ["nano"]);
}

#[test]
fn config_without_keys_is_a_no_op() {
    let temp = project("{}");
    let runner = MockRunner::new();

    let report = run(&temp, OsFamily::Windows, false, &runner);

    assert_eq!(report.exit_code(), exit_codes::SUCCESS);
    // Only the WSL step runs on Windows.
    assert_eq!(runner.command_lines(), ["wsl --install"]);
}

#[test]
fn failed_removal_is_reported_without_stopping() {
    let temp = project(r#"{"remove": ["nano", "vim"]}"#);
    let runner = MockRunner::new().failing_on("nano");

    let report = run(&temp, OsFamily::Linux, false, &runner);

    assert_eq!(report.remove.failure_count(), 1);
    assert_eq!(report.remove.len(), 2);
    assert_eq!(report.exit_code(), exit_codes::ACTION_FAILED);
}
