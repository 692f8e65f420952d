//! devprov CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use devprov::cli::Cli;
use devprov::logging::init_logging;
use devprov::requirements::{HostResources, HttpProbe, PathLocator};
use devprov::runner::{exit_codes, HostContext, Provisioner};
use devprov::shell::SystemRunner;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Held until main returns so the file writer is flushed on exit.
    let _log_guard = match init_logging(&cli.logging_options()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(exit_codes::CONFIG_ERROR);
        }
    };

    tracing::debug!("devprov starting with args: {:?}", cli);

    let probe = HttpProbe::new(&cli.probe_url);
    let locator = PathLocator::from_env();
    let resources = HostResources::new();
    let runner = SystemRunner;

    let host = HostContext {
        locator: &locator,
        resources: &resources,
        probe: &probe,
        runner: &runner,
    };

    let report = Provisioner::new(cli.settings(), host).run();
    ExitCode::from(report.exit_code())
}
