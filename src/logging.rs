//! Log sinks for a provisioning run.
//!
//! Records go to two places: a plain-text log file, truncated at startup,
//! and standard output. The file receives one `timestamp [LEVEL] message`
//! line per event through a non-blocking writer; the returned [`LogGuard`]
//! must be held until the process exits so buffered records are flushed.
//!
//! Log level is controlled by:
//! 1. `--debug` raises both sinks to DEBUG
//! 2. `RUST_LOG` environment variable (if set)
//! 3. Default is DEBUG for the file and INFO for stdout

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{Event, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::error::{ProvisionError, Result};

/// Default log file name, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "setup_environment.log";

/// Options for [`init_logging`].
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Log file path. Overwritten on every run.
    pub file: PathBuf,
    /// Emit DEBUG records on stdout as well as in the file.
    pub debug: bool,
    /// Suppress stdout output entirely.
    pub quiet: bool,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_LOG_FILE),
            debug: false,
            quiet: false,
        }
    }
}

/// Keeps the file writer alive. Dropping it flushes pending records.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _worker: WorkerGuard,
    path: PathBuf,
}

impl LogGuard {
    /// Path of the log file being written.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush pending records and close the log file.
    pub fn close(self) {
        drop(self);
    }
}

/// Formats records as `2026-01-31 09:15:02,417 [INFO] message`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        write!(
            writer,
            "{} [{}] ",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            event.metadata().level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Formats records as the bare message, for the console.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageFormat;

impl<S, N> FormatEvent<S, N> for MessageFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn file_filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new("devprov=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("devprov=debug"))
    }
}

fn stdout_filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new("devprov=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("devprov=info"))
    }
}

/// Install the process-wide subscriber.
///
/// Fails if the log file cannot be created or a subscriber is already set.
pub fn init_logging(options: &LoggingOptions) -> Result<LogGuard> {
    let log_init_error = |message: String| ProvisionError::LogInit {
        path: options.file.clone(),
        message,
    };

    let file = File::create(&options.file).map_err(|e| log_init_error(e.to_string()))?;
    let (writer, worker) = tracing_appender::non_blocking(file);

    let file_layer = fmt::layer()
        .event_format(LineFormat)
        .with_writer(writer)
        .with_ansi(false)
        .with_filter(file_filter(options.debug));

    let stdout_layer = (!options.quiet).then(|| {
        fmt::layer()
            .event_format(MessageFormat)
            .with_writer(std::io::stdout)
            .with_filter(stdout_filter(options.debug))
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .map_err(|e| log_init_error(e.to_string()))?;

    Ok(LogGuard {
        _worker: worker,
        path: options.file.clone(),
    })
}


#[cfg(test)]
mod tests {
    use super::capture::{capture_logs, capture_logs_as};
    use super::*;

    #[test]
    fn default_options_point_at_setup_log() {
        let options = LoggingOptions::default();
        assert_eq!(options.file, PathBuf::from("setup_environment.log"));
        assert!(!options.debug);
        assert!(!options.quiet);
    }

    #[test]
    fn line_format_has_timestamp_level_and_message() {
        let ((), logs) = capture_logs(|| {
            tracing::info!("Network: Connected");
            tracing::error!("Network: No connectivity");
        });

        let lines: Vec<&str> = logs.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" [INFO] Network: Connected"));
        assert!(lines[1].ends_with(" [ERROR] Network: No connectivity"));

        // "YYYY-MM-DD HH:MM:SS,mmm"
        let timestamp = &lines[0][..19];
        assert!(chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S").is_ok());
        assert_eq!(&lines[0][19..20], ",");
        assert!(lines[0][20..23].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn console_format_is_the_bare_message() {
        let ((), logs) = capture_logs_as(MessageFormat, || {
            tracing::info!("Network: Connected");
            tracing::error!("Insufficient disk space: 3 GB available");
        });

        assert_eq!(
            logs,
            "Network: Connected\nInsufficient disk space: 3 GB available\n"
        );
    }

    #[test]
    fn init_logging_fails_for_unwritable_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let options = LoggingOptions {
            file: temp.path().join("missing-dir").join("setup.log"),
            ..Default::default()
        };

        let err = init_logging(&options).err().unwrap();
        assert!(matches!(err, ProvisionError::LogInit { .. }));
    }
}
