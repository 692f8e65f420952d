//! Error types for provisioning operations.
//!
//! This module defines [`ProvisionError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `ProvisionError` for failures the orchestrator maps to an exit code
//! - Use `anyhow::Error` (via `ProvisionError::Other`) for unexpected errors
//! - Per-package failures are not errors; they are recorded in a
//!   [`BatchReport`](crate::packages::BatchReport)

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for provisioning operations.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// A tool the run depends on could not be found on PATH.
    #[error("Missing required tool: {name}")]
    MissingDependency { name: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file is not valid JSON.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Configuration file is valid JSON but has the wrong shape.
    #[error("Invalid configuration at {path}: {message}")]
    ConfigSchemaError { path: PathBuf, message: String },

    /// No package manager backend exists for this operating system.
    #[error("Unsupported OS: {os}")]
    UnsupportedPlatform { os: String },

    /// A subprocess could not be started or exited unsuccessfully.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// The log file sink could not be set up.
    #[error("Failed to initialize logging at {path}: {message}")]
    LogInit { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for provisioning operations.
pub type Result<T> = std::result::Result<T, ProvisionError>;
