//! Command-line interface for devprov.
//!
//! Argument parsing uses clap's derive macros; see [`args`].

pub mod args;

pub use args::Cli;
