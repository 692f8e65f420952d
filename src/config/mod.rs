//! Configuration loading and parsing.
//!
//! The configuration is a single JSON file listing packages to install and
//! packages to remove:
//!
//! ```json
//! { "install": ["git", "curl"], "remove": ["nano"] }
//! ```
//!
//! # Example
//!
//! ```
//! use devprov::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.json");
//! fs::write(&path, r#"{"install": ["git"]}"#).unwrap();
//!
//! let config = load_config(&path).unwrap();
//! assert_eq!(config.install, vec!["git".to_string()]);
//! assert!(config.remove.is_empty());
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, parse_config, DEFAULT_CONFIG_FILE};
pub use schema::SetupConfig;
