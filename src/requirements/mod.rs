//! Preconditions checked before any package is touched.
//!
//! - [`checker`] - required tools on PATH
//! - [`resources`] - free disk, available memory
//! - [`network`] - connectivity probe

pub mod checker;
pub mod network;
pub mod resources;

pub use checker::{check_dependencies, required_tools, PathLocator, ToolLocator};
pub use network::{ConnectivityProbe, HttpProbe, DEFAULT_PROBE_URL};
pub use resources::{check_resources, HostResources, ResourceSource, ResourceThresholds};
