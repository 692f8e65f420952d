//! Host platform detection.

pub mod package_manager;
pub mod platform;
pub mod system_info;

pub use package_manager::PackageManager;
pub use platform::OsFamily;
pub use system_info::SystemInfo;
