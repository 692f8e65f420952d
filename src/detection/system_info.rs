//! Host facts reported at the start of a run.

use sysinfo::System;
use tracing::info;

use super::platform::OsFamily;

const BYTES_PER_GIB: u64 = 1 << 30;

/// Operating system, CPU architecture and installed memory of the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub os: OsFamily,
    pub arch: String,
    /// Total physical memory, rounded down to whole GiB.
    pub total_ram_gb: u64,
}

impl SystemInfo {
    /// Collect facts about the running host.
    pub fn collect(os: &OsFamily) -> Self {
        let mut sys = System::new();
        sys.refresh_memory();

        Self::from_parts(os.clone(), std::env::consts::ARCH, sys.total_memory())
    }

    /// Build from raw values. `total_ram_bytes` is rounded down to GiB.
    pub fn from_parts(os: OsFamily, arch: &str, total_ram_bytes: u64) -> Self {
        Self {
            os,
            arch: arch.to_string(),
            total_ram_gb: total_ram_bytes / BYTES_PER_GIB,
        }
    }

    /// One-line summary, e.g. `System: Linux, Architecture: x86_64, RAM: 15 GB`.
    pub fn summary(&self) -> String {
        format!(
            "System: {}, Architecture: {}, RAM: {} GB",
            self.os, self.arch, self.total_ram_gb
        )
    }

    /// Log the summary line at INFO level.
    pub fn log_summary(&self) {
        info!("{}", self.summary());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ram_rounds_down_to_whole_gigabytes() {
        let info = SystemInfo::from_parts(OsFamily::Linux, "x86_64", 16 * BYTES_PER_GIB - 1);
        assert_eq!(info.total_ram_gb, 15);
    }

    #[test]
    fn summary_format() {
        let info = SystemInfo::from_parts(OsFamily::Linux, "aarch64", 8 * BYTES_PER_GIB);
        assert_eq!(
            info.summary(),
            "System: Linux, Architecture: aarch64, RAM: 8 GB"
        );
    }

    #[test]
    fn collect_reports_host_values() {
        let info = SystemInfo::collect(&OsFamily::detect());
        assert_eq!(info.arch, std::env::consts::ARCH);
        assert_eq!(info.os, OsFamily::detect());
    }
}
