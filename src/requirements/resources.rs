//! Host resource checks.
//!
//! Before touching any package, a run confirms the machine has enough free
//! disk and memory and can reach the network. Every measurement is logged
//! whether or not it passes.

use std::path::{Path, PathBuf};

use sysinfo::{Disks, System};
use tracing::{error, info, warn};

use super::network::ConnectivityProbe;

const BYTES_PER_GIB: u64 = 1 << 30;
const BYTES_PER_MIB: u64 = 1 << 20;

/// Minimum resources required to proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceThresholds {
    /// Minimum free disk space, in GiB.
    pub min_disk_gb: u64,
    /// Minimum available memory, in MiB.
    pub min_ram_mb: u64,
}

impl Default for ResourceThresholds {
    fn default() -> Self {
        Self {
            min_disk_gb: 10,
            min_ram_mb: 1024,
        }
    }
}

impl ResourceThresholds {
    fn min_disk_bytes(&self) -> u64 {
        self.min_disk_gb.saturating_mul(BYTES_PER_GIB)
    }

    fn min_ram_bytes(&self) -> u64 {
        self.min_ram_mb.saturating_mul(BYTES_PER_MIB)
    }
}

/// Source of disk and memory measurements.
pub trait ResourceSource {
    /// Bytes of free disk space available to the current user.
    fn free_disk_bytes(&self) -> u64;

    /// Bytes of memory available for new allocations.
    fn available_ram_bytes(&self) -> u64;
}

/// Reads measurements from the running host.
#[derive(Debug, Clone)]
pub struct HostResources {
    disk_root: PathBuf,
}

impl HostResources {
    /// Measure the filesystem root (`/`, or the current drive on Windows).
    pub fn new() -> Self {
        Self::for_path(&default_disk_root())
    }

    /// Measure the filesystem that contains `path`.
    pub fn for_path(path: &Path) -> Self {
        Self {
            disk_root: path.to_path_buf(),
        }
    }
}

impl Default for HostResources {
    fn default() -> Self {
        Self::new()
    }
}

fn default_disk_root() -> PathBuf {
    if cfg!(windows) {
        std::env::current_dir()
            .ok()
            .and_then(|dir| dir.ancestors().last().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("C:\\"))
    } else {
        PathBuf::from("/")
    }
}

impl ResourceSource for HostResources {
    fn free_disk_bytes(&self) -> u64 {
        let disks = Disks::new_with_refreshed_list();

        // The deepest mount point containing the path is the filesystem it lives on.
        let disk = disks
            .list()
            .iter()
            .filter(|disk| self.disk_root.starts_with(disk.mount_point()))
            .max_by_key(|disk| disk.mount_point().components().count());

        match disk {
            Some(disk) => disk.available_space(),
            None => {
                warn!(
                    "No mounted filesystem found for {}; treating free space as 0",
                    self.disk_root.display()
                );
                0
            }
        }
    }

    fn available_ram_bytes(&self) -> u64 {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.available_memory()
    }
}

/// Check disk, memory and connectivity against `thresholds`.
///
/// Disk and memory are always measured and logged first. A connectivity
/// failure returns `false` immediately; otherwise the result is whether both
/// measurements meet their minimums.
pub fn check_resources(
    thresholds: &ResourceThresholds,
    source: &dyn ResourceSource,
    probe: &dyn ConnectivityProbe,
) -> bool {
    info!("Checking system resources...");

    let free_disk = source.free_disk_bytes();
    info!("Disk Space: {} GB available", free_disk / BYTES_PER_GIB);

    let available_ram = source.available_ram_bytes();
    info!("RAM: {} MB available", available_ram / BYTES_PER_MIB);

    match probe.probe() {
        Ok(()) => info!("Network: Connected"),
        Err(e) => {
            tracing::debug!("Connectivity probe failed: {:#}", e);
            error!("Network: No connectivity");
            return false;
        }
    }

    if free_disk < thresholds.min_disk_bytes() || available_ram < thresholds.min_ram_bytes() {
        error!("Insufficient system resources, aborting.");
        return false;
    }

    true
}
