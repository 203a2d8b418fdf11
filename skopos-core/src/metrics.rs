//! Fetched-metrics snapshot
//!
//! The last successfully fetched value of every metric the pages render.
//! Fields are independently stale: a failed fetch keeps the previous
//! value, and only a field that has never been fetched reads as
//! unavailable.

use heapless::{String, Vec};

use skopos_api::{FsEntry, NetInterface};

/// Maximum disks kept after filtering
pub const MAX_DISKS: usize = 8;

/// Maximum network interfaces kept
pub const MAX_IFACES: usize = 4;

/// Maximum length of a stored name/path
pub const MAX_NAME_LEN: usize = 24;

/// Device-name fragments that mark a virtual or system filesystem
const EXCLUDED_DEVICE_PATTERNS: &[&str] = &["loop", "overlay", "tmpfs", "squashfs", "ramfs"];

/// Mount-point prefixes excluded from the disk page
const EXCLUDED_MOUNT_PREFIXES: &[&str] = &["/snap", "/var/snap", "/boot", "/run"];

/// One disk on the filtered disk page
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DiskInfo {
    pub mnt_point: String<MAX_NAME_LEN>,
    pub device: String<MAX_NAME_LEN>,
    pub used: u64,
    pub size: u64,
    pub percent: f32,
}

/// One network interface on the network page
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IfaceInfo {
    pub name: String<MAX_NAME_LEN>,
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub speed: u64,
}

/// The last successfully fetched metrics
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MetricsSnapshot {
    /// Total CPU usage in percent; None until first fetched
    pub cpu_pct: Option<f32>,
    /// Memory usage in percent; None until first fetched
    pub mem_pct: Option<f32>,
    /// CPU package temperature in °C; None until first fetched
    pub temp_c: Option<f32>,
    /// Server host name; None until first fetched
    pub hostname: Option<String<MAX_NAME_LEN>>,
    /// Filtered disk list
    disks: Vec<DiskInfo, MAX_DISKS>,
    /// Whether a filesystem list was ever fetched
    disks_fetched: bool,
    /// Selected disk index, always < disks.len() when non-empty
    selected_disk: usize,
    /// Network interface list
    ifaces: Vec<IfaceInfo, MAX_IFACES>,
    /// Whether an interface list was ever fetched
    ifaces_fetched: bool,
}

impl MetricsSnapshot {
    /// Create an all-unavailable snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// The filtered disk list
    pub fn disks(&self) -> &[DiskInfo] {
        &self.disks
    }

    /// Whether the filesystem list was ever fetched
    pub fn disks_fetched(&self) -> bool {
        self.disks_fetched
    }

    /// Current disk selection index
    pub fn selected_disk(&self) -> usize {
        self.selected_disk
    }

    /// The selected disk, if the filtered list is non-empty
    pub fn current_disk(&self) -> Option<&DiskInfo> {
        self.disks.get(self.selected_disk)
    }

    /// The network interface list
    pub fn ifaces(&self) -> &[IfaceInfo] {
        &self.ifaces
    }

    /// Whether the interface list was ever fetched
    pub fn ifaces_fetched(&self) -> bool {
        self.ifaces_fetched
    }

    /// Move the disk selection forward, wrapping
    pub fn select_next_disk(&mut self) {
        if !self.disks.is_empty() {
            self.selected_disk = (self.selected_disk + 1) % self.disks.len();
        }
    }

    /// Move the disk selection backward, wrapping
    pub fn select_prev_disk(&mut self) {
        if !self.disks.is_empty() {
            self.selected_disk =
                (self.selected_disk + self.disks.len() - 1) % self.disks.len();
        }
    }

    /// Apply a freshly fetched hostname
    pub fn apply_hostname(&mut self, hostname: &str) {
        self.hostname = Some(truncated(hostname));
    }

    /// Apply a freshly fetched filesystem list
    ///
    /// Recomputes the filtered view and clamps the selection: an index
    /// that fell off the shrunken list resets to the first disk.
    pub fn apply_fs(&mut self, entries: &[FsEntry]) {
        self.disks.clear();
        for entry in entries {
            let mnt = entry.mnt_point.as_deref().unwrap_or("");
            let device = entry.device.as_deref().unwrap_or("");
            if is_system_mount(device, mnt) {
                continue;
            }
            if self.disks.is_full() {
                break;
            }
            let disk = DiskInfo {
                mnt_point: truncated(mnt),
                device: truncated(device),
                used: entry.used.unwrap_or(0),
                size: entry.size.unwrap_or(0),
                percent: entry.percent.unwrap_or(0.0),
            };
            let _ = self.disks.push(disk);
        }

        if self.selected_disk >= self.disks.len() {
            self.selected_disk = 0;
        }
        self.disks_fetched = true;
    }

    /// Apply a freshly fetched interface list
    pub fn apply_network(&mut self, entries: &[NetInterface]) {
        self.ifaces.clear();
        for entry in entries.iter().take(MAX_IFACES) {
            let iface = IfaceInfo {
                name: truncated(entry.interface_name.as_deref().unwrap_or("")),
                bytes_sent: entry.bytes_sent.unwrap_or(0),
                bytes_recv: entry.bytes_recv.unwrap_or(0),
                speed: entry.speed.unwrap_or(0),
            };
            let _ = self.ifaces.push(iface);
        }
        self.ifaces_fetched = true;
    }
}

/// Copy a string, truncating at the storage capacity
fn truncated(text: &str) -> String<MAX_NAME_LEN> {
    let mut out: String<MAX_NAME_LEN> = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Whether a filesystem entry is a virtual/system mount to hide
fn is_system_mount(device: &str, mnt_point: &str) -> bool {
    EXCLUDED_DEVICE_PATTERNS
        .iter()
        .any(|p| device.contains(p))
        || EXCLUDED_MOUNT_PREFIXES
            .iter()
            .any(|p| mnt_point.starts_with(p))
}
