//! Network client trait
//!
//! One blocking call per endpoint, each returning the parsed payload.
//! Transport, timeouts, and JSON decoding live behind this boundary; a
//! call either completes or fails within one tick. There is no way to
//! abort a call in flight.

use alloc::vec::Vec;

use skopos_api::{CpuStats, FsEntry, MemStats, NetInterface, Sensor, SystemInfo};

/// Errors from the network collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NetError {
    /// No association with the network (WiFi down, DHCP lost)
    LinkDown,
    /// The request timed out
    Timeout,
    /// The server answered with a non-success status
    Http,
    /// The body could not be parsed
    Malformed,
}

/// Client for the monitoring server's REST API
pub trait MonitorClient {
    /// Fetch `/api/4/system`
    fn fetch_system(&mut self) -> Result<SystemInfo, NetError>;

    /// Fetch `/api/4/cpu`
    fn fetch_cpu(&mut self) -> Result<CpuStats, NetError>;

    /// Fetch `/api/4/mem`
    fn fetch_mem(&mut self) -> Result<MemStats, NetError>;

    /// Fetch `/api/4/sensors`
    fn fetch_sensors(&mut self) -> Result<Vec<Sensor>, NetError>;

    /// Fetch `/api/4/fs`
    fn fetch_fs(&mut self) -> Result<Vec<FsEntry>, NetError>;

    /// Fetch `/api/4/network`
    fn fetch_network(&mut self) -> Result<Vec<NetInterface>, NetError>;
}
