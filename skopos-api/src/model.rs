//! JSON payload types for the polled endpoints
//!
//! Each type mirrors only the fields the appliance renders. Serde skips
//! unknown fields by default, which is what keeps these stable across
//! Glances releases.

use alloc::string::String;
use alloc::vec::Vec;

use serde::Deserialize;

/// Errors from payload parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ApiError {
    /// Body was not valid JSON or not the expected shape
    Malformed,
}

/// `/api/4/system` - host information
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemInfo {
    /// Host name as reported by the server
    #[serde(default)]
    pub hostname: Option<String>,
}

/// `/api/4/cpu` - CPU totals
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CpuStats {
    /// Total CPU usage in percent
    #[serde(default)]
    pub total: Option<f32>,
}

/// `/api/4/mem` - memory usage
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemStats {
    /// Memory usage in percent
    #[serde(default)]
    pub percent: Option<f32>,
}

/// One entry of the `/api/4/sensors` list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sensor {
    /// Sensor label, e.g. "Package id 0"
    #[serde(default)]
    pub label: Option<String>,
    /// Sensor reading (°C for temperature sensors)
    #[serde(default)]
    pub value: Option<f32>,
}

/// One entry of the `/api/4/fs` list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FsEntry {
    /// Mount point, e.g. "/home"
    #[serde(default)]
    pub mnt_point: Option<String>,
    /// Backing device, e.g. "/dev/sda1" or "/dev/loop3"
    #[serde(default)]
    pub device: Option<String>,
    /// Used bytes
    #[serde(default)]
    pub used: Option<u64>,
    /// Total bytes
    #[serde(default)]
    pub size: Option<u64>,
    /// Usage in percent
    #[serde(default)]
    pub percent: Option<f32>,
}

/// One entry of the `/api/4/network` list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetInterface {
    /// Interface name, e.g. "enp3s0"
    #[serde(default)]
    pub interface_name: Option<String>,
    /// Cumulative bytes sent
    #[serde(default)]
    pub bytes_sent: Option<u64>,
    /// Cumulative bytes received
    #[serde(default)]
    pub bytes_recv: Option<u64>,
    /// Link speed in bits per second
    #[serde(default)]
    pub speed: Option<u64>,
}

/// Parse a `/api/4/system` body
pub fn parse_system(body: &[u8]) -> Result<SystemInfo, ApiError> {
    serde_json::from_slice(body).map_err(|_| ApiError::Malformed)
}

/// Parse a `/api/4/cpu` body
pub fn parse_cpu(body: &[u8]) -> Result<CpuStats, ApiError> {
    serde_json::from_slice(body).map_err(|_| ApiError::Malformed)
}

/// Parse a `/api/4/mem` body
pub fn parse_mem(body: &[u8]) -> Result<MemStats, ApiError> {
    serde_json::from_slice(body).map_err(|_| ApiError::Malformed)
}

/// Parse a `/api/4/sensors` body
pub fn parse_sensors(body: &[u8]) -> Result<Vec<Sensor>, ApiError> {
    serde_json::from_slice(body).map_err(|_| ApiError::Malformed)
}

/// Parse a `/api/4/fs` body
pub fn parse_fs(body: &[u8]) -> Result<Vec<FsEntry>, ApiError> {
    serde_json::from_slice(body).map_err(|_| ApiError::Malformed)
}

/// Parse a `/api/4/network` body
pub fn parse_network(body: &[u8]) -> Result<Vec<NetInterface>, ApiError> {
    serde_json::from_slice(body).map_err(|_| ApiError::Malformed)
}

/// Pick the CPU package temperature out of a sensor list
///
/// Matches by substring so "Package id 0" also matches a server that
/// reports "coretemp Package id 0". First match wins.
pub fn cpu_temperature(sensors: &[Sensor], label: &str) -> Option<f32> {
    sensors
        .iter()
        .find(|s| s.label.as_deref().is_some_and(|l| l.contains(label)))
        .and_then(|s| s.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_cpu() {
        let stats = parse_cpu(br#"{"total": 95.0, "user": 80.1, "system": 14.9}"#).unwrap();
        assert_eq!(stats.total, Some(95.0));
    }

    #[test]
    fn test_parse_cpu_missing_total() {
        // Field absent is not an error - reading is just unavailable
        let stats = parse_cpu(br#"{"user": 12.0}"#).unwrap();
        assert_eq!(stats.total, None);
    }

    #[test]
    fn test_parse_mem() {
        let stats = parse_mem(br#"{"percent": 42.5, "total": 16777216}"#).unwrap();
        assert_eq!(stats.percent, Some(42.5));
    }

    #[test]
    fn test_parse_system() {
        let info = parse_system(br#"{"hostname": "rack-01", "os_name": "Linux"}"#).unwrap();
        assert_eq!(info.hostname.as_deref(), Some("rack-01"));
    }

    #[test]
    fn test_parse_sensors_and_lookup() {
        let body = br#"[
            {"label": "Ambient", "value": 31.0, "unit": "C"},
            {"label": "Package id 0", "value": 63.5, "unit": "C"},
            {"label": "Core 0", "value": 60.0, "unit": "C"}
        ]"#;
        let sensors = parse_sensors(body).unwrap();
        assert_eq!(sensors.len(), 3);
        assert_eq!(cpu_temperature(&sensors, "Package id 0"), Some(63.5));
    }

    #[test]
    fn test_sensor_lookup_missing() {
        let sensors = parse_sensors(br#"[{"label": "Ambient", "value": 31.0}]"#).unwrap();
        assert_eq!(cpu_temperature(&sensors, "Package id 0"), None);
    }

    #[test]
    fn test_parse_fs() {
        let body = br#"[
            {"device": "/dev/sda1", "mnt_point": "/", "used": 100, "size": 400, "percent": 25.0},
            {"device": "/dev/loop7", "mnt_point": "/snap/core/1", "used": 5, "size": 5, "percent": 100.0}
        ]"#;
        let fs = parse_fs(body).unwrap();
        assert_eq!(fs.len(), 2);
        assert_eq!(fs[0].mnt_point.as_deref(), Some("/"));
        assert_eq!(fs[1].device.as_deref(), Some("/dev/loop7"));
    }

    #[test]
    fn test_parse_network() {
        let body = br#"[
            {"interface_name": "enp3s0", "bytes_sent": 1024, "bytes_recv": 2048, "speed": 1000000000}
        ]"#;
        let ifaces = parse_network(body).unwrap();
        assert_eq!(ifaces[0].interface_name.as_deref(), Some("enp3s0"));
        assert_eq!(ifaces[0].bytes_recv, Some(2048));
    }

    #[test]
    fn test_malformed_body() {
        assert_eq!(parse_cpu(b"not json").unwrap_err(), ApiError::Malformed);
        assert_eq!(parse_fs(br#"{"total": 1}"#).unwrap_err(), ApiError::Malformed);
    }

    proptest! {
        // Parsers must reject or accept arbitrary bytes, never panic
        #[test]
        fn parse_never_panics(body in proptest::collection::vec(any::<u8>(), 0..256)) {
            let _ = parse_cpu(&body);
            let _ = parse_sensors(&body);
            let _ = parse_fs(&body);
        }
    }
}
