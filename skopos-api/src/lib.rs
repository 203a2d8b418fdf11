//! Glances v4 REST API surface
//!
//! This crate defines the slice of the Glances monitoring API the appliance
//! consumes: endpoint paths relative to the configured server URL, and the
//! JSON payload types for each endpoint.
//!
//! Payloads are parsed leniently. Glances emits large objects with many
//! plugin-specific fields; everything not listed here is ignored, and the
//! fields we do read are optional so that a missing metric degrades to
//! "no reading" rather than a parse error.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod endpoints;
pub mod model;

pub use endpoints::{Endpoint, MAX_URL_LEN};
pub use model::{
    cpu_temperature, ApiError, CpuStats, FsEntry, MemStats, NetInterface, Sensor, SystemInfo,
};
