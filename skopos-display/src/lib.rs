//! Display abstraction for the Skopos appliance
//!
//! The control core draws every page through the [`DisplaySurface`] trait.
//! Firmware implements it over the real OLED; host tests use the
//! [`CaptureSurface`] to assert on what a render pass produced.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backend;
pub mod capture;

pub use backend::{DisplayError, DisplaySurface, DISPLAY_HEIGHT, DISPLAY_WIDTH};
pub use capture::CaptureSurface;
