//! Navigation state machine
//!
//! Top-level pages, the settings sub-machine, and the button events that
//! drive them.

pub mod events;
pub mod machine;

pub use events::{Button, InputContext};
pub use machine::{NavState, Page, SettingsPane};
