//! Settings model
//!
//! The static menu descriptor list, the mutable settings record it
//! operates on, and the cursor/scroll state of the settings screen.

pub mod descriptor;
pub mod menu;
pub mod store;

pub use descriptor::{SettingDescriptor, SettingKey, SettingKind, MENU};
pub use menu::{SettingsMenu, VISIBLE_ROWS};
pub use store::{SettingsState, Unit};
