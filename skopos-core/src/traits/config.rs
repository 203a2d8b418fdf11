//! Persistent configuration store trait

use crate::settings::SettingsState;

/// Errors from the config store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Backing storage could not be read
    Read,
    /// Backing storage could not be written
    Write,
    /// Stored record did not decode
    Corrupt,
}

/// Key-value persistence for the settings record
///
/// Load failures fall back to compiled defaults at the call site; save
/// failures are logged by the implementation and the in-memory record
/// stays authoritative for the session.
pub trait ConfigStore {
    /// Load the persisted settings record
    fn load(&mut self) -> Result<SettingsState, StoreError>;

    /// Persist the settings record
    fn save(&mut self, settings: &SettingsState) -> Result<(), StoreError>;
}
