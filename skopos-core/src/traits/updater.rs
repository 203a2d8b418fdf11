//! Self-update trait

/// Errors from a failed update attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateError {
    /// The new image could not be downloaded
    Download,
    /// The new image could not be written
    Flash,
}

/// Replaces the running program image and restarts the device
pub trait Updater {
    /// Perform the update
    ///
    /// On success the device reboots into the new image and this call
    /// never returns; the only observable outcome is the failure.
    fn replace_and_restart(&mut self) -> UpdateError;
}
