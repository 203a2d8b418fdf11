//! Flash-backed settings store
//!
//! Persists the postcard-serialized settings record in the last flash
//! sectors via `sequential-storage`, which handles wear levelling. The
//! flash peripheral is shared with the updater through a `RefCell`; all
//! access happens on the control core, so there is no contention.

use core::cell::RefCell;

use defmt::{error, info};
use embassy_futures::block_on;
use embassy_rp::flash::{Async, Flash};
use embassy_rp::peripherals::FLASH;
use sequential_storage::cache::NoCache;
use sequential_storage::map::{fetch_item, store_item};

use skopos_core::settings::SettingsState;
use skopos_core::traits::{ConfigStore, StoreError};

use crate::config::{FLASH_SIZE, STORE_END, STORE_START};

/// The flash peripheral, shared between store and updater
pub type AppFlash = Flash<'static, FLASH, Async, FLASH_SIZE>;

/// Map key of the settings record
const SETTINGS_KEY: u8 = 0x01;

/// Working buffer for map operations
const BUF_SIZE: usize = 128;

/// Settings persistence over the shared flash
pub struct FlashStore<'a> {
    flash: &'a RefCell<AppFlash>,
}

impl<'a> FlashStore<'a> {
    pub fn new(flash: &'a RefCell<AppFlash>) -> Self {
        Self { flash }
    }
}

impl ConfigStore for FlashStore<'_> {
    fn load(&mut self) -> Result<SettingsState, StoreError> {
        let mut flash = self.flash.borrow_mut();
        let mut buf = [0u8; BUF_SIZE];

        let item = block_on(fetch_item::<u8, &[u8], _>(
            &mut *flash,
            STORE_START..STORE_END,
            &mut NoCache::new(),
            &mut buf,
            &SETTINGS_KEY,
        ));

        match item {
            Ok(Some(bytes)) => {
                let settings =
                    postcard::from_bytes(bytes).map_err(|_| StoreError::Corrupt)?;
                info!("Loaded settings from flash");
                Ok(settings)
            }
            Ok(None) => Err(StoreError::Read),
            Err(_) => Err(StoreError::Read),
        }
    }

    fn save(&mut self, settings: &SettingsState) -> Result<(), StoreError> {
        let mut record = [0u8; BUF_SIZE];
        let bytes: &[u8] =
            postcard::to_slice(settings, &mut record).map_err(|_| StoreError::Write)?;

        let mut flash = self.flash.borrow_mut();
        let mut buf = [0u8; BUF_SIZE];

        let result = block_on(store_item(
            &mut *flash,
            STORE_START..STORE_END,
            &mut NoCache::new(),
            &mut buf,
            &SETTINGS_KEY,
            &bytes,
        ));

        match result {
            Ok(()) => Ok(()),
            Err(_) => {
                // The in-memory record stays authoritative; nothing to do
                // beyond recording that the write was lost
                error!("Settings write to flash failed");
                Err(StoreError::Write)
            }
        }
    }
}
