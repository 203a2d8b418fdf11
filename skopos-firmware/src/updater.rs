//! Self-update
//!
//! Downloads a new firmware image into the staging half of flash, stamps
//! it with a header, and resets the device. The second-stage loader picks
//! the staged image up on the next boot; from the control core's point of
//! view a successful update simply never returns.

use core::cell::RefCell;

use defmt::{error, info};
use embassy_futures::block_on;
use embassy_net::dns::DnsSocket;
use embassy_net::tcp::client::{TcpClient, TcpClientState};
use embassy_net::Stack;
use embedded_io_async::Read;
use embedded_storage_async::nor_flash::NorFlash;
use reqwless::client::HttpClient;
use reqwless::request::Method;

use skopos_core::traits::{UpdateError, Updater};

use crate::config::{FIRMWARE_URL, STAGING_OFFSET, STAGING_SIZE};
use crate::store::AppFlash;

/// Flash sector granularity
const SECTOR: u32 = 4096;

/// Magic stamped ahead of a complete staged image
const STAGING_MAGIC: u32 = 0x534B_4F50; // "SKOP"

/// Firmware replacement over HTTP + staged flash
pub struct OtaUpdater<'a> {
    stack: Stack<'static>,
    flash: &'a RefCell<AppFlash>,
}

impl<'a> OtaUpdater<'a> {
    pub fn new(stack: Stack<'static>, flash: &'a RefCell<AppFlash>) -> Self {
        Self { stack, flash }
    }

    async fn download_to_staging(&mut self) -> Result<u32, UpdateError> {
        let state: TcpClientState<1, 1024, 1024> = TcpClientState::new();
        let tcp = TcpClient::new(self.stack, &state);
        let dns = DnsSocket::new(self.stack);
        let mut client = HttpClient::new(&tcp, &dns);

        let mut header_buf = [0u8; 1024];
        let mut request = client
            .request(Method::GET, FIRMWARE_URL)
            .await
            .map_err(|_| UpdateError::Download)?;
        let response = request
            .send(&mut header_buf)
            .await
            .map_err(|_| UpdateError::Download)?;
        if !response.status.is_successful() {
            return Err(UpdateError::Download);
        }

        let mut flash = self.flash.borrow_mut();
        let mut reader = response.body().reader();

        // Stream the image into staging, one erased sector at a time.
        // The first sector is reserved for the header and written last,
        // so a torn download never looks complete.
        let mut offset: u32 = SECTOR;
        let mut chunk = [0u8; SECTOR as usize];
        loop {
            let mut filled = 0;
            while filled < chunk.len() {
                let n = reader
                    .read(&mut chunk[filled..])
                    .await
                    .map_err(|_| UpdateError::Download)?;
                if n == 0 {
                    break;
                }
                filled += n;
            }
            if filled == 0 {
                break;
            }

            if offset + SECTOR > STAGING_SIZE {
                return Err(UpdateError::Flash);
            }
            // Pad the tail to the write granularity
            chunk[filled..].fill(0xFF);
            flash
                .erase(STAGING_OFFSET + offset, STAGING_OFFSET + offset + SECTOR)
                .await
                .map_err(|_| UpdateError::Flash)?;
            flash
                .write(STAGING_OFFSET + offset, &chunk)
                .await
                .map_err(|_| UpdateError::Flash)?;
            offset += SECTOR;

            if filled < chunk.len() {
                break;
            }
        }

        let image_len = offset - SECTOR;
        if image_len == 0 {
            return Err(UpdateError::Download);
        }

        // Header: magic + image length
        let mut header = [0xFFu8; 256];
        header[0..4].copy_from_slice(&STAGING_MAGIC.to_le_bytes());
        header[4..8].copy_from_slice(&image_len.to_le_bytes());
        flash
            .erase(STAGING_OFFSET, STAGING_OFFSET + SECTOR)
            .await
            .map_err(|_| UpdateError::Flash)?;
        flash
            .write(STAGING_OFFSET, &header)
            .await
            .map_err(|_| UpdateError::Flash)?;

        Ok(image_len)
    }
}

impl Updater for OtaUpdater<'_> {
    fn replace_and_restart(&mut self) -> UpdateError {
        match block_on(self.download_to_staging()) {
            Ok(len) => {
                info!("Staged {} byte image, restarting", len);
                cortex_m::peripheral::SCB::sys_reset();
            }
            Err(e) => {
                error!("Update failed: {}", e);
                e
            }
        }
    }
}
