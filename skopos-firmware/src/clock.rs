//! Wall-clock time for the sleep window
//!
//! The board has no battery-backed RTC, so the UTC hour is derived from a
//! single SNTP query at boot plus the monotonic uptime. Drift over weeks
//! of uptime is a few seconds - far below the one-hour granularity the
//! sleep window needs.

use defmt::{info, warn};
use embassy_net::dns::DnsQueryType;
use embassy_net::udp::{PacketMetadata, UdpSocket};
use embassy_net::Stack;
use embassy_time::{with_timeout, Duration};

use crate::config::NTP_SERVER;

/// Seconds between the NTP epoch (1900) and the Unix epoch (1970)
const NTP_UNIX_DELTA: u64 = 2_208_988_800;

/// Offset of the transmit-timestamp seconds field in an NTP packet
const TRANSMIT_TS_OFFSET: usize = 40;

/// Boot-time reference for the wall clock
#[derive(Clone, Copy)]
pub struct BootClock {
    /// Unix seconds at boot; 0 when the SNTP query failed
    boot_epoch: u64,
}

impl BootClock {
    /// Sync once against the NTP server
    ///
    /// On failure the clock starts at the Unix epoch; the sleep window
    /// then runs on a wrong but stable hour until the next reboot.
    pub async fn sync(stack: Stack<'static>) -> Self {
        match fetch_unix_epoch(stack).await {
            Some(epoch) => {
                info!("SNTP synced, unix epoch {}", epoch);
                Self { boot_epoch: epoch }
            }
            None => {
                warn!("SNTP sync failed, sleep window will use uptime hours");
                Self { boot_epoch: 0 }
            }
        }
    }

    /// Current UTC hour, given the uptime in seconds
    pub fn utc_hour(&self, uptime_secs: u64) -> u8 {
        (((self.boot_epoch + uptime_secs) / 3600) % 24) as u8
    }
}

/// One SNTP request/response exchange
async fn fetch_unix_epoch(stack: Stack<'static>) -> Option<u64> {
    let address = *stack
        .dns_query(NTP_SERVER, DnsQueryType::A)
        .await
        .ok()?
        .first()?;

    let mut rx_meta = [PacketMetadata::EMPTY; 4];
    let mut tx_meta = [PacketMetadata::EMPTY; 4];
    let mut rx_buf = [0u8; 128];
    let mut tx_buf = [0u8; 128];
    let mut socket = UdpSocket::new(stack, &mut rx_meta, &mut rx_buf, &mut tx_meta, &mut tx_buf);
    socket.bind(1123).ok()?;

    // 48-byte client request: LI=0, VN=3, Mode=3
    let mut packet = [0u8; 48];
    packet[0] = 0x1B;
    socket.send_to(&packet, (address, 123)).await.ok()?;

    let mut response = [0u8; 48];
    let (len, _) = with_timeout(
        Duration::from_secs(5),
        socket.recv_from(&mut response),
    )
    .await
    .ok()?
    .ok()?;

    if len < TRANSMIT_TS_OFFSET + 4 {
        return None;
    }
    let secs = u32::from_be_bytes(
        response[TRANSMIT_TS_OFFSET..TRANSMIT_TS_OFFSET + 4]
            .try_into()
            .ok()?,
    );
    (secs as u64).checked_sub(NTP_UNIX_DELTA)
}
