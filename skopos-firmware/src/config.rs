//! Board constants and compile-time configuration
//!
//! Network credentials, server addresses, and the flash layout live here
//! so they can be tuned in one place before flashing.

// Network

/// WiFi network name
pub const WIFI_SSID: &str = "Wifi Name";

/// WiFi passphrase
pub const WIFI_PASSWORD: &str = "Wifi Password";

/// Base URL of the Glances server, no trailing slash
pub const SERVER_URL: &str = "http://192.168.1.10:61208";

/// Where the updater downloads a new firmware image from
pub const FIRMWARE_URL: &str = "http://192.168.1.10/skopos/firmware.bin";

/// NTP server used once at boot for the sleep-window wall clock
pub const NTP_SERVER: &str = "pool.ntp.org";

/// Timeout for one HTTP request (seconds)
pub const HTTP_TIMEOUT_SECS: u64 = 5;

/// Gate between WiFi join attempts (seconds)
pub const WIFI_RETRY_SECS: u64 = 10;

// GPIO pin assignments (Pico W)
//
//   I²C SDA  → GP0
//   I²C SCL  → GP1
//   K1       → GP2 (active low)
//   K2       → GP3
//   K3       → GP4
//   K4       → GP5
//
// GP23/24/25/29, PIO0 and DMA_CH0 belong to the on-board CYW43 radio.

// Flash layout (2 MB part)
//
// The program image owns the first megabyte (see memory.x). The second
// megabyte holds the update staging area and the settings store.

/// Total flash size in bytes
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Byte offset of the update staging area
pub const STAGING_OFFSET: u32 = 0x10_0000;

/// Size of the update staging area
pub const STAGING_SIZE: u32 = 0xF_E000;

/// Byte range of the settings store (last two 4 KB sectors)
pub const STORE_START: u32 = 0x1F_E000;
pub const STORE_END: u32 = 0x20_0000;
