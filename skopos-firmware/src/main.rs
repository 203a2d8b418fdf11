//! Skopos - Server Status Appliance Firmware
//!
//! Main firmware binary for the Pico W status monitor: four buttons, a
//! 128x64 OLED, and a WiFi link to a Glances monitoring server.
//!
//! Core 0 runs the whole control loop - one engine tick, one watchdog
//! feed, one short sleep. Core 1 runs the CYW43 radio driver and the
//! network stack, so a blocking fetch on core 0 still makes progress.
//! Everything the control loop touches goes through the collaborator
//! traits in skopos-core; this file only wires hardware to them.

#![no_std]
#![no_main]

extern crate alloc;

use core::cell::RefCell;

use defmt::{info, warn};
use embassy_executor::{Executor, Spawner};
use embassy_net::StackResources;
use embassy_rp::bind_interrupts;
use embassy_rp::flash::Flash;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::multicore::{spawn_core1, Stack as CoreStack};
use embassy_rp::peripherals::{DMA_CH0, PIO0};
use embassy_rp::pio::Pio;
use embassy_rp::watchdog::Watchdog;
use embassy_time::{Duration, Instant, Timer};
use embedded_alloc::LlffHeap as Heap;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};

use skopos_core::engine::{Engine, Peripherals, TICK_INTERVAL_MS};
use skopos_core::settings::SettingsState;
use skopos_core::traits::ConfigStore;

mod buttons;
mod clock;
mod config;
mod net;
mod oled;
mod store;
mod updater;

// Heap allocator for JSON body parsing
#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 32KB
const HEAP_SIZE: usize = 32 * 1024;

/// Firmware version shown on the settings screen
const VERSION: &str = env!("CARGO_PKG_VERSION");

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
});

// Radio and network plumbing lives on core 1
static CORE1_STACK: StaticCell<CoreStack<8192>> = StaticCell::new();
static EXECUTOR1: StaticCell<Executor> = StaticCell::new();
static CYW43_STATE: StaticCell<cyw43::State> = StaticCell::new();
static NET_RESOURCES: StaticCell<StackResources<8>> = StaticCell::new();

#[embassy_executor::task]
async fn cyw43_task(
    runner: cyw43::Runner<'static, Output<'static>, PioSpi<'static, PIO0, 0, DMA_CH0>>,
) -> ! {
    runner.run().await
}

#[embassy_executor::task]
async fn net_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Skopos firmware {} starting...", VERSION);

    init_heap();

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // CYW43 radio over PIO SPI.
    //
    // The radio firmware and CLM blobs are flashed separately so the
    // repository ships no binaries:
    //   probe-rs download 43439A0.bin     --binary-format bin --chip RP2040 --base-address 0x101b0000
    //   probe-rs download 43439A0_clm.bin --binary-format bin --chip RP2040 --base-address 0x101f8000
    let fw = unsafe { core::slice::from_raw_parts(0x101b_0000 as *const u8, 230321) };
    let clm = unsafe { core::slice::from_raw_parts(0x101f_8000 as *const u8, 4752) };

    let pwr = Output::new(p.PIN_23, Level::Low);
    let cs = Output::new(p.PIN_25, Level::High);
    let mut pio = Pio::new(p.PIO0, Irqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        p.PIN_24,
        p.PIN_29,
        p.DMA_CH0,
    );

    let state = CYW43_STATE.init(cyw43::State::new());
    let (net_device, mut control, cyw43_runner) = cyw43::new(state, pwr, spi, fw).await;

    // Network stack with DHCP
    let net_config = embassy_net::Config::dhcpv4(Default::default());
    // Fixed seed: the stack only uses it for local port randomization
    let seed = 0x0d0a_5eed_c0ff_ee00;
    let (stack, net_runner) = embassy_net::new(
        net_device,
        net_config,
        NET_RESOURCES.init(StackResources::new()),
        seed,
    );

    spawn_core1(
        p.CORE1,
        CORE1_STACK.init(CoreStack::new()),
        move || {
            let executor1 = EXECUTOR1.init(Executor::new());
            executor1.run(|spawner| {
                spawner.spawn(cyw43_task(cyw43_runner)).unwrap();
                spawner.spawn(net_task(net_runner)).unwrap();
            })
        },
    );
    info!("Network runners started on core 1");

    control.init(clm).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;

    // Associate; reconnect attempts are gated to one per backoff window
    loop {
        match control
            .join(
                config::WIFI_SSID,
                cyw43::JoinOptions::new(config::WIFI_PASSWORD.as_bytes()),
            )
            .await
        {
            Ok(()) => break,
            Err(e) => {
                warn!("WiFi join failed (status {}), retrying", e.status);
                Timer::after(Duration::from_secs(config::WIFI_RETRY_SECS)).await;
            }
        }
    }
    info!("WiFi associated");

    stack.wait_config_up().await;
    info!("DHCP configured");

    let boot_clock = clock::BootClock::sync(stack).await;

    // Display on I2C0 (SDA=GP0, SCL=GP1)
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_1, p.PIN_0, i2c::Config::default());
    let mut display = oled::Oled::new(i2c);

    // Front-panel buttons, active low
    let mut panel = buttons::Buttons::new(
        Input::new(p.PIN_2, Pull::Up),
        Input::new(p.PIN_3, Pull::Up),
        Input::new(p.PIN_4, Pull::Up),
        Input::new(p.PIN_5, Pull::Up),
    );

    // Flash, shared between the settings store and the updater
    let flash = RefCell::new(Flash::new(p.FLASH, p.DMA_CH1));
    let mut store = store::FlashStore::new(&flash);
    let mut updater = updater::OtaUpdater::new(stack, &flash);
    let mut client = net::GlancesClient::new(stack, config::SERVER_URL);

    let settings = match store.load() {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Settings load failed ({}), using defaults", e);
            SettingsState::default()
        }
    };
    let mut engine = Engine::new(settings, VERSION);

    // Any fault that escapes the loop stops the feeds and restarts us
    let mut watchdog = Watchdog::new(p.WATCHDOG);
    watchdog.start(Duration::from_secs(8));

    let started = Instant::now();
    engine.bootstrap(&mut client, 0);
    info!("Bootstrap fetch done, entering control loop");

    loop {
        let now_ms = started.elapsed().as_millis();
        let utc_hour = boot_clock.utc_hour(started.elapsed().as_secs());

        let mut peripherals = Peripherals {
            client: &mut client,
            store: &mut store,
            updater: &mut updater,
            display: &mut display,
            buttons: &mut panel,
        };
        engine.tick(&mut peripherals, now_ms, utc_hour);

        watchdog.feed();
        Timer::after(Duration::from_millis(TICK_INTERVAL_MS)).await;
    }
}

/// Initialize the heap allocator
fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}
