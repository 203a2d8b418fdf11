//! Engine tick driver
//!
//! One explicit application-state struct and one `tick` function that
//! sequences everything: input, power, the alert overlay, navigation
//! dispatch, the periodic fetch, and rendering. The firmware calls
//! [`Engine::tick`] once per loop iteration and sleeps [`TICK_INTERVAL_MS`]
//! between iterations; that sleep is the only suspension point.
//!
//! All collaborators come in by exclusive reference through
//! [`Peripherals`] - the engine owns no hardware and no globals.

use crate::alert::{AlertState, MSG_OFFLINE, MSG_UPDATE_FAILED};
use crate::input::InputRouter;
use crate::metrics::MetricsSnapshot;
use crate::power::{in_sleep_window, local_hour, PowerState, PowerTransition, ECO_CONTRAST};
use crate::refresh::RefreshScheduler;
use crate::render;
use crate::settings::{SettingKind, SettingsMenu, SettingsState};
use crate::state::{Button, InputContext, NavState, Page, SettingsPane};
use crate::traits::{ButtonPins, ConfigStore, MonitorClient, NetError, Updater};

use skopos_api::cpu_temperature;
use skopos_display::DisplaySurface;

/// Sleep between loop iterations (ms)
pub const TICK_INTERVAL_MS: u64 = 50;

/// Fixed update-progress checkpoints, one per tick
pub const UPDATE_CHECKPOINTS: [u8; 4] = [10, 40, 70, 100];

/// How long the brightness slider stays up after an adjustment (ms)
pub const BRIGHTNESS_OVERLAY_MS: u64 = 3_000;

/// How long the "Saved" confirmation shows after a settings reset (ms)
pub const SAVED_FLASH_MS: u64 = 2_000;

/// Sensor label of the CPU package temperature
pub const TEMP_SENSOR_LABEL: &str = "Package id 0";

/// The hardware collaborators, borrowed for one call
pub struct Peripherals<'a, C, S, U, D, B> {
    pub client: &'a mut C,
    pub store: &'a mut S,
    pub updater: &'a mut U,
    pub display: &'a mut D,
    pub buttons: &'a mut B,
}

/// The whole application state
pub struct Engine {
    version: &'static str,
    settings: SettingsState,
    nav: NavState,
    menu: SettingsMenu,
    alert: AlertState,
    power: PowerState,
    snapshot: MetricsSnapshot,
    refresh: RefreshScheduler,
    input: InputRouter,
    /// Index into [`UPDATE_CHECKPOINTS`] while update progress runs
    update_step: usize,
    /// Brightness slider visible until this instant
    slider_until_ms: Option<u64>,
    /// "Saved" confirmation visible until this instant
    saved_until_ms: Option<u64>,
}

impl Engine {
    /// Create an engine over an already-loaded settings record
    pub fn new(settings: SettingsState, version: &'static str) -> Self {
        Self {
            version,
            settings,
            nav: NavState::new(),
            menu: SettingsMenu::new(),
            alert: AlertState::new(),
            power: PowerState::new(),
            snapshot: MetricsSnapshot::new(),
            refresh: RefreshScheduler::new(),
            input: InputRouter::new(),
            update_step: 0,
            slider_until_ms: None,
            saved_until_ms: None,
        }
    }

    /// Create an engine from the config store, defaulting on load failure
    pub fn from_store<S: ConfigStore>(store: &mut S, version: &'static str) -> Self {
        let settings = store.load().unwrap_or_default();
        Self::new(settings, version)
    }

    /// The active settings record
    pub fn settings(&self) -> &SettingsState {
        &self.settings
    }

    /// The active top-level page
    pub fn page(&self) -> Page {
        self.nav.page
    }

    /// Whether the alert overlay is showing
    pub fn alert_active(&self) -> bool {
        self.alert.active()
    }

    /// Whether the display is powered off
    pub fn screen_off(&self) -> bool {
        self.power.screen_off()
    }

    /// The user contrast level, for initial display setup
    pub fn brightness(&self) -> u8 {
        self.power.brightness()
    }

    /// One-time fetch of the stats-page metrics before the loop starts
    pub fn bootstrap<C: MonitorClient>(&mut self, client: &mut C, now_ms: u64) {
        self.run_fetch(client, now_ms);
    }

    /// One iteration of the control loop
    pub fn tick<C, S, U, D, B>(
        &mut self,
        p: &mut Peripherals<'_, C, S, U, D, B>,
        now_ms: u64,
        utc_hour: u8,
    ) where
        C: MonitorClient,
        S: ConfigStore,
        U: Updater,
        D: DisplaySurface,
        B: ButtonPins,
    {
        let pressed = p.buttons.read_all();
        let any_pressed = pressed.iter().any(|&b| b);
        if any_pressed {
            self.power.note_activity(now_ms);
        }

        // Power axes first; they may short-circuit the whole tick
        let hour = local_hour(utc_hour, self.settings.utc_offset);
        let in_window = in_sleep_window(
            self.settings.sleep_enabled,
            self.settings.sleep_start,
            self.settings.sleep_end,
            hour,
        );
        match self
            .power
            .tick(now_ms, in_window, self.settings.eco_mode, any_pressed)
        {
            Some(PowerTransition::ScreenOff) => {
                let _ = p.display.set_power(false);
            }
            Some(PowerTransition::ScreenOn) | Some(PowerTransition::WokeByButton) => {
                let _ = p.display.set_power(true);
                let _ = p.display.set_contrast(self.power.brightness());
            }
            Some(PowerTransition::EcoEngaged) => {
                let _ = p.display.set_contrast(ECO_CONTRAST);
            }
            Some(PowerTransition::EcoReleased) => {
                let _ = p.display.set_contrast(self.power.brightness());
            }
            None => {}
        }

        if self.power.screen_off() {
            return;
        }

        // Drain the press that woke the display: it is not a command
        if self.power.wake_ignore() {
            self.power.release_wake_ignore(any_pressed);
            self.input.consume_all(now_ms);
            self.render(p.display, now_ms);
            return;
        }

        // Alert lifecycle: timeout auto-clear, or immediate clear on any
        // press (which is then consumed, not interpreted as navigation)
        if self.alert.active() {
            self.alert.tick(now_ms);
            if self.alert.active() && any_pressed {
                self.alert.clear();
                self.input.consume_all(now_ms);
            }
        }

        // While the overlay shows, navigation and polling are paused;
        // both resume the tick after it clears
        if !self.alert.active() {
            if self.nav.in_settings() {
                self.dispatch_settings(p, now_ms, pressed);
            } else {
                self.dispatch_pages(p, now_ms, pressed);
            }

            // Fetches also pause while the settings screen is open
            if !self.nav.in_settings()
                && self
                    .refresh
                    .should_fetch(now_ms, self.settings.refresh_secs)
            {
                self.run_fetch(p.client, now_ms);
            }
        }

        // Expire the transient overlays
        if self.slider_until_ms.is_some_and(|t| now_ms >= t) {
            self.slider_until_ms = None;
        }
        if self.saved_until_ms.is_some_and(|t| now_ms >= t) {
            self.saved_until_ms = None;
        }

        self.render(p.display, now_ms);
    }

    /// Button dispatch on the top-level pages
    fn dispatch_pages<C, S, U, D, B>(
        &mut self,
        p: &mut Peripherals<'_, C, S, U, D, B>,
        now_ms: u64,
        pressed: [bool; 4],
    ) where
        D: DisplaySurface,
    {
        let Some(button) = self.input.poll(InputContext::Pages, now_ms, pressed) else {
            return;
        };
        match button {
            Button::K4 => {
                self.menu.reset();
                self.nav.enter_settings();
            }
            Button::K3 => {
                self.nav.cycle_page();
                self.refresh.mark_page_changed();
            }
            Button::K1 | Button::K2 => {
                let dir: i8 = if button == Button::K1 { 1 } else { -1 };
                match self.nav.page {
                    Page::Stats => {
                        self.power.adjust_brightness(dir);
                        if !self.power.eco_active() {
                            let _ = p.display.set_contrast(self.power.brightness());
                        }
                        self.slider_until_ms = Some(now_ms + BRIGHTNESS_OVERLAY_MS);
                    }
                    Page::Disk => {
                        if button == Button::K1 {
                            self.snapshot.select_next_disk();
                        } else {
                            self.snapshot.select_prev_disk();
                        }
                    }
                    Page::Network => {}
                }
            }
        }
    }

    /// Button dispatch inside the settings screen
    fn dispatch_settings<C, S, U, D, B>(
        &mut self,
        p: &mut Peripherals<'_, C, S, U, D, B>,
        now_ms: u64,
        pressed: [bool; 4],
    ) where
        S: ConfigStore,
        U: Updater,
    {
        let pane = self.nav.pane().unwrap_or(SettingsPane::Browsing);

        // Update progress runs on ticks, not on buttons
        if pane == SettingsPane::UpdateProgress {
            if self.update_step >= UPDATE_CHECKPOINTS.len() {
                // All checkpoints shown; hand over to the updater. On
                // success this reboots the device and never returns, so
                // reaching the next line means the update failed.
                let _ = p.updater.replace_and_restart();
                self.alert.trigger(MSG_UPDATE_FAILED, now_ms);
                self.update_step = 0;
                self.menu.reset();
                self.nav.leave_settings();
            } else {
                self.update_step += 1;
            }
            return;
        }

        let Some(button) = self.input.poll(InputContext::Settings, now_ms, pressed) else {
            return;
        };

        match pane {
            SettingsPane::Browsing => match button {
                Button::K1 | Button::K2 => {
                    let dir: i8 = if button == Button::K1 { 1 } else { -1 };
                    match self.menu.current().kind {
                        SettingKind::Header => {}
                        SettingKind::ActionUpdate => {
                            self.nav.open_pane(SettingsPane::UpdateConfirm);
                        }
                        SettingKind::ActionReset => {
                            self.nav.open_pane(SettingsPane::ResetConfirm);
                        }
                        ref kind => {
                            if self.settings.adjust(kind, dir) {
                                // A failed write is the store's problem; the
                                // in-memory record stays authoritative
                                let _ = p.store.save(&self.settings);
                            }
                        }
                    }
                }
                Button::K3 => self.menu.advance(),
                Button::K4 => {
                    self.menu.reset();
                    self.nav.leave_settings();
                }
            },
            SettingsPane::UpdateConfirm => match button {
                Button::K1 => {
                    self.nav.close_pane();
                    self.nav.open_pane(SettingsPane::UpdateProgress);
                    self.update_step = 0;
                }
                Button::K2 => self.nav.close_pane(),
                Button::K3 | Button::K4 => {}
            },
            SettingsPane::ResetConfirm => match button {
                Button::K1 => {
                    self.settings.reset_to_defaults();
                    let _ = p.store.save(&self.settings);
                    self.saved_until_ms = Some(now_ms + SAVED_FLASH_MS);
                    self.nav.close_pane();
                }
                Button::K2 => self.nav.close_pane(),
                Button::K3 | Button::K4 => {}
            },
            // Handled above, before the debounced poll
            SettingsPane::UpdateProgress => {}
        }
    }

    /// Fetch the active page's data and update the snapshot
    fn run_fetch<C: MonitorClient>(&mut self, client: &mut C, now_ms: u64) {
        let result = match self.nav.page {
            Page::Stats => self.fetch_stats(client),
            Page::Disk => client.fetch_fs().map(|list| self.snapshot.apply_fs(&list)),
            Page::Network => client
                .fetch_network()
                .map(|list| self.snapshot.apply_network(&list)),
        };

        match result {
            Ok(()) => {
                self.refresh.note_success(now_ms);
                self.alert.evaluate(&self.snapshot, now_ms);
            }
            Err(NetError::LinkDown) => {
                self.refresh.note_disconnected(now_ms);
                self.alert.trigger(MSG_OFFLINE, now_ms);
            }
            Err(_) => {
                self.refresh.note_failure(now_ms);
                self.alert.trigger(MSG_OFFLINE, now_ms);
            }
        }
    }

    /// Fetch the stats-page endpoints; fields update independently
    fn fetch_stats<C: MonitorClient>(&mut self, client: &mut C) -> Result<(), NetError> {
        let mut first_error = None;

        match client.fetch_system() {
            Ok(info) => {
                if let Some(hostname) = info.hostname.as_deref() {
                    self.snapshot.apply_hostname(hostname);
                }
            }
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }

        match client.fetch_cpu() {
            Ok(cpu) => {
                if cpu.total.is_some() {
                    self.snapshot.cpu_pct = cpu.total;
                }
            }
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }

        match client.fetch_mem() {
            Ok(mem) => {
                if mem.percent.is_some() {
                    self.snapshot.mem_pct = mem.percent;
                }
            }
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }

        match client.fetch_sensors() {
            Ok(sensors) => {
                if let Some(temp) = cpu_temperature(&sensors, TEMP_SENSOR_LABEL) {
                    self.snapshot.temp_c = Some(temp);
                }
            }
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    /// Render the active screen, or the alert overlay if one is up
    fn render<D: DisplaySurface>(&self, display: &mut D, _now_ms: u64) {
        let lang = self.settings.language;
        if self.alert.active() {
            let _ = render::render_alert(display, lang, self.alert.message());
            let _ = display.flush();
            return;
        }
        let result = match self.nav.pane() {
            Some(SettingsPane::Browsing) => render::render_settings(
                display,
                &self.menu,
                &self.settings,
                self.version,
                self.saved_until_ms.is_some(),
            ),
            Some(SettingsPane::UpdateConfirm) => render::render_update_confirm(display, lang),
            Some(SettingsPane::UpdateProgress) => {
                let index = self.update_step.min(UPDATE_CHECKPOINTS.len() - 1);
                render::render_update_progress(display, lang, UPDATE_CHECKPOINTS[index])
            }
            Some(SettingsPane::ResetConfirm) => render::render_reset_confirm(display, lang),
            None => match self.nav.page {
                Page::Stats => render::render_stats(
                    display,
                    &self.snapshot,
                    &self.settings,
                    self.slider_until_ms.map(|_| self.power.brightness()),
                ),
                Page::Disk => render::render_disk(display, &self.snapshot, &self.settings),
                Page::Network => render::render_network(display, &self.snapshot, &self.settings),
            },
        };
        let _ = result;
        let _ = display.flush();
    }
}
