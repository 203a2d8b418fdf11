//! Power scheduler
//!
//! Owns the display power axis (sleep window + idle timeout) and the eco
//! dimming axis. The two are independent, with one defined interaction:
//! sleep wins - eco is not evaluated while the screen is off.
//!
//! The scheduler never touches the display itself; [`PowerState::tick`]
//! reports a transition and the engine applies it to the display surface.

/// Idle time before the screen powers off inside the sleep window (ms)
pub const SLEEP_IDLE_TIMEOUT_MS: u64 = 15_000;

/// Idle time before eco dimming engages (ms)
pub const ECO_IDLE_TIMEOUT_MS: u64 = 120_000;

/// Contrast used while eco dimming is active
pub const ECO_CONTRAST: u8 = 10;

/// Default user contrast level
pub const DEFAULT_BRIGHTNESS: u8 = 128;

/// Brightness change per K1/K2 press on the stats page
pub const BRIGHTNESS_STEP: u8 = 16;

/// Shift a UTC hour into the configured local time, modulo 24
pub fn local_hour(utc_hour: u8, utc_offset: i8) -> u8 {
    (utc_hour as i16 + utc_offset as i16).rem_euclid(24) as u8
}

/// Whether a local hour falls inside the configured sleep window
///
/// `[start, end)` when `start < end`; wrapped around midnight
/// (`hour >= start || hour < end`) when `start >= end`. With
/// `start == end` the wrap rule covers every hour. Disabled sleep is
/// never in the window.
pub fn in_sleep_window(enabled: bool, start: u8, end: u8, hour: u8) -> bool {
    if !enabled {
        return false;
    }
    if start < end {
        hour >= start && hour < end
    } else {
        hour >= start || hour < end
    }
}

/// Display power transitions reported by [`PowerState::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerTransition {
    /// Idle timeout inside the sleep window: power the display off
    ScreenOff,
    /// Sleep window ended: power the display back on
    ScreenOn,
    /// A button press woke the display; the press must be swallowed
    WokeByButton,
    /// Eco idle timeout reached: drop to [`ECO_CONTRAST`]
    EcoEngaged,
    /// Activity while eco was active: restore the user brightness
    EcoReleased,
}

/// Transient power-management state
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerState {
    screen_off: bool,
    last_activity_ms: u64,
    eco_active: bool,
    wake_ignore: bool,
    brightness: u8,
}

impl Default for PowerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerState {
    /// Boot state: screen on, full activity credit, user brightness
    pub fn new() -> Self {
        Self {
            screen_off: false,
            last_activity_ms: 0,
            eco_active: false,
            wake_ignore: false,
            brightness: DEFAULT_BRIGHTNESS,
        }
    }

    /// Whether the display is currently powered off
    pub fn screen_off(&self) -> bool {
        self.screen_off
    }

    /// Whether the wake press is still being swallowed
    pub fn wake_ignore(&self) -> bool {
        self.wake_ignore
    }

    /// Whether eco dimming is currently applied
    pub fn eco_active(&self) -> bool {
        self.eco_active
    }

    /// The user-configured contrast level
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Adjust the user contrast level, clamped to 0-255
    pub fn adjust_brightness(&mut self, dir: i8) {
        let next = self.brightness as i16 + BRIGHTNESS_STEP as i16 * dir as i16;
        self.brightness = next.clamp(0, 255) as u8;
    }

    /// Record user activity (any button press)
    pub fn note_activity(&mut self, now_ms: u64) {
        self.last_activity_ms = now_ms;
    }

    /// Release the wake swallow once all buttons are up
    pub fn release_wake_ignore(&mut self, any_pressed: bool) {
        if !any_pressed {
            self.wake_ignore = false;
        }
    }

    /// Evaluate the power axes for this tick
    ///
    /// `any_pressed` is the raw (undebounced) read - waking must not wait
    /// out a debounce window.
    pub fn tick(
        &mut self,
        now_ms: u64,
        in_window: bool,
        eco_enabled: bool,
        any_pressed: bool,
    ) -> Option<PowerTransition> {
        if in_window {
            if self.screen_off {
                if any_pressed {
                    // Wake, and swallow the press that did it
                    self.screen_off = false;
                    self.wake_ignore = true;
                    self.last_activity_ms = now_ms;
                    return Some(PowerTransition::WokeByButton);
                }
                return None;
            }
            if now_ms.saturating_sub(self.last_activity_ms) >= SLEEP_IDLE_TIMEOUT_MS {
                self.screen_off = true;
                // Eco state dies with the screen; contrast is restored on wake
                self.eco_active = false;
                return Some(PowerTransition::ScreenOff);
            }
        } else if self.screen_off {
            // Outside the window the screen is forced on
            self.screen_off = false;
            return Some(PowerTransition::ScreenOn);
        }

        // Eco axis, only while the screen is on
        let idle = now_ms.saturating_sub(self.last_activity_ms);
        if self.eco_active && (any_pressed || !eco_enabled || idle < ECO_IDLE_TIMEOUT_MS) {
            self.eco_active = false;
            return Some(PowerTransition::EcoReleased);
        }
        if !self.eco_active && eco_enabled && idle >= ECO_IDLE_TIMEOUT_MS {
            self.eco_active = true;
            return Some(PowerTransition::EcoEngaged);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sleep_window_simple_range() {
        // start < end: [start, end)
        for hour in 0..24u8 {
            let expected = (9..17).contains(&hour);
            assert_eq!(in_sleep_window(true, 9, 17, hour), expected, "hour {hour}");
        }
    }

    #[test]
    fn test_sleep_window_wraps_midnight() {
        // start >= end: hour >= start || hour < end
        for hour in 0..24u8 {
            let expected = hour >= 22 || hour < 6;
            assert_eq!(in_sleep_window(true, 22, 6, hour), expected, "hour {hour}");
        }
    }

    #[test]
    fn test_sleep_window_disabled() {
        for hour in 0..24u8 {
            assert!(!in_sleep_window(false, 22, 6, hour));
        }
    }

    #[test]
    fn test_sleep_window_exhaustive() {
        // Every (start, end, hour) combination, including the degenerate
        // start == end case where the wrap rule covers all 24 hours
        for start in 0..24u8 {
            for end in 0..24u8 {
                for hour in 0..24u8 {
                    let expected = if start < end {
                        hour >= start && hour < end
                    } else {
                        hour >= start || hour < end
                    };
                    assert_eq!(in_sleep_window(true, start, end, hour), expected);
                }
            }
        }
    }

    #[test]
    fn test_local_hour_wraps() {
        assert_eq!(local_hour(23, 2), 1);
        assert_eq!(local_hour(1, -3), 22);
        assert_eq!(local_hour(12, 0), 12);
    }

    #[test]
    fn test_screen_off_after_idle_in_window() {
        let mut power = PowerState::new();
        assert!(power.tick(1_000, true, false, false).is_none());

        let t = power.tick(SLEEP_IDLE_TIMEOUT_MS, true, false, false);
        assert_eq!(t, Some(PowerTransition::ScreenOff));
        assert!(power.screen_off());
    }

    #[test]
    fn test_wake_swallows_press() {
        let mut power = PowerState::new();
        power.tick(SLEEP_IDLE_TIMEOUT_MS, true, false, false);
        assert!(power.screen_off());

        let t = power.tick(SLEEP_IDLE_TIMEOUT_MS + 500, true, false, true);
        assert_eq!(t, Some(PowerTransition::WokeByButton));
        assert!(!power.screen_off());
        assert!(power.wake_ignore());

        // Held: still swallowed. Released: cleared.
        power.release_wake_ignore(true);
        assert!(power.wake_ignore());
        power.release_wake_ignore(false);
        assert!(!power.wake_ignore());
    }

    #[test]
    fn test_screen_forced_on_outside_window() {
        let mut power = PowerState::new();
        power.tick(SLEEP_IDLE_TIMEOUT_MS, true, false, false);
        assert!(power.screen_off());

        let t = power.tick(SLEEP_IDLE_TIMEOUT_MS + 1, false, false, false);
        assert_eq!(t, Some(PowerTransition::ScreenOn));
        assert!(!power.screen_off());
        // A window exit is not a button wake
        assert!(!power.wake_ignore());
    }

    #[test]
    fn test_eco_engages_and_releases() {
        let mut power = PowerState::new();
        assert!(power.tick(1_000, false, true, false).is_none());

        let t = power.tick(ECO_IDLE_TIMEOUT_MS, false, true, false);
        assert_eq!(t, Some(PowerTransition::EcoEngaged));
        assert!(power.eco_active());

        // Activity restores the user brightness
        power.note_activity(ECO_IDLE_TIMEOUT_MS + 10);
        let t = power.tick(ECO_IDLE_TIMEOUT_MS + 10, false, true, true);
        assert_eq!(t, Some(PowerTransition::EcoReleased));
        assert!(!power.eco_active());
    }

    #[test]
    fn test_eco_skipped_while_screen_off() {
        let mut power = PowerState::new();
        power.tick(SLEEP_IDLE_TIMEOUT_MS, true, true, false);
        assert!(power.screen_off());

        // Way past the eco timeout, but the screen is off: nothing fires
        assert!(power.tick(ECO_IDLE_TIMEOUT_MS * 2, true, true, false).is_none());
        assert!(!power.eco_active());
    }

    #[test]
    fn test_brightness_clamps() {
        let mut power = PowerState::new();
        for _ in 0..32 {
            power.adjust_brightness(1);
        }
        assert_eq!(power.brightness(), 255);
        for _ in 0..32 {
            power.adjust_brightness(-1);
        }
        assert_eq!(power.brightness(), 0);
    }
}
