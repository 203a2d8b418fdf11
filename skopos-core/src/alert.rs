//! Alert engine
//!
//! Threshold evaluation over the latest fetched metrics plus the alert
//! lifecycle: trigger, full-screen overlay, auto-clear after a timeout or
//! immediate clear on any button press. There is no queue - the newest
//! alert overwrites whatever was showing.

use crate::metrics::MetricsSnapshot;

/// CPU usage threshold in percent
pub const CPU_ALERT_PCT: f32 = 90.0;

/// Memory usage threshold in percent
pub const MEM_ALERT_PCT: f32 = 90.0;

/// Temperature threshold in °C
pub const TEMP_ALERT_C: f32 = 75.0;

/// Auto-clear timeout (ms)
pub const ALERT_TIMEOUT_MS: u64 = 10_000;

/// Alert message for CPU overload
pub const MSG_CPU: &str = "CPU > 90%";

/// Alert message for memory overload
pub const MSG_MEM: &str = "RAM > 90%";

/// Alert message for over-temperature
pub const MSG_TEMP: &str = "Temp > 75C";

/// Alert message when the monitoring server cannot be reached
pub const MSG_OFFLINE: &str = "Server offline";

/// Alert message when a self-update attempt failed
pub const MSG_UPDATE_FAILED: &str = "Update failed";

/// Transient alert state
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertState {
    active: bool,
    message: &'static str,
    triggered_at_ms: u64,
}

impl AlertState {
    /// Create an inactive alert
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the overlay is showing
    pub fn active(&self) -> bool {
        self.active
    }

    /// The message to display while active
    pub fn message(&self) -> &'static str {
        self.message
    }

    /// Raise an alert, overwriting any active one
    pub fn trigger(&mut self, message: &'static str, now_ms: u64) {
        self.active = true;
        self.message = message;
        self.triggered_at_ms = now_ms;
    }

    /// Clear immediately (button press)
    pub fn clear(&mut self) {
        self.active = false;
    }

    /// Auto-clear once the timeout has elapsed
    pub fn tick(&mut self, now_ms: u64) {
        if self.active && now_ms.saturating_sub(self.triggered_at_ms) >= ALERT_TIMEOUT_MS {
            self.active = false;
        }
    }

    /// Evaluate thresholds over a freshly-applied snapshot
    ///
    /// Checked in fixed priority order: CPU, memory, temperature. A missing
    /// reading never triggers. Call only after a successful fetch so a
    /// cleared alert does not immediately re-raise from the same stale data.
    pub fn evaluate(&mut self, snapshot: &MetricsSnapshot, now_ms: u64) {
        if snapshot.cpu_pct.is_some_and(|v| v > CPU_ALERT_PCT) {
            self.trigger(MSG_CPU, now_ms);
        } else if snapshot.mem_pct.is_some_and(|v| v > MEM_ALERT_PCT) {
            self.trigger(MSG_MEM, now_ms);
        } else if snapshot.temp_c.is_some_and(|v| v > TEMP_ALERT_C) {
            self.trigger(MSG_TEMP, now_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_and_clear() {
        let mut alert = AlertState::new();
        assert!(!alert.active());

        alert.trigger(MSG_OFFLINE, 100);
        assert!(alert.active());
        assert_eq!(alert.message(), "Server offline");

        alert.clear();
        assert!(!alert.active());
    }

    #[test]
    fn test_newest_alert_wins() {
        let mut alert = AlertState::new();
        alert.trigger(MSG_CPU, 100);
        alert.trigger(MSG_TEMP, 200);
        assert_eq!(alert.message(), MSG_TEMP);
        assert!(alert.active());
    }

    #[test]
    fn test_auto_clear_at_timeout() {
        let mut alert = AlertState::new();
        alert.trigger(MSG_MEM, 1_000);

        alert.tick(1_000 + ALERT_TIMEOUT_MS - 1);
        assert!(alert.active());

        alert.tick(1_000 + ALERT_TIMEOUT_MS);
        assert!(!alert.active());
    }

    #[test]
    fn test_retrigger_restarts_timeout() {
        let mut alert = AlertState::new();
        alert.trigger(MSG_CPU, 0);
        alert.trigger(MSG_CPU, 8_000);

        alert.tick(10_000);
        assert!(alert.active());
        alert.tick(18_000);
        assert!(!alert.active());
    }

    #[test]
    fn test_evaluate_thresholds() {
        let mut alert = AlertState::new();
        let mut snapshot = MetricsSnapshot::new();

        snapshot.cpu_pct = Some(95.0);
        alert.evaluate(&snapshot, 0);
        assert!(alert.message().contains("90%"));

        // CPU outranks memory
        snapshot.mem_pct = Some(99.0);
        alert.evaluate(&snapshot, 10);
        assert_eq!(alert.message(), MSG_CPU);

        snapshot.cpu_pct = Some(10.0);
        alert.evaluate(&snapshot, 20);
        assert_eq!(alert.message(), MSG_MEM);
    }

    #[test]
    fn test_missing_readings_do_not_trigger() {
        let mut alert = AlertState::new();
        let snapshot = MetricsSnapshot::new();
        alert.evaluate(&snapshot, 0);
        assert!(!alert.active());
    }

    #[test]
    fn test_exact_threshold_does_not_trigger() {
        let mut alert = AlertState::new();
        let mut snapshot = MetricsSnapshot::new();
        snapshot.cpu_pct = Some(90.0);
        snapshot.temp_c = Some(75.0);
        alert.evaluate(&snapshot, 0);
        assert!(!alert.active());
    }
}
