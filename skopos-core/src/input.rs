//! Debounced input router
//!
//! Wraps the raw per-button "currently pressed" reads with a debounce
//! window: a button is reported at most once per window regardless of how
//! long it is held, and at most one button is reported per poll (K1 wins
//! over K2 wins over K3 wins over K4, matching the dispatch order of the
//! handlers).
//!
//! Each input context keeps its own timer, so a press accepted in the
//! settings editor does not suppress an unrelated page-navigation press.

use crate::state::events::{Button, InputContext, CONTEXT_COUNT};

/// Minimum time between two accepted presses in one context (ms)
pub const DEBOUNCE_MS: u64 = 200;

/// Debounced router over the raw button reads
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputRouter {
    /// Timestamp of the last accepted press, per context
    last_accept_ms: [Option<u64>; CONTEXT_COUNT],
}

impl InputRouter {
    /// Create a router with open debounce windows
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the newly-accepted button for this context, if any
    ///
    /// `pressed` is the raw read of all four buttons in [`Button::ALL`]
    /// order.
    pub fn poll(
        &mut self,
        ctx: InputContext,
        now_ms: u64,
        pressed: [bool; 4],
    ) -> Option<Button> {
        if !self.window_open(ctx, now_ms) {
            return None;
        }

        let button = Button::ALL
            .iter()
            .copied()
            .find(|b| pressed[b.index()])?;

        self.last_accept_ms[ctx.index()] = Some(now_ms);
        Some(button)
    }

    /// Close both debounce windows, e.g. after a press was consumed by
    /// the alert overlay so the held button does not also navigate
    pub fn consume_all(&mut self, now_ms: u64) {
        for slot in &mut self.last_accept_ms {
            *slot = Some(now_ms);
        }
    }

    fn window_open(&self, ctx: InputContext, now_ms: u64) -> bool {
        match self.last_accept_ms[ctx.index()] {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= DEBOUNCE_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [bool; 4] = [false; 4];

    fn only(button: Button) -> [bool; 4] {
        let mut pressed = NONE;
        pressed[button.index()] = true;
        pressed
    }

    #[test]
    fn test_first_press_accepted() {
        let mut router = InputRouter::new();
        assert_eq!(
            router.poll(InputContext::Pages, 0, only(Button::K3)),
            Some(Button::K3)
        );
    }

    #[test]
    fn test_held_button_reported_once_per_window() {
        let mut router = InputRouter::new();
        assert!(router.poll(InputContext::Pages, 0, only(Button::K1)).is_some());

        // Still held inside the window: suppressed
        assert!(router.poll(InputContext::Pages, 50, only(Button::K1)).is_none());
        assert!(router.poll(InputContext::Pages, 199, only(Button::K1)).is_none());

        // Window elapsed: reported again
        assert!(router.poll(InputContext::Pages, 200, only(Button::K1)).is_some());
    }

    #[test]
    fn test_contexts_do_not_couple() {
        let mut router = InputRouter::new();
        assert!(router.poll(InputContext::Settings, 0, only(Button::K1)).is_some());

        // The settings press does not eat a pages press in the same window
        assert!(router.poll(InputContext::Pages, 50, only(Button::K3)).is_some());
    }

    #[test]
    fn test_priority_order() {
        let mut router = InputRouter::new();
        let both = {
            let mut p = only(Button::K2);
            p[Button::K4.index()] = true;
            p
        };
        assert_eq!(
            router.poll(InputContext::Pages, 0, both),
            Some(Button::K2)
        );
    }

    #[test]
    fn test_consume_all_closes_windows() {
        let mut router = InputRouter::new();
        router.consume_all(1_000);
        assert!(router.poll(InputContext::Pages, 1_100, only(Button::K1)).is_none());
        assert!(router.poll(InputContext::Settings, 1_100, only(Button::K1)).is_none());
        assert!(router.poll(InputContext::Pages, 1_200, only(Button::K1)).is_some());
    }

    #[test]
    fn test_no_press_keeps_window_open() {
        let mut router = InputRouter::new();
        assert!(router.poll(InputContext::Pages, 0, NONE).is_none());
        assert!(router.poll(InputContext::Pages, 1, only(Button::K4)).is_some());
    }
}
