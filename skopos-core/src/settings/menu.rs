//! Settings-screen cursor and scroll state
//!
//! The menu shows a 3-row window into the descriptor list. The scroll
//! offset follows the cursor so the cursor row is always visible.

use crate::settings::descriptor::{SettingDescriptor, MENU};

/// Rows visible at once on the settings screen
pub const VISIBLE_ROWS: usize = 3;

/// Cursor/scroll state of the settings screen
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SettingsMenu {
    cursor: usize,
    scroll: usize,
}

impl SettingsMenu {
    /// Create a menu at the first row
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor index into [`MENU`]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// First visible row index
    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    /// The descriptor under the cursor
    pub fn current(&self) -> &'static SettingDescriptor {
        &MENU[self.cursor]
    }

    /// Move the cursor to the next descriptor, wrapping to the top
    pub fn advance(&mut self) {
        self.cursor = (self.cursor + 1) % MENU.len();
        self.follow_cursor();
    }

    /// Reset cursor and scroll to the top (on leaving the settings screen)
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.scroll = 0;
    }

    /// Keep the cursor inside the visible window
    fn follow_cursor(&mut self) {
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + VISIBLE_ROWS {
            self.scroll = self.cursor - VISIBLE_ROWS + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_top() {
        let menu = SettingsMenu::new();
        assert_eq!(menu.cursor(), 0);
        assert_eq!(menu.scroll_offset(), 0);
    }

    #[test]
    fn test_advance_wraps() {
        let mut menu = SettingsMenu::new();
        for _ in 0..MENU.len() {
            menu.advance();
        }
        assert_eq!(menu.cursor(), 0);
        assert_eq!(menu.scroll_offset(), 0);
    }

    #[test]
    fn test_cursor_always_in_window() {
        // The scroll invariant: cursor in [scroll, scroll + VISIBLE_ROWS)
        // for any position reached through advance()
        let mut menu = SettingsMenu::new();
        for _ in 0..MENU.len() * 3 {
            menu.advance();
            assert!(menu.cursor() >= menu.scroll_offset());
            assert!(menu.cursor() < menu.scroll_offset() + VISIBLE_ROWS);
        }
    }

    #[test]
    fn test_reset_clears_position() {
        let mut menu = SettingsMenu::new();
        for _ in 0..5 {
            menu.advance();
        }
        menu.reset();
        assert_eq!(menu.cursor(), 0);
        assert_eq!(menu.scroll_offset(), 0);
    }
}
