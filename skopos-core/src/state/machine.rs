//! Page and settings navigation states
//!
//! The navigation state is transient; it is never persisted and resets to
//! the stats page on boot. The alert overlay is cross-cutting and lives in
//! [`crate::alert`], not here.

/// Top-level pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Page {
    /// CPU / memory / temperature overview
    #[default]
    Stats,
    /// Filtered filesystem list, one disk at a time
    Disk,
    /// Network interface counters
    Network,
}

impl Page {
    /// The page K3 advances to
    pub fn next(self) -> Self {
        match self {
            Page::Stats => Page::Disk,
            Page::Disk => Page::Network,
            Page::Network => Page::Stats,
        }
    }
}

/// Sub-states of the settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsPane {
    /// Scrolling through the descriptor list
    Browsing,
    /// "Check for update?" confirmation
    UpdateConfirm,
    /// Update checkpoints running
    UpdateProgress,
    /// "Restore defaults?" confirmation
    ResetConfirm,
}

/// Transient navigation state
///
/// At most one settings pane is active at a time; `None` means a
/// top-level page is showing.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NavState {
    /// The active (or most recently active) top-level page
    pub page: Page,
    /// Settings sub-state, if the settings screen is open
    pane: Option<SettingsPane>,
}

impl NavState {
    /// Boot state: stats page, settings closed
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the settings screen is open
    pub fn in_settings(&self) -> bool {
        self.pane.is_some()
    }

    /// The active settings pane, if any
    pub fn pane(&self) -> Option<SettingsPane> {
        self.pane
    }

    /// Enter the settings screen at the browsing pane
    pub fn enter_settings(&mut self) {
        self.pane = Some(SettingsPane::Browsing);
    }

    /// Leave the settings screen back to the remembered page
    pub fn leave_settings(&mut self) {
        self.pane = None;
    }

    /// Open a confirmation/progress pane from browsing
    ///
    /// Ignored unless currently browsing, which keeps the "at most one
    /// sub-dialog" invariant trivially true.
    pub fn open_pane(&mut self, pane: SettingsPane) {
        if self.pane == Some(SettingsPane::Browsing) {
            self.pane = Some(pane);
        }
    }

    /// Close a sub-dialog back to browsing
    pub fn close_pane(&mut self) {
        if self.pane.is_some() {
            self.pane = Some(SettingsPane::Browsing);
        }
    }

    /// Advance to the next top-level page
    pub fn cycle_page(&mut self) {
        self.page = self.page.next();
    }
}
