//! Mutable settings record
//!
//! One value per settable key, created at startup from the config store
//! (compiled defaults on any load failure) and mutated only through the
//! bounded adjustment in [`SettingsState::adjust`]. Every value stays
//! inside its descriptor's domain: choices wrap cyclically, ranges clamp.

use crate::i18n::Lang;
use crate::settings::descriptor::{SettingKey, SettingKind};

use heapless::String;

/// Display unit for byte quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    B,
    KB,
    MB,
    #[default]
    GB,
}

impl Unit {
    /// All units in option-list order
    pub const ALL: [Unit; 4] = [Unit::B, Unit::KB, Unit::MB, Unit::GB];

    /// Divisor from raw bytes to this unit
    pub fn divisor(self) -> u64 {
        match self {
            Unit::B => 1,
            Unit::KB => 1024,
            Unit::MB => 1024 * 1024,
            Unit::GB => 1024 * 1024 * 1024,
        }
    }

    /// Label shown in the settings menu and on the disk page
    pub fn label(self) -> &'static str {
        match self {
            Unit::B => "B",
            Unit::KB => "KB",
            Unit::MB => "MB",
            Unit::GB => "GB",
        }
    }
}

/// The mutable settings record
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SettingsState {
    /// Display language
    pub language: Lang,
    /// Byte display unit
    pub unit: Unit,
    /// Refresh interval in seconds (1-60)
    pub refresh_secs: u8,
    /// Eco dimming enabled
    pub eco_mode: bool,
    /// Sleep window enabled
    pub sleep_enabled: bool,
    /// Sleep window start hour (0-23, local)
    pub sleep_start: u8,
    /// Sleep window end hour (0-23, local)
    pub sleep_end: u8,
    /// Offset from UTC in whole hours (-12..=14)
    pub utc_offset: i8,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            language: Lang::English,
            unit: Unit::GB,
            refresh_secs: 5,
            eco_mode: false,
            sleep_enabled: false,
            sleep_start: 22,
            sleep_end: 6,
            utc_offset: 0,
        }
    }
}

impl SettingsState {
    /// Apply one +1/-1 adjustment for a descriptor kind
    ///
    /// Choices cycle with wrap-around in both directions, ranges clamp to
    /// `[min, max]`, toggles flip. Headers and actions are not values and
    /// return false. Returns whether the record changed.
    pub fn adjust(&mut self, kind: &SettingKind, dir: i8) -> bool {
        match *kind {
            SettingKind::Choice { key, options } => {
                let count = options.len();
                let index = self.choice_index(key);
                let next = cycle(index, count, dir);
                self.set_choice_index(key, next);
                true
            }
            SettingKind::Toggle { key } => {
                let value = self.toggle_value(key);
                self.set_toggle_value(key, !value);
                true
            }
            SettingKind::Range {
                key,
                min,
                max,
                step,
            } => {
                let value = self.range_value(key);
                let next = (value + step * dir as i16).clamp(min, max);
                if next == value {
                    return false;
                }
                self.set_range_value(key, next);
                true
            }
            SettingKind::Header | SettingKind::ActionUpdate | SettingKind::ActionReset => false,
        }
    }

    /// Replace the whole record with compiled defaults
    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }

    /// Current option index for a choice key
    pub fn choice_index(&self, key: SettingKey) -> usize {
        match key {
            SettingKey::Language => self.language as usize,
            SettingKey::Unit => self.unit as usize,
            _ => 0,
        }
    }

    fn set_choice_index(&mut self, key: SettingKey, index: usize) {
        match key {
            SettingKey::Language => {
                self.language = if index == 0 { Lang::English } else { Lang::Polish };
            }
            SettingKey::Unit => {
                self.unit = Unit::ALL[index.min(Unit::ALL.len() - 1)];
            }
            _ => {}
        }
    }

    /// Current value for a toggle key
    pub fn toggle_value(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::EcoMode => self.eco_mode,
            SettingKey::SleepEnabled => self.sleep_enabled,
            _ => false,
        }
    }

    fn set_toggle_value(&mut self, key: SettingKey, value: bool) {
        match key {
            SettingKey::EcoMode => self.eco_mode = value,
            SettingKey::SleepEnabled => self.sleep_enabled = value,
            _ => {}
        }
    }

    /// Current value for a range key
    pub fn range_value(&self, key: SettingKey) -> i16 {
        match key {
            SettingKey::RefreshSecs => self.refresh_secs as i16,
            SettingKey::SleepStart => self.sleep_start as i16,
            SettingKey::SleepEnd => self.sleep_end as i16,
            SettingKey::UtcOffset => self.utc_offset as i16,
            _ => 0,
        }
    }

    fn set_range_value(&mut self, key: SettingKey, value: i16) {
        match key {
            SettingKey::RefreshSecs => self.refresh_secs = value as u8,
            SettingKey::SleepStart => self.sleep_start = value as u8,
            SettingKey::SleepEnd => self.sleep_end = value as u8,
            SettingKey::UtcOffset => self.utc_offset = value as i8,
            _ => {}
        }
    }

    /// Short value text for a settings row
    pub fn value_text(&self, kind: &SettingKind) -> String<8> {
        use core::fmt::Write;

        let mut out: String<8> = String::new();
        match *kind {
            SettingKind::Choice { key, options } => {
                let _ = out.push_str(options[self.choice_index(key).min(options.len() - 1)]);
            }
            SettingKind::Toggle { key } => {
                // Resolved to On/Off by the renderer; keep the raw form here
                let _ = out.push_str(if self.toggle_value(key) { "1" } else { "0" });
            }
            SettingKind::Range { key, .. } => {
                let _ = write!(out, "{}", self.range_value(key));
            }
            SettingKind::Header | SettingKind::ActionUpdate | SettingKind::ActionReset => {}
        }
        out
    }
}

/// Cyclic step over `count` options
fn cycle(index: usize, count: usize, dir: i8) -> usize {
    if count == 0 {
        return 0;
    }
    if dir >= 0 {
        (index + 1) % count
    } else {
        (index + count - 1) % count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::descriptor::MENU;
    use proptest::prelude::*;

    fn kind_for(key: SettingKey) -> SettingKind {
        MENU.iter()
            .map(|d| d.kind)
            .find(|k| match *k {
                SettingKind::Choice { key: k, .. }
                | SettingKind::Toggle { key: k }
                | SettingKind::Range { key: k, .. } => k == key,
                _ => false,
            })
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let s = SettingsState::default();
        assert_eq!(s.language, Lang::English);
        assert_eq!(s.unit, Unit::GB);
        assert_eq!(s.refresh_secs, 5);
        assert!(!s.sleep_enabled);
        assert_eq!(s.sleep_start, 22);
        assert_eq!(s.sleep_end, 6);
    }

    #[test]
    fn test_choice_cycles_forward_and_back() {
        let mut s = SettingsState::default();
        let kind = kind_for(SettingKey::Unit);

        // +1 then -1 is an identity
        s.adjust(&kind, 1);
        s.adjust(&kind, -1);
        assert_eq!(s.unit, Unit::GB);

        // N forward steps return to the start
        for _ in 0..Unit::ALL.len() {
            s.adjust(&kind, 1);
        }
        assert_eq!(s.unit, Unit::GB);

        // Backwards wrap from the first option
        s.language = Lang::English;
        let lang_kind = kind_for(SettingKey::Language);
        s.adjust(&lang_kind, -1);
        assert_eq!(s.language, Lang::Polish);
    }

    #[test]
    fn test_range_clamps_at_bounds() {
        let mut s = SettingsState::default();
        let kind = kind_for(SettingKey::RefreshSecs);

        s.refresh_secs = 60;
        assert!(!s.adjust(&kind, 1));
        assert_eq!(s.refresh_secs, 60);

        s.refresh_secs = 1;
        assert!(!s.adjust(&kind, -1));
        assert_eq!(s.refresh_secs, 1);
    }

    #[test]
    fn test_toggle_flips() {
        let mut s = SettingsState::default();
        let kind = kind_for(SettingKey::EcoMode);
        assert!(s.adjust(&kind, 1));
        assert!(s.eco_mode);
        assert!(s.adjust(&kind, -1));
        assert!(!s.eco_mode);
    }

    #[test]
    fn test_header_and_actions_are_no_ops() {
        let mut s = SettingsState::default();
        let before = s.clone();
        assert!(!s.adjust(&SettingKind::Header, 1));
        assert!(!s.adjust(&SettingKind::ActionUpdate, 1));
        assert!(!s.adjust(&SettingKind::ActionReset, -1));
        assert_eq!(s, before);
    }

    #[test]
    fn test_reset_to_defaults() {
        let mut s = SettingsState::default();
        s.refresh_secs = 42;
        s.language = Lang::Polish;
        s.reset_to_defaults();
        assert_eq!(s, SettingsState::default());
    }

    proptest! {
        // Values never leave their descriptor's domain, whatever the
        // adjustment sequence
        #[test]
        fn range_never_escapes_bounds(dirs in proptest::collection::vec(any::<bool>(), 0..128)) {
            let mut s = SettingsState::default();
            let kind = kind_for(SettingKey::RefreshSecs);
            for up in dirs {
                s.adjust(&kind, if up { 1 } else { -1 });
                prop_assert!((1..=60).contains(&s.refresh_secs));
            }
        }

        #[test]
        fn utc_offset_never_escapes_bounds(dirs in proptest::collection::vec(any::<bool>(), 0..128)) {
            let mut s = SettingsState::default();
            let kind = kind_for(SettingKey::UtcOffset);
            for up in dirs {
                s.adjust(&kind, if up { 1 } else { -1 });
                prop_assert!((-12..=14).contains(&s.utc_offset));
            }
        }
    }
}
