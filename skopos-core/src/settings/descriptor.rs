//! Static settings-menu descriptors
//!
//! Exactly one descriptor list defines the menu; its order is both the
//! display order and the cursor order. Descriptors are data, the
//! behavior lives in [`crate::settings::store`] and the engine.

use crate::i18n::TextKey;

/// Keys of the settable values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingKey {
    Language,
    Unit,
    RefreshSecs,
    EcoMode,
    SleepEnabled,
    SleepStart,
    SleepEnd,
    UtcOffset,
}

/// What kind of row a descriptor is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingKind {
    /// Non-interactive section header
    Header,
    /// Cyclic choice over a fixed option list
    Choice {
        key: SettingKey,
        options: &'static [&'static str],
    },
    /// Boolean on/off value
    Toggle { key: SettingKey },
    /// Clamped integer value
    Range {
        key: SettingKey,
        min: i16,
        max: i16,
        step: i16,
    },
    /// Opens the update confirmation dialog
    ActionUpdate,
    /// Opens the reset-to-defaults confirmation dialog
    ActionReset,
}

/// One row of the settings menu
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SettingDescriptor {
    /// Translation key for the row label
    pub label: TextKey,
    /// Row kind and value binding
    pub kind: SettingKind,
}

/// Language option labels, in [`crate::i18n::Lang`] order
pub const LANGUAGE_OPTIONS: &[&str] = &["ENG", "PL"];

/// Display unit option labels, in [`Unit`](crate::settings::Unit) order
pub const UNIT_OPTIONS: &[&str] = &["B", "KB", "MB", "GB"];

/// The settings menu, in display and navigation order
pub const MENU: &[SettingDescriptor] = &[
    SettingDescriptor {
        label: TextKey::Language,
        kind: SettingKind::Choice {
            key: SettingKey::Language,
            options: LANGUAGE_OPTIONS,
        },
    },
    SettingDescriptor {
        label: TextKey::Unit,
        kind: SettingKind::Choice {
            key: SettingKey::Unit,
            options: UNIT_OPTIONS,
        },
    },
    SettingDescriptor {
        label: TextKey::Refresh,
        kind: SettingKind::Range {
            key: SettingKey::RefreshSecs,
            min: 1,
            max: 60,
            step: 1,
        },
    },
    SettingDescriptor {
        label: TextKey::EcoMode,
        kind: SettingKind::Toggle {
            key: SettingKey::EcoMode,
        },
    },
    SettingDescriptor {
        label: TextKey::SleepMode,
        kind: SettingKind::Header,
    },
    SettingDescriptor {
        label: TextKey::Enabled,
        kind: SettingKind::Toggle {
            key: SettingKey::SleepEnabled,
        },
    },
    SettingDescriptor {
        label: TextKey::SleepStart,
        kind: SettingKind::Range {
            key: SettingKey::SleepStart,
            min: 0,
            max: 23,
            step: 1,
        },
    },
    SettingDescriptor {
        label: TextKey::SleepEnd,
        kind: SettingKind::Range {
            key: SettingKey::SleepEnd,
            min: 0,
            max: 23,
            step: 1,
        },
    },
    SettingDescriptor {
        label: TextKey::UtcOffset,
        kind: SettingKind::Range {
            key: SettingKey::UtcOffset,
            min: -12,
            max: 14,
            step: 1,
        },
    },
    SettingDescriptor {
        label: TextKey::Update,
        kind: SettingKind::ActionUpdate,
    },
    SettingDescriptor {
        label: TextKey::Reset,
        kind: SettingKind::ActionReset,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_has_one_header() {
        let headers = MENU
            .iter()
            .filter(|d| matches!(d.kind, SettingKind::Header))
            .count();
        assert_eq!(headers, 1);
    }

    #[test]
    fn test_menu_has_both_actions() {
        assert!(MENU
            .iter()
            .any(|d| matches!(d.kind, SettingKind::ActionUpdate)));
        assert!(MENU
            .iter()
            .any(|d| matches!(d.kind, SettingKind::ActionReset)));
    }

    #[test]
    fn test_range_bounds_are_ordered() {
        for d in MENU {
            if let SettingKind::Range { min, max, step, .. } = d.kind {
                assert!(min < max);
                assert!(step > 0);
            }
        }
    }
}
