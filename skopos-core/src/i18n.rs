//! UI string table
//!
//! Every user-visible string is resolved through [`tr`] from a table keyed
//! by `(language, key)`. Adding a language means adding a column to the
//! table, nothing else.
//!
//! The OLED font is ASCII-only, so Polish strings are folded to their
//! ASCII equivalents with [`fold_polish`] before being drawn.

use heapless::String;

/// Display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Lang {
    #[default]
    English,
    Polish,
}

/// Number of supported languages
pub const LANG_COUNT: usize = 2;

impl Lang {
    /// Short code shown in the settings menu
    pub fn code(self) -> &'static str {
        match self {
            Lang::English => "ENG",
            Lang::Polish => "PL",
        }
    }
}

/// Keys into the string table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextKey {
    Settings,
    Language,
    Unit,
    Refresh,
    EcoMode,
    SleepMode,
    SleepStart,
    SleepEnd,
    UtcOffset,
    Update,
    Reset,
    ConfirmUpdate,
    ConfirmReset,
    Yes,
    No,
    Version,
    Back,
    Plus,
    Minus,
    Next,
    DiskNone,
    Usage,
    Used,
    Size,
    Alert,
    Menu,
    NetworkNone,
    Brightness,
    Updating,
    Progress,
    On,
    Off,
    Saved,
    Enabled,
}

/// Number of keys in the table
const KEY_COUNT: usize = 34;

/// String table, one row per key: [English, Polish]
const TABLE: [[&str; LANG_COUNT]; KEY_COUNT] = [
    ["SETTINGS", "USTAWIENIA"],
    ["Language", "Jezyk"],
    ["Unit", "Jednostka"],
    ["Refresh", "Odswiezanie"],
    ["Eco Mode", "Tryb Eko"],
    ["Sleep Mode", "Tryb Snu"],
    ["Start", "Start"],
    ["End", "Koniec"],
    ["UTC", "UTC"],
    ["Update", "Aktualizuj"],
    ["Defaults", "Domyslne"],
    ["Check for update?", "Wyszukac aktualizacje?"],
    ["Restore defaults?", "Przywrocic domyslne?"],
    ["Y=K1", "T=K1"],
    ["N=K2", "N=K2"],
    ["Ver", "Wersja"],
    ["K4=Back", "K4=Wstecz"],
    ["K1+", "K1+"],
    ["K2-", "K2-"],
    ["K3->", "K3->"],
    ["No disks", "Brak dyskow"],
    ["Usage", "Zajecie"],
    ["Used", "Uzyte"],
    ["Size", "Rozmiar"],
    ["ALERT", "ALERT"],
    ["Menu", "Menu"],
    ["enp3s0 no data", "enp3s0 brak danych"],
    ["Brightness", "Jasnosc"],
    ["Updating...", "Aktualizacja..."],
    ["Progress", "Postęp"],
    ["On", "Wl"],
    ["Off", "Wyl"],
    ["Saved", "Zapisano"],
    ["Enabled", "Aktywny"],
];

/// Resolve a UI string for the given language
pub fn tr(lang: Lang, key: TextKey) -> &'static str {
    TABLE[key as usize][lang as usize]
}

/// Fold Polish diacritics to their ASCII equivalents
///
/// Characters the mapping does not know are passed through; the display
/// driver drops anything outside its font on its own.
pub fn fold_polish<const N: usize>(text: &str) -> String<N> {
    const POLISH: &str = "ąćęłńóśźżĄĆĘŁŃÓŚŹŻ";
    const ASCII: &[u8] = b"acelnoszzACELNOSZZ";

    let mut out: String<N> = String::new();
    for c in text.chars() {
        let folded = POLISH
            .chars()
            .position(|p| p == c)
            .map_or(c, |i| ASCII[i] as char);
        let _ = out.push(folded);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_both_languages() {
        assert_eq!(tr(Lang::English, TextKey::Settings), "SETTINGS");
        assert_eq!(tr(Lang::Polish, TextKey::Settings), "USTAWIENIA");
        assert_eq!(tr(Lang::Polish, TextKey::DiskNone), "Brak dyskow");
    }

    #[test]
    fn test_every_key_nonempty() {
        for row in TABLE.iter() {
            for s in row.iter() {
                assert!(!s.is_empty());
            }
        }
    }

    #[test]
    fn test_fold_polish() {
        let folded: String<32> = fold_polish("Postęp źle");
        assert_eq!(folded.as_str(), "Postep zle");
    }

    #[test]
    fn test_fold_passthrough() {
        let folded: String<16> = fold_polish("CPU 42%");
        assert_eq!(folded.as_str(), "CPU 42%");
    }
}
