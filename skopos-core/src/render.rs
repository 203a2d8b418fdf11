//! Page renderers
//!
//! Pure functions from application state to draw calls on a
//! [`DisplaySurface`]. Each renderer clears the buffer and draws one
//! full screen; the engine flushes after the render pass.
//!
//! The panel is 128x64 with an 8-pixel font row: title at the top, a
//! rule under it, three content rows, one footer row.

use core::fmt::Write;

use heapless::String;

use skopos_display::{DisplayError, DisplaySurface, DISPLAY_WIDTH};

use crate::i18n::{fold_polish, tr, Lang, TextKey};
use crate::metrics::MetricsSnapshot;
use crate::settings::{SettingKind, SettingsMenu, SettingsState, Unit, MENU, VISIBLE_ROWS};

/// Y of the title row
const TITLE_Y: u16 = 0;

/// Y of the rule under the title
const RULE_Y: u16 = 12;

/// Y of the three content rows
const ROW_Y: [u16; 3] = [20, 32, 44];

/// Y of the footer row
const FOOTER_Y: u16 = 56;

/// Maximum characters that fit one line
const LINE_LEN: usize = 21;

type Line = String<LINE_LEN>;

/// Draw a localized string, folding Polish diacritics to ASCII
fn text<D: DisplaySurface>(d: &mut D, x: u16, y: u16, s: &str) -> Result<(), DisplayError> {
    let folded: Line = fold_polish(s);
    d.text(x, y, &folded)
}

/// Title + rule shared by every page
fn header<D: DisplaySurface>(d: &mut D, title: &str) -> Result<(), DisplayError> {
    text(d, 0, TITLE_Y, title)?;
    d.hline(0, RULE_Y, DISPLAY_WIDTH)
}

/// "label: value%" with a missing reading shown as "--"
fn pct_line(label: &str, value: Option<f32>) -> Line {
    let mut line = Line::new();
    match value {
        Some(v) => {
            let _ = write!(line, "{label}: {v:.0}%");
        }
        None => {
            let _ = write!(line, "{label}: --");
        }
    }
    line
}

/// Byte quantity in the configured unit, one decimal above bytes
fn format_bytes(bytes: u64, unit: Unit) -> String<12> {
    let mut out: String<12> = String::new();
    let div = unit.divisor();
    if div == 1 {
        let _ = write!(out, "{}{}", bytes, unit.label());
    } else {
        let whole = bytes / div;
        let tenths = (bytes % div) * 10 / div;
        let _ = write!(out, "{}.{}{}", whole, tenths, unit.label());
    }
    out
}

/// Stats page: hostname, CPU, RAM, temperature
///
/// `slider` replaces the footer with the transient brightness bar while
/// the user is adjusting contrast.
pub fn render_stats<D: DisplaySurface>(
    d: &mut D,
    snapshot: &MetricsSnapshot,
    settings: &SettingsState,
    slider: Option<u8>,
) -> Result<(), DisplayError> {
    let lang = settings.language;
    d.clear()?;

    let title = snapshot
        .hostname
        .as_ref()
        .map_or("Server", |h| h.as_str());
    header(d, title)?;

    text(d, 0, ROW_Y[0], &pct_line("CPU", snapshot.cpu_pct))?;
    text(d, 0, ROW_Y[1], &pct_line("RAM", snapshot.mem_pct))?;

    let mut temp = Line::new();
    match snapshot.temp_c {
        Some(t) => {
            let _ = write!(temp, "Temp: {t:.0}C");
        }
        None => {
            let _ = write!(temp, "Temp: --");
        }
    }
    text(d, 0, ROW_Y[2], &temp)?;

    match slider {
        Some(brightness) => {
            text(d, 0, FOOTER_Y, tr(lang, TextKey::Brightness))?;
            // 40 px bar to the right of the label
            let bar_x = 88;
            let bar_w = 40;
            d.rect(bar_x, FOOTER_Y, bar_w, 7)?;
            let fill = brightness as u16 * bar_w / 255;
            d.fill_rect(bar_x, FOOTER_Y, fill, 7)?;
        }
        None => {
            let mut footer = Line::new();
            let _ = write!(footer, "{} {}=K4", tr(lang, TextKey::Next), tr(lang, TextKey::Menu));
            text(d, 0, FOOTER_Y, &footer)?;
        }
    }
    Ok(())
}

/// Disk page: one filtered disk at a time
pub fn render_disk<D: DisplaySurface>(
    d: &mut D,
    snapshot: &MetricsSnapshot,
    settings: &SettingsState,
) -> Result<(), DisplayError> {
    let lang = settings.language;
    d.clear()?;

    let Some(disk) = snapshot.current_disk() else {
        header(d, tr(lang, TextKey::DiskNone))?;
        text(d, 0, FOOTER_Y, tr(lang, TextKey::Back))?;
        return Ok(());
    };

    header(d, disk.mnt_point.as_str())?;

    let mut usage = Line::new();
    let _ = write!(usage, "{}: {:.0}%", tr(lang, TextKey::Usage), disk.percent);
    text(d, 0, ROW_Y[0], &usage)?;

    let mut used = Line::new();
    let _ = write!(
        used,
        "{}: {}",
        tr(lang, TextKey::Used),
        format_bytes(disk.used, settings.unit)
    );
    text(d, 0, ROW_Y[1], &used)?;

    let mut size = Line::new();
    let _ = write!(
        size,
        "{}: {}",
        tr(lang, TextKey::Size),
        format_bytes(disk.size, settings.unit)
    );
    text(d, 0, ROW_Y[2], &size)?;

    let mut footer = Line::new();
    let _ = write!(
        footer,
        "{} {} {}/{}",
        tr(lang, TextKey::Plus),
        tr(lang, TextKey::Minus),
        snapshot.selected_disk() + 1,
        snapshot.disks().len()
    );
    text(d, 0, FOOTER_Y, &footer)?;
    Ok(())
}

/// Network page: first interface counters
pub fn render_network<D: DisplaySurface>(
    d: &mut D,
    snapshot: &MetricsSnapshot,
    settings: &SettingsState,
) -> Result<(), DisplayError> {
    let lang = settings.language;
    d.clear()?;

    let Some(iface) = snapshot.ifaces().first() else {
        header(d, tr(lang, TextKey::NetworkNone))?;
        text(d, 0, FOOTER_Y, tr(lang, TextKey::Back))?;
        return Ok(());
    };

    header(d, iface.name.as_str())?;

    let mut tx = Line::new();
    let _ = write!(tx, "TX: {}", format_bytes(iface.bytes_sent, settings.unit));
    text(d, 0, ROW_Y[0], &tx)?;

    let mut rx = Line::new();
    let _ = write!(rx, "RX: {}", format_bytes(iface.bytes_recv, settings.unit));
    text(d, 0, ROW_Y[1], &rx)?;

    let mut speed = Line::new();
    let _ = write!(speed, "Link: {}Mb", iface.speed / 1_000_000);
    text(d, 0, ROW_Y[2], &speed)?;

    text(d, 0, FOOTER_Y, tr(lang, TextKey::Back))?;
    Ok(())
}

/// Settings panel: 3-row window into the descriptor list
pub fn render_settings<D: DisplaySurface>(
    d: &mut D,
    menu: &SettingsMenu,
    settings: &SettingsState,
    version: &str,
    flash_saved: bool,
) -> Result<(), DisplayError> {
    let lang = settings.language;
    d.clear()?;

    text(d, 16, TITLE_Y, tr(lang, TextKey::Settings))?;
    d.hline(0, RULE_Y, DISPLAY_WIDTH)?;

    let scroll = menu.scroll_offset();
    for (row, index) in (scroll..(scroll + VISIBLE_ROWS).min(MENU.len())).enumerate() {
        let descriptor = &MENU[index];
        let y = ROW_Y[row];
        let prefix = if index == menu.cursor() { ">" } else { " " };
        let label = tr(lang, descriptor.label);

        let mut line = Line::new();
        match descriptor.kind {
            SettingKind::Header => {
                let _ = write!(line, "{label}");
            }
            SettingKind::ActionUpdate => {
                let _ = write!(line, "{prefix}{label}");
                text(d, 0, y, &line)?;
                // Version in the right column, truncated by the panel edge
                let mut ver = Line::new();
                let _ = write!(ver, "{}: {}", tr(lang, TextKey::Version), version);
                text(d, 64, y, &ver)?;
                continue;
            }
            SettingKind::ActionReset => {
                let _ = write!(line, "{prefix}{label}");
            }
            SettingKind::Toggle { key } => {
                let on = settings.toggle_value(key);
                let state = tr(lang, if on { TextKey::On } else { TextKey::Off });
                let _ = write!(line, "{prefix}{label}: {state}");
            }
            SettingKind::Choice { .. } | SettingKind::Range { .. } => {
                let value = settings.value_text(&descriptor.kind);
                let _ = write!(line, "{prefix}{label}: {value}");
            }
        }
        text(d, 0, y, &line)?;
    }

    let footer = if flash_saved {
        tr(lang, TextKey::Saved)
    } else {
        tr(lang, TextKey::Back)
    };
    text(d, 0, FOOTER_Y, footer)?;
    Ok(())
}

/// "Check for update?" dialog
pub fn render_update_confirm<D: DisplaySurface>(
    d: &mut D,
    lang: Lang,
) -> Result<(), DisplayError> {
    d.clear()?;
    header(d, tr(lang, TextKey::Update))?;
    text(d, 0, ROW_Y[0], tr(lang, TextKey::ConfirmUpdate))?;

    let mut keys = Line::new();
    let _ = write!(keys, "{}  {}", tr(lang, TextKey::Yes), tr(lang, TextKey::No));
    text(d, 0, ROW_Y[2], &keys)?;
    Ok(())
}

/// Update progress bar at a fixed checkpoint
pub fn render_update_progress<D: DisplaySurface>(
    d: &mut D,
    lang: Lang,
    percent: u8,
) -> Result<(), DisplayError> {
    d.clear()?;
    header(d, tr(lang, TextKey::Updating))?;

    let mut line = Line::new();
    let _ = write!(line, "{}: {}%", tr(lang, TextKey::Progress), percent);
    text(d, 0, ROW_Y[1], &line)?;

    d.rect(0, 48, DISPLAY_WIDTH, 8)?;
    let fill = percent.min(100) as u16 * DISPLAY_WIDTH / 100;
    d.fill_rect(0, 48, fill, 8)?;
    Ok(())
}

/// "Restore defaults?" dialog
pub fn render_reset_confirm<D: DisplaySurface>(
    d: &mut D,
    lang: Lang,
) -> Result<(), DisplayError> {
    d.clear()?;
    header(d, tr(lang, TextKey::Reset))?;
    text(d, 0, ROW_Y[0], tr(lang, TextKey::ConfirmReset))?;

    let mut keys = Line::new();
    let _ = write!(keys, "{}  {}", tr(lang, TextKey::Yes), tr(lang, TextKey::No));
    text(d, 0, ROW_Y[2], &keys)?;
    Ok(())
}

/// Full-screen alert overlay
pub fn render_alert<D: DisplaySurface>(
    d: &mut D,
    lang: Lang,
    message: &str,
) -> Result<(), DisplayError> {
    d.clear()?;
    text(d, 40, TITLE_Y, tr(lang, TextKey::Alert))?;
    d.hline(0, RULE_Y, DISPLAY_WIDTH)?;
    text(d, 0, ROW_Y[1], message)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use skopos_api::FsEntry;
    use skopos_display::CaptureSurface;

    fn snapshot_with_disk() -> MetricsSnapshot {
        let mut snapshot = MetricsSnapshot::new();
        snapshot.apply_fs(&[FsEntry {
            mnt_point: Some("/home".into()),
            device: Some("/dev/sda2".into()),
            used: Some(107 * 1024 * 1024 * 1024),
            size: Some(400 * 1024 * 1024 * 1024),
            percent: Some(27.0),
        }]);
        snapshot
    }

    #[test]
    fn test_stats_page_shows_readings() {
        let mut d = CaptureSurface::new();
        let mut snapshot = MetricsSnapshot::new();
        snapshot.cpu_pct = Some(42.0);
        snapshot.mem_pct = Some(63.4);
        snapshot.temp_c = Some(51.0);
        snapshot.apply_hostname("rack-01");

        render_stats(&mut d, &snapshot, &SettingsState::default(), None).unwrap();

        assert!(d.contains_text("rack-01"));
        assert!(d.contains_text("CPU: 42%"));
        assert!(d.contains_text("RAM: 63%"));
        assert!(d.contains_text("Temp: 51C"));
    }

    #[test]
    fn test_stats_page_unavailable_readings() {
        let mut d = CaptureSurface::new();
        render_stats(&mut d, &MetricsSnapshot::new(), &SettingsState::default(), None).unwrap();
        assert!(d.contains_text("CPU: --"));
        assert!(d.contains_text("Server"));
    }

    #[test]
    fn test_stats_brightness_slider_replaces_footer() {
        let mut d = CaptureSurface::new();
        let settings = SettingsState::default();
        render_stats(&mut d, &MetricsSnapshot::new(), &settings, Some(128)).unwrap();

        assert!(d.contains_text("Brightness"));
        assert!(!d.contains_text("Menu"));
    }

    #[test]
    fn test_disk_page_formats_unit() {
        let mut d = CaptureSurface::new();
        render_disk(&mut d, &snapshot_with_disk(), &SettingsState::default()).unwrap();

        assert!(d.contains_text("/home"));
        assert!(d.contains_text("Usage: 27%"));
        assert!(d.contains_text("Used: 107.0GB"));
        assert!(d.contains_text("1/1"));
    }

    #[test]
    fn test_disk_page_empty_list() {
        let mut d = CaptureSurface::new();
        let mut settings = SettingsState::default();
        settings.language = Lang::Polish;
        render_disk(&mut d, &MetricsSnapshot::new(), &settings).unwrap();
        assert!(d.contains_text("Brak dyskow"));
    }

    #[test]
    fn test_network_page_empty_list() {
        let mut d = CaptureSurface::new();
        render_network(&mut d, &MetricsSnapshot::new(), &SettingsState::default()).unwrap();
        assert!(d.contains_text("enp3s0 no data"));
    }

    #[test]
    fn test_settings_panel_marks_cursor() {
        let mut d = CaptureSurface::new();
        let menu = SettingsMenu::new();
        render_settings(&mut d, &menu, &SettingsState::default(), "0.1.0", false).unwrap();

        assert!(d.contains_text("SETTINGS"));
        assert!(d.contains_text(">Language: ENG"));
        assert!(d.contains_text(" Unit: GB"));
    }

    #[test]
    fn test_settings_panel_scrolled_window_shows_version() {
        let mut d = CaptureSurface::new();
        let mut menu = SettingsMenu::new();
        // Walk the cursor down to the update action row
        while !matches!(menu.current().kind, SettingKind::ActionUpdate) {
            menu.advance();
        }
        render_settings(&mut d, &menu, &SettingsState::default(), "0.1.0", false).unwrap();

        assert!(d.contains_text(">Update"));
        assert!(d.contains_text("Ver: 0.1.0"));
        // The first row scrolled out of the window
        assert!(!d.contains_text("Language"));
    }

    #[test]
    fn test_update_progress_bar_scales() {
        let mut d = CaptureSurface::new();
        render_update_progress(&mut d, Lang::English, 40).unwrap();

        assert!(d.contains_text("Progress: 40%"));
        assert!(d
            .shapes()
            .iter()
            .any(|s| matches!(
                s,
                skopos_display::capture::ShapeOp::FillRect { width: 51, .. }
            )));
    }

    #[test]
    fn test_update_progress_polish_is_folded() {
        let mut d = CaptureSurface::new();
        render_update_progress(&mut d, Lang::Polish, 70).unwrap();
        assert!(d.contains_text("Postep: 70%"));
    }

    #[test]
    fn test_alert_overlay() {
        let mut d = CaptureSurface::new();
        render_alert(&mut d, Lang::English, "CPU > 90%").unwrap();
        assert!(d.contains_text("ALERT"));
        assert!(d.contains_text("CPU > 90%"));
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512, Unit::B).as_str(), "512B");
        assert_eq!(format_bytes(1536, Unit::KB).as_str(), "1.5KB");
        assert_eq!(
            format_bytes(107 * 1024 * 1024 * 1024, Unit::GB).as_str(),
            "107.0GB"
        );
    }
}
