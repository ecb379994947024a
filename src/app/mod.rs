//! Application state types and entry glue.
//!
//! Wraps the [`Picker`] controller with everything the terminal front-end
//! needs: theme, keymap, candidate cursor, mouse hit regions and the pending
//! background load. The event loop lives in `update` (re-exported as `run`).
//!
pub mod keymap;
pub mod update;

use ratatui::layout::{Position, Rect};
use ratatui::style::Color;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Instant;

use crate::picker::Picker;
use crate::source::UserRecord;

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub chip: Color,
    pub chip_armed: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
}

impl Theme {
    /// Default warm palette.
    pub fn earth() -> Self {
        Self {
            text: Color::Rgb(0x76, 0x45, 0x3b),
            muted: Color::Rgb(0x9c, 0x8a, 0x80),
            title: Color::Rgb(0x76, 0x45, 0x3b),
            border: Color::Rgb(0x63, 0x88, 0x89),
            chip: Color::Rgb(0x63, 0x88, 0x89),
            chip_armed: Color::Rgb(0x34, 0x68, 0xc0),
            status_bg: Color::Rgb(0x63, 0x88, 0x89),
            status_fg: Color::Rgb(0xf9, 0xef, 0xdb),
            highlight_fg: Color::Rgb(0xf9, 0xef, 0xdb),
            highlight_bg: Color::Rgb(0x76, 0x45, 0x3b),
        }
    }

    /// Load theme from a simple key=value file. Unknown or missing keys fall back to `earth`.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::earth();

        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            let (key, val) = (key.trim(), val.trim());
            if let Some(color) = Self::parse_color(val) {
                match key {
                    "text" => theme.text = color,
                    "muted" => theme.muted = color,
                    "title" => theme.title = color,
                    "border" => theme.border = color,
                    "chip" => theme.chip = color,
                    "chip_armed" => theme.chip_armed = color,
                    "status_bg" => theme.status_bg = color,
                    "status_fg" => theme.status_fg = color,
                    "highlight_fg" => theme.highlight_fg = color,
                    "highlight_bg" => theme.highlight_bg = color,
                    _ => {}
                }
            }
        }

        Some(theme)
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB") or "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = lower.strip_prefix('#').unwrap_or(lower.as_str());
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color::Rgb(r, g, b))
    }

    /// Persist the theme to a config file in key=value format.
    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# pick-users theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");

        fn color_to_str(c: Color) -> String {
            match c {
                Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
                Color::Reset => "reset".to_string(),
                // Named colors get a best-effort hex approximation
                Color::Black => "#000000".to_string(),
                Color::Red => "#FF0000".to_string(),
                Color::Green => "#00FF00".to_string(),
                Color::Yellow => "#FFFF00".to_string(),
                Color::Blue => "#0000FF".to_string(),
                Color::Magenta => "#FF00FF".to_string(),
                Color::Cyan => "#00FFFF".to_string(),
                Color::Gray => "#B3B3B3".to_string(),
                Color::DarkGray => "#4D4D4D".to_string(),
                Color::White => "#FFFFFF".to_string(),
                _ => "reset".to_string(),
            }
        }

        for (k, v) in [
            ("text", self.text),
            ("muted", self.muted),
            ("title", self.title),
            ("border", self.border),
            ("chip", self.chip),
            ("chip_armed", self.chip_armed),
            ("status_bg", self.status_bg),
            ("status_fg", self.status_fg),
            ("highlight_fg", self.highlight_fg),
            ("highlight_bg", self.highlight_bg),
        ] {
            let _ = writeln!(&mut buf, "{} = {}", k, color_to_str(v));
        }

        std::fs::write(path, buf)
    }

    /// Load the theme at `path`, writing the default there first if it is missing.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_else(Self::earth);
        }
        let t = Self::earth();
        if let Err(err) = t.write_file(path) {
            tracing::warn!(path = %path.display(), error = %err, "could not write default theme");
        }
        t
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::earth()
    }
}

/// Where the theme and keybinding files live.
#[derive(Clone, Debug)]
pub struct ConfigPaths {
    pub dir: PathBuf,
}

impl ConfigPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn theme(&self) -> PathBuf {
        self.dir.join("theme.conf")
    }

    pub fn keybinds(&self) -> PathBuf {
        self.dir.join("keybinds.conf")
    }
}

/// Clickable regions recorded during the last render.
#[derive(Clone, Debug, Default)]
pub struct HitMap {
    /// Dismiss glyph of each chip, with the chip's email.
    pub chips: Vec<(Rect, String)>,
    /// Visible candidate rows, with the candidate index.
    pub candidates: Vec<(Rect, usize)>,
}

/// What a left click landed on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    ChipDismiss(String),
    Candidate(usize),
}

impl HitMap {
    pub fn clear(&mut self) {
        self.chips.clear();
        self.candidates.clear();
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<ClickTarget> {
        let pos = Position::new(column, row);
        if let Some((_, email)) = self.chips.iter().find(|(r, _)| r.contains(pos)) {
            return Some(ClickTarget::ChipDismiss(email.clone()));
        }
        self.candidates
            .iter()
            .find(|(r, _)| r.contains(pos))
            .map(|(_, idx)| ClickTarget::Candidate(*idx))
    }
}

pub struct AppState {
    pub started_at: Instant,
    pub picker: Picker,
    /// Highlighted row in the candidate list.
    pub cursor: usize,
    pub rows_per_page: usize,
    pub theme: Theme,
    pub keymap: keymap::Keymap,
    pub show_help: bool,
    pub hits: HitMap,
    pub pending_load: Option<Receiver<Vec<UserRecord>>>,
}

impl AppState {
    /// Build state from config files; the user list arrives later through `pending_load`.
    pub fn new(paths: &ConfigPaths, pending_load: Option<Receiver<Vec<UserRecord>>>) -> Self {
        Self {
            theme: Theme::load_or_init(&paths.theme()),
            keymap: keymap::Keymap::load_or_init(&paths.keybinds()),
            pending_load,
            ..Self::with_picker(Picker::new())
        }
    }

    /// State around an existing picker with default theme and keymap.
    pub fn with_picker(picker: Picker) -> Self {
        Self {
            started_at: Instant::now(),
            picker,
            cursor: 0,
            rows_per_page: 10,
            theme: Theme::default(),
            keymap: keymap::Keymap::default(),
            show_help: false,
            hits: HitMap::default(),
            pending_load: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending_load.is_some()
    }

    /// Apply the loaded list if the background fetch has finished.
    pub fn poll_load(&mut self) {
        let Some(rx) = &self.pending_load else {
            return;
        };
        match rx.try_recv() {
            Ok(users) => {
                tracing::info!(
                    count = users.len(),
                    elapsed_ms = self.started_at.elapsed().as_millis() as u64,
                    "applying loaded users"
                );
                self.picker.load(users);
                self.pending_load = None;
                self.clamp_cursor();
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.pending_load = None;
            }
        }
    }

    pub fn candidate_count(&self) -> usize {
        self.picker.candidates().count()
    }

    /// Keep the cursor inside the current candidate list.
    pub fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.candidate_count().saturating_sub(1));
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let count = self.candidate_count();
        if count == 0 {
            self.cursor = 0;
            return;
        }
        let next = self.cursor.saturating_add_signed(delta);
        self.cursor = next.min(count - 1);
    }

    /// Select the highlighted candidate.
    pub fn select_highlighted(&mut self) {
        self.picker.select_candidate(self.cursor);
        self.clamp_cursor();
    }

    pub fn click(&mut self, column: u16, row: u16) {
        match self.hits.hit(column, row) {
            Some(ClickTarget::ChipDismiss(email)) => self.picker.dismiss_chip(&email),
            Some(ClickTarget::Candidate(idx)) => {
                self.picker.select_candidate(idx);
            }
            None => return,
        }
        self.clamp_cursor();
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> AppState {
        AppState::with_picker(Picker::with_users(vec![
            UserRecord::new("AnnLee", "a@x.com"),
            UserRecord::new("JoannaNg", "j@x.com"),
            UserRecord::new("NnamdiOk", "n@x.com"),
        ]))
    }

    #[test]
    fn cursor_stays_within_candidates() {
        let mut app = app();
        app.move_cursor(1);
        assert_eq!(app.cursor, 0);
        app.picker.set_filter("nn");
        app.move_cursor(10);
        assert_eq!(app.cursor, 1);
        app.move_cursor(-5);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn selecting_last_row_pulls_cursor_back() {
        let mut app = app();
        app.picker.set_filter("nn");
        app.move_cursor(1);
        app.select_highlighted();
        assert_eq!(app.picker.selection().iter().next().map(|u| u.email.as_str()), Some("j@x.com"));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn hit_map_prefers_chip_glyphs() {
        let mut hits = HitMap::default();
        hits.chips.push((Rect::new(4, 1, 1, 1), "a@x.com".into()));
        hits.candidates.push((Rect::new(0, 5, 20, 1), 0));
        assert_eq!(hits.hit(4, 1), Some(ClickTarget::ChipDismiss("a@x.com".into())));
        assert_eq!(hits.hit(7, 5), Some(ClickTarget::Candidate(0)));
        assert_eq!(hits.hit(7, 6), None);
    }

    #[test]
    fn poll_load_applies_list_once() {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut app = AppState::with_picker(Picker::new());
        app.pending_load = Some(rx);
        app.poll_load();
        assert!(app.is_loading());
        tx.send(vec![UserRecord::new("AnnLee", "a@x.com")]).unwrap();
        app.poll_load();
        assert!(!app.is_loading());
        assert_eq!(app.picker.users().len(), 1);
    }
}
