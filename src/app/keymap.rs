//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! Key presses are resolved against the keymap first. Unbound printable
//! characters and Backspace go to the filter input, so the defaults bind
//! navigation and control keys only.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use std::path::Path;

/// Semantic keyboard actions that can be bound to key combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Move the candidate highlight up.
    MoveUp,
    /// Move the candidate highlight down.
    MoveDown,
    /// Jump one visible page up in the candidate list.
    PageUp,
    /// Jump one visible page down in the candidate list.
    PageDown,
    /// Pick the highlighted candidate.
    SelectCandidate,
    /// Empty the filter input.
    ClearFilter,
    /// Show or hide the keybindings overlay.
    ToggleHelp,
}

/// Maps `(KeyModifiers, KeyCode)` pairs to [`KeyAction`]s.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Esc), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, PageUp), KeyAction::PageUp);
        bindings.insert((M::NONE, PageDown), KeyAction::PageDown);
        bindings.insert((M::NONE, Enter), KeyAction::SelectCandidate);
        bindings.insert((M::CONTROL, Char('u')), KeyAction::ClearFilter);
        bindings.insert((M::NONE, F(1)), KeyAction::ToggleHelp);
        Self { bindings }
    }

    /// Load the keymap at `path`, writing defaults there first if it is missing.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        if let Err(err) = km.write_file(path) {
            tracing::warn!(path = %path.display(), error = %err, "could not write default keybindings");
        }
        km
    }

    /// Load a keymap from a configuration file of `<Action> = <KeySpec>` lines.
    ///
    /// Starts from the defaults and overrides with each valid line; unknown
    /// actions or key specs are skipped.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((lhs, rhs)) = line.split_once('=') else {
                continue;
            };
            match (parse_action(lhs), parse_key(rhs)) {
                (Some(action), Some(key)) => {
                    map.bindings.insert(key, action);
                }
                _ => tracing::debug!(line, "ignoring keybinding line"),
            }
        }
        Some(map)
    }

    /// Write the current keymap to a configuration file.
    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# pick-users keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: Esc, Ctrl+c, Enter, Up, Down, PageUp, PageDown, Tab, F1, Ctrl+u\n");
        buf.push_str("# Binding a plain character takes it away from the search input.\n");
        buf.push_str("# Actions: Quit, MoveUp, MoveDown, PageUp, PageDown, SelectCandidate, ClearFilter, ToggleHelp\n\n");

        let mut all = self.all_bindings();
        all.sort_by_key(|((mods, code), action)| (format_action(*action), Self::format_key(*mods, *code)));
        for ((mods, code), action) in all {
            let _ = writeln!(&mut buf, "{} = {}", format_action(action), Self::format_key(mods, code));
        }

        std::fs::write(path, buf)
    }

    /// Resolve a key event to its bound action, if any.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    pub fn all_bindings(&self) -> Vec<((KeyModifiers, KeyCode), KeyAction)> {
        self.bindings.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Format a key (modifiers + code) into a spec like "Ctrl+u" or "PageDown".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Home => "Home".to_string(),
            End => "End".to_string(),
            Delete => "Delete".to_string(),
            F(n) => format!("F{n}"),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let (mods, rest) = match s.strip_prefix("Ctrl+") {
        Some(after) => (KeyModifiers::CONTROL, after),
        None => (KeyModifiers::NONE, s),
    };
    let code = match rest {
        "Enter" => Enter,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        "Home" => Home,
        "End" => End,
        "Delete" => Delete,
        _ => {
            if let Some(n) = rest.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
                F(n)
            } else {
                let mut chars = rest.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Char(c),
                    _ => return None,
                }
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    match s.trim() {
        "Quit" => Some(KeyAction::Quit),
        "MoveUp" => Some(KeyAction::MoveUp),
        "MoveDown" => Some(KeyAction::MoveDown),
        "PageUp" => Some(KeyAction::PageUp),
        "PageDown" => Some(KeyAction::PageDown),
        "SelectCandidate" => Some(KeyAction::SelectCandidate),
        "ClearFilter" => Some(KeyAction::ClearFilter),
        "ToggleHelp" => Some(KeyAction::ToggleHelp),
        _ => None,
    }
}

pub fn format_action(a: KeyAction) -> &'static str {
    match a {
        KeyAction::Quit => "Quit",
        KeyAction::MoveUp => "MoveUp",
        KeyAction::MoveDown => "MoveDown",
        KeyAction::PageUp => "PageUp",
        KeyAction::PageDown => "PageDown",
        KeyAction::SelectCandidate => "SelectCandidate",
        KeyAction::ClearFilter => "ClearFilter",
        KeyAction::ToggleHelp => "ToggleHelp",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_key_handles_ctrl_and_function_keys() {
        assert_eq!(parse_key("Ctrl+u"), Some((KeyModifiers::CONTROL, KeyCode::Char('u'))));
        assert_eq!(parse_key(" F1 "), Some((KeyModifiers::NONE, KeyCode::F(1))));
        assert_eq!(parse_key("F"), Some((KeyModifiers::NONE, KeyCode::Char('F'))));
        assert_eq!(parse_key("Shift+Nope"), None);
    }

    #[test]
    fn defaults_leave_backspace_and_letters_unbound() {
        let km = Keymap::default();
        let bs = KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE);
        let a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(km.resolve(&bs), None);
        assert_eq!(km.resolve(&a), None);
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(km.resolve(&enter), Some(KeyAction::SelectCandidate));
    }

    #[test]
    fn every_action_round_trips_through_its_name() {
        for action in [
            KeyAction::Quit,
            KeyAction::MoveUp,
            KeyAction::MoveDown,
            KeyAction::PageUp,
            KeyAction::PageDown,
            KeyAction::SelectCandidate,
            KeyAction::ClearFilter,
            KeyAction::ToggleHelp,
        ] {
            assert_eq!(parse_action(format_action(action)), Some(action));
        }
    }
}
