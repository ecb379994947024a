//! Shared UI components (status bar, help overlay, layout helpers).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use std::collections::{BTreeMap, BTreeSet};

use crate::app::AppState;
use crate::app::keymap::{KeyAction, Keymap};

/// Render the bottom status bar with mode and counts.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.picker.removal().armed_email() {
        Some(_) => "ARMED (Backspace removes)",
        None => "SEARCH",
    };
    let load = if app.is_loading() { "  loading…" } else { "" };
    let msg = format!(
        "mode: {mode}  users:{}  matches:{}  selected:{}{load}  F1: help",
        app.picker.users().len(),
        app.candidate_count(),
        app.picker.selection().len(),
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn action_label(action: KeyAction) -> &'static str {
    match action {
        KeyAction::Quit => "Quit",
        KeyAction::MoveUp => "Move up",
        KeyAction::MoveDown => "Move down",
        KeyAction::PageUp => "Page up",
        KeyAction::PageDown => "Page down",
        KeyAction::SelectCandidate => "Select highlighted",
        KeyAction::ClearFilter => "Clear search",
        KeyAction::ToggleHelp => "Toggle help",
    }
}

/// Render the help overlay listing the active keybindings.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let mut bound: BTreeMap<&'static str, BTreeSet<String>> = BTreeMap::new();
    for ((mods, code), action) in app.keymap.all_bindings() {
        bound
            .entry(action_label(action))
            .or_default()
            .insert(Keymap::format_key(mods, code));
    }

    let fixed = [
        ("Type", "filter users by name (case-sensitive)"),
        ("Backspace", "delete a char; on empty search mark last chip, again to remove"),
        ("Click", "candidate to select, ✕ on a chip to remove"),
    ];
    let label_w = bound
        .keys()
        .copied()
        .chain(fixed.iter().map(|(l, _)| *l))
        .map(str::len)
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled("Keys", Style::default().add_modifier(Modifier::BOLD))),
        Line::raw(""),
    ];
    for (label, keys) in &bound {
        let joined = keys.iter().cloned().collect::<Vec<_>>().join(", ");
        lines.push(Line::from(vec![
            Span::raw(format!("  {:>width$} │ ", label, width = label_w)),
            Span::styled(joined, Style::default().add_modifier(Modifier::ITALIC)),
        ]));
    }
    lines.push(Line::raw(""));
    for (label, what) in fixed {
        lines.push(Line::from(vec![
            Span::raw(format!("  {:>width$} │ ", label, width = label_w)),
            Span::styled(what, Style::default().add_modifier(Modifier::ITALIC)),
        ]));
    }

    let width = 76u16.min(area.width.saturating_sub(4)).max(40);
    let height = (lines.len() as u16 + 2).min(area.height);
    let rect = centered_rect(width, height, area);
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect(40, 40, area), Rect::new(0, 0, 20, 10));
    }
}
