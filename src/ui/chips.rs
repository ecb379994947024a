//! Selected-user chips and the filter input, laid out as wrapped lines.
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, Theme};

pub const DISMISS_GLYPH: &str = "✕";
pub const PLACEHOLDER: &str = "Enter user name";

/// One chip to lay out.
pub struct ChipSpec<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub armed: bool,
}

/// Result of laying chips and the input into a fixed width.
pub struct ChipLayout {
    pub lines: Vec<Line<'static>>,
    /// Dismiss glyph positions relative to the layout origin: (column, row, email).
    pub glyphs: Vec<(u16, u16, String)>,
    /// Where the text cursor goes, relative to the layout origin.
    pub cursor: (u16, u16),
}

/// Wrap chips left to right, then append the filter text (or the placeholder).
pub fn layout_chips(chips: &[ChipSpec<'_>], filter: &str, width: u16, theme: &Theme) -> ChipLayout {
    let width = width.max(1) as usize;
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut col = 0usize;
    let mut glyphs = Vec::with_capacity(chips.len());

    for chip in chips {
        let style = if chip.armed {
            Style::default()
                .fg(theme.chip_armed)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(theme.chip).add_modifier(Modifier::BOLD | Modifier::REVERSED)
        };
        let label = Span::styled(fit_label(chip.name, width), style);
        let glyph = Span::styled(DISMISS_GLYPH.to_string(), style);
        let tail = Span::styled(" ".to_string(), style);
        let chip_w = label.width() + glyph.width() + tail.width();

        if col > 0 && col + chip_w > width {
            lines.push(Line::from(std::mem::take(&mut current)));
            col = 0;
        }
        let glyph_col = col + label.width();
        glyphs.push((glyph_col as u16, lines.len() as u16, chip.email.to_string()));
        current.extend([label, glyph, tail, Span::raw(" ")]);
        col += chip_w + 1;
    }

    let input = if filter.is_empty() && chips.is_empty() {
        Span::styled(PLACEHOLDER.to_string(), Style::default().fg(theme.muted))
    } else {
        Span::styled(filter.to_string(), Style::default().fg(theme.text))
    };
    let input_w = if filter.is_empty() { 0 } else { input.width() };
    if col > 0 && col + input_w + 1 > width {
        lines.push(Line::from(std::mem::take(&mut current)));
        col = 0;
    }
    current.push(input);
    lines.push(Line::from(current));

    let cursor = ((col + input_w) as u16, (lines.len() - 1) as u16);
    ChipLayout { lines, glyphs, cursor }
}

/// Pad `name` as a chip label, shortening it with `…` so that label, glyph and
/// tail fit in `width`. Returns an empty label when not even the glyph and tail fit.
fn fit_label(name: &str, width: usize) -> String {
    let padded = format!(" {name} ");
    let max_label = width.saturating_sub(2);
    if Span::raw(padded.as_str()).width() <= max_label {
        return padded;
    }
    if max_label < 3 {
        return String::new();
    }
    // room for the two spaces and the ellipsis
    let budget = max_label - 3;
    let mut short = String::new();
    for c in name.chars() {
        short.push(c);
        if Span::raw(short.as_str()).width() > budget {
            short.pop();
            break;
        }
    }
    format!(" {short}… ")
}

/// Rows the input box needs (top and bottom rules included) at `width`.
pub fn required_height(app: &AppState, width: u16) -> u16 {
    let specs = chip_specs(app);
    layout_chips(&specs, app.picker.filter(), width, &app.theme).lines.len() as u16 + 2
}

fn chip_specs(app: &AppState) -> Vec<ChipSpec<'_>> {
    let armed = app.picker.removal().armed_email();
    app.picker
        .selection()
        .iter()
        .map(|u| ChipSpec {
            name: &u.name,
            email: &u.email,
            armed: armed == Some(u.email.as_str()),
        })
        .collect()
}

/// Render chips plus input, record dismiss hit regions and place the cursor.
pub fn render_input(f: &mut Frame, area: Rect, app: &mut AppState) {
    let block = Block::default()
        .borders(Borders::BOTTOM | Borders::TOP)
        .title("Selected")
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    let layout = {
        let specs = chip_specs(app);
        layout_chips(&specs, app.picker.filter(), inner.width, &app.theme)
    };

    for (col, row, email) in layout.glyphs {
        if row < inner.height && col < inner.width {
            let rect = Rect::new(inner.x + col, inner.y + row, 1, 1);
            app.hits.chips.push((rect, email));
        }
    }

    let (cx, cy) = layout.cursor;
    if !app.show_help && cy < inner.height {
        f.set_cursor_position(Position::new(inner.x + cx.min(inner.width.saturating_sub(1)), inner.y + cy));
    }

    let p = Paragraph::new(layout.lines).block(block);
    f.render_widget(p, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chips_wrap_and_record_glyph_columns() {
        let theme = Theme::default();
        let chips = [
            ChipSpec { name: "AnnLee", email: "a@x.com", armed: false },
            ChipSpec { name: "BoKim", email: "b@x.com", armed: true },
        ];
        // " AnnLee ✕ " is 10 wide, plus a gap; the second chip does not fit in 16.
        let layout = layout_chips(&chips, "", 16, &theme);
        assert_eq!(layout.glyphs[0], (8, 0, "a@x.com".to_string()));
        assert_eq!(layout.glyphs[1], (7, 1, "b@x.com".to_string()));
        assert_eq!(layout.cursor, (10, 1));
    }

    #[test]
    fn long_chip_is_shortened_to_keep_glyph_clickable() {
        let theme = Theme::default();
        let chips = [ChipSpec { name: "ChristopherAlexanderMontgomery", email: "c@x.com", armed: false }];
        let layout = layout_chips(&chips, "", 24, &theme);
        let (col, row, _) = &layout.glyphs[0];
        assert_eq!((*col, *row), (22, 0));
        assert!(layout.lines[0].to_string().starts_with(" ChristopherAlexande… ✕"));

        let tiny = layout_chips(&chips, "", 2, &theme);
        assert!(tiny.glyphs[0].0 < 2);
    }

    #[test]
    fn placeholder_only_without_chips_or_text() {
        let theme = Theme::default();
        let layout = layout_chips(&[], "", 40, &theme);
        assert_eq!(layout.lines.len(), 1);
        assert_eq!(layout.lines[0].to_string(), PLACEHOLDER);
        assert_eq!(layout.cursor, (0, 0));

        let typed = layout_chips(&[], "Ann", 40, &theme);
        assert_eq!(typed.lines[0].to_string(), "Ann");
        assert_eq!(typed.cursor, (3, 0));
    }
}
