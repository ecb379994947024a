pub mod candidates;
pub mod chips;
pub mod components;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;

use crate::app::AppState;

pub fn render(f: &mut Frame, app: &mut AppState) {
    app.hits.clear();

    let area = f.area();
    let input_h = chips::required_height(app, area.width).min(area.height.saturating_sub(4).max(3));
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(input_h),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let title = Paragraph::new("Pick Users")
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));
    f.render_widget(title, root[0]);

    chips::render_input(f, root[1], app);
    candidates::render_candidates(f, root[2], app);
    components::render_status_bar(f, root[3], app);

    if app.show_help {
        components::render_help_modal(f, area, app);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::Picker;
    use crate::source::UserRecord;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn renders_candidates_and_records_hits() {
        let mut app = AppState::with_picker(Picker::with_users(vec![
            UserRecord::new("AnnLee", "a@x.com"),
            UserRecord::new("BoKim", "b@x.com"),
        ]));
        app.picker.set_filter("nn");
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Pick Users"));
        assert!(text.contains("search for :- nn"));
        assert!(text.contains("AnnLee"));
        assert!(!text.contains("BoKim"));
        assert_eq!(app.hits.candidates.len(), 1);

        let (rect, idx) = app.hits.candidates[0];
        app.click(rect.x, rect.y);
        assert_eq!(idx, 0);
        assert_eq!(app.picker.selection().len(), 1);

        terminal.draw(|f| render(f, &mut app)).unwrap();
        assert_eq!(app.hits.candidates.len(), 0);
        assert_eq!(app.hits.chips.len(), 1);
        let (glyph, _) = app.hits.chips[0].clone();
        app.click(glyph.x, glyph.y);
        assert!(app.picker.selection().is_empty());
    }

    #[test]
    fn long_chip_gets_a_dismiss_region_on_narrow_screen() {
        let mut app = AppState::with_picker(Picker::with_users(vec![UserRecord::new(
            "ChristopherAlexanderMontgomery",
            "c@x.com",
        )]));
        app.picker.set_filter("Chris");
        app.picker.select_candidate(0);
        app.picker.set_filter("");
        let mut terminal = Terminal::new(TestBackend::new(24, 12)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();

        assert_eq!(app.hits.chips.len(), 1);
        let (glyph, _) = app.hits.chips[0].clone();
        assert!(glyph.x < 24);
        app.click(glyph.x, glyph.y);
        assert!(app.picker.selection().is_empty());
    }

    #[test]
    fn empty_filter_hides_candidate_panel() {
        let mut app = AppState::with_picker(Picker::with_users(vec![UserRecord::new(
            "AnnLee", "a@x.com",
        )]));
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Enter user name"));
        assert!(text.contains("Type to search 1 users"));
        assert!(app.hits.candidates.is_empty());
    }
}
