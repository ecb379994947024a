use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::app::AppState;

/// Render the candidate panel. Hidden (hint only) while the filter is empty.
pub fn render_candidates(f: &mut Frame, area: Rect, app: &mut AppState) {
    if app.picker.filter().is_empty() {
        render_hint(f, area, app);
        return;
    }

    let title = Line::from(vec![
        Span::raw(" search for :- "),
        Span::styled(
            app.picker.filter().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ]);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);

    let body_height = inner.height as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }
    app.clamp_cursor();

    let start = (app.cursor / app.rows_per_page) * app.rows_per_page;
    let mut items: Vec<ListItem> = Vec::with_capacity(app.rows_per_page);
    let mut rows: Vec<(Rect, usize)> = Vec::with_capacity(app.rows_per_page);
    for (i, user) in app
        .picker
        .candidates()
        .enumerate()
        .skip(start)
        .take(body_height)
    {
        let style = if i == app.cursor {
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        let marker = if i == app.cursor { "▶ " } else { "  " };
        items.push(ListItem::new(Line::from(vec![
            Span::raw(marker),
            Span::raw(user.name.clone()),
            Span::styled(format!("  <{}>", user.email), Style::default().fg(app.theme.muted)),
        ])).style(style));
        let row = inner.y + (i - start) as u16;
        rows.push((Rect::new(inner.x, row, inner.width, 1), i));
    }

    if items.is_empty() {
        let p = Paragraph::new("no matching users").style(Style::default().fg(app.theme.muted)).block(block);
        f.render_widget(p, area);
        return;
    }

    app.hits.candidates.extend(rows);
    f.render_widget(List::new(items).block(block), area);
}

fn render_hint(f: &mut Frame, area: Rect, app: &AppState) {
    let msg = if app.is_loading() {
        "loading users…".to_string()
    } else {
        format!("Type to search {} users", app.picker.users().len())
    };
    let p = Paragraph::new(msg).style(Style::default().fg(app.theme.muted));
    f.render_widget(p, area);
}
