use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::Backend;
use ratatui::Terminal;
use std::time::Duration;

use crate::app::keymap::KeyAction;
use crate::app::AppState;
use crate::picker::{FilterKey, FilterKeyEvent};
use crate::ui;

/// What the loop should do after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> Result<()> {
    loop {
        app.poll_load();

        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            let flow = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
                Event::Mouse(mouse) => {
                    handle_mouse(app, mouse);
                    Flow::Continue
                }
                _ => Flow::Continue,
            };
            if flow == Flow::Quit {
                tracing::info!(selected = app.picker.selection().len(), "quit");
                break;
            }
        }
    }
    Ok(())
}

/// Route a key press: bound actions first, then the filter input.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Flow {
    if app.show_help {
        if matches!(app.keymap.resolve(&key), Some(KeyAction::Quit | KeyAction::ToggleHelp)) {
            app.show_help = false;
        }
        return Flow::Continue;
    }

    if let Some(action) = app.keymap.resolve(&key) {
        // Any bound key is a non-Backspace keystroke for the removal machine.
        let ev = FilterKeyEvent::new(FilterKey::Other, app.picker.filter());
        app.picker.handle_key(&ev);
        return apply_action(app, action);
    }

    let filter_key = match key.code {
        KeyCode::Backspace => FilterKey::Backspace,
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            FilterKey::Char(c)
        }
        _ => FilterKey::Other,
    };
    let ev = FilterKeyEvent::new(filter_key, app.picker.filter());
    app.picker.handle_key(&ev);
    if filter_key != FilterKey::Other {
        app.cursor = 0;
    }
    Flow::Continue
}

fn apply_action(app: &mut AppState, action: KeyAction) -> Flow {
    match action {
        KeyAction::Quit => return Flow::Quit,
        KeyAction::MoveUp => app.move_cursor(-1),
        KeyAction::MoveDown => app.move_cursor(1),
        KeyAction::PageUp => app.move_cursor(-(app.rows_per_page.max(1) as isize)),
        KeyAction::PageDown => app.move_cursor(app.rows_per_page.max(1) as isize),
        KeyAction::SelectCandidate => app.select_highlighted(),
        KeyAction::ClearFilter => {
            app.picker.set_filter("");
            app.cursor = 0;
        }
        KeyAction::ToggleHelp => app.show_help = !app.show_help,
    }
    Flow::Continue
}

pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    if app.show_help {
        return;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.click(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.move_cursor(1),
        MouseEventKind::ScrollUp => app.move_cursor(-1),
        _ => {}
    }
}
