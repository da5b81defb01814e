//! Keyboard input dispatch: overlays, then the filter line, then global
//! keys, then the focused pane.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use stockdash_core::TimeRange;

use crate::app::{AppState, Focus, Overlay};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return;
    }

    match app.overlay {
        Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    if app.companies.editing {
        handle_filter_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
            return;
        }
        KeyCode::Char('/') => {
            app.focus = Focus::Companies;
            app.companies.editing = true;
            return;
        }
        KeyCode::Char('r') => {
            app.request_fetch();
            return;
        }
        KeyCode::Char(c @ '1'..='5') => {
            let idx = c as usize - '1' as usize;
            if let Some(range) = TimeRange::from_index(idx) {
                app.select_range(range);
            }
            return;
        }
        KeyCode::Char('[') => {
            app.select_range(app.selected_range.prev());
            return;
        }
        KeyCode::Char(']') => {
            app.select_range(app.selected_range.next());
            return;
        }
        KeyCode::Tab => {
            app.focus = app.focus.next();
            return;
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return;
        }
        _ => {}
    }

    match app.focus {
        Focus::Companies => handle_companies_key(app, key),
        Focus::Ranges => handle_ranges_key(app, key),
        Focus::Chart => handle_chart_key(app, key),
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_filter_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.companies.clear_query(&app.selected_symbol);
            app.companies.editing = false;
        }
        KeyCode::Enter => {
            app.companies.editing = false;
        }
        KeyCode::Backspace => app.companies.pop_char(),
        KeyCode::Down => app.companies.move_cursor(1),
        KeyCode::Up => app.companies.move_cursor(-1),
        KeyCode::Char(c) => app.companies.push_char(c),
        _ => {}
    }
}

fn handle_companies_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.companies.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.companies.move_cursor(-1),
        KeyCode::Enter | KeyCode::Char(' ') => match app.companies.cursor_symbol() {
            Some(symbol) => app.select_symbol(symbol),
            None => app.set_warning(format!(
                "No companies match \"{}\"",
                app.companies.query
            )),
        },
        KeyCode::Esc if !app.companies.query.is_empty() => {
            app.companies.clear_query(&app.selected_symbol)
        }
        _ => {}
    }
}

fn handle_ranges_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.select_range(app.selected_range.prev()),
        KeyCode::Char('l') | KeyCode::Right => app.select_range(app.selected_range.next()),
        _ => {}
    }
}

fn handle_chart_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.move_crosshair(-1),
        KeyCode::Char('l') | KeyCode::Right => app.move_crosshair(1),
        KeyCode::Char('H') => app.move_crosshair(-10),
        KeyCode::Char('L') => app.move_crosshair(10),
        KeyCode::Esc => app.clear_crosshair(),
        _ => {}
    }
}
