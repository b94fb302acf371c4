use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};
use crate::ui::grid;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // If the detail view is open, handle detail-specific keys
    if app.current_view == View::Detail {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.go_back();
            }
            // Browsing while the detail is open replaces its content
            KeyCode::Left | KeyCode::Char('h') => app.select_prev(),
            KeyCode::Right | KeyCode::Char('l') => app.select_next(),
            KeyCode::Up | KeyCode::Char('k') => app.select_prev_n(app.grid_cols.max(1)),
            KeyCode::Down | KeyCode::Char('j') => app.select_next_n(app.grid_cols.max(1)),
            KeyCode::Home => app.select_first(),
            KeyCode::End => app.select_last(),
            KeyCode::Char('t') => app.toggle_theme(),
            _ => {}
        }
        return;
    }

    // If filter input is active, handle text input
    if app.filter_active {
        handle_filter_input(app, key);
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // Navigation (left/right move by card, up/down by row)
        KeyCode::Left | KeyCode::Char('h') => app.select_prev(),
        KeyCode::Right | KeyCode::Char('l') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev_n(app.grid_cols.max(1)),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_n(app.grid_cols.max(1)),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Enter detail view
        KeyCode::Enter => app.enter_detail(),

        // Go back (Esc and Backspace)
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        // Reload
        KeyCode::Char('r') => app.reload_data(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Theme toggle
        KeyCode::Char('t') => app.toggle_theme(),

        // Region filter cycling
        KeyCode::Char('g') => app.cycle_region(),
        KeyCode::Char('G') => app.cycle_region_back(),

        // Filter (start typing to search)
        KeyCode::Char('/') => app.start_filter(),

        // Clear filter
        KeyCode::Char('c') => {
            if !app.filter.search_text.is_empty() {
                app.clear_filter();
            }
        }

        // Export
        KeyCode::Char('e') => {
            let export_path = std::path::PathBuf::from("countries_export.json");
            match app.export_visible(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle key input while filter is active
fn handle_filter_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Confirm filter
        KeyCode::Enter => {
            app.filter_active = false;
        }

        // Cancel filter (keep text but exit input mode)
        KeyCode::Esc => {
            app.cancel_filter();
        }

        // Clear and exit
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_filter();
        }

        // Backspace
        KeyCode::Backspace => {
            app.filter_pop();
            if app.filter.search_text.is_empty() {
                app.filter_active = false;
            }
        }

        // Type characters; every keystroke re-scans the cards
        KeyCode::Char(c) => {
            app.filter_push(c);
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        // Scroll wheel moves the selection by a row
        MouseEventKind::ScrollUp => {
            app.select_prev_n(app.grid_cols.max(1));
        }
        MouseEventKind::ScrollDown => {
            app.select_next_n(app.grid_cols.max(1));
        }

        // Click anywhere inside a card opens its detail view
        MouseEventKind::Down(MouseButton::Left) => {
            if app.current_view == View::Grid {
                if let Some(index) = grid::card_at(app, mouse.column, mouse.row) {
                    app.select_and_enter_detail(index);
                }
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => {
            app.go_back();
        }

        _ => {}
    }
}
