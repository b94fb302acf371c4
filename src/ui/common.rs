//! Common UI components shared across views.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, View};

/// Render the header bar with the country counts.
///
/// Displays: app name, visible/total counts, active region, theme state.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    if app.grid.is_empty() && app.load_error.is_none() {
        let line = Line::from(vec![
            Span::styled(" WORLDWATCH ", app.theme.header),
            Span::raw("| Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let visible = app.grid.visible_count();
    let total = app.grid.len();

    let theme_label = match app.theme.mode {
        crate::ui::theme::ThemeMode::Light => "light",
        crate::ui::theme::ThemeMode::Dark => "dark",
    };

    let line = Line::from(vec![
        Span::styled(" ● ", Style::default().fg(app.theme.highlight)),
        Span::styled("WORLDWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(
            format!("{}", visible),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" shown / "),
        Span::styled(
            format!("{}", total),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" countries │ region: "),
        Span::styled(
            app.filter.region.label().to_string(),
            Style::default().fg(app.theme.highlight),
        ),
        Span::raw(format!(" │ theme: {}", theme_label)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// Shows: the data source, time since the last load, available controls.
/// Also displays temporary status messages and load errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref err) = app.load_error {
        format!(" Error: {} | r:retry q:quit", err)
    } else {
        let controls = match app.current_view {
            View::Grid => {
                if app.filter_active {
                    "Type to search | Enter:apply Esc:cancel"
                } else {
                    "/:search g:region t:theme Enter:detail e:export ?:help q:quit"
                }
            }
            View::Detail => "↑↓←→:browse t:theme Esc:back q:quit",
        };

        let loaded = match app.last_loaded {
            Some(at) => format!("loaded {:.0}s ago", at.elapsed().as_secs_f64()),
            None => "loading...".to_string(),
        };

        format!(" {} | {} | {}", app.source_description(), loaded, controls)
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Previous/next card"),
        Line::from("  ↑/↓ j/k     Card above/below"),
        Line::from("  PgUp/PgDn   Jump 10 cards"),
        Line::from("  Home/End    First/last card"),
        Line::from("  Enter/click View detail"),
        Line::from("  Esc         Back to grid"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Filtering",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  /         Search by name"),
        Line::from("  c         Clear search"),
        Line::from("  g/G       Cycle region filter"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  t         Toggle light/dark theme"),
        Line::from("  r         Reload countries"),
        Line::from("  e         Export visible to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 28u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
