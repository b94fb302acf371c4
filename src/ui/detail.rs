//! Detail view rendering.
//!
//! Displays the selected card's content enlarged, in place of the grid,
//! until the user navigates back.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Render the detail view for the card held in the app's detail slot.
///
/// The slot holds a copy of the selected card's built content, so the
/// view stays intact even if a reload or filter change replaces the
/// underlying cards.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref content) = app.detail else {
        let hint = Paragraph::new(Line::from(Span::styled(
            "  No country selected | Esc:back",
            Style::default().add_modifier(Modifier::DIM),
        )));
        frame.render_widget(hint, area);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(5), // Name and flag description
        Constraint::Min(6),    // Facts
        Constraint::Length(1), // Footer
    ])
    .split(area);

    let header_lines = vec![
        Line::from(Span::styled(
            format!(" {} ", content.name),
            Style::default()
                .fg(app.theme.heading)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", content.flag_alt),
            Style::default().fg(app.theme.muted),
        )),
    ];

    let header_block = Block::default()
        .title(" Country Detail ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(Paragraph::new(header_lines).block(header_block), chunks[0]);

    let facts = vec![
        Line::from(""),
        fact_line(" Population: ", &content.population, app),
        fact_line(" Region:     ", &content.region, app),
        fact_line(" Capital:    ", &content.capital, app),
        Line::from(""),
        fact_line(" Flag:       ", &content.flag_url, app),
    ];

    let facts_block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(facts).block(facts_block), chunks[1]);

    let footer = Paragraph::new(Line::from(Span::styled(
        " ↑↓←→:browse Esc:back to grid ",
        Style::default().add_modifier(Modifier::DIM),
    )));
    frame.render_widget(footer, chunks[2]);
}

fn fact_line<'a>(label: &'a str, value: &'a str, app: &App) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            label,
            Style::default()
                .fg(app.theme.muted)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(value),
    ])
}
