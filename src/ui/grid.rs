//! Card grid: card ownership and the grid view.
//!
//! [`CardGrid`] owns the ordered collection of rendered cards. A rebuild
//! replaces the whole collection from a record list; filtering only
//! toggles per-card `visible` flags. The module also draws the visible
//! cards as a grid and maps mouse clicks back to cards.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, FilterState};
use crate::data::{CountryRecord, SortBy};
use crate::ui::card::CardContent;

/// Terminal cells per card, including the border.
pub const CARD_WIDTH: u16 = 30;
pub const CARD_HEIGHT: u16 = 7;

/// One rendered card: built content plus a back-reference to the record
/// it was built from.
///
/// `visible` is the single source of truth for display. Filtering toggles
/// it; nothing destroys or recreates a card between rebuilds.
#[derive(Debug, Clone)]
pub struct RenderedCard {
    pub record: CountryRecord,
    pub content: CardContent,
    pub visible: bool,
}

/// The ordered collection of rendered cards.
#[derive(Debug, Default)]
pub struct CardGrid {
    cards: Vec<RenderedCard>,
}

impl CardGrid {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Rebuild all cards from a record list, in the same order.
    ///
    /// Previous cards are discarded wholesale. The caller re-applies the
    /// current filter afterwards, so a rebuild never leaves stale
    /// visibility flags behind.
    pub fn render(&mut self, records: &[CountryRecord]) {
        self.cards.clear();
        self.cards.extend(records.iter().map(|record| RenderedCard {
            record: record.clone(),
            content: CardContent::build(record),
            visible: true,
        }));
    }

    /// Re-evaluate the filter predicate over every card.
    ///
    /// Full scan on every change; the card count is bounded by the number
    /// of countries in the world, so an index would be overkill.
    pub fn apply_filter(&mut self, filter: &FilterState) {
        for card in &mut self.cards {
            card.visible = filter.matches(&card.record);
        }
    }

    /// All cards in display order, visible or not.
    pub fn cards(&self) -> &[RenderedCard] {
        &self.cards
    }

    /// Visible cards in display order.
    pub fn visible_cards(&self) -> impl Iterator<Item = &RenderedCard> {
        self.cards.iter().filter(|c| c.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.cards.iter().filter(|c| c.visible).count()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Render the grid view: the bordered card grid, or an inline error or
/// empty state in its place.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let visible = app.grid.visible_count();
    let total = app.grid.len();

    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter.search_text)
    } else if !app.filter.search_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter.search_text)
    } else {
        String::new()
    };

    let sort_info = match app.sort {
        SortBy::PopulationDesc => " [pop↓]",
        SortBy::None => "",
    };

    let title = format!(
        " Countries ({}/{}) | region: {}{}{} ",
        visible,
        total,
        app.filter.region.label(),
        sort_info,
        filter_info
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Remember geometry so mouse clicks can be mapped back to cards.
    app.grid_area = inner;

    if let Some(ref err) = app.load_error {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  Load failed: {}", err),
                Style::default().fg(app.theme.error),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "  Press r to retry",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
        return;
    }

    if app.grid.is_empty() {
        let msg = if app.loading {
            "  Loading countries..."
        } else {
            "  No countries loaded"
        };
        let line = Line::from(Span::styled(
            msg,
            Style::default().add_modifier(Modifier::DIM),
        ));
        frame.render_widget(Paragraph::new(vec![Line::from(""), line]), inner);
        return;
    }

    if visible == 0 {
        let line = Line::from(Span::styled(
            "  No countries match the current filter",
            Style::default().add_modifier(Modifier::DIM),
        ));
        frame.render_widget(Paragraph::new(vec![Line::from(""), line]), inner);
        return;
    }

    let cols = (inner.width / CARD_WIDTH).max(1) as usize;
    let rows_on_screen = (inner.height / CARD_HEIGHT).max(1) as usize;
    app.grid_cols = cols;

    // Keep the selected card on screen.
    let selected = app.selected_index.min(visible - 1);
    let selected_row = selected / cols;
    if selected_row < app.scroll_row {
        app.scroll_row = selected_row;
    } else if selected_row >= app.scroll_row + rows_on_screen {
        app.scroll_row = selected_row + 1 - rows_on_screen;
    }
    let total_rows = visible.div_ceil(cols);
    app.scroll_row = app.scroll_row.min(total_rows.saturating_sub(1));

    let first = app.scroll_row * cols;
    let slots = rows_on_screen * cols;

    for (index, card) in app
        .grid
        .visible_cards()
        .enumerate()
        .skip(first)
        .take(slots)
    {
        let slot = index - first;
        let x = inner.x + (slot % cols) as u16 * CARD_WIDTH;
        let y = inner.y + (slot / cols) as u16 * CARD_HEIGHT;

        let width = CARD_WIDTH.min(inner.right().saturating_sub(x));
        let height = CARD_HEIGHT.min(inner.bottom().saturating_sub(y));
        if width < 4 || height < 3 {
            continue;
        }

        let border_style = if index == selected {
            app.theme.selected
        } else {
            Style::default().fg(app.theme.border)
        };

        let card_block = Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(border_style);

        let lines = vec![
            Line::from(Span::styled(
                card.content.name.clone(),
                Style::default()
                    .fg(app.theme.heading)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                card.content.flag_alt.clone(),
                Style::default()
                    .fg(app.theme.muted)
                    .add_modifier(Modifier::DIM),
            )),
            labeled_line("Population: ", &card.content.population, app),
            labeled_line("Region: ", &card.content.region, app),
            labeled_line("Capital: ", &card.content.capital, app),
        ];

        let paragraph = Paragraph::new(lines).block(card_block);
        frame.render_widget(paragraph, Rect::new(x, y, width, height));
    }
}

fn labeled_line<'a>(label: &'a str, value: &'a str, app: &App) -> Line<'a> {
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

/// Map a click position to a visible-card index, using the geometry of
/// the last drawn frame.
pub fn card_at(app: &App, column: u16, row: u16) -> Option<usize> {
    let area = app.grid_area;
    if app.grid_cols == 0 || !area.contains(ratatui::layout::Position { x: column, y: row }) {
        return None;
    }

    let col = ((column - area.x) / CARD_WIDTH) as usize;
    if col >= app.grid_cols {
        return None;
    }
    let row_in_view = ((row - area.y) / CARD_HEIGHT) as usize;

    let index = (app.scroll_row + row_in_view) * app.grid_cols + col;
    if index < app.grid.visible_count() {
        Some(index)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::RegionSelection;
    use crate::data::{CountryName, Flag};

    fn record(name: &str, region: &str, population: u64) -> CountryRecord {
        CountryRecord {
            name: CountryName {
                common: name.to_string(),
                official: None,
            },
            flags: Flag {
                png: format!("{}.png", name.to_lowercase()),
                alt: String::new(),
            },
            capital: vec![format!("{} City", name)],
            region: region.to_string(),
            population,
            independent: true,
        }
    }

    fn fixture() -> Vec<CountryRecord> {
        vec![
            record("Iceland", "Europe", 366_425),
            record("Norway", "Europe", 5_379_475),
            record("Japan", "Asia", 125_836_021),
            record("Kenya", "Africa", 53_771_296),
            record("India", "Asia", 1_380_004_385),
        ]
    }

    #[test]
    fn test_render_builds_cards_in_order() {
        let mut grid = CardGrid::new();
        let records = fixture();
        grid.render(&records);

        assert_eq!(grid.len(), records.len());
        for (card, record) in grid.cards().iter().zip(&records) {
            assert_eq!(card.record, *record);
            assert_eq!(card.content.name, record.name.common);
            assert!(card.visible);
        }
    }

    #[test]
    fn test_render_twice_is_idempotent() {
        let mut grid = CardGrid::new();
        let records = fixture();
        grid.render(&records);
        grid.render(&records);

        assert_eq!(grid.len(), records.len());
        assert_eq!(grid.cards()[0].record, records[0]);
    }

    #[test]
    fn test_apply_filter_toggles_without_destroying_cards() {
        let mut grid = CardGrid::new();
        grid.render(&fixture());

        let filter = FilterState {
            search_text: String::new(),
            region: RegionSelection::Only("Asia".to_string()),
        };
        grid.apply_filter(&filter);

        // All five cards still exist; only the two Asia ones are visible.
        assert_eq!(grid.len(), 5);
        assert_eq!(grid.visible_count(), 2);
        let names: Vec<&str> = grid.visible_cards().map(|c| c.content.name.as_str()).collect();
        assert_eq!(names, vec!["Japan", "India"]);

        // Clearing the filter restores everything.
        grid.apply_filter(&FilterState::default());
        assert_eq!(grid.visible_count(), 5);
    }
}
