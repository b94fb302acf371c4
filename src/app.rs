//! Application state and navigation logic.

use std::collections::BTreeSet;
use std::time::Instant;

use anyhow::Result;
use ratatui::layout::Rect;

use crate::data::{apply_sort, CountryRecord, SortBy};
use crate::source::DataSource;
use crate::ui::card::CardContent;
use crate::ui::grid::CardGrid;
use crate::ui::Theme;

/// The current view. Grid and detail are mutually exclusive: exactly one
/// of them is shown at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The card grid with filtering.
    Grid,
    /// The enlarged single-card view.
    Detail,
}

/// Region filter selection. `All` is the no-filter sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RegionSelection {
    #[default]
    All,
    Only(String),
}

impl RegionSelection {
    /// Whether a record's region passes this selection.
    pub fn matches(&self, region: &str) -> bool {
        match self {
            RegionSelection::All => true,
            RegionSelection::Only(selected) => selected.eq_ignore_ascii_case(region),
        }
    }

    /// Returns the display label for this selection.
    pub fn label(&self) -> &str {
        match self {
            RegionSelection::All => "All",
            RegionSelection::Only(region) => region,
        }
    }
}

/// Current search text and region selection.
///
/// A card is visible iff it passes BOTH predicates.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Case-insensitive substring matched against the display name.
    pub search_text: String,
    pub region: RegionSelection,
}

impl FilterState {
    /// The AND predicate: substring match on the display name and
    /// equality on the structured region field (or the All sentinel).
    /// Both sides are lowercased; empty search text matches everything.
    pub fn matches(&self, record: &CountryRecord) -> bool {
        let name_ok = self.search_text.is_empty()
            || record
                .name
                .common
                .to_lowercase()
                .contains(&self.search_text.to_lowercase());
        name_ok && self.region.matches(&record.region)
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub grid: CardGrid,
    pub load_error: Option<String>,
    pub loading: bool,
    pub last_loaded: Option<Instant>,
    pub sort: SortBy,

    // Filter
    pub filter: FilterState,
    pub filter_active: bool,
    /// Distinct regions present in the loaded data, for cycling.
    pub regions: Vec<String>,

    /// Single-slot detail projection: a copy of the selected card's
    /// content. Selecting another card replaces it.
    pub detail: Option<CardContent>,

    // Navigation among visible cards
    pub selected_index: usize,
    pub scroll_row: usize,
    /// Inner grid area from the last draw, for mouse mapping.
    pub grid_area: Rect,
    /// Card columns from the last draw, for row-wise navigation.
    pub grid_cols: usize,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with the given data source, sort order and theme.
    pub fn new(source: Box<dyn DataSource>, sort: SortBy, theme: Theme) -> Self {
        Self {
            running: true,
            current_view: View::Grid,
            show_help: false,
            source,
            grid: CardGrid::new(),
            load_error: None,
            loading: false,
            last_loaded: None,
            sort,
            filter: FilterState::default(),
            filter_active: false,
            regions: Vec::new(),
            detail: None,
            selected_index: 0,
            scroll_row: 0,
            grid_area: Rect::default(),
            grid_cols: 1,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Kick off a (re)load from the data source.
    ///
    /// The outcome arrives later via [`poll_source`](Self::poll_source);
    /// the source guarantees at most one load is in flight.
    pub fn reload_data(&mut self) {
        self.loading = true;
        self.source.request_load();
    }

    /// Apply a completed load, if one has arrived.
    ///
    /// On success the whole card collection is rebuilt in record order and
    /// the current filter is re-applied, so the rebuild always completes
    /// before any filter re-scan sees the new cards. On failure the grid
    /// is left untouched and the error is surfaced in its place.
    ///
    /// Returns true if an outcome was applied.
    pub fn poll_source(&mut self) -> bool {
        let Some(outcome) = self.source.poll() else {
            return false;
        };
        self.loading = false;

        match outcome {
            Ok(mut load) => {
                apply_sort(&mut load.records, self.sort);

                self.grid.render(&load.records);
                self.grid.apply_filter(&self.filter);
                self.clamp_selection();

                self.regions = load
                    .records
                    .iter()
                    .map(|r| r.region.clone())
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect();

                self.load_error = None;
                self.last_loaded = Some(Instant::now());

                if load.skipped > 0 {
                    self.set_status_message(format!(
                        "Skipped {} malformed record(s)",
                        load.skipped
                    ));
                }
            }
            Err(err) => {
                self.load_error = Some(err.to_string());
            }
        }
        true
    }

    /// Replace the search text and re-evaluate visibility.
    pub fn set_search_text(&mut self, text: &str) {
        self.filter.search_text = text.to_string();
        self.refresh_visibility();
    }

    /// Replace the region selection and re-evaluate visibility.
    pub fn set_region(&mut self, region: RegionSelection) {
        self.filter.region = region;
        self.refresh_visibility();
    }

    /// Cycle the region selection forward (All → first region → ... → All).
    pub fn cycle_region(&mut self) {
        let next = match &self.filter.region {
            RegionSelection::All => self
                .regions
                .first()
                .cloned()
                .map(RegionSelection::Only)
                .unwrap_or(RegionSelection::All),
            RegionSelection::Only(current) => {
                match self.regions.iter().position(|r| r == current) {
                    Some(i) if i + 1 < self.regions.len() => {
                        RegionSelection::Only(self.regions[i + 1].clone())
                    }
                    _ => RegionSelection::All,
                }
            }
        };
        self.set_region(next);
    }

    /// Cycle the region selection backward.
    pub fn cycle_region_back(&mut self) {
        let prev = match &self.filter.region {
            RegionSelection::All => self
                .regions
                .last()
                .cloned()
                .map(RegionSelection::Only)
                .unwrap_or(RegionSelection::All),
            RegionSelection::Only(current) => {
                match self.regions.iter().position(|r| r == current) {
                    Some(0) | None => RegionSelection::All,
                    Some(i) => RegionSelection::Only(self.regions[i - 1].clone()),
                }
            }
        };
        self.set_region(prev);
    }

    /// Enter filter input mode (starts capturing keystrokes for search).
    pub fn start_filter(&mut self) {
        self.filter_active = true;
    }

    /// Exit filter input mode without clearing the filter text.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
    }

    /// Clear the filter text and exit filter mode.
    pub fn clear_filter(&mut self) {
        self.filter.search_text.clear();
        self.filter_active = false;
        self.refresh_visibility();
    }

    /// Append a character to the filter text.
    pub fn filter_push(&mut self, c: char) {
        self.filter.search_text.push(c);
        self.refresh_visibility();
    }

    /// Remove the last character from the filter text.
    pub fn filter_pop(&mut self) {
        self.filter.search_text.pop();
        self.refresh_visibility();
    }

    /// Re-scan every card against the current filter and keep the
    /// selection within the visible range.
    fn refresh_visibility(&mut self) {
        self.grid.apply_filter(&self.filter);
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let max = self.grid.visible_count().saturating_sub(1);
        if self.selected_index > max {
            self.selected_index = max;
        }
    }

    /// The currently selected card, if any card is visible.
    pub fn selected_card(&self) -> Option<&crate::ui::RenderedCard> {
        self.grid.visible_cards().nth(self.selected_index)
    }

    /// Move selection forward by one card.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection back by one card.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection forward by n cards.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.grid.visible_count().saturating_sub(1);
        self.selected_index = (self.selected_index + n).min(max);
        self.refresh_detail();
    }

    /// Move selection back by n cards.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_index = self.selected_index.saturating_sub(n);
        self.refresh_detail();
    }

    /// Jump to the first visible card.
    pub fn select_first(&mut self) {
        self.selected_index = 0;
        self.refresh_detail();
    }

    /// Jump to the last visible card.
    pub fn select_last(&mut self) {
        self.selected_index = self.grid.visible_count().saturating_sub(1);
        self.refresh_detail();
    }

    /// While the detail view is open, selection changes replace its
    /// content with the newly selected card.
    fn refresh_detail(&mut self) {
        if self.current_view == View::Detail {
            if let Some(content) = self.selected_card().map(|card| card.content.clone()) {
                self.detail = Some(content);
            }
        }
    }

    /// Open the detail view for the currently selected card.
    ///
    /// Copies the card's built content into the single detail slot and
    /// switches the view. Selecting a different card replaces the slot.
    pub fn enter_detail(&mut self) {
        if let Some(content) = self.selected_card().map(|card| card.content.clone()) {
            self.detail = Some(content);
            self.current_view = View::Detail;
        }
    }

    /// Select a visible card by index and open its detail view.
    pub fn select_and_enter_detail(&mut self, index: usize) {
        if index < self.grid.visible_count() {
            self.selected_index = index;
            self.enter_detail();
        }
    }

    /// Navigate back: close the help overlay first, then the detail view.
    pub fn go_back(&mut self) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        if self.current_view == View::Detail {
            self.current_view = View::Grid;
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Flip between the light and dark theme.
    pub fn toggle_theme(&mut self) {
        self.theme.toggle();
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the currently visible countries to a JSON file.
    pub fn export_visible(&self, path: &std::path::Path) -> Result<()> {
        use std::io::Write;

        if self.grid.is_empty() {
            anyhow::bail!("No data to export");
        }

        let countries: Vec<serde_json::Value> = self
            .grid
            .visible_cards()
            .map(|card| {
                serde_json::json!({
                    "name": card.record.name.common,
                    "region": card.record.region,
                    "population": card.record.population,
                    "capital": card.record.capital,
                })
            })
            .collect();

        let json = serde_json::to_string_pretty(&serde_json::Value::Array(countries))?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CountryName, Flag};
    use crate::source::{ChannelSource, LoadOutcome, SourceError};

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

    /// Five records over regions {Europe, Europe, Asia, Africa, Asia}.
    fn fixture() -> Vec<CountryRecord> {
        vec![
            record("Iceland", "Europe", 366_425),
            record("Norway", "Europe", 5_379_475),
            record("Japan", "Asia", 125_836_021),
            record("Kenya", "Africa", 53_771_296),
            record("India", "Asia", 1_380_004_385),
        ]
    }

    fn loaded_app(records: Vec<CountryRecord>, sort: SortBy) -> App {
        let (tx, source) = ChannelSource::create("fixture");
        let mut app = App::new(Box::new(source), sort, Theme::light());
        tx.send(records).unwrap();
        assert!(app.poll_source());
        app
    }

    fn visible_names(app: &App) -> Vec<String> {
        app.grid
            .visible_cards()
            .map(|c| c.content.name.clone())
            .collect()
    }

    #[test]
    fn test_load_renders_cards_in_record_order() {
        let app = loaded_app(fixture(), SortBy::None);

        assert_eq!(app.grid.len(), 5);
        let cards = app.grid.cards();
        assert_eq!(cards[0].content.name, "Iceland");
        assert_eq!(cards[2].content.name, "Japan");
        assert_eq!(cards[2].content.population, "125,836,021");
        assert_eq!(cards[2].content.region, "Asia");
        assert_eq!(cards[2].content.capital, "Japan City");
        assert_eq!(cards[4].content.name, "India");
    }

    #[test]
    fn test_reload_is_idempotent() {
        let (tx, source) = ChannelSource::create("fixture");
        let mut app = App::new(Box::new(source), SortBy::None, Theme::light());

        tx.send(fixture()).unwrap();
        assert!(app.poll_source());
        tx.send(fixture()).unwrap();
        assert!(app.poll_source());

        // No duplication, no leaked prior cards.
        assert_eq!(app.grid.len(), 5);
        assert_eq!(visible_names(&app).len(), 5);
    }

    #[test]
    fn test_filter_truth_table() {
        let mut app = loaded_app(fixture(), SortBy::None);

        // No filters: everything visible.
        app.set_search_text("");
        app.set_region(RegionSelection::All);
        assert_eq!(visible_names(&app).len(), 5);

        // Region only.
        app.set_region(RegionSelection::Only("Asia".to_string()));
        assert_eq!(visible_names(&app), vec!["Japan", "India"]);

        // Search only ("an" matches Iceland and Japan).
        app.set_region(RegionSelection::All);
        app.set_search_text("an");
        assert_eq!(visible_names(&app), vec!["Iceland", "Japan"]);

        // Both predicates AND together.
        app.set_region(RegionSelection::Only("Asia".to_string()));
        assert_eq!(visible_names(&app), vec!["Japan"]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let mut app = loaded_app(fixture(), SortBy::None);

        app.set_search_text("JAP");
        assert_eq!(visible_names(&app), vec!["Japan"]);

        app.set_search_text("");
        app.set_region(RegionSelection::Only("asia".to_string()));
        assert_eq!(visible_names(&app), vec!["Japan", "India"]);
    }

    #[test]
    fn test_filter_survives_rebuild() {
        let (tx, source) = ChannelSource::create("fixture");
        let mut app = App::new(Box::new(source), SortBy::None, Theme::light());

        tx.send(fixture()).unwrap();
        app.poll_source();
        app.set_search_text("an");
        assert_eq!(visible_names(&app).len(), 2);

        // A rebuild re-applies the current filter to the fresh cards.
        tx.send(fixture()).unwrap();
        app.poll_source();
        assert_eq!(visible_names(&app), vec!["Iceland", "Japan"]);
    }

    #[test]
    fn test_sort_population_desc_applied_on_load() {
        let app = loaded_app(fixture(), SortBy::PopulationDesc);

        let names = visible_names(&app);
        assert_eq!(names[0], "India");
        assert_eq!(names[1], "Japan");
        assert_eq!(names.last().unwrap(), "Iceland");

        let populations: Vec<u64> =
            app.grid.cards().iter().map(|c| c.record.population).collect();
        for pair in populations.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn test_detail_copies_and_replaces() {
        let mut app = loaded_app(fixture(), SortBy::None);

        app.enter_detail();
        assert_eq!(app.current_view, View::Detail);
        let first = app.detail.clone().unwrap();
        assert_eq!(first.name, "Iceland");

        // Selecting a different card replaces, not appends.
        app.select_next();
        app.select_next();
        let replaced = app.detail.clone().unwrap();
        assert_eq!(replaced.name, "Japan");

        app.go_back();
        assert_eq!(app.current_view, View::Grid);
        // The slot keeps its last content; re-entering shows the selection.
        app.enter_detail();
        assert_eq!(app.detail.as_ref().unwrap().name, "Japan");
    }

    #[test]
    fn test_detail_not_entered_with_no_visible_cards() {
        let mut app = loaded_app(fixture(), SortBy::None);
        app.set_search_text("zzz");
        assert_eq!(app.grid.visible_count(), 0);

        app.enter_detail();
        assert_eq!(app.current_view, View::Grid);
        assert!(app.detail.is_none());
    }

    #[derive(Debug)]
    struct FailingSource {
        requested: bool,
    }

    impl crate::source::DataSource for FailingSource {
        fn request_load(&mut self) {
            self.requested = true;
        }

        fn poll(&mut self) -> Option<LoadOutcome> {
            if self.requested {
                self.requested = false;
                Some(Err(SourceError::FetchFailed { status: 404 }))
            } else {
                None
            }
        }

        fn description(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_fetch_failure_surfaces_without_rendering() {
        let source = FailingSource { requested: false };
        let mut app = App::new(Box::new(source), SortBy::None, Theme::light());

        app.reload_data();
        assert!(app.poll_source());

        let err = app.load_error.clone().unwrap();
        assert!(err.contains("404"), "error should carry the status: {}", err);
        // The grid renderer was never handed any records.
        assert!(app.grid.is_empty());
    }

    #[test]
    fn test_selection_clamped_by_filter() {
        let mut app = loaded_app(fixture(), SortBy::None);
        app.select_last();
        assert_eq!(app.selected_index, 4);

        app.set_search_text("an");
        assert!(app.selected_index <= 1);
    }

    #[test]
    fn test_cycle_region_round_trips() {
        let mut app = loaded_app(fixture(), SortBy::None);
        assert_eq!(app.regions, vec!["Africa", "Asia", "Europe"]);

        assert_eq!(app.filter.region, RegionSelection::All);
        app.cycle_region();
        assert_eq!(
            app.filter.region,
            RegionSelection::Only("Africa".to_string())
        );
        app.cycle_region();
        app.cycle_region();
        assert_eq!(
            app.filter.region,
            RegionSelection::Only("Europe".to_string())
        );
        app.cycle_region();
        assert_eq!(app.filter.region, RegionSelection::All);

        app.cycle_region_back();
        assert_eq!(
            app.filter.region,
            RegionSelection::Only("Europe".to_string())
        );
    }

    #[test]
    fn test_export_visible() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("countries.json");

        let mut app = loaded_app(fixture(), SortBy::None);
        app.set_region(RegionSelection::Only("Asia".to_string()));
        app.export_visible(&path).unwrap();

        let exported: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let array = exported.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["name"], "Japan");
        assert_eq!(array[1]["population"], 1_380_004_385u64);
    }
}
