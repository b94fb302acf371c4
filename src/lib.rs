// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # worldwatch
//!
//! An interactive TUI and library for browsing the world's countries.
//!
//! This crate fetches a public list of country records, renders each as a
//! card (flag description, name, population, region, capital) in a
//! scrollable grid, and filters the displayed set live by free-text name
//! search and by region. A selected card opens an enlarged detail view,
//! and the color theme toggles between light and dark.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(records) │    │(cards)  │    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── RestSource | FileSource | ChannelSource    │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, filter state, view switching, and
//!   user interaction logic
//! - **[`source`]**: Data source abstraction ([`DataSource`] trait) with
//!   implementations for the HTTP endpoint, local snapshot files, and
//!   channel-based input
//! - **[`data`]**: The country record model, response decoding with the
//!   skip-malformed policy, and the optional population sort
//! - **[`ui`]**: Terminal rendering using ratatui - the card grid, the
//!   detail view, and theme support
//! - **[`settings`]**: Defaults, config file and environment overrides
//!
//! ## Features
//!
//! - **Card grid**: One card per country, rebuilt wholesale per load
//! - **Live filtering**: Name search and region selection toggle card
//!   visibility without rebuilding anything
//! - **Detail view**: An enlarged copy of the selected card
//! - **Themes**: Light/dark toggle, with optional terminal detection
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Browse countries from the default endpoint
//! worldwatch
//!
//! # Browse a saved response body, sorted by population
//! worldwatch --file countries.json --sort population-desc
//! ```
//!
//! ### As a library with a file source
//!
//! ```
//! use worldwatch::{App, FileSource, SortBy, Theme};
//!
//! let source = Box::new(FileSource::new("countries.json"));
//! let app = App::new(source, SortBy::None, Theme::light());
//! ```
//!
//! ### As a library with a channel source (records pushed by the caller)
//!
//! ```
//! use worldwatch::{App, ChannelSource, SortBy, Theme};
//!
//! // Create a channel for pushing record lists
//! let (tx, source) = ChannelSource::create("fixture");
//!
//! // Create the app
//! let app = App::new(Box::new(source), SortBy::None, Theme::light());
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, FilterState, RegionSelection, View};
pub use data::{CountryLoad, CountryName, CountryRecord, Flag, SortBy};
pub use settings::Settings;
pub use source::{ChannelSource, DataSource, FileSource, RestSource, SourceError};
pub use ui::{CardGrid, RenderedCard, Theme};
