//! Data source abstraction for loading the country list.
//!
//! This module provides a trait-based abstraction for loading country
//! records from various backends (the REST endpoint, local snapshot
//! files, or in-memory channels).

mod channel;
mod error;
mod file;
mod rest;

pub use channel::ChannelSource;
pub use error::SourceError;
pub use file::FileSource;
pub use rest::RestSource;

use std::fmt::Debug;

use crate::data::CountryLoad;

/// Outcome of a completed load attempt.
pub type LoadOutcome = Result<CountryLoad, SourceError>;

/// Trait for loading the country list from various backends.
///
/// Loading is one-shot: [`request_load`](DataSource::request_load) kicks
/// off a load, and [`poll`](DataSource::poll) is called from the event
/// loop until the outcome arrives. Implementations must keep `poll`
/// non-blocking and must never run two loads at once.
///
/// # Example
///
/// ```
/// use worldwatch::source::{DataSource, FileSource};
///
/// let mut source = FileSource::new("countries.json");
/// source.request_load();
/// if let Some(outcome) = source.poll() {
///     match outcome {
///         Ok(load) => println!("Got {} countries", load.records.len()),
///         Err(e) => eprintln!("Load failed: {}", e),
///     }
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Start a load unless one is already in flight.
    fn request_load(&mut self);

    /// Poll for a completed load. Non-blocking.
    ///
    /// Returns `Some(outcome)` exactly once per requested load.
    fn poll(&mut self) -> Option<LoadOutcome>;

    /// Human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;
}
