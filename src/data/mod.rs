//! Country data models and processing.
//!
//! This module handles the wire shape of country records and everything
//! done to a record list before it reaches the grid.
//!
//! ## Submodules
//!
//! - [`country`]: The [`CountryRecord`] model, response decoding with the
//!   skip-malformed policy, the independence filter, and the optional
//!   population sort
//! - [`format`]: Display formatting helpers (thousands separators)
//!
//! ## Data Flow
//!
//! ```text
//! response body (JSON array)
//!        │
//!        ▼
//! decode_records()  ──▶ CountryLoad { records, skipped }
//!        │
//!        ▼
//! apply_sort()      ──▶ ordered Vec<CountryRecord> handed to the grid
//! ```

pub mod country;
pub mod format;

pub use country::{
    apply_sort, decode_records, CountryLoad, CountryName, CountryRecord, Flag, SortBy,
};
