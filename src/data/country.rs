//! Country record model and response decoding.
//!
//! These types match the JSON shape served by REST Countries compatible
//! endpoints. Decoding is tolerant: unknown fields are ignored, and
//! individual entries missing required fields are skipped and counted
//! rather than failing the whole load.

use serde::{Deserialize, Serialize};

use crate::source::SourceError;

/// Structured country name as served by the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryName {
    /// Common display name (e.g. "Germany").
    pub common: String,

    /// Official long-form name, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official: Option<String>,
}

/// Flag image reference: a URL plus an accessibility description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    /// PNG image URL.
    pub png: String,

    /// Accessible description of the flag. Not all entries carry one.
    #[serde(default)]
    pub alt: String,
}

/// One country as received from the external source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub name: CountryName,
    pub flags: Flag,

    /// Capitals; may be empty for territories without one.
    #[serde(default)]
    pub capital: Vec<String>,

    /// One of a small fixed set of macro-regions (e.g. "Europe", "Asia").
    pub region: String,

    pub population: u64,

    /// Inclusion filter for endpoints that do not pre-filter to sovereign
    /// states. Absent means the endpoint already restricted the set.
    #[serde(default = "default_independent")]
    pub independent: bool,
}

fn default_independent() -> bool {
    true
}

/// Result of decoding a response body: the usable records plus the number
/// of malformed entries that were skipped.
#[derive(Debug, Clone, Default)]
pub struct CountryLoad {
    pub records: Vec<CountryRecord>,
    pub skipped: usize,
}

/// Decode a JSON array of country records.
///
/// The body must be a JSON array; anything else is a [`SourceError::Parse`].
/// Entries missing a required field (name, flag URL, population) are
/// skipped and counted, never fatal to the load. Records marked
/// `independent: false` are excluded.
pub fn decode_records(body: &str) -> Result<CountryLoad, SourceError> {
    let entries: Vec<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| SourceError::Parse(e.to_string()))?;

    let mut load = CountryLoad::default();
    for entry in entries {
        match serde_json::from_value::<CountryRecord>(entry) {
            Ok(record) if record.independent => load.records.push(record),
            Ok(_) => {}
            Err(_) => load.skipped += 1,
        }
    }
    Ok(load)
}

/// Record ordering applied before the grid is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    /// Keep the response order.
    #[default]
    None,
    /// Largest population first.
    PopulationDesc,
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(SortBy::None),
            "population-desc" => Ok(SortBy::PopulationDesc),
            other => Err(format!(
                "unknown sort '{}' (expected 'none' or 'population-desc')",
                other
            )),
        }
    }
}

/// Apply the configured ordering.
///
/// `PopulationDesc` uses a stable sort, so ties keep their relative
/// response order.
pub fn apply_sort(records: &mut [CountryRecord], sort: SortBy) {
    match sort {
        SortBy::None => {}
        SortBy::PopulationDesc => records.sort_by(|a, b| b.population.cmp(&a.population)),
    }
}
