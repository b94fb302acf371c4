//! Card content building.
//!
//! Turns one country record into the text block shown on its grid card
//! and, enlarged, in the detail view. This is a pure transform with no
//! I/O; records reaching this point are guaranteed complete by decoding.

use crate::data::format::group_thousands;
use crate::data::CountryRecord;

/// Fallback shown when a record has no capital.
pub const NO_CAPITAL: &str = "N/A";

/// Renderable content for one country card.
///
/// Built once per record when the grid is rebuilt; the grid and detail
/// views style these strings at draw time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardContent {
    /// Display name heading.
    pub name: String,
    /// Population with thousands separators.
    pub population: String,
    pub region: String,
    /// First capital, or [`NO_CAPITAL`].
    pub capital: String,
    /// Flag image URL.
    pub flag_url: String,
    /// Accessible flag description.
    pub flag_alt: String,
}

impl CardContent {
    /// Build the card content for one record.
    pub fn build(record: &CountryRecord) -> Self {
        let flag_alt = if record.flags.alt.is_empty() {
            format!("The flag of {}", record.name.common)
        } else {
            record.flags.alt.clone()
        };

        Self {
            name: record.name.common.clone(),
            population: group_thousands(record.population),
            region: record.region.clone(),
            capital: record
                .capital
                .first()
                .cloned()
                .unwrap_or_else(|| NO_CAPITAL.to_string()),
            flag_url: record.flags.png.clone(),
            flag_alt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CountryName, Flag};

    fn record() -> CountryRecord {
        CountryRecord {
            name: CountryName {
                common: "Germany".to_string(),
                official: Some("Federal Republic of Germany".to_string()),
            },
            flags: Flag {
                png: "https://flagcdn.com/w320/de.png".to_string(),
                alt: "The flag of Germany has three horizontal bands".to_string(),
            },
            capital: vec!["Berlin".to_string()],
            region: "Europe".to_string(),
            population: 83_240_525,
            independent: true,
        }
    }

    #[test]
    fn test_build_card_content() {
        let content = CardContent::build(&record());
        assert_eq!(content.name, "Germany");
        assert_eq!(content.population, "83,240,525");
        assert_eq!(content.region, "Europe");
        assert_eq!(content.capital, "Berlin");
        assert_eq!(content.flag_url, "https://flagcdn.com/w320/de.png");
        assert!(content.flag_alt.contains("three horizontal bands"));
    }

    #[test]
    fn test_missing_capital_falls_back() {
        let mut r = record();
        r.capital.clear();
        let content = CardContent::build(&r);
        assert_eq!(content.capital, NO_CAPITAL);
    }

    #[test]
    fn test_missing_flag_alt_falls_back() {
        let mut r = record();
        r.flags.alt.clear();
        let content = CardContent::build(&r);
        assert_eq!(content.flag_alt, "The flag of Germany");
    }

    #[test]
    fn test_first_capital_wins() {
        let mut r = record();
        r.capital = vec!["Pretoria".to_string(), "Cape Town".to_string()];
        let content = CardContent::build(&r);
        assert_eq!(content.capital, "Pretoria");
    }
}
