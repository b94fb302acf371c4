//! Settings loading.
//!
//! Defaults, overridden by an optional config file, overridden by
//! `WORLDWATCH_`-prefixed environment variables. CLI flags win last and
//! are applied by `main`.

use std::path::Path;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::SortBy;
use crate::ui::theme::ThemeChoice;

/// Endpoint queried when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://restcountries.com/v3.1/all";

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Country endpoint to fetch from.
    pub endpoint: String,
    /// Record ordering applied before rendering.
    pub sort: SortBy,
    /// Initial theme.
    pub theme: ThemeChoice,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            sort: SortBy::None,
            theme: ThemeChoice::Light,
            timeout_secs: 10,
        }
    }
}

impl Settings {
    /// Load settings from an optional config file and the environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(Environment::with_prefix("WORLDWATCH"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.sort, SortBy::None);
        assert_eq!(settings.theme, ThemeChoice::Light);
        assert_eq!(settings.timeout_secs, 10);
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worldwatch.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
endpoint = "http://localhost:8080/countries"
sort = "population-desc"
theme = "dark"
"#
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.endpoint, "http://localhost:8080/countries");
        assert_eq!(settings.sort, SortBy::PopulationDesc);
        assert_eq!(settings.theme, ThemeChoice::Dark);
        // Unset keys keep their defaults.
        assert_eq!(settings.timeout_secs, 10);
    }
}
