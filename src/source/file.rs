//! File-based data source.
//!
//! Loads a country list from a local JSON snapshot, for offline use and
//! for driving the TUI from a saved response body.

use std::fs;
use std::path::{Path, PathBuf};

use super::{DataSource, LoadOutcome, SourceError};
use crate::data::decode_records;

/// A data source that reads the country list from a JSON file.
///
/// The file holds the same shape as the endpoint response: a JSON array
/// of country records. Each requested load re-reads the file.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    pending: bool,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            pending: false,
        }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> LoadOutcome {
        let content = fs::read_to_string(&self.path).map_err(|e| SourceError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        decode_records(&content)
    }
}

impl DataSource for FileSource {
    fn request_load(&mut self) {
        self.pending = true;
    }

    fn poll(&mut self) -> Option<LoadOutcome> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        Some(self.read_file())
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"[
            { "name": { "common": "Iceland" }, "flags": { "png": "is.png" },
              "capital": ["Reykjavik"], "region": "Europe", "population": 366425 }
        ]"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/countries.json");
        assert_eq!(source.path(), Path::new("/tmp/countries.json"));
        assert_eq!(source.description(), "file: /tmp/countries.json");
    }

    #[test]
    fn test_file_source_poll_after_request() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());

        // No load requested yet.
        assert!(source.poll().is_none());

        source.request_load();
        let load = source.poll().unwrap().unwrap();
        assert_eq!(load.records.len(), 1);
        assert_eq!(load.records[0].name.common, "Iceland");

        // Outcome is delivered exactly once.
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/countries.json");
        source.request_load();

        let outcome = source.poll().unwrap();
        assert!(matches!(outcome, Err(SourceError::Io { .. })));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());
        source.request_load();

        let outcome = source.poll().unwrap();
        assert!(matches!(outcome, Err(SourceError::Parse(_))));
    }
}
