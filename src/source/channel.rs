//! Channel-based data source.
//!
//! Receives country lists via a tokio watch channel. This is useful when
//! records are produced programmatically, and for driving the app
//! deterministically in tests.

use tokio::sync::watch;

use super::{DataSource, LoadOutcome};
use crate::data::{CountryLoad, CountryRecord};

/// A data source that receives country lists via a channel.
///
/// The producer sends complete record lists through the channel and this
/// source delivers each one exactly once via `poll()`. The initial
/// (empty) channel value is not delivered.
///
/// # Example
///
/// ```
/// use worldwatch::source::ChannelSource;
///
/// // Create a channel pair
/// let (tx, source) = ChannelSource::create("fixture");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Vec<CountryRecord>>,
    description: String,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - A description of where records come from
    pub fn new(
        receiver: watch::Receiver<Vec<CountryRecord>>,
        source_description: &str,
    ) -> Self {
        let mut receiver = receiver;
        // Mark the initial value seen so only pushed lists are delivered.
        receiver.borrow_and_update();
        Self {
            receiver,
            description: format!("channel: {}", source_description),
        }
    }

    /// Create a channel pair for sending record lists to a ChannelSource.
    ///
    /// Returns (sender, source) where the sender can be used to push
    /// record lists and the source can be handed to the app.
    pub fn create(source_description: &str) -> (watch::Sender<Vec<CountryRecord>>, Self) {
        let (tx, rx) = watch::channel(Vec::new());
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl DataSource for ChannelSource {
    fn request_load(&mut self) {
        // Loads are pushed by the producer; nothing to kick off here.
    }

    fn poll(&mut self) -> Option<LoadOutcome> {
        if self.receiver.has_changed().unwrap_or(false) {
            let records = self.receiver.borrow_and_update().clone();
            Some(Ok(CountryLoad {
                records,
                skipped: 0,
            }))
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CountryName, Flag};

    fn record(name: &str) -> CountryRecord {
        CountryRecord {
            name: CountryName {
                common: name.to_string(),
                official: None,
            },
            flags: Flag {
                png: "x.png".to_string(),
                alt: String::new(),
            },
            capital: vec![],
            region: "Europe".to_string(),
            population: 1,
            independent: true,
        }
    }

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");

        // The initial empty value is not delivered.
        assert!(source.poll().is_none());

        tx.send(vec![record("Norway")]).unwrap();

        let load = source.poll().unwrap().unwrap();
        assert_eq!(load.records.len(), 1);
        assert_eq!(load.records[0].name.common, "Norway");

        // Delivered exactly once.
        assert!(source.poll().is_none());

        // A second push is delivered again.
        tx.send(vec![record("Iceland"), record("Norway")]).unwrap();
        let load = source.poll().unwrap().unwrap();
        assert_eq!(load.records.len(), 2);
    }

    #[test]
    fn test_channel_source_description() {
        let (_tx, source) = ChannelSource::create("fixture");
        assert_eq!(source.description(), "channel: fixture");
    }
}
