//! HTTP data source for REST Countries compatible endpoints.
//!
//! Issues one GET per load on a background task and bridges the outcome
//! back to the synchronous event loop over a channel.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use super::{DataSource, LoadOutcome, SourceError};
use crate::data::decode_records;

/// Field subset requested from the endpoint. This keeps the payload small;
/// correctness does not depend on the endpoint honoring it, and extra
/// fields in the response are tolerated.
const FIELDS: &str = "name,flags,capital,region,population,independent";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A data source that fetches the country list over HTTP.
///
/// Each requested load spawns one GET on the provided runtime; the
/// outcome is delivered back through a channel and picked up by `poll()`
/// on the event thread. At most one request is in flight at a time.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use worldwatch::source::RestSource;
///
/// # tokio_test::block_on(async {
/// let source = RestSource::new(
///     "https://restcountries.com/v3.1/all",
///     Duration::from_secs(10),
///     tokio::runtime::Handle::current(),
/// ).unwrap();
/// # });
/// ```
#[derive(Debug)]
pub struct RestSource {
    client: Client,
    url: String,
    description: String,
    handle: Handle,
    sender: mpsc::Sender<LoadOutcome>,
    receiver: mpsc::Receiver<LoadOutcome>,
    in_flight: bool,
}

impl RestSource {
    /// Create a source for the given endpoint.
    ///
    /// `handle` is the tokio runtime the background request runs on.
    pub fn new(endpoint: &str, timeout: Duration, handle: Handle) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SourceError::from)?;

        let separator = if endpoint.contains('?') { '&' } else { '?' };
        let url = format!("{}{}fields={}", endpoint, separator, FIELDS);
        let (sender, receiver) = mpsc::channel(1);

        Ok(Self {
            client,
            url,
            description: format!("rest: {}", endpoint),
            handle,
            sender,
            receiver,
            in_flight: false,
        })
    }

    /// The full request URL, including the field selection.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch(client: Client, url: String) -> LoadOutcome {
        let response = client.get(url.as_str()).send().await?;
        let status = response.status();
        let body = response.text().await?;
        decode_response(status, &body)
    }
}

/// Decode a completed response.
///
/// Split out of [`RestSource::fetch`] so status handling is testable
/// without a live endpoint.
fn decode_response(status: StatusCode, body: &str) -> LoadOutcome {
    if !status.is_success() {
        return Err(SourceError::FetchFailed {
            status: status.as_u16(),
        });
    }
    decode_records(body)
}

impl DataSource for RestSource {
    fn request_load(&mut self) {
        if self.in_flight {
            return;
        }
        self.in_flight = true;

        let client = self.client.clone();
        let url = self.url.clone();
        let sender = self.sender.clone();

        self.handle.spawn(async move {
            let outcome = Self::fetch(client, url).await;
            // Receiver dropped means the app is shutting down.
            let _ = sender.send(outcome).await;
        });
    }

    fn poll(&mut self) -> Option<LoadOutcome> {
        match self.receiver.try_recv() {
            Ok(outcome) => {
                self.in_flight = false;
                Some(outcome)
            }
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => None,
        }
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_body() -> &'static str {
        r#"[
            { "name": { "common": "Japan" }, "flags": { "png": "jp.png" },
              "capital": ["Tokyo"], "region": "Asia", "population": 125836021 },
            { "name": { "common": "Kenya" }, "flags": { "png": "ke.png" },
              "capital": ["Nairobi"], "region": "Africa", "population": 53771296 }
        ]"#
    }

    #[test]
    fn test_decode_response_not_found() {
        let outcome = decode_response(StatusCode::NOT_FOUND, "");
        match outcome {
            Err(SourceError::FetchFailed { status }) => assert_eq!(status, 404),
            other => panic!("expected FetchFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_response_server_error() {
        let outcome = decode_response(StatusCode::INTERNAL_SERVER_ERROR, "[]");
        assert!(matches!(
            outcome,
            Err(SourceError::FetchFailed { status: 500 })
        ));
    }

    #[test]
    fn test_decode_response_bad_body() {
        let outcome = decode_response(StatusCode::OK, "<html>oops</html>");
        assert!(matches!(outcome, Err(SourceError::Parse(_))));
    }

    #[test]
    fn test_decode_response_success() {
        let load = decode_response(StatusCode::OK, sample_body()).unwrap();
        assert_eq!(load.records.len(), 2);
        assert_eq!(load.records[0].name.common, "Japan");
    }

    #[tokio::test]
    async fn test_rest_source_builds_field_query() {
        let source = RestSource::new(
            "https://restcountries.com/v3.1/all",
            DEFAULT_TIMEOUT,
            Handle::current(),
        )
        .unwrap();

        assert_eq!(
            source.url(),
            "https://restcountries.com/v3.1/all?fields=name,flags,capital,region,population,independent"
        );
        assert_eq!(source.description(), "rest: https://restcountries.com/v3.1/all");
    }

    #[tokio::test]
    async fn test_rest_source_appends_to_existing_query() {
        let source =
            RestSource::new("http://localhost:8080/all?x=1", DEFAULT_TIMEOUT, Handle::current())
                .unwrap();
        assert!(source.url().starts_with("http://localhost:8080/all?x=1&fields="));
    }

    #[tokio::test]
    async fn test_rest_source_poll_empty_before_load() {
        let mut source =
            RestSource::new("http://localhost:1", DEFAULT_TIMEOUT, Handle::current()).unwrap();
        assert!(source.poll().is_none());
    }
}
