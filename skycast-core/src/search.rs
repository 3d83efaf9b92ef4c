//! Debounced, cancelable search-as-you-type against the geocoding service.
//!
//! Each keystroke aborts the previously scheduled lookup outright, so a
//! burst of typing issues no request at all until 300ms of inactivity have
//! passed, and then only for the final query string.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::geocode::GeocodingClient;
use crate::model::LocationSuggestion;

/// Inactivity window before a lookup is issued.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Queries must be longer than this to trigger a lookup.
pub const MIN_QUERY_LEN: usize = 2;

/// Whether a query string is long enough to search for.
pub fn should_search(query: &str) -> bool {
    query.chars().count() > MIN_QUERY_LEN
}

/// Outcome of one keystroke, delivered asynchronously. Empty results and
/// lookup errors both clear the list; errors are logged, never shown.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchUpdate {
    Cleared,
    Suggestions(Vec<LocationSuggestion>),
}

pub struct DebouncedSearch {
    client: GeocodingClient,
    delay: Duration,
    tx: mpsc::UnboundedSender<SearchUpdate>,
    pending: Option<JoinHandle<()>>,
}

impl DebouncedSearch {
    pub fn new(client: GeocodingClient, tx: mpsc::UnboundedSender<SearchUpdate>) -> Self {
        Self::with_delay(client, tx, DEBOUNCE)
    }

    pub fn with_delay(
        client: GeocodingClient,
        tx: mpsc::UnboundedSender<SearchUpdate>,
        delay: Duration,
    ) -> Self {
        Self {
            client,
            delay,
            tx,
            pending: None,
        }
    }

    /// Register the latest query text. Cancels any scheduled lookup; short
    /// queries clear the suggestion list immediately and schedule nothing.
    pub fn keystroke(&mut self, query: &str) {
        self.cancel();

        if !should_search(query) {
            let _ = self.tx.send(SearchUpdate::Cleared);
            return;
        }

        let client = self.client.clone();
        let delay = self.delay;
        let query = query.to_string();
        let tx = self.tx.clone();

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let update = match client.search(&query).await {
                Ok(suggestions) if suggestions.is_empty() => SearchUpdate::Cleared,
                Ok(suggestions) => SearchUpdate::Suggestions(suggestions),
                Err(e) => {
                    warn!("geocoding search for {query:?} failed: {e}");
                    SearchUpdate::Cleared
                }
            };

            let _ = tx.send(update);
        }));
    }

    /// Abort the scheduled lookup, if any. An aborted lookup issues no
    /// request rather than discarding a response.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for DebouncedSearch {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEST_DELAY: Duration = Duration::from_millis(100);

    async fn mock_server(body: serde_json::Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
        server
    }

    fn paris_body() -> serde_json::Value {
        serde_json::json!({
            "results": [{
                "name": "Paris",
                "latitude": 48.85341,
                "longitude": 2.3488,
                "country": "France",
                "admin1": "Île-de-France"
            }]
        })
    }

    async fn recv(rx: &mut mpsc::UnboundedReceiver<SearchUpdate>) -> SearchUpdate {
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for search update")
            .expect("search channel closed")
    }

    #[test]
    fn min_length_gate() {
        assert!(!should_search(""));
        assert!(!should_search("ab"));
        assert!(should_search("abc"));
        // counted in characters, not bytes
        assert!(!should_search("éà"));
    }

    #[tokio::test]
    async fn short_query_clears_without_network_call() {
        let server = mock_server(paris_body()).await;
        let client = GeocodingClient::with_base_url(server.uri()).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut search = DebouncedSearch::with_delay(client, tx, TEST_DELAY);

        search.keystroke("pa");
        assert_eq!(recv(&mut rx).await, SearchUpdate::Cleared);

        tokio::time::sleep(TEST_DELAY * 3).await;
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn burst_issues_one_call_for_final_query() {
        let server = mock_server(paris_body()).await;
        let client = GeocodingClient::with_base_url(server.uri()).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut search = DebouncedSearch::with_delay(client, tx, TEST_DELAY);

        for query in ["par", "pari", "paris"] {
            search.keystroke(query);
            tokio::time::sleep(Duration::from_millis(30)).await;
        }

        let update = recv(&mut rx).await;
        assert!(matches!(update, SearchUpdate::Suggestions(ref s) if s.len() == 1));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.query().unwrap_or("").contains("name=paris"));
    }

    #[tokio::test]
    async fn keystroke_within_window_cancels_pending_call() {
        let server = mock_server(paris_body()).await;
        let client = GeocodingClient::with_base_url(server.uri()).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut search = DebouncedSearch::with_delay(client, tx, TEST_DELAY);

        search.keystroke("paris");
        tokio::time::sleep(Duration::from_millis(30)).await;
        // back under the length gate: pending call aborted, list cleared
        search.keystroke("pa");
        assert_eq!(recv(&mut rx).await, SearchUpdate::Cleared);

        tokio::time::sleep(TEST_DELAY * 3).await;
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_results_clear() {
        let server = mock_server(serde_json::json!({})).await;
        let client = GeocodingClient::with_base_url(server.uri()).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut search = DebouncedSearch::with_delay(client, tx, TEST_DELAY);

        search.keystroke("nowhereville");
        assert_eq!(recv(&mut rx).await, SearchUpdate::Cleared);
    }

    #[tokio::test]
    async fn lookup_error_clears_silently() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let client = GeocodingClient::with_base_url(server.uri()).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut search = DebouncedSearch::with_delay(client, tx, TEST_DELAY);

        search.keystroke("paris");
        assert_eq!(recv(&mut rx).await, SearchUpdate::Cleared);
    }
}
