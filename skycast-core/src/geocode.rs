//! Geocoding search against the Open-Meteo geocoding endpoint.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::FetchError;
use crate::model::LocationSuggestion;

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum number of suggestions requested from (and accepted back from)
/// the geocoding service.
pub const SUGGESTION_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct GeocodingClient {
    http: Client,
    base_url: String,
}

impl GeocodingClient {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(GEOCODING_URL)
    }

    /// Point the client at a different endpoint (tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Search for places matching `query`, in the service's relevance order,
    /// capped at [`SUGGESTION_LIMIT`]. An absent `results` field means no
    /// matches and yields an empty list.
    pub async fn search(&self, query: &str) -> Result<Vec<LocationSuggestion>, FetchError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("name", query),
                ("count", "5"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::status("geocoding", status, &body));
        }

        let parsed: GeocodingResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::parse("geocoding", e))?;

        let mut suggestions: Vec<LocationSuggestion> = parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .map(LocationSuggestion::from)
            .collect();
        suggestions.truncate(SUGGESTION_LIMIT);

        Ok(suggestions)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
}

impl From<GeocodingResult> for LocationSuggestion {
    fn from(r: GeocodingResult) -> Self {
        Self {
            name: r.name,
            country: r.country.unwrap_or_default(),
            admin1: r.admin1,
            latitude: r.latitude,
            longitude: r.longitude,
        }
    }
}
