//! Current-conditions and daily-range fetch from the Open-Meteo forecast
//! endpoint.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::FetchError;
use crate::model::WeatherRecord;

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Normalized forecast data for a coordinate: current temperature and
/// condition code, plus today's daily max/min (index 0 of the daily arrays).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastSnapshot {
    pub temperature: i32,
    pub weather_code: i32,
    pub max_temp: i32,
    pub min_temp: i32,
}

impl ForecastSnapshot {
    /// Attach the city label the caller selected when issuing the fetch.
    pub fn into_record(self, city: impl Into<String>) -> WeatherRecord {
        WeatherRecord {
            temperature: self.temperature,
            weather_code: self.weather_code,
            max_temp: self.max_temp,
            min_temp: self.min_temp,
            city: city.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: Client,
    base_url: String,
}

impl ForecastClient {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(FORECAST_URL)
    }

    /// Point the client at a different endpoint (tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub async fn fetch(&self, lat: f64, lon: f64) -> Result<ForecastSnapshot, FetchError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", lat.to_string().as_str()),
                ("longitude", lon.to_string().as_str()),
                ("current", "temperature_2m,weather_code"),
                ("daily", "temperature_2m_max,temperature_2m_min"),
                ("timezone", "auto"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::status("forecast", status, &body));
        }

        let parsed: ForecastResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::parse("forecast", e))?;

        let max = parsed
            .daily
            .temperature_2m_max
            .first()
            .copied()
            .ok_or(FetchError::MissingDaily)?;
        let min = parsed
            .daily
            .temperature_2m_min
            .first()
            .copied()
            .ok_or(FetchError::MissingDaily)?;

        Ok(ForecastSnapshot {
            temperature: round_degrees(parsed.current.temperature_2m),
            weather_code: parsed.current.weather_code,
            max_temp: round_degrees(max),
            min_temp: round_degrees(min),
        })
    }
}

/// Round a raw temperature to whole degrees, half away from zero:
/// 15.5 becomes 16, 15.4 becomes 15, -2.5 becomes -3.
fn round_degrees(value: f64) -> i32 {
    value.round() as i32
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f64,
    weather_code: i32,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_degrees(15.5), 16);
        assert_eq!(round_degrees(15.4), 15);
        assert_eq!(round_degrees(-2.5), -3);
        assert_eq!(round_degrees(0.0), 0);
    }

    fn forecast_body() -> serde_json::Value {
        serde_json::json!({
            "current": {"temperature_2m": 21.6, "weather_code": 2},
            "daily": {
                "temperature_2m_max": [27.4, 25.0],
                "temperature_2m_min": [13.5, 12.1]
            }
        })
    }

    #[tokio::test]
    async fn fetch_rounds_and_uses_today_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("current", "temperature_2m,weather_code"))
            .and(query_param("daily", "temperature_2m_max,temperature_2m_min"))
            .and(query_param("timezone", "auto"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .mount(&server)
            .await;

        let client = ForecastClient::with_base_url(server.uri()).unwrap();
        let snapshot = client.fetch(45.6719, 11.9258).await.unwrap();

        assert_eq!(snapshot.temperature, 22);
        assert_eq!(snapshot.weather_code, 2);
        assert_eq!(snapshot.max_temp, 27);
        assert_eq!(snapshot.min_temp, 14);
    }

    #[tokio::test]
    async fn empty_daily_arrays_are_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "current": {"temperature_2m": 10.0, "weather_code": 0},
                "daily": {"temperature_2m_max": [], "temperature_2m_min": []}
            })))
            .mount(&server)
            .await;

        let client = ForecastClient::with_base_url(server.uri()).unwrap();
        let err = client.fetch(0.0, 0.0).await.unwrap_err();
        assert!(matches!(err, FetchError::MissingDaily));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let client = ForecastClient::with_base_url(server.uri()).unwrap();
        let err = client.fetch(0.0, 0.0).await.unwrap_err();
        assert!(err.to_string().contains("forecast request failed"));
    }

    #[test]
    fn snapshot_into_record_keeps_caller_city() {
        let snapshot = ForecastSnapshot {
            temperature: 21,
            weather_code: 2,
            max_temp: 27,
            min_temp: 14,
        };
        let record = snapshot.into_record("Paris, Île-de-France");
        assert_eq!(record.city, "Paris, Île-de-France");
        assert_eq!(record.temperature, 21);
    }
}
