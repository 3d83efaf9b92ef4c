//! Interactive session event loop.
//!
//! One task owns the `App` state container, the debounced search, and the
//! forecast client. Events flow in over a channel, effects are executed
//! here, and every state change is published as a snapshot over a `watch`
//! channel for the prompt/render side to observe. All shared mutable state
//! is mutated from this single loop.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::warn;

use skycast_core::{App, DebouncedSearch, Effect, Event, ForecastClient, GeocodingClient};

/// Handle to a running session: send events in, observe state snapshots.
pub struct Session {
    pub events: mpsc::UnboundedSender<Event>,
    pub ui: watch::Receiver<App>,
}

impl Session {
    pub fn spawn(
        app: App,
        geocoding: GeocodingClient,
        forecast: ForecastClient,
        debounce: Duration,
    ) -> Self {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
        let (search_tx, mut search_rx) = mpsc::unbounded_channel();
        let (ui_tx, ui_rx) = watch::channel(app.clone());

        let mut search = DebouncedSearch::with_delay(geocoding, search_tx, debounce);
        let fetch_events = event_tx.clone();

        tokio::spawn(async move {
            let mut app = app;
            loop {
                let event = tokio::select! {
                    event = event_rx.recv() => match event {
                        Some(event) => event,
                        None => break,
                    },
                    update = search_rx.recv() => match update {
                        Some(update) => Event::SearchUpdated(update),
                        None => break,
                    },
                };

                for effect in app.update(event) {
                    match effect {
                        Effect::Search(query) => search.keystroke(&query),
                        Effect::CancelSearch => search.cancel(),
                        Effect::FetchWeather { seq, lat, lon, city } => {
                            let forecast = forecast.clone();
                            let events = fetch_events.clone();
                            tokio::spawn(async move {
                                let event = match forecast.fetch(lat, lon).await {
                                    Ok(snapshot) => Event::WeatherReady { seq, snapshot },
                                    Err(e) => {
                                        warn!("weather fetch for {city} failed: {e}");
                                        Event::WeatherFailed { seq }
                                    }
                                };
                                let _ = events.send(event);
                            });
                        }
                    }
                }

                if ui_tx.send(app.clone()).is_err() {
                    break;
                }
            }
        });

        Session {
            events: event_tx,
            ui: ui_rx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn wait_until(
        ui: &mut watch::Receiver<App>,
        mut pred: impl FnMut(&App) -> bool,
    ) -> App {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                {
                    let app = ui.borrow_and_update();
                    if pred(&app) {
                        return app.clone();
                    }
                }
                ui.changed().await.expect("session ended");
            }
        })
        .await
        .expect("timed out waiting for session state")
    }

    async fn geocoding_server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{
                    "name": "Paris",
                    "latitude": 48.85341,
                    "longitude": 2.3488,
                    "country": "France",
                    "admin1": "Île-de-France"
                }]
            })))
            .mount(&server)
            .await;
        server
    }

    async fn forecast_server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "current": {"temperature_2m": 21.6, "weather_code": 2},
                "daily": {"temperature_2m_max": [27.4], "temperature_2m_min": [13.5]}
            })))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn session_fetches_startup_city_then_switches() {
        let geo = geocoding_server().await;
        let fc = forecast_server().await;
        let geocoding = GeocodingClient::with_base_url(geo.uri()).unwrap();
        let forecast = ForecastClient::with_base_url(fc.uri()).unwrap();

        let session = Session::spawn(App::new(), geocoding, forecast, Duration::from_millis(50));
        let mut ui = session.ui.clone();

        session.events.send(Event::Started).unwrap();
        let app = wait_until(&mut ui, |app| app.weather.is_some()).await;
        let record = app.weather.unwrap();
        assert_eq!(record.city, "Castelfranco Veneto");
        assert_eq!(record.temperature, 22);

        session
            .events
            .send(Event::QueryChanged("paris".to_string()))
            .unwrap();
        let app = wait_until(&mut ui, |app| app.show_suggestions).await;
        assert_eq!(app.suggestions[0].display_name(), "Paris, Île-de-France");

        session.events.send(Event::SuggestionChosen(0)).unwrap();
        let app = wait_until(&mut ui, |app| {
            app.weather
                .as_ref()
                .is_some_and(|w| w.city == "Paris, Île-de-France")
        })
        .await;
        assert!(!app.loading);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_no_record_and_clears_loading() {
        let geo = geocoding_server().await;
        let fc = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&fc)
            .await;

        let geocoding = GeocodingClient::with_base_url(geo.uri()).unwrap();
        let forecast = ForecastClient::with_base_url(fc.uri()).unwrap();

        let session = Session::spawn(App::new(), geocoding, forecast, Duration::from_millis(50));
        let mut ui = session.ui.clone();

        // The loading=true snapshot can be coalesced away by the watch
        // channel, so wait only on versions published after Started and
        // check the terminal state directly.
        ui.mark_unchanged();
        session.events.send(Event::Started).unwrap();
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                ui.changed().await.expect("session ended");
                let done = {
                    let app = ui.borrow_and_update();
                    if app.loading {
                        false
                    } else {
                        assert!(app.weather.is_none(), "failed fetch must not produce a record");
                        true
                    }
                };
                if done {
                    break;
                }
            }
        })
        .await
        .expect("timed out waiting for the fetch to fail");
    }
}
