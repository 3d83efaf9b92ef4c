//! Interactive city search: an autocomplete prompt wired to the session
//! event loop. Each keystroke becomes a `QueryChanged` event; the prompt
//! renders whatever suggestion snapshot the debounced search has produced
//! so far.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use inquire::autocompletion::{Autocomplete, Replacement};
use inquire::{CustomUserError, InquireError, Text};
use tokio::sync::{mpsc, watch};

use skycast_core::{
    App, Config, Event, ForecastClient, GeocodingClient, SelectedCity, WeatherRecord, theme,
};

use crate::render::{AnsiRenderer, Render, suggestion_row};
use crate::session::Session;

const FORECAST_WAIT: Duration = Duration::from_secs(15);

#[derive(Clone)]
struct CityAutocomplete {
    events: mpsc::UnboundedSender<Event>,
    ui: watch::Receiver<App>,
}

impl Autocomplete for CityAutocomplete {
    // inquire only calls this hook on a keypress, so results that land
    // after the debounce show up one keystroke late. Blocking here until
    // they arrive would stall every keypress for the debounce window, so
    // the prompt text tells the user to press a key instead.
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        let _ = self.events.send(Event::QueryChanged(input.to_string()));

        let app = self.ui.borrow();
        if !app.show_suggestions {
            return Ok(Vec::new());
        }
        Ok(app.suggestions.iter().map(suggestion_row).collect())
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        Ok(highlighted_suggestion)
    }
}

pub async fn run() -> Result<()> {
    let config = Config::load()?;
    let geocoding = GeocodingClient::new()?;
    let forecast = ForecastClient::new()?;

    let session = Session::spawn(
        App::with_city(config.default_city()),
        geocoding.clone(),
        forecast,
        config.debounce(),
    );
    let _ = session.events.send(Event::Started);

    let autocomplete = CityAutocomplete {
        events: session.events.clone(),
        ui: session.ui.clone(),
    };
    let prompt = tokio::task::spawn_blocking(move || {
        Text::new("Search for a city:")
            .with_autocomplete(autocomplete)
            .with_placeholder("start typing, pause, then press any key for suggestions")
            .with_help_message("suggestions refresh on the next keypress; pick one, or leave empty for the default city")
            .prompt()
    })
    .await
    .context("prompt thread panicked")?;

    let submitted = match prompt {
        Ok(text) => text,
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    // Map the submitted text back to the suggestion it came from. Free text
    // that matches no suggestion falls back to a direct geocode lookup.
    let chosen_index = {
        let app = session.ui.borrow();
        app.suggestions
            .iter()
            .position(|s| suggestion_row(s) == submitted)
    };

    match chosen_index {
        Some(index) => {
            let _ = session.events.send(Event::SuggestionChosen(index));
        }
        None if !submitted.trim().is_empty() => {
            let query = submitted.trim();
            let suggestions = geocoding
                .search(query)
                .await
                .with_context(|| format!("Failed to geocode {query:?}"))?;
            match suggestions.first() {
                Some(s) => {
                    let _ = session
                        .events
                        .send(Event::CitySelected(SelectedCity::from_suggestion(s)));
                }
                None => {
                    let fallback = session.ui.borrow().selected_city.name.clone();
                    println!("No places found for {query:?}; showing {fallback}");
                }
            }
        }
        // Empty input keeps the startup city.
        None => {}
    }

    let record = wait_for_weather(session.ui.clone()).await?;
    let theme = theme::current_theme();
    println!("{}", AnsiRenderer.weather(&record, &theme, chrono::Local::now()));

    Ok(())
}

/// Wait until the record matching the current selection has landed. A fetch
/// failure keeps any previous record, so this times out instead of showing
/// the wrong city.
async fn wait_for_weather(mut ui: watch::Receiver<App>) -> Result<WeatherRecord> {
    tokio::time::timeout(FORECAST_WAIT, async {
        loop {
            let ready = {
                let app = ui.borrow_and_update();
                if app.loading {
                    None
                } else {
                    app.weather
                        .as_ref()
                        .filter(|w| w.city == app.selected_city.name)
                        .cloned()
                }
            };
            if let Some(record) = ready {
                return Ok(record);
            }
            ui.changed()
                .await
                .map_err(|_| anyhow!("session ended before the forecast arrived"))?;
        }
    })
    .await
    .context("timed out waiting for the forecast")?
}
