//! Application state container.
//!
//! `App` owns all mutable UI state (selected city, weather record,
//! suggestion list, loading flag) and is mutated from a single event loop.
//! `update` is a pure-ish reducer: it mutates state and returns the side
//! effects the driver must perform, so the driver stays thin and the state
//! transitions stay testable without any I/O.

use tracing::debug;

use crate::forecast::ForecastSnapshot;
use crate::model::{LocationSuggestion, SelectedCity, WeatherRecord};
use crate::search::{SearchUpdate, should_search};

/// Everything that can happen to the app.
#[derive(Debug, Clone)]
pub enum Event {
    /// App startup: fetch weather for the initial city.
    Started,
    /// The search input text changed (one keystroke).
    QueryChanged(String),
    /// The debounced search produced an update.
    SearchUpdated(SearchUpdate),
    /// The user picked a suggestion by index.
    SuggestionChosen(usize),
    /// A city was selected directly, bypassing the suggestion list.
    CitySelected(SelectedCity),
    /// The search input lost focus; hide the list without clearing it.
    Dismissed,
    /// The input regained focus; re-show existing suggestions, no re-query.
    Refocused,
    /// A weather fetch completed.
    WeatherReady { seq: u64, snapshot: ForecastSnapshot },
    /// A weather fetch failed. The previous record stays on screen.
    WeatherFailed { seq: u64 },
}

/// Side effects requested by the reducer, executed by the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Feed the keystroke to the debounced search.
    Search(String),
    /// Abort any pending debounced lookup.
    CancelSearch,
    /// Fetch the forecast for these coordinates; report back with `seq`.
    FetchWeather {
        seq: u64,
        lat: f64,
        lon: f64,
        city: String,
    },
}

#[derive(Debug, Clone)]
pub struct App {
    pub selected_city: SelectedCity,
    pub weather: Option<WeatherRecord>,
    pub loading: bool,
    pub query: String,
    pub suggestions: Vec<LocationSuggestion>,
    pub show_suggestions: bool,
    /// Sequence number of the most recently issued fetch. Responses carrying
    /// an older number are stale and discarded, so a late reply for a
    /// superseded city can never overwrite a newer selection's result.
    fetch_seq: u64,
}

impl App {
    pub fn new() -> Self {
        Self::with_city(SelectedCity::default())
    }

    pub fn with_city(city: SelectedCity) -> Self {
        Self {
            selected_city: city,
            weather: None,
            loading: false,
            query: String::new(),
            suggestions: Vec::new(),
            show_suggestions: false,
            fetch_seq: 0,
        }
    }

    pub fn update(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Started => self.request_weather(),

            Event::QueryChanged(query) => {
                self.query = query.clone();
                if should_search(&query) {
                    vec![Effect::Search(query)]
                } else {
                    self.suggestions.clear();
                    self.show_suggestions = false;
                    vec![Effect::CancelSearch]
                }
            }

            Event::SearchUpdated(SearchUpdate::Cleared) => {
                self.suggestions.clear();
                self.show_suggestions = false;
                Vec::new()
            }

            Event::SearchUpdated(SearchUpdate::Suggestions(list)) => {
                self.suggestions = list;
                self.show_suggestions = true;
                Vec::new()
            }

            Event::SuggestionChosen(index) => match self.suggestions.get(index) {
                Some(suggestion) => {
                    let city = SelectedCity::from_suggestion(suggestion);
                    self.select_city(city)
                }
                None => Vec::new(),
            },

            Event::CitySelected(city) => self.select_city(city),

            Event::Dismissed => {
                self.show_suggestions = false;
                Vec::new()
            }

            Event::Refocused => {
                if !self.suggestions.is_empty() {
                    self.show_suggestions = true;
                }
                Vec::new()
            }

            Event::WeatherReady { seq, snapshot } => {
                if seq != self.fetch_seq {
                    debug!("discarding stale weather response (seq {seq}, latest {})", self.fetch_seq);
                    return Vec::new();
                }
                // selected_city cannot have changed since this seq was
                // issued: every change bumps fetch_seq.
                self.weather = Some(snapshot.into_record(self.selected_city.name.clone()));
                self.loading = false;
                Vec::new()
            }

            Event::WeatherFailed { seq } => {
                if seq == self.fetch_seq {
                    self.loading = false;
                }
                Vec::new()
            }
        }
    }

    /// Replace the current city, reset the search box, and issue a fetch.
    /// A lookup still pending from the last keystroke is canceled, so it
    /// cannot fire after selection and re-open the list over a cleared
    /// query box. The suggestion list itself is hidden but kept, so
    /// refocusing the input re-shows it without a new query.
    fn select_city(&mut self, city: SelectedCity) -> Vec<Effect> {
        self.selected_city = city;
        self.query.clear();
        self.show_suggestions = false;
        let mut effects = vec![Effect::CancelSearch];
        effects.extend(self.request_weather());
        effects
    }

    fn request_weather(&mut self) -> Vec<Effect> {
        self.loading = true;
        self.fetch_seq += 1;
        vec![Effect::FetchWeather {
            seq: self.fetch_seq,
            lat: self.selected_city.lat,
            lon: self.selected_city.lon,
            city: self.selected_city.name.clone(),
        }]
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
