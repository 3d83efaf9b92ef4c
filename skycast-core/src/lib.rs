//! Core library for the `skycast` weather lookup.
//!
//! This crate defines:
//! - Domain models (suggestions, selected city, weather record)
//! - HTTP clients for the Open-Meteo geocoding and forecast endpoints
//! - Debounced, cancelable city search
//! - The application state container (reducer + effects)
//! - Time-of-day theme selection and weather-code descriptions
//!
//! It is used by `skycast-cli`, but can also be reused by other front-ends.

pub mod app;
pub mod conditions;
pub mod config;
pub mod error;
pub mod forecast;
pub mod geocode;
pub mod model;
pub mod search;
pub mod theme;

pub use app::{App, Effect, Event};
pub use config::Config;
pub use error::FetchError;
pub use forecast::{ForecastClient, ForecastSnapshot};
pub use geocode::GeocodingClient;
pub use model::{LocationSuggestion, SelectedCity, WeatherRecord};
pub use search::{DebouncedSearch, SearchUpdate};
pub use theme::{Theme, theme_for};
