use serde::{Deserialize, Serialize};

use crate::conditions;

/// One candidate place returned by the geocoding service, in the service's
/// own relevance order. The client never re-ranks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSuggestion {
    pub name: String,
    pub country: String,
    /// First-level administrative area (region), when the service knows it.
    pub admin1: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationSuggestion {
    /// Display label used once the suggestion is chosen: `"name, admin1"`
    /// when a region is present, plain `"name"` otherwise.
    pub fn display_name(&self) -> String {
        match &self.admin1 {
            Some(admin1) => format!("{}, {}", self.name, admin1),
            None => self.name.clone(),
        }
    }

    /// Secondary line for suggestion lists: `"admin1, country"`, skipping
    /// whichever parts are absent.
    pub fn detail(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(2);
        if let Some(admin1) = &self.admin1 {
            parts.push(admin1);
        }
        if !self.country.is_empty() {
            parts.push(&self.country);
        }
        parts.join(", ")
    }
}

/// The city whose weather is currently shown. Exactly one is "current" at a
/// time; it changes only through user selection or startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedCity {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl SelectedCity {
    pub fn from_suggestion(suggestion: &LocationSuggestion) -> Self {
        Self {
            name: suggestion.display_name(),
            lat: suggestion.latitude,
            lon: suggestion.longitude,
        }
    }
}

impl Default for SelectedCity {
    fn default() -> Self {
        Self {
            name: "Castelfranco Veneto".to_string(),
            lat: 45.6719,
            lon: 11.9258,
        }
    }
}

/// Display-ready weather for the current city. Replaced wholesale on each
/// successful fetch; a failed fetch leaves the previous record untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub temperature: i32,
    pub weather_code: i32,
    pub max_temp: i32,
    pub min_temp: i32,
    /// City label captured when the fetch that produced this record was
    /// issued, not re-derived from the forecast response.
    pub city: String,
}

impl WeatherRecord {
    pub fn description(&self) -> &'static str {
        conditions::describe(self.weather_code)
    }
}
