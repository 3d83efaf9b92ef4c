use chrono::{DateTime, Local};

use skycast_core::{Theme, WeatherRecord};

use super::{Render, date_line};

/// No-escape rendering for pipes and dumb terminals.
pub struct PlainRenderer;

impl Render for PlainRenderer {
    fn weather(&self, record: &WeatherRecord, _theme: &Theme, now: DateTime<Local>) -> String {
        format!(
            "{}\n{}\n\n{}°  {}\nH {}° / L {}°",
            record.city,
            date_line(now),
            record.temperature,
            record.description(),
            record.max_temp,
            record.min_temp,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_core::theme;

    #[test]
    fn card_contains_all_fields() {
        let record = WeatherRecord {
            temperature: 16,
            weather_code: 0,
            max_temp: 21,
            min_temp: 9,
            city: "Paris, Île-de-France".to_string(),
        };
        let out = PlainRenderer.weather(&record, &theme::theme_for(12), Local::now());

        assert!(out.contains("Paris, Île-de-France"));
        assert!(out.contains("16°  Clear Sky"));
        assert!(out.contains("H 21° / L 9°"));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn unknown_code_renders_fallback_label() {
        let record = WeatherRecord {
            temperature: 20,
            weather_code: 42,
            max_temp: 25,
            min_temp: 15,
            city: "Somewhere".to_string(),
        };
        let out = PlainRenderer.weather(&record, &theme::theme_for(12), Local::now());
        assert!(out.contains("Sunny"));
    }
}
