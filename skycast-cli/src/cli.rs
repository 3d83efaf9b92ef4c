use anyhow::{Context, Result, anyhow, ensure};
use clap::{Parser, Subcommand};
use inquire::Select;

use skycast_core::{Config, ForecastClient, GeocodingClient, SelectedCity, theme};

use crate::interactive;
use crate::render::{AnsiRenderer, PlainRenderer, Render, suggestion_row};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City weather in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for a city, or the default city when omitted.
    Show {
        /// City name to look up (first geocoding match wins).
        city: Option<String>,

        /// Render without ANSI colors.
        #[arg(long)]
        plain: bool,

        /// Print the weather record as JSON instead of a card.
        #[arg(long)]
        json: bool,
    },

    /// List location suggestions for a query, in relevance order.
    Search {
        /// Free-text place name.
        query: String,
    },

    /// Pick a place and save it as the startup default city.
    SetDefault {
        /// City name to search for.
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            None => interactive::run().await,
            Some(Command::Show { city, plain, json }) => show(city, plain, json).await,
            Some(Command::Search { query }) => search(&query).await,
            Some(Command::SetDefault { city }) => set_default(city).await,
        }
    }
}

async fn resolve_city(geocoding: &GeocodingClient, query: &str) -> Result<SelectedCity> {
    let suggestions = geocoding
        .search(query)
        .await
        .with_context(|| format!("Failed to geocode {query:?}"))?;

    let first = suggestions
        .first()
        .ok_or_else(|| anyhow!("No places found for {query:?}"))?;

    Ok(SelectedCity::from_suggestion(first))
}

async fn show(city: Option<String>, plain: bool, json: bool) -> Result<()> {
    let config = Config::load()?;
    let forecast = ForecastClient::new()?;

    let selected = match city {
        Some(query) => {
            let geocoding = GeocodingClient::new()?;
            resolve_city(&geocoding, &query).await?
        }
        None => config.default_city(),
    };

    let snapshot = forecast
        .fetch(selected.lat, selected.lon)
        .await
        .with_context(|| format!("Failed to fetch forecast for {}", selected.name))?;
    let record = snapshot.into_record(selected.name);

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let theme = theme::current_theme();
    let renderer: Box<dyn Render> = if plain {
        Box::new(PlainRenderer)
    } else {
        Box::new(AnsiRenderer)
    };
    println!("{}", renderer.weather(&record, &theme, chrono::Local::now()));

    Ok(())
}

async fn search(query: &str) -> Result<()> {
    let geocoding = GeocodingClient::new()?;
    let suggestions = geocoding
        .search(query)
        .await
        .with_context(|| format!("Failed to geocode {query:?}"))?;

    if suggestions.is_empty() {
        println!("No places found for {query:?}");
        return Ok(());
    }

    for suggestion in &suggestions {
        println!(
            "{}  [{:.4}, {:.4}]",
            suggestion_row(suggestion),
            suggestion.latitude,
            suggestion.longitude
        );
    }

    Ok(())
}

async fn set_default(city: String) -> Result<()> {
    let geocoding = GeocodingClient::new()?;
    let suggestions = geocoding
        .search(&city)
        .await
        .with_context(|| format!("Failed to geocode {city:?}"))?;
    ensure!(!suggestions.is_empty(), "No places found for {city:?}");

    let chosen = if suggestions.len() == 1 {
        &suggestions[0]
    } else {
        let rows: Vec<String> = suggestions.iter().map(suggestion_row).collect();
        let picked = tokio::task::spawn_blocking(move || {
            Select::new("Which place?", rows).raw_prompt()
        })
        .await
        .context("prompt thread panicked")??;
        &suggestions[picked.index]
    };

    let selected = SelectedCity::from_suggestion(chosen);
    let mut config = Config::load()?;
    config.set_default_city(&selected);
    config.save()?;

    println!("Default city set to {}", selected.name);
    Ok(())
}
