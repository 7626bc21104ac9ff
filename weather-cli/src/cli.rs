use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use weather_core::{
    Config, LocationQuery, MARKERS, Phase, WeatherClient, WeatherHook, find_marker,
};

use crate::panel;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather map dashboard CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and the map token.
    Configure,

    /// List the cities pinned on the map.
    Markers,

    /// Show current weather and the 5-day forecast.
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// City name, e.g. "Madrid".
    #[arg(long, conflicts_with = "marker")]
    pub city: Option<String>,

    #[arg(long, allow_negative_numbers = true, requires = "lon")]
    pub lat: Option<f64>,

    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub lon: Option<f64>,

    /// One of the map markers; looked up by its coordinates.
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub marker: Option<String>,

    /// Base URL of the weather server; overrides the configured one.
    #[arg(long)]
    pub api: Option<String>,
}

impl ShowArgs {
    fn query(&self) -> anyhow::Result<LocationQuery> {
        if let Some(name) = &self.marker {
            let marker = find_marker(name)
                .ok_or_else(|| anyhow!("Unknown marker '{name}'. Run `weather markers` to list them."))?;
            return Ok(marker.query());
        }

        let query = LocationQuery { lat: self.lat, lon: self.lon, city: self.city.clone() };
        if query.is_empty() {
            return Err(anyhow!("Give a location: --city, --lat/--lon or --marker."));
        }
        Ok(query)
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Markers => {
                print!("{}", panel::render_markers(&MARKERS));
                Ok(())
            }
            Command::Show(args) => show(args).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load().context("Failed to load existing configuration")?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let token = Text::new("Map access token (optional):")
        .prompt_skippable()
        .context("Failed to read map token")?
        .filter(|t| !t.trim().is_empty());

    config.upsert_api_key(api_key.trim().to_string());
    if token.is_some() {
        config.map.access_token = token;
    }
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(args: ShowArgs) -> anyhow::Result<()> {
    let query = args.query()?;

    let base_url = match args.api {
        Some(url) => url,
        None => Config::load().context("Failed to load configuration")?.client.base_url,
    };

    let mut hook = WeatherHook::new(WeatherClient::new(base_url));
    hook.set_selector(query);
    let state = hook.settled().await;

    match (state.phase, state.data(), state.error()) {
        (Phase::Success, Some(snapshot), _) => {
            print!("{}", panel::render_snapshot(snapshot));
            Ok(())
        }
        (_, _, Some(message)) => {
            eprint!("{}", panel::render_error(message));
            Err(anyhow!("weather lookup failed"))
        }
        _ => Err(anyhow!("weather lookup did not complete")),
    }
}
