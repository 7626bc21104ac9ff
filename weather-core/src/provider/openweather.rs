use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Locale, Offset, Utc};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

use crate::{
    error::{UPSTREAM_FALLBACK, WeatherError},
    model::{CurrentConditions, ForecastDay, Location, Selector, WeatherDescriptor, WeatherSnapshot},
    units::{kelvin_to_celsius, meters_to_km, ms_to_kmh},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// The forecast endpoint returns 3-hour samples, eight per day.
const SAMPLES_PER_DAY: usize = 8;
const FORECAST_DAYS: usize = 5;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        selector: &Selector,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{endpoint}", self.base_url);

        let mut query = selector.upstream_pairs();
        query.push(("appid", self.api_key.clone()));

        let res = self.http.get(&url).query(&query).send().await.map_err(|e| {
            WeatherError::Internal(format!(
                "Failed to send request to OpenWeather ({endpoint}): {e}"
            ))
        })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            WeatherError::Internal(format!(
                "Failed to read OpenWeather {endpoint} response body: {e}"
            ))
        })?;

        if !status.is_success() {
            let message = upstream_message(&body);
            warn!(endpoint, status = status.as_u16(), %message, "OpenWeather request failed");
            return Err(WeatherError::Upstream { status: status.as_u16(), message });
        }

        serde_json::from_str(&body).map_err(|e| {
            WeatherError::Internal(format!("Failed to parse OpenWeather {endpoint} JSON: {e}"))
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self, selector), fields(selector = %selector))]
    async fn snapshot(&self, selector: &Selector) -> Result<WeatherSnapshot, WeatherError> {
        let (current, forecast) = tokio::join!(
            self.fetch::<OwCurrentResponse>("weather", selector),
            self.fetch::<OwForecastResponse>("forecast", selector),
        );

        // A failed current-conditions call wins over anything the forecast returned.
        let current = current?;
        let forecast = forecast?;

        debug!(
            location = %current.name,
            samples = forecast.list.len(),
            "OpenWeather responses received"
        );

        Ok(assemble(current, forecast))
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    #[serde(default)]
    deg: u16,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    coord: OwCoord,
    main: OwMain,
    #[serde(default)]
    visibility: f64,
    wind: OwWind,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp_max: f64,
    temp_min: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    /// Shift from UTC in seconds.
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: Option<OwCity>,
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

fn upstream_message(body: &str) -> String {
    serde_json::from_str::<OwErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| UPSTREAM_FALLBACK.to_string())
}

fn descriptor(weather: &[OwWeather]) -> WeatherDescriptor {
    weather
        .first()
        .map(|w| WeatherDescriptor {
            main: w.main.clone(),
            description: w.description.clone(),
            icon: w.icon.clone(),
        })
        .unwrap_or_default()
}

fn assemble(current: OwCurrentResponse, forecast: OwForecastResponse) -> WeatherSnapshot {
    let utc_offset = forecast.city.as_ref().map_or(0, |c| c.timezone);

    WeatherSnapshot {
        location: Location {
            name: current.name,
            country: current.sys.country,
            lat: current.coord.lat,
            lon: current.coord.lon,
        },
        current: CurrentConditions {
            temp: kelvin_to_celsius(current.main.temp),
            feels_like: kelvin_to_celsius(current.main.feels_like),
            humidity: current.main.humidity,
            pressure: current.main.pressure,
            visibility: meters_to_km(current.visibility),
            wind_speed: ms_to_kmh(current.wind.speed),
            wind_deg: current.wind.deg,
            weather: descriptor(&current.weather),
        },
        forecast: forecast_days(&forecast.list, utc_offset),
    }
}

/// One sample per day: indices 0, 8, 16, 24, 32 of the 3-hour series.
///
/// Assumes the upstream series starts aligned and keeps 3-hour spacing.
fn forecast_days(list: &[OwForecastEntry], utc_offset: i32) -> Vec<ForecastDay> {
    list.iter()
        .step_by(SAMPLES_PER_DAY)
        .take(FORECAST_DAYS)
        .map(|entry| ForecastDay {
            date: weekday_label(entry.dt, utc_offset),
            temp_max: kelvin_to_celsius(entry.main.temp_max),
            temp_min: kelvin_to_celsius(entry.main.temp_min),
            weather: descriptor(&entry.weather),
        })
        .collect()
}

/// Spanish weekday name for a unix timestamp, in the location's offset.
fn weekday_label(timestamp: i64, utc_offset: i32) -> String {
    let offset = FixedOffset::east_opt(utc_offset).unwrap_or_else(|| Utc.fix());

    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.with_timezone(&offset).format_localized("%A", Locale::es_ES).to_string())
        .unwrap_or_default()
}
