use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{INCOMPLETE_COORDINATES, MISSING_LOCATION, WeatherError};

/// Category, free text and icon code of one upstream weather entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherDescriptor {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

/// Current conditions in display units: °C, hPa, km, km/h.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp: i64,
    pub feels_like: i64,
    pub humidity: u8,
    pub pressure: u32,
    pub visibility: i64,
    pub wind_speed: i64,
    pub wind_deg: u16,
    pub weather: WeatherDescriptor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Weekday name, e.g. `lunes`.
    pub date: String,
    pub temp_max: i64,
    pub temp_min: i64,
    pub weather: WeatherDescriptor,
}

/// Current conditions plus daily forecast for one resolved location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
}

/// Raw location input as it arrives from a query string or a UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub city: Option<String>,
}

impl LocationQuery {
    pub fn city(name: impl Into<String>) -> Self {
        Self { city: Some(name.into()), ..Self::default() }
    }

    pub fn coordinates(lat: f64, lon: f64) -> Self {
        Self { lat: Some(lat), lon: Some(lon), city: None }
    }

    fn city_name(&self) -> Option<&str> {
        self.city.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }

    /// True when neither coordinates nor a city name are present.
    pub fn is_empty(&self) -> bool {
        self.lat.is_none() && self.lon.is_none() && self.city_name().is_none()
    }

    /// Resolve to a selector. A city name wins over coordinates.
    pub fn selector(&self) -> Result<Selector, WeatherError> {
        if let Some(city) = self.city_name() {
            return Ok(Selector::City(city.to_owned()));
        }

        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Ok(Selector::Coordinates { lat, lon }),
            (None, None) => Err(WeatherError::BadRequest(MISSING_LOCATION.to_string())),
            _ => Err(WeatherError::BadRequest(INCOMPLETE_COORDINATES.to_string())),
        }
    }
}

/// How a location is resolved with the upstream provider.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    City(String),
    Coordinates { lat: f64, lon: f64 },
}

impl Selector {
    /// Query pairs for the OpenWeather endpoints. Both the current and the
    /// forecast call use these, so they resolve the same place.
    pub fn upstream_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::City(name) => vec![("q", name.clone())],
            Self::Coordinates { lat, lon } => vec![("lat", lat.to_string()), ("lon", lon.to_string())],
        }
    }

    /// Query pairs for the `/api/weather` proxy route.
    pub fn proxy_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::City(name) => vec![("city", name.clone())],
            Self::Coordinates { lat, lon } => vec![("lat", lat.to_string()), ("lon", lon.to_string())],
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::City(name) => f.write_str(name),
            Self::Coordinates { lat, lon } => write!(f, "{lat},{lon}"),
        }
    }
}
