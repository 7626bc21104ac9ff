//! Core library for the weather map dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather upstream provider and snapshot assembly
//! - Shared domain models (selectors, snapshots, forecast days)
//! - Unit converters and icon/description lookup tables
//! - The client-side data hook that front ends drive
//!
//! It is used by `weather-server` and `weather-cli`.

pub mod config;
pub mod error;
pub mod hook;
pub mod lookup;
pub mod markers;
pub mod model;
pub mod provider;
pub mod units;

pub use config::{Config, ProviderConfig};
pub use error::WeatherError;
pub use hook::{FetchError, HookState, Phase, WeatherClient, WeatherHook};
pub use markers::{MARKERS, Marker, find_marker};
pub use model::{
    CurrentConditions, ForecastDay, Location, LocationQuery, Selector, WeatherDescriptor,
    WeatherSnapshot,
};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
