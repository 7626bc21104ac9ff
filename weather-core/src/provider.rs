use crate::{
    Config, Selector, WeatherSnapshot, error::WeatherError,
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of combined current + forecast data for one selector.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn snapshot(&self, selector: &Selector) -> Result<WeatherSnapshot, WeatherError>;
}

/// Construct the OpenWeather provider from config.
///
/// Fails with [`WeatherError::ServerMisconfigured`] when no API key is set.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, WeatherError> {
    let provider = config
        .openweather
        .as_ref()
        .filter(|p| !p.api_key.is_empty())
        .ok_or(WeatherError::ServerMisconfigured)?;

    Ok(Box::new(OpenWeatherProvider::with_base_url(
        provider.api_key.clone(),
        provider.base_url.clone(),
    )))
}
