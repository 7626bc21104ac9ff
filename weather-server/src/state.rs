use std::sync::Arc;

use tracing::warn;
use weather_core::{
    Config, WeatherProvider,
    config::API_KEY_ENV,
    provider::provider_from_config,
};

/// Shared handler state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// `None` when no OpenWeather key is configured; lookups then answer 500.
    pub provider: Option<Arc<dyn WeatherProvider>>,
}

impl AppState {
    pub fn with_provider(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider: Some(provider) }
    }

    pub fn from_config(config: &Config) -> Self {
        match provider_from_config(config) {
            Ok(provider) => Self { provider: Some(Arc::from(provider)) },
            Err(_) => {
                warn!("{API_KEY_ENV} is not set; /api/weather will answer 500");
                Self::default()
            }
        }
    }
}
