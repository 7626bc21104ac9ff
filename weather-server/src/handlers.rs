use std::any::Any;

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, instrument};
use weather_core::{LocationQuery, WeatherError, WeatherSnapshot, error::MISSING_LOCATION};

use crate::{error::ApiError, state::AppState};

/// Raw query string of `/api/weather`. Coordinates arrive as text so a
/// malformed number becomes a JSON 400 rather than a plain-text rejection.
#[derive(Debug, Default, Deserialize)]
pub struct WeatherParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub city: Option<String>,
}

impl WeatherParams {
    /// True when no location parameter carries any text.
    pub fn is_empty(&self) -> bool {
        [&self.lat, &self.lon, &self.city]
            .into_iter()
            .all(|v| v.as_deref().is_none_or(|v| v.trim().is_empty()))
    }

    pub fn into_query(self) -> Result<LocationQuery, WeatherError> {
        Ok(LocationQuery {
            lat: parse_coordinate("lat", self.lat)?,
            lon: parse_coordinate("lon", self.lon)?,
            city: self.city,
        })
    }
}

fn parse_coordinate(name: &str, raw: Option<String>) -> Result<Option<f64>, WeatherError> {
    let Some(raw) = raw.filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };

    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| WeatherError::BadRequest(format!("Coordenada inválida para {name}: {raw}")))
}

/// Current conditions and 5-day forecast for a city or a coordinate pair.
///
/// GET /api/weather?city=<name> | ?lat=<num>&lon=<num>
#[instrument(skip(state))]
pub async fn get_weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherParams>,
) -> Result<Json<WeatherSnapshot>, ApiError> {
    if params.is_empty() {
        return Err(WeatherError::BadRequest(MISSING_LOCATION.to_string()).into());
    }

    let provider = state.provider.as_ref().ok_or(WeatherError::ServerMisconfigured)?;

    let selector = params.into_query()?.selector()?;

    let snapshot = provider.snapshot(&selector).await?;

    info!(
        location = %snapshot.location.name,
        country = %snapshot.location.country,
        forecast_days = snapshot.forecast.len(),
        "weather snapshot served"
    );

    Ok(Json(snapshot))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

/// Turns a handler panic into the generic internal error body.
pub fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    ApiError(WeatherError::Internal("handler panicked".to_string())).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(lat: Option<&str>, lon: Option<&str>, city: Option<&str>) -> WeatherParams {
        WeatherParams {
            lat: lat.map(String::from),
            lon: lon.map(String::from),
            city: city.map(String::from),
        }
    }

    #[test]
    fn parses_coordinates() {
        let query = params(Some("40.4168"), Some(" -3.7038"), None).into_query().unwrap();
        assert_eq!(query.lat, Some(40.4168));
        assert_eq!(query.lon, Some(-3.7038));
    }

    #[test]
    fn blank_coordinates_are_absent() {
        let query = params(Some(""), Some("  "), Some("Madrid")).into_query().unwrap();
        assert!(query.lat.is_none());
        assert!(query.lon.is_none());
    }

    #[test]
    fn empty_only_without_any_location_text() {
        assert!(params(None, None, None).is_empty());
        assert!(params(Some(" "), Some(""), Some("  ")).is_empty());
        assert!(!params(Some("40.4"), None, None).is_empty());
        assert!(!params(Some("abc"), None, None).is_empty());
        assert!(!params(None, None, Some("Madrid")).is_empty());
    }

    #[test]
    fn garbage_coordinates_are_bad_requests() {
        for bad in ["abc", "NaN", "inf"] {
            let err = params(Some(bad), Some("1"), None).into_query().unwrap_err();
            assert_eq!(err.status(), 400);
        }
    }
}
