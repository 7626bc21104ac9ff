use thiserror::Error;

/// Message returned when a request names no location at all.
pub const MISSING_LOCATION: &str = "Se requieren coordenadas (lat, lon) o nombre de ciudad";
/// Message returned when only one half of a coordinate pair is given.
pub const INCOMPLETE_COORDINATES: &str = "Se requieren ambas coordenadas (lat, lon)";
/// Message returned when the OpenWeather credential is absent.
pub const MISSING_API_KEY: &str = "API key de OpenWeather no configurada";
/// Message used when the upstream error body carries no `message` field.
pub const UPSTREAM_FALLBACK: &str = "Error al obtener datos del clima";
/// Message returned for every internal failure; the detail stays in the logs.
pub const INTERNAL_ERROR: &str = "Error interno del servidor";

/// Failures of a weather lookup, each mapping to one HTTP status.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The request did not carry a usable location selector.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The server has no OpenWeather credential.
    #[error("OpenWeather API key is not configured")]
    ServerMisconfigured,

    /// OpenWeather answered with a non-success status.
    #[error("upstream returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl WeatherError {
    /// HTTP status this error is reported with.
    ///
    /// Upstream statuses are forwarded when they are error codes; anything else
    /// (a redirect that was not followed, say) is reported as 502.
    pub fn status(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::ServerMisconfigured | Self::Internal(_) => 500,
            Self::Upstream { status, .. } if (400..=599).contains(status) => *status,
            Self::Upstream { .. } => 502,
        }
    }

    /// Text safe to show to a client.
    pub fn public_message(&self) -> String {
        match self {
            Self::BadRequest(msg) => msg.clone(),
            Self::ServerMisconfigured => MISSING_API_KEY.to_string(),
            Self::Upstream { message, .. } => message.clone(),
            Self::Internal(_) => INTERNAL_ERROR.to_string(),
        }
    }
}
