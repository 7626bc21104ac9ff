//! JSON error responses.
//!
//! Every failure leaves the server as `{"error": "..."}` with the status
//! [`WeatherError::status`] picks. Internal details are logged, never returned.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;
use weather_core::WeatherError;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Wrapper so core errors can be returned from handlers.
#[derive(Debug)]
pub struct ApiError(pub WeatherError);

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let WeatherError::Internal(detail) = &self.0 {
            error!(%detail, "weather lookup failed");
        }

        let status =
            StatusCode::from_u16(self.0.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse { error: self.0.public_message() };

        (status, Json(body)).into_response()
    }
}
