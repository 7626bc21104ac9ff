//! HTTP surface of the weather map dashboard.
//!
//! Exposes `GET /api/weather`, which proxies OpenWeather and returns one
//! normalized snapshot, plus a `GET /health` liveness check.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use routes::create_router;
pub use state::AppState;
