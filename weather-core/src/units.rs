//! Conversions from the upstream's SI units to what the dashboard shows.
//!
//! Every result is rounded half away from zero to a whole number.

const KELVIN_OFFSET: f64 = 273.15;

/// Kelvin to whole degrees Celsius.
pub fn kelvin_to_celsius(kelvin: f64) -> i64 {
    (kelvin - KELVIN_OFFSET).round() as i64
}

/// Metres per second to whole kilometres per hour.
pub fn ms_to_kmh(ms: f64) -> i64 {
    (ms * 3.6).round() as i64
}

/// Metres to whole kilometres.
pub fn meters_to_km(meters: f64) -> i64 {
    (meters / 1000.0).round() as i64
}
