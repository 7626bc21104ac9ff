//! Text rendering of the info panel.

use chrono::Local;
use weather_core::{
    Marker, WeatherSnapshot,
    lookup::{describe_main, weather_icon},
};

pub fn render_snapshot(snapshot: &WeatherSnapshot) -> String {
    let loc = &snapshot.location;
    let now = &snapshot.current;

    let mut lines = vec![
        format!("📍 {}, {}  ({:.4}, {:.4})", loc.name, loc.country, loc.lat, loc.lon),
        format!(
            "{} {}°C  {} ({})",
            weather_icon(&now.weather.icon),
            now.temp,
            describe_main(&now.weather.main),
            now.weather.description,
        ),
        format!("   Sensación térmica: {}°C", now.feels_like),
        format!("   Humedad:           {}%", now.humidity),
        format!("   Presión:           {} hPa", now.pressure),
        format!("   Visibilidad:       {} km", now.visibility),
        format!("   Viento:            {} km/h, {}°", now.wind_speed, now.wind_deg),
    ];

    if !snapshot.forecast.is_empty() {
        lines.push(String::new());
        lines.push(format!("Pronóstico de {} días", snapshot.forecast.len()));
        lines.extend(snapshot.forecast.iter().map(|day| {
            format!(
                "   {:<10} {} {:>3}° / {:>3}°  {}",
                day.date,
                weather_icon(&day.weather.icon),
                day.temp_max,
                day.temp_min,
                describe_main(&day.weather.main),
            )
        }));
    }

    lines.push(String::new());
    lines.push(format!("Actualizado: {}", Local::now().format("%H:%M")));
    finish(lines)
}

pub fn render_error(message: &str) -> String {
    format!("⚠️  Error al cargar el clima\n   {message}\n")
}

pub fn render_markers(markers: &[Marker]) -> String {
    finish(
        markers
            .iter()
            .map(|m| format!("{:<14} {:<16} {:>9.4} {:>10.4}", m.name, m.country, m.lat, m.lon))
            .collect(),
    )
}

/// Joins lines, each terminated by a newline.
fn finish(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}
