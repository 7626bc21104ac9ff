//! Static tables turning OpenWeather codes into something a person reads.

/// Glyph shown when an icon code is not in the table.
pub const FALLBACK_ICON: &str = "🌤️";

/// Glyph for an OpenWeather icon code such as `01d` or `10n`.
pub fn weather_icon(code: &str) -> &'static str {
    match code {
        "01d" => "☀️",
        "01n" => "🌙",
        "02d" => "⛅",
        "02n" | "03d" | "03n" | "04d" | "04n" => "☁️",
        "09d" | "09n" | "10n" => "🌧️",
        "10d" => "🌦️",
        "11d" | "11n" => "⛈️",
        "13d" | "13n" => "❄️",
        "50d" | "50n" => "🌫️",
        _ => FALLBACK_ICON,
    }
}

/// Spanish label for a weather-main category. Unknown categories come back unchanged.
pub fn describe_main(main: &str) -> &str {
    match main {
        "Clear" => "Despejado",
        "Clouds" => "Nublado",
        "Rain" => "Lluvia",
        "Drizzle" => "Llovizna",
        "Thunderstorm" => "Tormenta",
        "Snow" => "Nieve",
        "Mist" => "Neblina",
        "Fog" => "Niebla",
        "Haze" => "Bruma",
        "Dust" => "Polvo",
        "Sand" => "Arena",
        "Ash" => "Ceniza",
        "Squall" => "Chubasco",
        "Tornado" => "Tornado",
        other => other,
    }
}
