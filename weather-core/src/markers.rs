//! Cities pinned on the map when the dashboard opens.

use crate::model::LocationQuery;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub name: &'static str,
    pub country: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl Marker {
    /// Clicking a marker looks the city up by its coordinates.
    pub fn query(&self) -> LocationQuery {
        LocationQuery::coordinates(self.lat, self.lon)
    }
}

pub static MARKERS: [Marker; 10] = [
    Marker { name: "Madrid", country: "España", lat: 40.4168, lon: -3.7038 },
    Marker { name: "Buenos Aires", country: "Argentina", lat: -34.6118, lon: -58.396 },
    Marker { name: "Tokyo", country: "Japón", lat: 35.6762, lon: 139.6503 },
    Marker { name: "New York", country: "Estados Unidos", lat: 40.7128, lon: -74.006 },
    Marker { name: "London", country: "Reino Unido", lat: 51.5074, lon: -0.1278 },
    Marker { name: "Paris", country: "Francia", lat: 48.8566, lon: 2.3522 },
    Marker { name: "Sydney", country: "Australia", lat: -33.8688, lon: 151.2093 },
    Marker { name: "São Paulo", country: "Brasil", lat: -23.5505, lon: -46.6333 },
    Marker { name: "Mumbai", country: "India", lat: 19.076, lon: 72.8777 },
    Marker { name: "Cairo", country: "Egipto", lat: 30.0444, lon: 31.2357 },
];

/// Case-insensitive lookup by city name.
pub fn find_marker(name: &str) -> Option<&'static Marker> {
    let wanted = name.trim().to_lowercase();
    MARKERS.iter().find(|m| m.name.to_lowercase() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_markers_ignoring_case() {
        assert_eq!(find_marker("madrid").unwrap().country, "España");
        assert_eq!(find_marker(" SÃO PAULO ").unwrap().name, "São Paulo");
        assert!(find_marker("Atlantis").is_none());
    }

    #[test]
    fn marker_query_uses_coordinates() {
        let query = find_marker("Tokyo").unwrap().query();
        assert_eq!(query.lat, Some(35.6762));
        assert_eq!(query.lon, Some(139.6503));
        assert!(query.city.is_none());
    }
}
