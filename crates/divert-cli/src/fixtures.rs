//! SYNTHETIC demo data.
//!
//! Airport figures are approximations for demonstrations and tests only.
//! Nothing here is used unless explicitly requested with `--demo`.

use divert_core::{AirportCandidate, FlightState, RouteEndpoint, WeatherSnapshot};

fn airport(
    icao: &str,
    iata: &str,
    name: &str,
    (lat, lon): (f64, f64),
    runway_length_ft: u32,
    fire_category: u8,
    families: &[&str],
    weather: Option<(u32, f64)>,
) -> AirportCandidate {
    AirportCandidate {
        icao: icao.to_string(),
        iata: Some(iata.to_string()),
        name: format!("{} [synthetic]", name),
        lat,
        lon,
        runway_length_ft: Some(runway_length_ft),
        fire_category: Some(fire_category),
        maintenance_capability: families.iter().map(|f| f.to_string()).collect(),
        weather: weather.map(|(ceiling_ft, visibility_nm)| WeatherSnapshot {
            ceiling_ft: Some(ceiling_ft),
            visibility_nm: Some(visibility_nm),
            observed_at: None,
        }),
    }
}

/// North Atlantic alternates for the demo flight.
pub fn demo_airports() -> Vec<AirportCandidate> {
    vec![
        airport("EINN", "SNN", "Shannon", (52.7020, -8.9248), 10_495, 9, &["A330", "B737", "B777"], Some((1_800, 6.0))),
        airport("EIDW", "DUB", "Dublin", (53.4213, -6.2701), 10_200, 9, &["A320", "A330", "B737"], Some((1_200, 5.0))),
        airport("BIKF", "KEF", "Keflavik", (63.9850, -22.6056), 10_056, 9, &["B757", "B767"], Some((900, 3.0))),
        airport("LPLA", "TER", "Lajes", (38.7618, -27.0908), 10_866, 8, &[], None),
        airport("CYYT", "YYT", "St. John's", (47.6186, -52.7519), 8_502, 9, &["A320"], Some((400, 1.5))),
        airport("CYQX", "YQX", "Gander", (48.9369, -54.5681), 10_200, 9, &["A330", "B777"], Some((150, 0.25))),
        airport("BGSF", "SFJ", "Kangerlussuaq", (67.0122, -50.7116), 9_219, 7, &[], Some((3_000, 10.0))),
    ]
}

/// A330-300 London to New York, roughly 40% along the route.
pub fn demo_flight() -> FlightState {
    FlightState {
        aircraft_type: "A330-300".to_string(),
        origin: RouteEndpoint {
            code: "EGLL".to_string(),
            lat: 51.4700,
            lon: -0.4543,
        },
        destination: RouteEndpoint {
            code: "KJFK".to_string(),
            lat: 40.6413,
            lon: -73.7781,
        },
        position_nm_from_origin: 1_200.0,
        altitude_ft: 37_000,
        fuel_remaining_kg: Some(58_000.0),
        current_position: None,
        secondary_failures: Vec::new(),
    }
}
