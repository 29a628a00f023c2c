//! Deterministic stand-in for the delay classifier.
//!
//! The score is built from the same features the production model uses
//! (route distance, departure hour and weekday, carrier) so that the demo
//! exercises all three forecast bands. It is not a model.

use chrono::{Datelike, Timelike, Weekday};
use flightontime_models::{AirportRef, CarrierRef, PredictionRequest, PredictionResponse};
use serde_json::json;

/// Below this the flight is on time.
pub const ON_TIME_BELOW: f64 = 0.35;
/// Below this (and at least [`ON_TIME_BELOW`]) the flight is flagged.
pub const ALERT_BELOW: f64 = 0.70;

struct Airport {
    code: &'static str,
    name: &'static str,
    lat: f64,
    lon: f64,
}

const AIRPORTS: &[Airport] = &[
    Airport { code: "GRU", name: "Guarulhos - Governador André Franco Montoro", lat: -23.4356, lon: -46.4731 },
    Airport { code: "CGH", name: "São Paulo - Congonhas", lat: -23.6261, lon: -46.6564 },
    Airport { code: "VCP", name: "Campinas - Viracopos", lat: -23.0074, lon: -47.1345 },
    Airport { code: "GIG", name: "Rio de Janeiro - Galeão", lat: -22.8099, lon: -43.2506 },
    Airport { code: "SDU", name: "Rio de Janeiro - Santos Dumont", lat: -22.9105, lon: -43.1631 },
    Airport { code: "BSB", name: "Brasília - Presidente Juscelino Kubitschek", lat: -15.8711, lon: -47.9186 },
    Airport { code: "CNF", name: "Belo Horizonte - Confins", lat: -19.6244, lon: -43.9719 },
    Airport { code: "POA", name: "Porto Alegre - Salgado Filho", lat: -29.9939, lon: -51.1711 },
    Airport { code: "REC", name: "Recife - Guararapes", lat: -8.1265, lon: -34.9236 },
    Airport { code: "SSA", name: "Salvador - Deputado Luís Eduardo Magalhães", lat: -12.9086, lon: -38.3225 },
    Airport { code: "FOR", name: "Fortaleza - Pinto Martins", lat: -3.7763, lon: -38.5326 },
    Airport { code: "CWB", name: "Curitiba - Afonso Pena", lat: -25.5285, lon: -49.1758 },
];

const CARRIERS: &[(&str, f64)] = &[
    ("LATAM", 0.05),
    ("GOL", 0.10),
    ("AZUL", 0.00),
    ("VOEPASS", 0.20),
];

/// Airports served by `GET /airports`.
pub fn airports() -> Vec<AirportRef> {
    AIRPORTS.iter().map(|a| AirportRef::new(a.code, a.name)).collect()
}

/// Carriers served by `GET /airlines`.
pub fn carriers() -> Vec<CarrierRef> {
    CARRIERS.iter().map(|(name, _)| CarrierRef::new(*name)).collect()
}

fn airport(code: &str) -> Option<&'static Airport> {
    AIRPORTS.iter().find(|a| a.code == code)
}

/// Great-circle distance in kilometres.
fn haversine_km(from: &Airport, to: &Airport) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;
    let (phi1, phi2) = (from.lat.to_radians(), to.lat.to_radians());
    let dphi = (to.lat - from.lat).to_radians();
    let dlambda = (to.lon - from.lon).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    EARTH_RADIUS_KM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Label and color hint for a probability.
pub fn forecast(probability: f64) -> (&'static str, &'static str) {
    if probability < ON_TIME_BELOW {
        ("🟢 PONTUAL", "green")
    } else if probability < ALERT_BELOW {
        ("🟡 ALERTA", "yellow")
    } else {
        ("🔴 ATRASO PROVÁVEL", "red")
    }
}

pub fn predict(request: &PredictionRequest) -> PredictionResponse {
    // Departures are scored on Brasília wall-clock time.
    let local = request.departure_utc - chrono::Duration::hours(3);
    let hour = local.hour();
    let weekday = local.weekday();

    let distance_km = match (airport(request.origin.as_str()), airport(request.destination.as_str())) {
        (Some(from), Some(to)) => Some(haversine_km(from, to)),
        _ => None,
    };

    let hour_score = match hour {
        0..=5 => 0.05,
        6..=11 => 0.15,
        12..=16 => 0.25,
        _ => 0.40,
    };
    let weekday_score = match weekday {
        Weekday::Fri | Weekday::Sun => 0.15,
        _ => 0.0,
    };
    let carrier_score = CARRIERS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(&request.carrier))
        .map_or(0.15, |(_, score)| *score);
    // Short hops at congested airports are the worst offenders.
    let distance_score = distance_km.map_or(0.10, |km| if km < 500.0 { 0.15 } else { 0.05 });

    let probability = (0.05 + hour_score + weekday_score + carrier_score + distance_score).min(0.99);
    let probability = (probability * 10_000.0).round() / 10_000.0;
    let (label, color) = forecast(probability);

    PredictionResponse {
        forecast_label: label.to_string(),
        probability,
        color_hint: color.to_string(),
        details: json!({
            "distancia_km": distance_km.map(|km| km.round()),
            "hora": hour,
            "dia_semana": weekday.num_days_from_monday(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use flightontime_models::IataCode;

    fn request(carrier: &str, origin: &str, destination: &str, utc_hour: u32) -> PredictionRequest {
        PredictionRequest {
            carrier: carrier.into(),
            origin: IataCode::parse(origin).unwrap(),
            destination: IataCode::parse(destination).unwrap(),
            // 2025-03-12 is a Wednesday.
            departure_utc: Utc.with_ymd_and_hms(2025, 3, 12, utc_hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn bands_follow_thresholds() {
        assert_eq!(forecast(0.0).1, "green");
        assert_eq!(forecast(0.3499).1, "green");
        assert_eq!(forecast(0.35).1, "yellow");
        assert_eq!(forecast(0.6999).1, "yellow");
        assert_eq!(forecast(0.70), ("🔴 ATRASO PROVÁVEL", "red"));
    }

    #[test]
    fn same_input_same_answer() {
        let r = request("LATAM", "GRU", "GIG", 21);
        assert_eq!(predict(&r), predict(&r));
    }

    #[test]
    fn early_long_haul_is_on_time() {
        // 04:00 local, GRU-REC is > 2000 km.
        let response = predict(&request("AZUL", "GRU", "REC", 7));
        assert!(response.probability < ON_TIME_BELOW, "{}", response.probability);
        assert_eq!(response.color_hint, "green");
    }

    #[test]
    fn evening_shuttle_is_likely_delayed() {
        // 19:00 local, GRU-GIG is a short hop.
        let response = predict(&request("VOEPASS", "GRU", "GIG", 22));
        assert!(response.probability >= ALERT_BELOW, "{}", response.probability);
        assert_eq!(response.forecast_label, "🔴 ATRASO PROVÁVEL");
    }

    #[test]
    fn details_carry_features() {
        let response = predict(&request("GOL", "GRU", "GIG", 15));
        assert_eq!(response.details["hora"], 12);
        assert_eq!(response.details["dia_semana"], 2);
        let km = response.details["distancia_km"].as_f64().unwrap();
        assert!((330.0..=360.0).contains(&km), "{km}");
    }

    #[test]
    fn unknown_airports_still_score() {
        let response = predict(&request("ACME", "XAA", "XBB", 12));
        assert!((0.0..=1.0).contains(&response.probability));
        assert!(response.details["distancia_km"].is_null());
    }

    #[test]
    fn reference_lists_are_valid() {
        assert!(airports().iter().all(|a| flightontime_models::is_valid_airport_code(&a.iata_code)));
        assert_eq!(carriers().len(), CARRIERS.len());
    }
}
