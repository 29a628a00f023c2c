//! Prediction request/response DTOs and the held result.
//!
//! The backend contract uses Portuguese field names; the Rust side uses
//! English names and maps them with `serde(rename)`.
//!
//! ```text
//! POST /predict
//! → {"companhia":"LATAM","origem":"GRU","destino":"GIG","data_partida":"2025-03-14T21:30:00.000Z"}
//! ← {"previsao":"🔴 ATRASO PROVÁVEL","probabilidade":0.75,"cor":"red","detalhes":{…}}
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::airport::IataCode;
use crate::error::ModelError;
use crate::risk::{RiskPolicy, RiskTier};

// ---------------------------------------------------------------------------
// PredictionRequest
// ---------------------------------------------------------------------------

/// Body of `POST /predict`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    /// Carrier name as typed (upper-cased) by the user.
    #[serde(rename = "companhia")]
    pub carrier: String,
    /// Origin airport.
    #[serde(rename = "origem")]
    pub origin: IataCode,
    /// Destination airport.
    #[serde(rename = "destino")]
    pub destination: IataCode,
    /// Scheduled departure as an absolute instant.
    #[serde(rename = "data_partida", serialize_with = "iso_millis")]
    pub departure_utc: DateTime<Utc>,
}

/// Serialise as `2025-03-14T21:30:00.000Z`, the format browsers emit.
fn iso_millis<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

// ---------------------------------------------------------------------------
// PredictionResponse
// ---------------------------------------------------------------------------

/// Success body of `POST /predict`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PredictionResponse {
    /// Human-readable forecast, e.g. `"🟢 PONTUAL"`.
    #[serde(rename = "previsao")]
    pub forecast_label: String,
    /// Probability of a delay, expected in `[0, 1]`.
    #[serde(rename = "probabilidade")]
    pub probability: f64,
    /// Backend color hint (`"green"`, `"yellow"`, `"red"`).
    #[serde(rename = "cor")]
    pub color_hint: String,
    /// Free-form diagnostic data. Newer backends send it as
    /// `dados_utilizados`.
    #[serde(rename = "detalhes", alias = "dados_utilizados", default)]
    pub details: serde_json::Value,
}

impl PredictionResponse {
    /// Check that the probability is a finite number in `[0, 1]`.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.probability.is_finite() && (0.0..=1.0).contains(&self.probability) {
            Ok(())
        } else {
            Err(ModelError::InvalidProbability {
                value: self.probability,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// PredictionResult
// ---------------------------------------------------------------------------

/// The single prediction held by the search view after a successful query.
///
/// Built by merging the echoed form fields with the backend response. The
/// [`risk_tier`](Self::risk_tier) is derived from the probability and
/// cannot be set independently.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PredictionResult {
    /// Origin airport.
    pub origin: IataCode,
    /// Destination airport.
    pub destination: IataCode,
    /// Carrier name.
    pub carrier: String,
    /// Departure exactly as typed in the form.
    pub departure_local: String,
    /// Backend forecast label.
    pub forecast_label: String,
    /// Probability of a delay in `[0, 1]`.
    pub probability: f64,
    risk_tier: RiskTier,
    /// Backend color hint for the forecast label. The badge color comes
    /// from [`RiskTier::color`] instead.
    pub color_hint: String,
    /// Backend diagnostic data.
    pub details: serde_json::Value,
}

impl PredictionResult {
    /// Merge a request, the raw departure text and a response.
    ///
    /// Fails if the response probability is out of range.
    pub fn new(
        request: &PredictionRequest,
        departure_local: &str,
        response: PredictionResponse,
        policy: &RiskPolicy,
    ) -> Result<Self, ModelError> {
        response.validate()?;
        Ok(Self {
            origin: request.origin.clone(),
            destination: request.destination.clone(),
            carrier: request.carrier.clone(),
            departure_local: departure_local.to_string(),
            risk_tier: policy.tier(response.probability),
            forecast_label: response.forecast_label,
            probability: response.probability,
            color_hint: response.color_hint,
            details: response.details,
        })
    }

    /// Derived risk bucket.
    pub fn risk_tier(&self) -> RiskTier {
        self.risk_tier
    }

    /// `"GRU → GIG"`.
    pub fn route_label(&self) -> String {
        format!("{} → {}", self.origin, self.destination)
    }

    /// Probability as a whole percentage, e.g. `"75%"`.
    pub fn percent_label(&self) -> String {
        format!("{:.0}%", self.probability * 100.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn request() -> PredictionRequest {
        PredictionRequest {
            carrier: "LATAM".into(),
            origin: IataCode::parse("GRU").unwrap(),
            destination: IataCode::parse("GIG").unwrap(),
            departure_utc: Utc.with_ymd_and_hms(2025, 3, 14, 21, 30, 0).unwrap(),
        }
    }

    fn response(probability: f64) -> PredictionResponse {
        PredictionResponse {
            forecast_label: "Atraso provável".into(),
            probability,
            color_hint: "red".into(),
            details: json!({}),
        }
    }

    #[test]
    fn request_uses_backend_field_names() {
        let value = serde_json::to_value(request()).unwrap();
        assert_eq!(
            value,
            json!({
                "companhia": "LATAM",
                "origem": "GRU",
                "destino": "GIG",
                "data_partida": "2025-03-14T21:30:00.000Z",
            })
        );
    }

    #[test]
    fn request_deserializes_browser_timestamps() {
        let body = r#"{"companhia":"GOL","origem":"cgh","destino":"SDU","data_partida":"2025-03-14T21:30:00.000Z"}"#;
        let req: PredictionRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.origin.as_str(), "CGH");
        assert_eq!(req.departure_utc, request().departure_utc);
    }

    #[test]
    fn response_accepts_details_alias_and_missing_details() {
        let v5 = r#"{"previsao":"🟢 PONTUAL","probabilidade":0.12,"cor":"green","dados_utilizados":{"distancia":350.2}}"#;
        let parsed: PredictionResponse = serde_json::from_str(v5).unwrap();
        assert_eq!(parsed.details, json!({"distancia": 350.2}));

        let bare = r#"{"previsao":"Pontual","probabilidade":0.3,"cor":"green"}"#;
        let parsed: PredictionResponse = serde_json::from_str(bare).unwrap();
        assert!(parsed.details.is_null());
    }

    #[test]
    fn response_missing_probability_is_rejected() {
        let body = r#"{"previsao":"Pontual","cor":"green"}"#;
        assert!(serde_json::from_str::<PredictionResponse>(body).is_err());
    }

    #[test]
    fn result_merges_form_and_response() {
        let result =
            PredictionResult::new(&request(), "2025-03-14T18:30", response(0.75), &RiskPolicy::default())
                .unwrap();
        assert_eq!(result.origin.as_str(), "GRU");
        assert_eq!(result.carrier, "LATAM");
        assert_eq!(result.departure_local, "2025-03-14T18:30");
        assert_eq!(result.forecast_label, "Atraso provável");
        assert_eq!(result.risk_tier(), RiskTier::High);
        assert_eq!(result.route_label(), "GRU → GIG");
        assert_eq!(result.percent_label(), "75%");
    }

    #[test]
    fn low_probability_is_low_tier() {
        let result =
            PredictionResult::new(&request(), "2025-03-14T18:30", response(0.2), &RiskPolicy::default())
                .unwrap();
        assert_eq!(result.risk_tier(), RiskTier::Low);
        assert_eq!(result.percent_label(), "20%");
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        for p in [1.5, -0.1, f64::NAN, f64::INFINITY] {
            let err = PredictionResult::new(&request(), "", response(p), &RiskPolicy::default())
                .unwrap_err();
            assert!(matches!(err, ModelError::InvalidProbability { .. }));
        }
    }

    #[test]
    fn result_serializes_tier_label() {
        let result =
            PredictionResult::new(&request(), "2025-03-14T18:30", response(0.75), &RiskPolicy::default())
                .unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["risk_tier"], "ALTO");
        assert_eq!(value["origin"], "GRU");
    }
}
