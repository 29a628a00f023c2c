//! Mock FlightOnTime backend for local development.
//!
//! Serves the four endpoints the client uses:
//!
//! * `POST /predict`: deterministic delay score (see [`predictor`]).
//! * `POST /auth/login`: HS256 JWT for the single demo account.
//! * `GET /airports`, `GET /airlines`: reference lists.

mod config;
mod error;
mod predictor;

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::routing::{get, post};
use axum::Router;
use chrono::{Duration, Utc};
use flightontime_models::{
    AirportRef, CarrierRef, LoginRequest, LoginResponse, PredictionRequest, PredictionResponse,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use tracing::info;

use crate::config::MockConfig;
use crate::error::MockError;

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

struct AppState {
    config: MockConfig,
    encoding_key: EncodingKey,
}

#[derive(Serialize)]
struct Claims {
    sub: String,
    role: &'static str,
    iat: i64,
    exp: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn predict(Json(req): Json<PredictionRequest>) -> Result<Json<PredictionResponse>, MockError> {
    if req.origin == req.destination {
        return Err(MockError::InvalidRequest(
            "origin and destination must differ".into(),
        ));
    }
    let response = predictor::predict(&req);
    info!(
        carrier = %req.carrier,
        origin = %req.origin,
        destination = %req.destination,
        departure = %req.departure_utc,
        probability = response.probability,
        "prediction served"
    );
    Ok(Json(response))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, MockError> {
    if req.email != state.config.admin_email || req.password != state.config.admin_password {
        info!(email = %req.email, "login rejected");
        return Err(MockError::InvalidCredentials);
    }

    let now = Utc::now();
    let claims = Claims {
        sub: req.email.clone(),
        role: "ADMIN",
        iat: now.timestamp(),
        exp: (now + Duration::hours(2)).timestamp(),
    };
    let token = encode(&Header::default(), &claims, &state.encoding_key)?;

    info!(email = %req.email, "login accepted");
    Ok(Json(LoginResponse { token }))
}

async fn airports() -> Json<Vec<AirportRef>> {
    Json(predictor::airports())
}

async fn airlines() -> Json<Vec<CarrierRef>> {
    Json(predictor::carriers())
}

fn router(config: MockConfig) -> Router {
    let state = Arc::new(AppState {
        encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        config,
    });

    Router::new()
        .route("/predict", post(predict))
        .route("/auth/login", post(login))
        .route("/airports", get(airports))
        .route("/airlines", get(airlines))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = MockConfig::from_env();
    let listen_port = config.listen_port;
    info!(email = %config.admin_email, "demo account configured (override with MOCK_ADMIN_EMAIL / MOCK_ADMIN_PASSWORD)");

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", listen_port)).await?;
    info!(port = listen_port, "mock-predict listening");
    axum::serve(listener, router(config)).await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};
    use serde::Deserialize;
    use serde_json::{json, Value};

    async fn spawn() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(MockConfig::default())).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn predict_answers_in_wire_format() {
        let base = spawn().await;
        let res = reqwest::Client::new()
            .post(format!("{base}/predict"))
            .json(&json!({
                "companhia": "LATAM",
                "origem": "GRU",
                "destino": "GIG",
                "data_partida": "2025-03-14T21:30:00.000Z",
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);

        let body: Value = res.json().await.unwrap();
        let p = body["probabilidade"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&p));
        assert!(body["previsao"].is_string());
        assert!(["green", "yellow", "red"].contains(&body["cor"].as_str().unwrap()));
        assert!(body["detalhes"].is_object());
    }

    #[tokio::test]
    async fn predict_rejects_same_airport() {
        let base = spawn().await;
        let res = reqwest::Client::new()
            .post(format!("{base}/predict"))
            .json(&json!({
                "companhia": "GOL",
                "origem": "GRU",
                "destino": "GRU",
                "data_partida": "2025-03-14T21:30:00.000Z",
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 400);
    }

    #[tokio::test]
    async fn predict_rejects_bad_codes() {
        let base = spawn().await;
        let res = reqwest::Client::new()
            .post(format!("{base}/predict"))
            .json(&json!({
                "companhia": "GOL",
                "origem": "G1",
                "destino": "GIG",
                "data_partida": "2025-03-14T21:30:00.000Z",
            }))
            .send()
            .await
            .unwrap();
        assert!(res.status().is_client_error());
    }

    #[derive(Deserialize)]
    struct DecodedClaims {
        sub: String,
        role: String,
    }

    #[tokio::test]
    async fn login_issues_verifiable_token() {
        let base = spawn().await;
        let config = MockConfig::default();
        let res = reqwest::Client::new()
            .post(format!("{base}/auth/login"))
            .json(&json!({ "email": config.admin_email, "password": config.admin_password }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);

        let body: LoginResponse = res.json().await.unwrap();
        let decoded = decode::<DecodedClaims>(
            &body.token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .unwrap();
        assert_eq!(decoded.claims.sub, config.admin_email);
        assert_eq!(decoded.claims.role, "ADMIN");
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let base = spawn().await;
        let res = reqwest::Client::new()
            .post(format!("{base}/auth/login"))
            .json(&json!({ "email": "admin@flightontime.com", "password": "nope" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 401);
    }

    #[tokio::test]
    async fn reference_lists_use_client_field_names() {
        let base = spawn().await;
        let airports: Value = reqwest::get(format!("{base}/airports"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(airports[0]["iataCode"], "GRU");
        assert!(airports[0]["fullName"].is_string());

        let airlines: Value = reqwest::get(format!("{base}/airlines"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(airlines[0]["name"], "LATAM");
    }
}
