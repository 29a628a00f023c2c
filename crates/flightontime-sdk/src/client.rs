//! HTTP client for the FlightOnTime API.
//!
//! [`FlightOnTimeClient`] wraps a `reqwest` client configured from
//! [`ClientConfig`] and implements [`FlightOnTimeApi`], the seam the
//! orchestrator and the reference loader are written against.
//!
//! # Typical usage
//!
//! ```rust,no_run
//! use flightontime_sdk::{ClientConfig, FlightOnTimeApi, FlightOnTimeClient};
//!
//! # async fn run() -> Result<(), flightontime_sdk::SdkError> {
//! let client = FlightOnTimeClient::new(&ClientConfig::default())?;
//! let airports = client.airports().await?;
//! println!("{} airports available", airports.len());
//! # Ok(())
//! # }
//! ```

use std::future::Future;

use flightontime_models::{
    AirportRef, CarrierRef, LoginRequest, LoginResponse, PredictionRequest, PredictionResponse,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::SdkError;

/// Operations offered by the FlightOnTime backend.
///
/// Implemented by [`FlightOnTimeClient`] over HTTP; tests substitute an
/// in-memory implementation.
pub trait FlightOnTimeApi {
    /// `POST /predict`.
    fn predict(
        &self,
        request: &PredictionRequest,
    ) -> impl Future<Output = Result<PredictionResponse, SdkError>> + Send;

    /// `POST /auth/login`, returning the session token.
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<String, SdkError>> + Send;

    /// `GET /airports`.
    fn airports(&self) -> impl Future<Output = Result<Vec<AirportRef>, SdkError>> + Send;

    /// `GET /airlines`.
    fn carriers(&self) -> impl Future<Output = Result<Vec<CarrierRef>, SdkError>> + Send;
}

/// HTTP implementation of [`FlightOnTimeApi`].
///
/// Cheap to clone: clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct FlightOnTimeClient {
    http: reqwest::Client,
    base_url: String,
}

impl FlightOnTimeClient {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, SdkError> {
        if !config.api_url.starts_with("http://") && !config.api_url.starts_with("https://") {
            return Err(SdkError::Config(format!(
                "API URL must start with http:// or https://, got {:?}",
                config.api_url
            )));
        }
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// The API base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl FlightOnTimeApi for FlightOnTimeClient {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, SdkError> {
        debug!(origin = %request.origin, destination = %request.destination, "POST /predict");
        let res = self.http.post(self.url("/predict")).json(request).send().await?;
        let response: PredictionResponse = read_json(res).await?;
        response.validate()?;
        Ok(response)
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, SdkError> {
        debug!(email, "POST /auth/login");
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let res = self.http.post(self.url("/auth/login")).json(&body).send().await?;

        if matches!(res.status(), StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            let text = res.text().await.unwrap_or_default();
            return Err(SdkError::Auth(text));
        }

        let login: LoginResponse = read_json(res).await?;
        if login.token.trim().is_empty() {
            return Err(SdkError::Auth("empty token in login response".into()));
        }
        Ok(login.token)
    }

    async fn airports(&self) -> Result<Vec<AirportRef>, SdkError> {
        debug!("GET /airports");
        let res = self.http.get(self.url("/airports")).send().await?;
        read_json(res).await
    }

    async fn carriers(&self) -> Result<Vec<CarrierRef>, SdkError> {
        debug!("GET /airlines");
        let res = self.http.get(self.url("/airlines")).send().await?;
        read_json(res).await
    }
}

/// Reject non-2xx statuses, then decode the body as JSON.
async fn read_json<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, SdkError> {
    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(SdkError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let bytes = res.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
