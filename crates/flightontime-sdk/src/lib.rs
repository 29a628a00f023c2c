//! # FlightOnTime SDK
//!
//! Client-side core of the **FlightOnTime** flight-delay prediction
//! service.
//!
//! The SDK provides:
//!
//! * [`FlightOnTimeClient`]: HTTP client for `/predict`, `/auth/login`,
//!   `/airports` and `/airlines`, behind the [`FlightOnTimeApi`] trait.
//! * [`QueryOrchestrator`]: the search-form state machine that turns form
//!   input into exactly one in-flight prediction request.
//! * [`matcher`]: autocomplete filtering over the reference lists, and
//!   [`Dropdown`] for suggestion-list visibility.
//! * [`SessionGate`]: session token presence backed by a pluggable
//!   [`SessionStore`].
//! * [`SdkError`]: unified error type for all SDK operations.
//!
//! Model types from [`flightontime_models`] are re-exported for convenience.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use flightontime_sdk::{ClientConfig, Field, FlightOnTimeClient, QueryOrchestrator};
//!
//! # async fn run() -> Result<(), flightontime_sdk::SdkError> {
//! let config = ClientConfig::from_env()?;
//! let client = FlightOnTimeClient::new(&config)?;
//!
//! let mut query = QueryOrchestrator::new(config.risk_policy, config.departure_zone);
//! query.set_field(Field::Carrier, "latam");
//! query.set_field(Field::Origin, "gru");
//! query.set_field(Field::Destination, "gig");
//! query.set_field(Field::Departure, "2025-03-14T18:30");
//! query.submit(&client).await;
//!
//! if let Some(result) = query.result() {
//!     println!("{} {}", result.route_label(), result.risk_tier());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod dropdown;
pub mod error;
pub mod matcher;
pub mod orchestrator;
pub mod reference;
pub mod session;

pub use client::{FlightOnTimeApi, FlightOnTimeClient};
pub use config::{ClientConfig, DepartureZone};
pub use dropdown::{Dropdown, DropdownState, BLUR_HIDE_DELAY};
pub use error::SdkError;
pub use matcher::{match_airports, match_carriers};
pub use orchestrator::{
    Field, FieldError, PendingQuery, QueryError, QueryOrchestrator, RequestState, SearchForm,
    Ticket,
};
pub use reference::ReferenceData;
pub use session::{FileSessionStore, MemorySessionStore, SessionGate, SessionStore};

// Re-export model types for ergonomic usage.
pub use flightontime_models::{
    is_valid_airport_code, AirportRef, CarrierRef, IataCode, PredictionResult, RiskPolicy,
    RiskTier,
};
