#![deny(missing_docs)]

//! # FlightOnTime Models
//!
//! Core data types shared by the FlightOnTime client, CLI and mock backend.
//!
//! ## Data flow
//!
//! ```text
//! SearchForm (free text)
//! ├── origin / destination ──► IataCode (validated, upper-case)
//! ├── departure            ──► DepartureTime ──► UTC instant
//! └── carrier
//!         │
//!         ▼
//! PredictionRequest ──► POST /predict ──► PredictionResponse
//!                                               │
//!                                   RiskPolicy  ▼
//!                                 PredictionResult (+ RiskTier)
//! ```
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`airport`] | `IataCode`, `AirportRef`, the airport code validator |
//! | [`carrier`] | `CarrierRef` |
//! | [`departure`] | `DepartureTime` and local → UTC conversion |
//! | [`risk`] | `RiskTier` and the configurable `RiskPolicy` |
//! | [`prediction`] | Wire DTOs for `/predict` and the held `PredictionResult` |
//! | [`auth`] | Wire DTOs for `/auth/login` |

pub mod airport;
pub mod auth;
pub mod carrier;
pub mod departure;
pub mod error;
pub mod prediction;
pub mod risk;

// Re-export all public types at crate root for convenience.
// Downstream crates can use `flightontime_models::IataCode` directly.
pub use airport::*;
pub use auth::*;
pub use carrier::*;
pub use departure::*;
pub use error::*;
pub use prediction::*;
pub use risk::*;
