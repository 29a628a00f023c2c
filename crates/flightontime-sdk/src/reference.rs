//! Airport and carrier reference lists used for autocomplete.
//!
//! Both lists are fetched once when the search view starts. A failed fetch
//! is logged and degrades to an empty list: the form stays usable, it just
//! offers no suggestions for that field.

use flightontime_models::{AirportRef, CarrierRef};
use tracing::{info, warn};

use crate::client::FlightOnTimeApi;

/// The two reference lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    /// Airports, in the order served.
    pub airports: Vec<AirportRef>,
    /// Carriers, in the order served.
    pub carriers: Vec<CarrierRef>,
}

impl ReferenceData {
    /// Fetch both lists concurrently. Never fails.
    pub async fn load<A: FlightOnTimeApi>(api: &A) -> Self {
        let (airports, carriers) = futures::join!(airports_or_empty(api), carriers_or_empty(api));
        Self { airports, carriers }
    }
}

/// Fetch the airport list, or an empty list on failure.
pub async fn airports_or_empty<A: FlightOnTimeApi>(api: &A) -> Vec<AirportRef> {
    match api.airports().await {
        Ok(airports) => {
            info!(count = airports.len(), "airport list loaded");
            airports
        }
        Err(e) => {
            warn!(error = %e, "failed to load airport list, suggestions disabled");
            Vec::new()
        }
    }
}

/// Fetch the carrier list, or an empty list on failure.
pub async fn carriers_or_empty<A: FlightOnTimeApi>(api: &A) -> Vec<CarrierRef> {
    match api.carriers().await {
        Ok(carriers) => {
            info!(count = carriers.len(), "carrier list loaded");
            carriers
        }
        Err(e) => {
            warn!(error = %e, "failed to load carrier list, suggestions disabled");
            Vec::new()
        }
    }
}
