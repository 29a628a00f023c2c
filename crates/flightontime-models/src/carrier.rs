//! Airline reference entries.

use serde::{Deserialize, Serialize};

/// One carrier of the reference list (`GET /airlines`).
///
/// # Examples
///
/// ```
/// use flightontime_models::CarrierRef;
///
/// let latam = CarrierRef::new("LATAM");
/// assert_eq!(latam.name, "LATAM");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CarrierRef {
    /// Carrier name as used by the prediction model, e.g. `"AZUL"`.
    pub name: String,
}

impl CarrierRef {
    /// Construct a reference entry.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
