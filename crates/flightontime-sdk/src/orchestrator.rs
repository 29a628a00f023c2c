//! Search form state machine.
//!
//! [`QueryOrchestrator`] owns the [`SearchForm`] and drives
//! [`RequestState`] through one prediction query at a time:
//!
//! ```text
//!            submit                 valid                 2xx + well-formed
//!   Idle ───────────► Validating ─────────► InFlight ───────────────────────► Succeeded
//!    ▲                    │                    │                                  │
//!    │                    │ invalid field      │ transport / status / malformed   │
//!    │                    ▼                    ▼                                  │
//!    │                  Failed ◄───────────────┘                                  │
//!    │                    │                                                       │
//!    └── unmount          └──────────────── submit ◄──────────────────────────────┘
//! ```
//!
//! Issuing and completing a request are separate events. [`begin_submit`]
//! validates and hands out a [`PendingQuery`] carrying a [`Ticket`];
//! the caller performs the HTTP call wherever it likes and feeds the
//! outcome back through [`complete`]. A completion is applied only if its
//! ticket is the one outstanding and the view is still mounted.
//!
//! [`begin_submit`]: QueryOrchestrator::begin_submit
//! [`complete`]: QueryOrchestrator::complete

use std::sync::atomic::{AtomicU64, Ordering};

use flightontime_models::{
    DepartureTime, IataCode, PredictionRequest, PredictionResponse, PredictionResult, RiskPolicy,
};
use tracing::{debug, info, warn};

use crate::client::FlightOnTimeApi;
use crate::config::DepartureZone;
use crate::error::SdkError;

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// An editable field of the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Airline name.
    Carrier,
    /// Origin airport.
    Origin,
    /// Destination airport.
    Destination,
    /// Departure date and time (`YYYY-MM-DDTHH:MM`).
    Departure,
}

/// Draft search input. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    /// Carrier, upper-cased as typed.
    pub carrier: String,
    /// Origin, upper-cased as typed.
    pub origin: String,
    /// Destination, upper-cased as typed.
    pub destination: String,
    /// Departure wall-clock time, as typed.
    pub departure_local: String,
}

impl SearchForm {
    /// Current text of a field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Carrier => &self.carrier,
            Field::Origin => &self.origin,
            Field::Destination => &self.destination,
            Field::Departure => &self.departure_local,
        }
    }

    /// Replace a field's text. Text fields are upper-cased.
    pub fn set(&mut self, field: Field, value: &str) {
        match field {
            Field::Carrier => self.carrier = value.to_uppercase(),
            Field::Origin => self.origin = value.to_uppercase(),
            Field::Destination => self.destination = value.to_uppercase(),
            Field::Departure => self.departure_local = value.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// State and errors
// ---------------------------------------------------------------------------

/// Lifecycle of the current query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// Inputs are being checked. Transient: never observed between events.
    Validating,
    /// Exactly one request is outstanding.
    InFlight,
    /// The last query produced a result.
    Succeeded,
    /// The last submit was rejected or its request failed.
    Failed,
}

/// Which field failed client-side validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// Origin is not a 3-letter airport code.
    #[error("origin must be a valid IATA code (e.g. GRU)")]
    Origin,
    /// Destination is not a 3-letter airport code.
    #[error("destination must be a valid IATA code (e.g. GIG)")]
    Destination,
    /// Departure is empty, unparsable or does not exist locally.
    #[error("departure must be a valid date and time")]
    Departure,
}

/// Error held by the orchestrator for display.
///
/// Request failures carry no detail: the cause is logged when it happens
/// and the user only ever sees one generic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Rejected before any request was made.
    #[error(transparent)]
    Validation(#[from] FieldError),
    /// The prediction request failed.
    #[error("could not fetch the flight prediction")]
    RequestFailed,
}

/// Identifies one issued request. Unique across all orchestrators in the
/// process, so a response can never be credited to a view it was not
/// issued by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Ticket(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A validated request waiting to be sent.
#[derive(Debug, Clone)]
pub struct PendingQuery {
    ticket: Ticket,
    request: PredictionRequest,
}

impl PendingQuery {
    /// Ticket to hand back to [`QueryOrchestrator::complete`].
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Payload for `POST /predict`.
    pub fn request(&self) -> &PredictionRequest {
        &self.request
    }
}

#[derive(Debug)]
struct Outstanding {
    ticket: Ticket,
    request: PredictionRequest,
    departure_local: String,
}

// ---------------------------------------------------------------------------
// QueryOrchestrator
// ---------------------------------------------------------------------------

/// Owns the search form and the single in-flight prediction query.
#[derive(Debug)]
pub struct QueryOrchestrator {
    form: SearchForm,
    state: RequestState,
    error: Option<QueryError>,
    result: Option<PredictionResult>,
    policy: RiskPolicy,
    zone: DepartureZone,
    outstanding: Option<Outstanding>,
    mounted: bool,
}

impl QueryOrchestrator {
    /// Fresh orchestrator with an empty form, as at view mount.
    pub fn new(policy: RiskPolicy, zone: DepartureZone) -> Self {
        Self {
            form: SearchForm::default(),
            state: RequestState::Idle,
            error: None,
            result: None,
            policy,
            zone,
            outstanding: None,
            mounted: true,
        }
    }

    // ------------------------------------------------------------------
    // Form
    // ------------------------------------------------------------------

    /// The draft form.
    pub fn form(&self) -> &SearchForm {
        &self.form
    }

    /// Keystroke into a field. Allowed in every state, including while a
    /// request is in flight: the outstanding request keeps its own copy.
    pub fn set_field(&mut self, field: Field, value: &str) {
        self.form.set(field, value);
    }

    // ------------------------------------------------------------------
    // Render state
    // ------------------------------------------------------------------

    /// Current lifecycle state.
    pub fn state(&self) -> RequestState {
        self.state
    }

    /// `true` while a request is outstanding; the submit control should be
    /// disabled.
    pub fn is_loading(&self) -> bool {
        self.state == RequestState::InFlight
    }

    /// Error to display, if any.
    pub fn error(&self) -> Option<QueryError> {
        self.error
    }

    /// The held prediction, if any.
    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Handle a submit event.
    ///
    /// Returns the request to send, or `None` when nothing must be sent:
    /// a request is already in flight, the view is torn down, or a field
    /// failed validation (then the state is `Failed`).
    pub fn begin_submit(&mut self) -> Option<PendingQuery> {
        if !self.mounted {
            debug!("submit ignored: view unmounted");
            return None;
        }
        if self.state == RequestState::InFlight {
            debug!("submit ignored: request already in flight");
            return None;
        }

        self.error = None;
        self.state = RequestState::Validating;

        let (request, departure_local) = match self.validate() {
            Ok(validated) => validated,
            Err(field) => {
                debug!(%field, "submit rejected by validation");
                self.state = RequestState::Failed;
                self.error = Some(QueryError::Validation(field));
                return None;
            }
        };

        // Clear before issuing: a stale card must never sit next to the
        // outcome of a newer query.
        self.result = None;

        let ticket = Ticket::next();
        self.outstanding = Some(Outstanding {
            ticket,
            request: request.clone(),
            departure_local,
        });
        self.state = RequestState::InFlight;

        info!(
            carrier = %request.carrier,
            origin = %request.origin,
            destination = %request.destination,
            departure = %request.departure_utc,
            "prediction request issued"
        );
        Some(PendingQuery { ticket, request })
    }

    /// Handle the arrival of a response or error for `ticket`.
    ///
    /// Returns `false` if the completion was discarded because it does not
    /// belong to the outstanding request or the view is torn down.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<PredictionResponse, SdkError>,
    ) -> bool {
        if !self.mounted {
            debug!(?ticket, "late response discarded: view unmounted");
            return false;
        }
        let Some(outstanding) = self.outstanding.take_if(|o| o.ticket == ticket) else {
            debug!(?ticket, "stale response discarded");
            return false;
        };

        let merged = outcome.and_then(|response| {
            PredictionResult::new(
                &outstanding.request,
                &outstanding.departure_local,
                response,
                &self.policy,
            )
            .map_err(SdkError::from)
        });

        match merged {
            Ok(result) => {
                info!(
                    route = %result.route_label(),
                    probability = result.probability,
                    tier = %result.risk_tier(),
                    "prediction received"
                );
                self.result = Some(result);
                self.state = RequestState::Succeeded;
            }
            Err(e) => {
                warn!(error = %e, "prediction request failed");
                self.error = Some(QueryError::RequestFailed);
                self.state = RequestState::Failed;
            }
        }
        true
    }

    /// Submit and wait for the outcome in one call.
    ///
    /// Convenience for callers without an event loop (one-shot CLI,
    /// tests). Returns the resulting state.
    pub async fn submit<A: FlightOnTimeApi>(&mut self, api: &A) -> RequestState {
        if let Some(pending) = self.begin_submit() {
            let outcome = api.predict(pending.request()).await;
            self.complete(pending.ticket(), outcome);
        }
        self.state
    }

    /// The view is being torn down. Any response still on its way will be
    /// discarded.
    pub fn unmount(&mut self) {
        if self.outstanding.take().is_some() {
            debug!("view unmounted with a request in flight");
        }
        self.mounted = false;
        self.state = RequestState::Idle;
    }

    /// Origin first, then destination, then departure; first failure wins.
    fn validate(&self) -> Result<(PredictionRequest, String), FieldError> {
        let origin = IataCode::parse(&self.form.origin).map_err(|_| FieldError::Origin)?;
        let destination =
            IataCode::parse(&self.form.destination).map_err(|_| FieldError::Destination)?;
        let departure_utc = DepartureTime::parse(&self.form.departure_local)
            .and_then(|dep| self.zone.to_utc(&dep))
            .map_err(|_| FieldError::Departure)?;

        let request = PredictionRequest {
            carrier: self.form.carrier.clone(),
            origin,
            destination,
            departure_utc,
        };
        Ok((request, self.form.departure_local.clone()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
