//! Error types for the `flightontime-models` crate.
//!
//! All fallible constructors and `FromStr` implementations in this crate
//! return variants of [`ModelError`].

/// Errors produced when constructing or validating model types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// An airport code was not exactly 3 ASCII letters.
    #[error("invalid IATA airport code \"{value}\": {reason}")]
    InvalidIataCode {
        /// The value that failed validation.
        value: String,
        /// Human-readable explanation.
        reason: String,
    },

    /// A departure date/time could not be parsed or placed on the timeline.
    #[error("invalid departure time \"{value}\": {reason}")]
    InvalidDeparture {
        /// The value that failed validation.
        value: String,
        /// Human-readable explanation.
        reason: String,
    },

    /// A delay probability was not a finite number in `[0, 1]`.
    #[error("invalid delay probability {value}: must be within [0, 1]")]
    InvalidProbability {
        /// The offending probability.
        value: f64,
    },

    /// Risk thresholds were out of range or inconsistent.
    #[error("invalid risk policy: {reason}")]
    InvalidRiskPolicy {
        /// Human-readable explanation.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_iata() {
        let err = ModelError::InvalidIataCode {
            value: "XX".into(),
            reason: "must be exactly 3 ASCII letters".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid IATA airport code \"XX\": must be exactly 3 ASCII letters"
        );
    }

    #[test]
    fn error_display_departure() {
        let err = ModelError::InvalidDeparture {
            value: "".into(),
            reason: "must not be empty".into(),
        };
        assert_eq!(err.to_string(), "invalid departure time \"\": must not be empty");
    }

    #[test]
    fn error_display_probability() {
        let err = ModelError::InvalidProbability { value: 1.5 };
        assert_eq!(
            err.to_string(),
            "invalid delay probability 1.5: must be within [0, 1]"
        );
    }
}
