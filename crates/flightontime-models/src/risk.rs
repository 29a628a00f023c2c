//! Coarse delay-risk buckets derived from the predicted probability.
//!
//! The tier is never taken from the backend: it is always recomputed from
//! the probability by a single [`RiskPolicy`].

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

// ---------------------------------------------------------------------------
// RiskTier
// ---------------------------------------------------------------------------

/// Risk bucket shown on the prediction card.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
)]
pub enum RiskTier {
    /// Delay is likely.
    #[serde(rename = "ALTO")]
    #[strum(serialize = "ALTO")]
    High,
    /// Only produced when a medium threshold is configured.
    #[serde(rename = "MÉDIO")]
    #[strum(serialize = "MÉDIO")]
    Medium,
    /// Delay is unlikely.
    #[serde(rename = "BAIXO")]
    #[strum(serialize = "BAIXO")]
    Low,
}

impl RiskTier {
    /// Color name for the tier badge, in the same vocabulary as the
    /// backend's `cor` hint.
    pub fn color(&self) -> &'static str {
        match self {
            RiskTier::High => "red",
            RiskTier::Medium => "yellow",
            RiskTier::Low => "green",
        }
    }
}

// ---------------------------------------------------------------------------
// RiskPolicy
// ---------------------------------------------------------------------------

/// Thresholds mapping a probability to a [`RiskTier`].
///
/// Both thresholds are strict: a probability equal to `high_above` is not
/// `High`. The medium band is disabled by default, which reproduces the
/// two-tier behaviour of the web client.
///
/// # Examples
///
/// ```
/// use flightontime_models::{RiskPolicy, RiskTier};
///
/// let policy = RiskPolicy::default();
/// assert_eq!(policy.tier(0.75), RiskTier::High);
/// assert_eq!(policy.tier(0.5), RiskTier::Low);
///
/// let banded = RiskPolicy::new(0.6, Some(0.4)).unwrap();
/// assert_eq!(banded.tier(0.5), RiskTier::Medium);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RiskPolicy {
    /// Probabilities strictly above this are `High`.
    pub high_above: f64,
    /// Probabilities strictly above this (and not `High`) are `Medium`.
    pub medium_above: Option<f64>,
}

impl RiskPolicy {
    /// Threshold used by the web client.
    pub const DEFAULT_HIGH_ABOVE: f64 = 0.6;

    /// Build a policy, checking that thresholds lie in `[0, 1]` and that the
    /// medium threshold is below the high one.
    pub fn new(high_above: f64, medium_above: Option<f64>) -> Result<Self, ModelError> {
        let in_range = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        if !in_range(high_above) {
            return Err(ModelError::InvalidRiskPolicy {
                reason: format!("high threshold {high_above} outside [0, 1]"),
            });
        }
        if let Some(medium) = medium_above {
            if !in_range(medium) || medium >= high_above {
                return Err(ModelError::InvalidRiskPolicy {
                    reason: format!(
                        "medium threshold {medium} must lie in [0, {high_above})"
                    ),
                });
            }
        }
        Ok(Self {
            high_above,
            medium_above,
        })
    }

    /// Bucket a probability.
    pub fn tier(&self, probability: f64) -> RiskTier {
        if probability > self.high_above {
            RiskTier::High
        } else if self.medium_above.is_some_and(|m| probability > m) {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            high_above: Self::DEFAULT_HIGH_ABOVE,
            medium_above: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_two_tier() {
        let policy = RiskPolicy::default();
        assert_eq!(policy.tier(0.75), RiskTier::High);
        assert_eq!(policy.tier(0.61), RiskTier::High);
        assert_eq!(policy.tier(0.6), RiskTier::Low);
        assert_eq!(policy.tier(0.2), RiskTier::Low);
        assert_eq!(policy.tier(0.0), RiskTier::Low);
    }

    #[test]
    fn default_policy_never_yields_medium() {
        let policy = RiskPolicy::default();
        for step in 0..=100 {
            let p = f64::from(step) / 100.0;
            assert_ne!(policy.tier(p), RiskTier::Medium, "p = {p}");
        }
    }

    #[test]
    fn medium_band_when_configured() {
        let policy = RiskPolicy::new(0.6, Some(0.4)).unwrap();
        assert_eq!(policy.tier(0.4), RiskTier::Low);
        assert_eq!(policy.tier(0.41), RiskTier::Medium);
        assert_eq!(policy.tier(0.6), RiskTier::Medium);
        assert_eq!(policy.tier(0.9), RiskTier::High);
    }

    #[test]
    fn rejects_inconsistent_thresholds() {
        assert!(RiskPolicy::new(1.2, None).is_err());
        assert!(RiskPolicy::new(f64::NAN, None).is_err());
        assert!(RiskPolicy::new(0.6, Some(0.6)).is_err());
        assert!(RiskPolicy::new(0.6, Some(-0.1)).is_err());
    }

    #[test]
    fn tier_labels() {
        assert_eq!(RiskTier::High.to_string(), "ALTO");
        assert_eq!(RiskTier::Medium.to_string(), "MÉDIO");
        assert_eq!(RiskTier::Low.to_string(), "BAIXO");
        assert_eq!("ALTO".parse::<RiskTier>().unwrap(), RiskTier::High);
        assert_eq!(serde_json::to_string(&RiskTier::Low).unwrap(), "\"BAIXO\"");
    }

    #[test]
    fn every_tier_has_a_color() {
        assert_eq!(RiskTier::High.color(), "red");
        assert_eq!(RiskTier::Medium.color(), "yellow");
        assert_eq!(RiskTier::Low.color(), "green");
    }
}
