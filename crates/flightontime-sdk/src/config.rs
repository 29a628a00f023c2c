//! Client configuration.
//!
//! [`ClientConfig`] is built from environment variables at startup and can
//! be overridden field by field (the CLI does so from its flags).

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Local, Utc};
use flightontime_models::{DepartureTime, ModelError, RiskPolicy};

use crate::error::SdkError;

/// Time zone in which the form's departure wall-clock time is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepartureZone {
    /// The zone of the machine running the client.
    #[default]
    System,
    /// A fixed UTC offset.
    Fixed(FixedOffset),
}

impl DepartureZone {
    /// Convert a departure to an absolute instant in this zone.
    pub fn to_utc(&self, departure: &DepartureTime) -> Result<DateTime<Utc>, ModelError> {
        match self {
            DepartureZone::System => departure.to_utc(&Local),
            DepartureZone::Fixed(offset) => departure.to_utc(offset),
        }
    }
}

/// Configuration shared by the HTTP client and the query orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the FlightOnTime API (no trailing slash).
    pub api_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Thresholds used to derive the risk tier.
    pub risk_policy: RiskPolicy,
    /// Zone used to place the departure time on the timeline.
    pub departure_zone: DepartureZone,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(10),
            risk_policy: RiskPolicy::default(),
            departure_zone: DepartureZone::System,
        }
    }
}

impl ClientConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable                           | Default                 | Description                        |
    /// |------------------------------------|-------------------------|------------------------------------|
    /// | `FLIGHTONTIME_API_URL`             | `http://localhost:8080` | Backend base URL                   |
    /// | `FLIGHTONTIME_TIMEOUT_SECS`        | `10`                    | HTTP timeout                       |
    /// | `FLIGHTONTIME_RISK_HIGH`           | `0.6`                   | HIGH tier threshold (exclusive)    |
    /// | `FLIGHTONTIME_RISK_MEDIUM`         | unset                   | Optional MEDIUM tier threshold     |
    /// | `FLIGHTONTIME_UTC_OFFSET_MINUTES`  | unset (system zone)     | Fixed offset for departure times   |
    pub fn from_env() -> Result<Self, SdkError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SdkError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup("FLIGHTONTIME_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);

        let timeout = parse_var::<u64, _>(&lookup, "FLIGHTONTIME_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let high = parse_var::<f64, _>(&lookup, "FLIGHTONTIME_RISK_HIGH")?
            .unwrap_or(RiskPolicy::DEFAULT_HIGH_ABOVE);
        let medium = parse_var::<f64, _>(&lookup, "FLIGHTONTIME_RISK_MEDIUM")?;
        let risk_policy =
            RiskPolicy::new(high, medium).map_err(|e| SdkError::Config(e.to_string()))?;

        let departure_zone = match parse_var::<i32, _>(&lookup, "FLIGHTONTIME_UTC_OFFSET_MINUTES")? {
            Some(minutes) => FixedOffset::east_opt(minutes * 60)
                .map(DepartureZone::Fixed)
                .ok_or_else(|| {
                    SdkError::Config(format!("UTC offset of {minutes} minutes is out of range"))
                })?,
            None => DepartureZone::System,
        };

        Ok(Self {
            api_url,
            timeout,
            risk_policy,
            departure_zone,
        })
    }

    /// Override the API base URL.
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, SdkError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|_| SdkError::Config(format!("{key}: cannot parse {raw:?}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg, ClientConfig::default());
        assert_eq!(cfg.api_url, "http://localhost:8080");
        assert_eq!(cfg.timeout, Duration::from_secs(10));
    }

    #[test]
    fn reads_every_variable() {
        let cfg = ClientConfig::from_lookup(lookup_from(&[
            ("FLIGHTONTIME_API_URL", "https://api.flightontime.dev/"),
            ("FLIGHTONTIME_TIMEOUT_SECS", "3"),
            ("FLIGHTONTIME_RISK_HIGH", "0.7"),
            ("FLIGHTONTIME_RISK_MEDIUM", "0.35"),
            ("FLIGHTONTIME_UTC_OFFSET_MINUTES", "-180"),
        ]))
        .unwrap();
        assert_eq!(cfg.api_url, "https://api.flightontime.dev");
        assert_eq!(cfg.timeout, Duration::from_secs(3));
        assert_eq!(cfg.risk_policy, RiskPolicy::new(0.7, Some(0.35)).unwrap());
        assert_eq!(
            cfg.departure_zone,
            DepartureZone::Fixed(FixedOffset::west_opt(3 * 3600).unwrap())
        );
    }

    #[test]
    fn unparsable_values_are_config_errors() {
        let err = ClientConfig::from_lookup(lookup_from(&[("FLIGHTONTIME_TIMEOUT_SECS", "ten")]))
            .unwrap_err();
        assert!(matches!(err, SdkError::Config(ref m) if m.contains("FLIGHTONTIME_TIMEOUT_SECS")));
    }

    #[test]
    fn inconsistent_thresholds_are_rejected() {
        let err = ClientConfig::from_lookup(lookup_from(&[
            ("FLIGHTONTIME_RISK_HIGH", "0.5"),
            ("FLIGHTONTIME_RISK_MEDIUM", "0.8"),
        ]))
        .unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
    }

    #[test]
    fn overrides_replace_env_values() {
        let cfg = ClientConfig::default()
            .with_api_url("http://127.0.0.1:9000/")
            .with_timeout(Duration::from_secs(1));
        assert_eq!(cfg.api_url, "http://127.0.0.1:9000");
        assert_eq!(cfg.timeout, Duration::from_secs(1));
    }
}
