//! Scheduled departure time as typed into the search form.
//!
//! The form holds a wall-clock value in the `datetime-local` format
//! (`2025-03-14T18:30`). Before it goes on the wire it is placed in a time
//! zone and converted to an absolute UTC instant.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::error::ModelError;

const FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// A local (zone-less) departure date and time.
///
/// # Examples
///
/// ```
/// use chrono::FixedOffset;
/// use flightontime_models::DepartureTime;
///
/// let dep = DepartureTime::parse("2025-03-14T18:30").unwrap();
/// let brt = FixedOffset::west_opt(3 * 3600).unwrap();
/// let utc = dep.to_utc(&brt).unwrap();
/// assert_eq!(utc.to_rfc3339(), "2025-03-14T21:30:00+00:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DepartureTime(NaiveDateTime);

impl DepartureTime {
    /// Parse a `YYYY-MM-DDTHH:MM[:SS]` string.
    pub fn parse(s: &str) -> Result<Self, ModelError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidDeparture {
                value: s.to_string(),
                reason: "must not be empty".into(),
            });
        }
        FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
            .map(Self)
            .ok_or_else(|| ModelError::InvalidDeparture {
                value: s.to_string(),
                reason: "expected YYYY-MM-DDTHH:MM".into(),
            })
    }

    /// The wall-clock value.
    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Interpret the wall-clock value in `tz` and convert it to UTC.
    ///
    /// A time repeated by a backward DST shift resolves to its earliest
    /// instant; a time skipped by a forward shift is rejected.
    pub fn to_utc<Tz: TimeZone>(&self, tz: &Tz) -> Result<DateTime<Utc>, ModelError> {
        tz.from_local_datetime(&self.0)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| ModelError::InvalidDeparture {
                value: self.to_string(),
                reason: "does not exist in the local time zone".into(),
            })
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn parses_minutes_and_seconds_forms() {
        let a = DepartureTime::parse("2025-03-14T18:30").unwrap();
        let b = DepartureTime::parse("2025-03-14T18:30:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "2025-03-14T18:30");
    }

    #[test]
    fn rejects_empty_input() {
        let err = DepartureTime::parse("   ").unwrap_err();
        assert!(matches!(err, ModelError::InvalidDeparture { .. }));
    }

    #[test]
    fn rejects_garbage() {
        assert!(DepartureTime::parse("amanhã às 10h").is_err());
        assert!(DepartureTime::parse("2025-13-01T10:00").is_err());
        assert!(DepartureTime::parse("14/03/2025 18:30").is_err());
    }

    #[test]
    fn converts_with_fixed_offset() {
        let dep = DepartureTime::parse("2025-12-31T23:00").unwrap();
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        let utc = dep.to_utc(&brt).unwrap();
        assert_eq!(utc.to_rfc3339(), "2026-01-01T02:00:00+00:00");
    }

    #[test]
    fn utc_zone_is_identity() {
        let dep = DepartureTime::parse("2025-06-01T08:15").unwrap();
        let utc = dep.to_utc(&Utc).unwrap();
        assert_eq!(utc.naive_utc(), dep.naive());
    }
}
