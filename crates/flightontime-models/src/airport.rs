//! Airport identifiers and reference entries.
//!
//! An [`IataCode`] is the validated, upper-case 3-letter identifier sent to
//! the prediction backend. [`AirportRef`] is one entry of the airport
//! reference list served by the data service and used for autocomplete.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// Returns `true` if `s`, once trimmed, is exactly three ASCII letters.
///
/// Case is ignored; the canonical form produced by [`IataCode::parse`] is
/// upper-case. This never fails: empty, wrong-length and non-alphabetic
/// input simply yield `false`.
///
/// # Examples
///
/// ```
/// use flightontime_models::is_valid_airport_code;
///
/// assert!(is_valid_airport_code("GRU"));
/// assert!(is_valid_airport_code(" gig "));
/// assert!(!is_valid_airport_code("XX"));
/// assert!(!is_valid_airport_code("G1G"));
/// ```
pub fn is_valid_airport_code(s: &str) -> bool {
    let trimmed = s.trim();
    trimmed.len() == 3 && trimmed.bytes().all(|b| b.is_ascii_alphabetic())
}

// ---------------------------------------------------------------------------
// IataCode
// ---------------------------------------------------------------------------

/// A 3-letter IATA airport code (e.g. `"GRU"`), always stored upper-case.
///
/// # Examples
///
/// ```
/// use flightontime_models::IataCode;
///
/// let code = IataCode::parse(" gru").unwrap();
/// assert_eq!(code.as_str(), "GRU");
/// assert!(IataCode::parse("GRUX").is_err());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct IataCode(String);

impl IataCode {
    /// Validate and normalise an airport code.
    pub fn parse(s: &str) -> Result<Self, ModelError> {
        if !is_valid_airport_code(s) {
            return Err(ModelError::InvalidIataCode {
                value: s.to_string(),
                reason: "must be exactly 3 ASCII letters".into(),
            });
        }
        Ok(Self(s.trim().to_ascii_uppercase()))
    }

    /// Return the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IataCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for IataCode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for IataCode {
    type Error = ModelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<IataCode> for String {
    fn from(code: IataCode) -> Self {
        code.0
    }
}

// ---------------------------------------------------------------------------
// AirportRef
// ---------------------------------------------------------------------------

/// One airport of the reference list (`GET /airports`).
///
/// The code is kept as received: reference data is trusted and only used
/// to fill in form fields, which are validated again on submit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AirportRef {
    /// IATA code, e.g. `"GRU"`.
    pub iata_code: String,
    /// Display name, e.g. `"Guarulhos - Governador André Franco Montoro"`.
    pub full_name: String,
}

impl AirportRef {
    /// Construct a reference entry.
    pub fn new(iata_code: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            iata_code: iata_code.into(),
            full_name: full_name.into(),
        }
    }

    /// The text autocomplete queries are matched against: `"{code} {name}"`.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.iata_code, self.full_name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_letters_any_case_are_valid() {
        for code in ["GRU", "gig", "CgH", "sdu", "ZZZ", "aaa"] {
            assert!(is_valid_airport_code(code), "{code} should be valid");
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert!(is_valid_airport_code("  GRU\t"));
        assert!(is_valid_airport_code("\nbsb "));
    }

    #[test]
    fn wrong_length_is_invalid() {
        for code in ["", " ", "G", "XX", "GRUX", "GUARULHOS", "G R U"] {
            assert!(!is_valid_airport_code(code), "{code:?} should be invalid");
        }
    }

    #[test]
    fn non_letters_are_invalid() {
        for code in ["G1G", "12A", "GR-", "GR ", "G_U", "ÁBC", "ÇÃO"] {
            assert!(!is_valid_airport_code(code), "{code:?} should be invalid");
        }
    }

    #[test]
    fn parse_canonicalises_to_upper_case() {
        let code = IataCode::parse(" gig ").unwrap();
        assert_eq!(code.as_str(), "GIG");
        assert_eq!(code.to_string(), "GIG");
    }

    #[test]
    fn parse_rejects_invalid_code() {
        let err = IataCode::parse("XX").unwrap_err();
        assert!(matches!(err, ModelError::InvalidIataCode { ref value, .. } if value == "XX"));
    }

    #[test]
    fn iata_code_from_str() {
        let code: IataCode = "bsb".parse().unwrap();
        assert_eq!(code.as_str(), "BSB");
    }

    #[test]
    fn iata_code_deserialize_validates() {
        let ok: IataCode = serde_json::from_str("\"cgh\"").unwrap();
        assert_eq!(ok.as_str(), "CGH");
        assert!(serde_json::from_str::<IataCode>("\"C9H\"").is_err());
    }

    #[test]
    fn airport_ref_uses_camel_case_on_the_wire() {
        let json = r#"{"iataCode":"GRU","fullName":"Guarulhos"}"#;
        let airport: AirportRef = serde_json::from_str(json).unwrap();
        assert_eq!(airport, AirportRef::new("GRU", "Guarulhos"));
        assert_eq!(airport.search_text(), "GRU Guarulhos");
    }
}
