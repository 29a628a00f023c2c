//! Autocomplete matching over the airport and carrier reference lists.
//!
//! Matching is a case-insensitive substring test. Results keep the
//! reference list's order and are capped at [`MAX_SUGGESTIONS`]; there is no
//! ranking. Queries shorter than [`MIN_QUERY_CHARS`] match nothing, so an
//! empty or one-letter field never opens a list.

use flightontime_models::{AirportRef, CarrierRef};

/// Upper bound on the number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 6;

/// Minimum query length, in characters, before anything is matched.
pub const MIN_QUERY_CHARS: usize = 2;

/// Airports whose `"{code} {name}"` contains `query`, ignoring case.
pub fn match_airports<'a>(query: &str, refs: &'a [AirportRef]) -> Vec<&'a AirportRef> {
    filter(query, refs, AirportRef::search_text)
}

/// Carriers whose name contains `query`, ignoring case.
pub fn match_carriers<'a>(query: &str, refs: &'a [CarrierRef]) -> Vec<&'a CarrierRef> {
    filter(query, refs, |c| c.name.clone())
}

fn filter<'a, T, F>(query: &str, refs: &'a [T], text: F) -> Vec<&'a T>
where
    F: Fn(&T) -> String,
{
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    refs.iter()
        .filter(|r| text(*r).to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airports() -> Vec<AirportRef> {
        vec![
            AirportRef::new("GRU", "Guarulhos - Governador André Franco Montoro"),
            AirportRef::new("GIG", "Rio de Janeiro - Galeão"),
            AirportRef::new("CGH", "São Paulo - Congonhas"),
            AirportRef::new("SDU", "Rio de Janeiro - Santos Dumont"),
            AirportRef::new("BSB", "Brasília - Presidente Juscelino Kubitschek"),
            AirportRef::new("CNF", "Belo Horizonte - Confins"),
            AirportRef::new("VCP", "Campinas - Viracopos"),
            AirportRef::new("POA", "Porto Alegre - Salgado Filho"),
            AirportRef::new("REC", "Recife - Guararapes"),
            AirportRef::new("SSA", "Salvador - Deputado Luís Eduardo Magalhães"),
        ]
    }

    fn carriers() -> Vec<CarrierRef> {
        ["LATAM", "GOL", "AZUL", "PASSAREDO", "MAP", "TAP", "AMERICAN", "AVIANCA"]
            .into_iter()
            .map(CarrierRef::new)
            .collect()
    }

    fn codes(found: &[&AirportRef]) -> Vec<String> {
        found.iter().map(|a| a.iata_code.clone()).collect()
    }

    #[test]
    fn short_queries_match_nothing() {
        let refs = airports();
        for q in ["", "G", "r", "ã"] {
            assert!(match_airports(q, &refs).is_empty(), "{q:?}");
            assert!(match_carriers(q, &carriers()).is_empty(), "{q:?}");
        }
    }

    #[test]
    fn matches_code_case_insensitively() {
        let refs = airports();
        assert_eq!(codes(&match_airports("gru", &refs)), vec!["GRU"]);
        assert_eq!(codes(&match_airports("Gig", &refs)), vec!["GIG"]);
    }

    #[test]
    fn matches_full_name() {
        let refs = airports();
        assert_eq!(codes(&match_airports("rio de", &refs)), vec!["GIG", "SDU"]);
        assert_eq!(codes(&match_airports("GUAR", &refs)), vec!["GRU", "REC"]);
    }

    #[test]
    fn matches_accented_names() {
        let refs = airports();
        assert_eq!(codes(&match_airports("SÃO", &refs)), vec!["CGH"]);
    }

    #[test]
    fn match_spans_code_and_name() {
        let refs = airports();
        assert_eq!(codes(&match_airports("gru guar", &refs)), vec!["GRU"]);
    }

    #[test]
    fn results_capped_and_order_preserved() {
        let refs = airports();
        // " - " appears in every entry.
        let found = match_airports(" - ", &refs);
        assert_eq!(found.len(), MAX_SUGGESTIONS);
        assert_eq!(codes(&found), vec!["GRU", "GIG", "CGH", "SDU", "BSB", "CNF"]);
    }

    #[test]
    fn results_are_an_ordered_subsequence() {
        let refs = airports();
        for q in ["ri", "an", "sa", "co", "de", "zz"] {
            let found = match_airports(q, &refs);
            assert!(found.len() <= MAX_SUGGESTIONS);
            let positions: Vec<usize> = found
                .iter()
                .map(|f| refs.iter().position(|r| r == *f).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{q}: {positions:?}");
        }
    }

    #[test]
    fn carriers_match_by_name() {
        let refs = carriers();
        let names: Vec<_> = match_carriers("ta", &refs).iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["LATAM", "TAP"]);
        let names: Vec<_> = match_carriers("a", &refs).iter().map(|c| c.name.as_str()).collect();
        assert!(names.is_empty());
    }

    #[test]
    fn empty_reference_list_yields_nothing() {
        assert!(match_airports("GRU", &[]).is_empty());
        assert!(match_carriers("LATAM", &[]).is_empty());
    }
}
