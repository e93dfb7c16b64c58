//! Country search over the canonical reference list.

use crate::data::YearSnapshot;
use crate::reference::{CountryRef, COUNTRIES};

/// Suggestion panels never grow past this.
pub const MAX_SUGGESTIONS: usize = 6;

/// Lazy suggestion sequence for a free-text query.
///
/// Case-insensitive substring match on the canonical French names, restricted
/// to countries present in the active snapshot, in reference-list order (no
/// relevance ranking). At most [`MAX_SUGGESTIONS`] items; an empty query
/// yields nothing.
pub fn suggestions<'a>(
    query: &str,
    snapshot: &'a YearSnapshot,
) -> impl Iterator<Item = &'static CountryRef> + 'a {
    let needle = query.to_lowercase();
    COUNTRIES
        .iter()
        .filter(move |c| {
            !needle.is_empty()
                && c.name.to_lowercase().contains(&needle)
                && snapshot.countries.contains_key(c.iso)
        })
        .take(MAX_SUGGESTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CountryRecord, YearTotals};

    fn snapshot(codes: &[&str]) -> YearSnapshot {
        YearSnapshot {
            countries: codes
                .iter()
                .map(|iso| {
                    (
                        iso.to_string(),
                        CountryRecord {
                            name: String::new(),
                            apd: 0.0,
                            napd: 0.0,
                            total: 1.0,
                        },
                    )
                })
                .collect(),
            totals: YearTotals {
                apd: 0.0,
                napd: 0.0,
                total: 0.0,
                country_count: codes.len() as u32,
            },
        }
    }

    #[test]
    fn empty_query_yields_nothing() {
        let snap = snapshot(&["TGO", "USA"]);
        assert_eq!(suggestions("", &snap).count(), 0);
    }

    #[test]
    fn no_match_yields_nothing() {
        let snap = snapshot(&["TGO"]);
        assert_eq!(suggestions("zzzz", &snap).count(), 0);
    }

    #[test]
    fn capped_at_six_in_reference_order() {
        // The first ten reference entries all contain an "a".
        let codes: Vec<&str> = COUNTRIES.iter().take(10).map(|c| c.iso).collect();
        let snap = snapshot(&codes);
        let hits: Vec<&str> = suggestions("a", &snap).map(|c| c.iso).collect();
        assert_eq!(hits.len(), MAX_SUGGESTIONS);
        assert_eq!(hits, codes[..MAX_SUGGESTIONS].to_vec());
    }

    #[test]
    fn filtered_to_countries_present_in_snapshot() {
        // "al" matches both Albanie and Algérie; only Albanie has data.
        let snap = snapshot(&["ALB"]);
        let hits: Vec<&str> = suggestions("al", &snap).map(|c| c.iso).collect();
        assert_eq!(hits, vec!["ALB"]);
    }

    #[test]
    fn matching_is_case_insensitive_and_accent_aware() {
        let snap = snapshot(&["DZA", "BEN"]);
        assert_eq!(suggestions("ALGÉRIE", &snap).count(), 1);
        assert_eq!(suggestions("bé", &snap).map(|c| c.iso).next(), Some("BEN"));
    }

    #[test]
    fn restartable_sequence() {
        let snap = snapshot(&["TGO"]);
        let hits1: Vec<&str> = suggestions("togo", &snap).map(|c| c.name).collect();
        let hits2: Vec<&str> = suggestions("togo", &snap).map(|c| c.name).collect();
        assert_eq!(hits1, hits2);
        assert_eq!(hits1, vec!["Togo"]);
    }
}
