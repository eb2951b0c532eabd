//! Scenario identifier codec.
//!
//! A scenario id is the canonical, round-trippable form of a triggered
//! predicate set: `"0"` for the empty set, otherwise the ranks sorted
//! ascending and joined with `.` — `"1.2"` for discriminator plus parent
//! mismatch. Decoding skips unknown numerals so ids from newer catalogs
//! still decode to their known subset.

use super::catalog::AnomalyPredicate;

/// Scenario id of the empty predicate set.
pub const NORMAL_SCENARIO_ID: &str = "0";

/// Description of the empty predicate set.
pub const NORMAL_LABEL: &str = "normal editing flow";

/// Encode a predicate set into its canonical scenario id.
///
/// Duplicates collapse; order of the input is irrelevant.
#[must_use]
pub fn encode(predicates: &[AnomalyPredicate]) -> String {
    let mut ranks: Vec<u8> = predicates.iter().map(AnomalyPredicate::rank).collect();
    ranks.sort_unstable();
    ranks.dedup();
    if ranks.is_empty() {
        return NORMAL_SCENARIO_ID.to_string();
    }
    ranks
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

/// Decode a scenario id back into its predicate set, in rank order.
///
/// Unknown or malformed numerals are skipped silently, never erroring;
/// `"0"` (and any unrecognized id) decodes to the empty set.
#[must_use]
pub fn decode(id: &str) -> Vec<AnomalyPredicate> {
    let mut predicates: Vec<AnomalyPredicate> = id
        .split('.')
        .filter_map(|part| part.trim().parse::<u8>().ok())
        .filter_map(AnomalyPredicate::from_rank)
        .collect();
    predicates.sort_unstable_by_key(AnomalyPredicate::rank);
    predicates.dedup();
    predicates
}

/// Human-readable description of a scenario id: the predicate labels joined
/// with `" + "`, or the fixed normal label for `"0"`.
#[must_use]
pub fn describe(id: &str) -> String {
    let predicates = decode(id);
    if predicates.is_empty() {
        return NORMAL_LABEL.to_string();
    }
    predicates
        .iter()
        .map(|p| p.label())
        .collect::<Vec<_>>()
        .join(" + ")
}
