//! Anomaly scenario classification and identification.
//!
//! A correlated event pair is evaluated against a fixed, ordered catalog of
//! anomaly predicates; the triggered set is encoded into a compact,
//! canonical, round-trippable scenario identifier.

mod catalog;
mod classifier;
mod codec;

pub use catalog::{
    known_good_sequences, sequence_steps, AnomalyPredicate, SequenceStep,
};
pub use classifier::{CursorState, DetectionResult, ScenarioClassifier};
pub use codec::{decode, describe, encode, NORMAL_LABEL, NORMAL_SCENARIO_ID};
