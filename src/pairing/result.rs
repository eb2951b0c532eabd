//! Event pair structures.

use crate::model::EditEvent;
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// `timestamp_delta` value for a pair missing one side.
pub const UNPAIRED_DELTA: i64 = -1;

/// One correlated intent/commit pair, or a half-pair when a side is
/// missing.
///
/// A pair never reuses an event already claimed by another pair. The
/// `pair_key` is a stable string over both timestamps and both
/// discriminator/data payloads, usable as an external cache key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct EventPair {
    pub intent: Option<EditEvent>,
    pub commit: Option<EditEvent>,
    pub pair_key: String,
    /// True iff both sides are present and their discriminators differ.
    pub kind_mismatch: bool,
    /// `commit.timestamp - intent.timestamp`, or [`UNPAIRED_DELTA`] when
    /// either side is missing.
    pub timestamp_delta: i64,
}

impl EventPair {
    /// Build a matched pair from both sides.
    pub fn matched(intent: EditEvent, commit: EditEvent) -> Self {
        let delta = commit.timestamp as i64 - intent.timestamp as i64;
        let kind_mismatch = intent.discriminator() != commit.discriminator();
        let pair_key = pair_key(Some(&intent), Some(&commit));
        Self {
            intent: Some(intent),
            commit: Some(commit),
            pair_key,
            kind_mismatch,
            timestamp_delta: delta,
        }
    }

    /// Build a half-pair for an intent that never committed.
    pub fn intent_only(intent: EditEvent) -> Self {
        let pair_key = pair_key(Some(&intent), None);
        Self {
            intent: Some(intent),
            commit: None,
            pair_key,
            kind_mismatch: false,
            timestamp_delta: UNPAIRED_DELTA,
        }
    }

    /// Build a half-pair for a commit without a matching intent.
    pub fn commit_only(commit: EditEvent) -> Self {
        let pair_key = pair_key(None, Some(&commit));
        Self {
            intent: None,
            commit: Some(commit),
            pair_key,
            kind_mismatch: false,
            timestamp_delta: UNPAIRED_DELTA,
        }
    }

    /// True when both sides are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.intent.is_some() && self.commit.is_some()
    }

    /// Compact 64-bit form of the pair key.
    #[must_use]
    pub fn pair_key_hash(&self) -> u64 {
        xxh3_64(self.pair_key.as_bytes())
    }
}

fn side_key(event: Option<&EditEvent>) -> String {
    match event {
        Some(event) => format!(
            "{}:{}:{}",
            event.timestamp,
            event.discriminator(),
            event.data().unwrap_or("-")
        ),
        None => "-".to_string(),
    }
}

fn pair_key(intent: Option<&EditEvent>, commit: Option<&EditEvent>) -> String {
    format!("i[{}]|c[{}]", side_key(intent), side_key(commit))
}

/// Counts over a pair list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingSummary {
    pub total: usize,
    pub matched: usize,
    pub intent_only: usize,
    pub commit_only: usize,
    pub kind_mismatches: usize,
}

impl PairingSummary {
    /// Tally a pair list.
    #[must_use]
    pub fn from_pairs(pairs: &[EventPair]) -> Self {
        let mut summary = Self {
            total: pairs.len(),
            ..Self::default()
        };
        for pair in pairs {
            match (&pair.intent, &pair.commit) {
                (Some(_), Some(_)) => summary.matched += 1,
                (Some(_), None) => summary.intent_only += 1,
                (None, Some(_)) => summary.commit_only += 1,
                (None, None) => {}
            }
            if pair.kind_mismatch {
                summary.kind_mismatches += 1;
            }
        }
        summary
    }
}
