//! Pair extraction over a time-sorted event list.

use super::result::EventPair;
use crate::config::DetectorConfig;
use crate::model::{EditEvent, EventKind};
use tracing::{debug, trace};

/// Matches intent and commit events 1:1 under a time-window heuristic.
///
/// The input list must be chronologically sorted; that is what makes the
/// early exit past the window sound. `Other`-kind events never pair and
/// pass through untouched in the caller's log.
#[derive(Debug, Clone)]
pub struct PairingEngine {
    window_ms: u64,
}

impl PairingEngine {
    /// Engine with the reference 200 ms window.
    #[must_use]
    pub fn new() -> Self {
        Self {
            window_ms: DetectorConfig::default().pair_window_ms,
        }
    }

    /// Engine with an explicit window.
    #[must_use]
    pub fn with_window(window_ms: u64) -> Self {
        Self { window_ms }
    }

    /// Engine using a configuration's window.
    #[must_use]
    pub fn from_config(config: &DetectorConfig) -> Self {
        Self {
            window_ms: config.pair_window_ms,
        }
    }

    /// The pairing window in milliseconds.
    #[must_use]
    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Extract pairs from a chronologically sorted event list.
    ///
    /// Two claiming passes, then a sweep for leftovers:
    /// 1. each unpaired intent scans forward for the nearest unpaired
    ///    commit with `0 <= delta < window`, stopping once a candidate
    ///    exceeds the window;
    /// 2. each still-unclaimed commit scans backward for the nearest
    ///    unclaimed intent under the same window;
    /// 3. every remaining intent or commit becomes a half-pair with
    ///    `timestamp_delta = -1`.
    ///
    /// Every intent and commit event lands in exactly one returned pair,
    /// on exactly one side. Pairs are emitted in the order of their
    /// earliest member.
    pub fn extract_pairs(&self, events: &[EditEvent]) -> Vec<EventPair> {
        debug_assert!(
            events.windows(2).all(|w| w[0].timestamp <= w[1].timestamp),
            "event list must be chronologically sorted"
        );

        // commit index claimed by an intent index, and the reverse view.
        let mut commit_of: Vec<Option<usize>> = vec![None; events.len()];
        let mut claimed_commit = vec![false; events.len()];
        let mut claimed_intent = vec![false; events.len()];

        // Pass 1: intents claim forward.
        for i in 0..events.len() {
            if events[i].kind() != EventKind::Intent {
                continue;
            }
            for (j, candidate) in events.iter().enumerate().skip(i + 1) {
                if candidate.kind() != EventKind::Commit || claimed_commit[j] {
                    continue;
                }
                if candidate.timestamp < events[i].timestamp {
                    continue;
                }
                let delta = candidate.timestamp - events[i].timestamp;
                if delta >= self.window_ms {
                    // Sorted input: every later commit is even further away.
                    break;
                }
                commit_of[i] = Some(j);
                claimed_commit[j] = true;
                claimed_intent[i] = true;
                trace!(intent = events[i].id, commit = candidate.id, delta, "paired forward");
                break;
            }
        }

        // Pass 2: unclaimed commits look backward.
        for j in 0..events.len() {
            if events[j].kind() != EventKind::Commit || claimed_commit[j] {
                continue;
            }
            for i in (0..j).rev() {
                if events[i].kind() != EventKind::Intent || claimed_intent[i] {
                    continue;
                }
                if events[i].timestamp > events[j].timestamp {
                    continue;
                }
                let delta = events[j].timestamp - events[i].timestamp;
                if delta >= self.window_ms {
                    break;
                }
                commit_of[i] = Some(j);
                claimed_commit[j] = true;
                claimed_intent[i] = true;
                trace!(intent = events[i].id, commit = events[j].id, delta, "paired backward");
                break;
            }
        }

        // Emit in order of the earliest member of each pair.
        let mut pairs = Vec::new();
        for (index, event) in events.iter().enumerate() {
            match event.kind() {
                EventKind::Intent => match commit_of[index] {
                    Some(j) => pairs.push(EventPair::matched(event.clone(), events[j].clone())),
                    None => pairs.push(EventPair::intent_only(event.clone())),
                },
                EventKind::Commit => {
                    if !claimed_commit[index] {
                        pairs.push(EventPair::commit_only(event.clone()));
                    }
                }
                EventKind::Other => {}
            }
        }

        debug!(
            events = events.len(),
            pairs = pairs.len(),
            window_ms = self.window_ms,
            "pair extraction complete"
        );
        pairs
    }
}

impl Default for PairingEngine {
    fn default() -> Self {
        Self::new()
    }
}
