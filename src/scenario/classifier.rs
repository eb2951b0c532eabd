//! Scenario classification over correlated event pairs.

use super::catalog::{known_good_sequences, sequence_steps, AnomalyPredicate};
use super::codec;
use crate::config::DetectorConfig;
use crate::model::{EditEvent, NodeIdentity};
use crate::pairing::EventPair;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ambient cursor-tracking state, sampled by the caller before the edit.
///
/// The classifier only reads this; the caller must refresh it after each
/// classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorState {
    /// Structural parent the cursor was in.
    pub parent: NodeIdentity,
    /// Offset within that parent.
    pub offset: u32,
}

/// Outcome of classifying one pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct DetectionResult {
    /// True iff at least one predicate triggered.
    pub is_abnormal: bool,
    /// The lowest-ranked triggered predicate, reported as the headline.
    pub primary: Option<AnomalyPredicate>,
    /// Every triggered predicate, in rank order.
    pub triggered: Vec<AnomalyPredicate>,
    /// Canonical scenario id; set only when abnormal.
    pub scenario_id: Option<String>,
    /// Human-readable description of the scenario; set only when abnormal.
    pub description: Option<String>,
    /// Multi-line summary of everything that triggered.
    pub detail: String,
}

/// Evaluates the full anomaly-predicate catalog against a pair.
///
/// Every predicate is evaluated on every call — no short-circuiting — and
/// none of them can fail: a predicate whose input is absent simply does not
/// trigger.
#[derive(Debug, Clone, Default)]
pub struct ScenarioClassifier {
    config: DetectorConfig,
}

impl ScenarioClassifier {
    /// Classifier with the reference thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: DetectorConfig::default(),
        }
    }

    /// Classifier with explicit thresholds.
    #[must_use]
    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Classify one pair against the whole catalog.
    ///
    /// `prior_cursor` is the caller's pre-edit cursor sample (for the jump
    /// predicate); `recent_events` the trailing slice of the caller's event
    /// log (for the sequence predicate). Both are optional: absence turns
    /// the respective predicates off, never into errors.
    pub fn classify(
        &self,
        pair: &EventPair,
        prior_cursor: Option<&CursorState>,
        recent_events: Option<&[EditEvent]>,
    ) -> DetectionResult {
        let mut triggered = Vec::new();
        for predicate in AnomalyPredicate::all() {
            if self.evaluate(*predicate, pair, prior_cursor, recent_events) {
                triggered.push(*predicate);
            }
        }

        let is_abnormal = !triggered.is_empty();
        let primary = triggered.first().copied();
        let (scenario_id, description) = if is_abnormal {
            let id = codec::encode(&triggered);
            let description = codec::describe(&id);
            (Some(id), Some(description))
        } else {
            (None, None)
        };
        let detail = render_detail(&triggered);

        if let Some(id) = &scenario_id {
            debug!(scenario = %id, predicates = triggered.len(), "abnormal pair classified");
        }

        DetectionResult {
            is_abnormal,
            primary,
            triggered,
            scenario_id,
            description,
            detail,
        }
    }

    fn evaluate(
        &self,
        predicate: AnomalyPredicate,
        pair: &EventPair,
        prior_cursor: Option<&CursorState>,
        recent_events: Option<&[EditEvent]>,
    ) -> bool {
        let intent = pair.intent.as_ref().and_then(EditEvent::as_intent);
        let commit = pair.commit.as_ref().and_then(EditEvent::as_commit);

        match predicate {
            AnomalyPredicate::DiscriminatorMismatch => match (intent, commit) {
                (Some(i), Some(c)) => i.discriminator != c.discriminator,
                _ => false,
            },
            AnomalyPredicate::ParentMismatch => match (intent, commit) {
                (Some(i), Some(c)) => match (i.parent, c.parent) {
                    (Some(left), Some(right)) => left != right,
                    _ => false,
                },
                _ => false,
            },
            AnomalyPredicate::NodeKindMismatch => match (intent, commit) {
                (Some(i), Some(c)) => match (&i.node_kind, &c.node_kind) {
                    (Some(left), Some(right)) => left != right,
                    _ => false,
                },
                _ => false,
            },
            AnomalyPredicate::CursorJump => match (commit, prior_cursor) {
                (Some(c), Some(prior)) => {
                    c.parent == Some(prior.parent)
                        && (i64::from(c.caret_offset) - i64::from(prior.offset)).unsigned_abs()
                            > u64::from(self.config.cursor_jump_threshold)
                }
                _ => false,
            },
            AnomalyPredicate::MissingIntent => commit.is_some() && intent.is_none(),
            AnomalyPredicate::MissingCommit => intent.is_some() && commit.is_none(),
            AnomalyPredicate::BoundaryHit => match commit {
                Some(c) if c.container == crate::model::ContainerKind::Inline => {
                    c.caret_offset == 0 || c.caret_offset as usize == c.text_len()
                }
                _ => false,
            },
            AnomalyPredicate::RangeSelection => {
                intent.is_some_and(|i| !i.selection.is_collapsed())
            }
            AnomalyPredicate::OffsetDrift => match (intent, commit) {
                (Some(i), Some(c)) => {
                    let (Some(offset), Some(data)) = (i.selection.caret_offset(), &i.data) else {
                        return false;
                    };
                    let expected = u64::from(offset) + data.chars().count() as u64;
                    (i64::from(c.caret_offset) - expected as i64).unsigned_abs()
                        > u64::from(self.config.offset_tolerance)
                }
                _ => false,
            },
            AnomalyPredicate::OffsetBeyondContent => commit.is_some_and(|c| {
                c.caret_offset as usize > c.text_len() + self.config.offset_tolerance as usize
            }),
            AnomalyPredicate::UnexpectedSequence => {
                let Some(events) = recent_events else {
                    return false;
                };
                let window_start = events.len().saturating_sub(self.config.history_window);
                let steps = sequence_steps(&events[window_start..]);
                if steps.is_empty() {
                    return false;
                }
                !known_good_sequences()
                    .iter()
                    .any(|shape| steps.ends_with(shape))
            }
        }
    }
}

fn render_detail(triggered: &[AnomalyPredicate]) -> String {
    if triggered.is_empty() {
        return "no anomaly predicates triggered".to_string();
    }
    let mut lines = vec![format!("{} anomaly predicate(s) triggered:", triggered.len())];
    for predicate in triggered {
        lines.push(format!(
            "  [{}] {}: {}",
            predicate.rank(),
            predicate.label(),
            predicate.description()
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CommitRecord, ContainerKind, EditEvent, IdentityRegistry, IntentRecord, Selection,
    };

    struct PairBuilder {
        intent: IntentRecord,
        commit: CommitRecord,
    }

    impl PairBuilder {
        fn new() -> Self {
            Self {
                intent: IntentRecord {
                    discriminator: "insertText".to_string(),
                    data: Some("x".to_string()),
                    parent: None,
                    node: None,
                    node_kind: Some("text".to_string()),
                    selection: Selection::Caret { offset: 3 },
                },
                commit: CommitRecord {
                    discriminator: "insertText".to_string(),
                    data: Some("x".to_string()),
                    parent: None,
                    node: None,
                    node_kind: Some("text".to_string()),
                    caret_offset: 4,
                    text: "abcx".to_string(),
                    container: ContainerKind::Block,
                },
            }
        }

        fn build(self) -> EventPair {
            EventPair::matched(
                EditEvent::intent(1, 100, self.intent),
                EditEvent::commit(2, 150, self.commit),
            )
        }
    }

    fn classify(pair: &EventPair) -> DetectionResult {
        ScenarioClassifier::new().classify(pair, None, None)
    }

    #[test]
    fn clean_insertion_is_normal() {
        let result = classify(&PairBuilder::new().build());
        assert!(!result.is_abnormal);
        assert!(result.triggered.is_empty());
        assert_eq!(result.scenario_id, None);
        assert_eq!(result.description, None);
        assert_eq!(result.primary, None);
        assert_eq!(result.detail, "no anomaly predicates triggered");
    }

    #[test]
    fn discriminator_mismatch_alone_is_scenario_1() {
        let mut builder = PairBuilder::new();
        builder.commit.discriminator = "insertCompositionText".to_string();
        let result = classify(&builder.build());

        assert!(result.is_abnormal);
        assert_eq!(result.triggered, vec![AnomalyPredicate::DiscriminatorMismatch]);
        assert_eq!(result.scenario_id.as_deref(), Some("1"));
        assert_eq!(result.primary, Some(AnomalyPredicate::DiscriminatorMismatch));
    }

    #[test]
    fn parent_mismatch_alone_is_scenario_2() {
        let mut registry: IdentityRegistry<u32> = IdentityRegistry::new();
        let p1 = registry.identity_of(&1);
        let p2 = registry.identity_of(&2);

        let mut builder = PairBuilder::new();
        builder.intent.parent = Some(p1);
        builder.commit.parent = Some(p2);
        let result = classify(&builder.build());

        assert_eq!(result.triggered, vec![AnomalyPredicate::ParentMismatch]);
        assert_eq!(result.scenario_id.as_deref(), Some("2"));
    }

    #[test]
    fn combined_conditions_yield_scenario_1_2() {
        let mut registry: IdentityRegistry<u32> = IdentityRegistry::new();
        let p1 = registry.identity_of(&1);
        let p2 = registry.identity_of(&2);

        let mut builder = PairBuilder::new();
        builder.commit.discriminator = "insertCompositionText".to_string();
        builder.intent.parent = Some(p1);
        builder.commit.parent = Some(p2);
        let result = classify(&builder.build());

        assert_eq!(result.scenario_id.as_deref(), Some("1.2"));
        // Headline is the lowest rank.
        assert_eq!(result.primary, Some(AnomalyPredicate::DiscriminatorMismatch));
        assert_eq!(result.triggered.len(), 2);
        assert!(result.detail.contains("[1]"));
        assert!(result.detail.contains("[2]"));
    }

    #[test]
    fn same_parent_on_both_sides_is_not_a_mismatch() {
        let mut registry: IdentityRegistry<u32> = IdentityRegistry::new();
        let p = registry.identity_of(&1);

        let mut builder = PairBuilder::new();
        builder.intent.parent = Some(p);
        builder.commit.parent = Some(p);
        assert!(!classify(&builder.build()).is_abnormal);
    }

    #[test]
    fn node_kind_mismatch_triggers_rank_3() {
        let mut builder = PairBuilder::new();
        builder.commit.node_kind = Some("element".to_string());
        let result = classify(&builder.build());
        assert_eq!(result.triggered, vec![AnomalyPredicate::NodeKindMismatch]);
    }

    #[test]
    fn cursor_jump_requires_prior_state_for_same_parent() {
        let mut registry: IdentityRegistry<u32> = IdentityRegistry::new();
        let parent = registry.identity_of(&1);
        let elsewhere = registry.identity_of(&2);

        let mut builder = PairBuilder::new();
        builder.commit.parent = Some(parent);
        builder.intent.parent = Some(parent);
        builder.commit.caret_offset = 40;
        builder.commit.text = "a".repeat(40);
        builder.intent.selection = Selection::Caret { offset: 39 };
        let pair = builder.build();

        let classifier = ScenarioClassifier::new();

        // No prior state: predicate stays off.
        assert!(!classifier.classify(&pair, None, None).is_abnormal);

        // Prior cursor in a different parent: still off.
        let foreign = CursorState {
            parent: elsewhere,
            offset: 2,
        };
        assert!(!classifier
            .classify(&pair, Some(&foreign), None)
            .is_abnormal);

        // Prior cursor in the same parent, further than the threshold.
        let prior = CursorState { parent, offset: 2 };
        let result = classifier.classify(&pair, Some(&prior), None);
        assert_eq!(result.triggered, vec![AnomalyPredicate::CursorJump]);

        // Within the threshold: off.
        let near = CursorState {
            parent,
            offset: 35,
        };
        assert!(!classifier.classify(&pair, Some(&near), None).is_abnormal);
    }

    #[test]
    fn commit_only_pair_flags_missing_intent() {
        let commit = PairBuilder::new().commit;
        let pair = EventPair::commit_only(EditEvent::commit(2, 150, commit));
        let result = classify(&pair);

        assert!(result.is_abnormal);
        assert!(result.triggered.contains(&AnomalyPredicate::MissingIntent));
        assert_eq!(result.primary, Some(AnomalyPredicate::MissingIntent));
    }

    #[test]
    fn intent_only_pair_flags_missing_commit() {
        let intent = PairBuilder::new().intent;
        let pair = EventPair::intent_only(EditEvent::intent(1, 100, intent));
        let result = classify(&pair);

        assert!(result.triggered.contains(&AnomalyPredicate::MissingCommit));
        // Offset predicates need the commit side; they must stay silent.
        assert!(!result.triggered.contains(&AnomalyPredicate::OffsetDrift));
        assert!(!result
            .triggered
            .contains(&AnomalyPredicate::OffsetBeyondContent));
    }

    #[test]
    fn boundary_hit_only_fires_in_inline_containers() {
        let mut builder = PairBuilder::new();
        builder.commit.caret_offset = 0;
        builder.intent.data = None;
        builder.intent.selection = Selection::Caret { offset: 0 };
        builder.commit.container = ContainerKind::Block;
        assert!(!classify(&builder.build()).is_abnormal);

        let mut builder = PairBuilder::new();
        builder.commit.caret_offset = 0;
        builder.intent.data = None;
        builder.intent.selection = Selection::Caret { offset: 0 };
        builder.commit.container = ContainerKind::Inline;
        let result = classify(&builder.build());
        assert_eq!(result.triggered, vec![AnomalyPredicate::BoundaryHit]);

        // End of content counts too.
        let mut builder = PairBuilder::new();
        builder.commit.container = ContainerKind::Inline;
        builder.commit.caret_offset = 4; // == len("abcx")
        let result = classify(&builder.build());
        assert_eq!(result.triggered, vec![AnomalyPredicate::BoundaryHit]);
    }

    #[test]
    fn range_selection_on_intent_triggers_rank_8() {
        let mut builder = PairBuilder::new();
        builder.intent.selection = Selection::Range {
            anchor: 1,
            focus: 4,
        };
        // A range selection is not a pure insertion; keep the drift
        // predicate out of the picture by construction.
        let result = classify(&builder.build());
        assert_eq!(result.triggered, vec![AnomalyPredicate::RangeSelection]);
    }

    #[test]
    fn offset_drift_beyond_tolerance_triggers_rank_9() {
        let mut builder = PairBuilder::new();
        // intent at 3 inserting one char: expected commit offset 4.
        builder.commit.caret_offset = 15;
        builder.commit.text = "a".repeat(15);
        let result = classify(&builder.build());
        assert_eq!(result.triggered, vec![AnomalyPredicate::OffsetDrift]);

        // Within tolerance (reference 5): off.
        let mut builder = PairBuilder::new();
        builder.commit.caret_offset = 8;
        builder.commit.text = "a".repeat(8);
        assert!(!classify(&builder.build()).is_abnormal);
    }

    #[test]
    fn offset_beyond_content_triggers_rank_10() {
        let mut builder = PairBuilder::new();
        builder.commit.caret_offset = 20; // text is 4 chars, tolerance 5
        let result = classify(&builder.build());
        assert!(result
            .triggered
            .contains(&AnomalyPredicate::OffsetBeyondContent));
    }

    #[test]
    fn unexpected_sequence_triggers_rank_11() {
        let pair = PairBuilder::new().build();
        let classifier = ScenarioClassifier::new();

        // A plain commit tail is a known-good shape.
        let good = vec![
            EditEvent::other(1, 10, "selectionchange"),
            EditEvent::commit(
                2,
                20,
                CommitRecord {
                    discriminator: "insertText".to_string(),
                    data: None,
                    parent: None,
                    node: None,
                    node_kind: None,
                    caret_offset: 0,
                    text: String::new(),
                    container: ContainerKind::Block,
                },
            ),
        ];
        assert!(!classifier.classify(&pair, None, Some(good.as_slice())).is_abnormal);

        // A dangling composition start matches nothing.
        let bad = vec![
            EditEvent::other(1, 10, "compositionstart"),
            EditEvent::other(2, 20, "selectionchange"),
        ];
        let result = classifier.classify(&pair, None, Some(bad.as_slice()));
        assert_eq!(result.triggered, vec![AnomalyPredicate::UnexpectedSequence]);

        // Absent or empty history keeps the predicate off.
        assert!(!classifier.classify(&pair, None, Some(&[][..])).is_abnormal);
        assert!(!classifier.classify(&pair, None, None).is_abnormal);
    }

    #[test]
    fn full_composition_sequence_is_known_good() {
        let pair = PairBuilder::new().build();
        let history = vec![
            EditEvent::other(1, 10, "selectionchange"),
            EditEvent::other(2, 20, "compositionstart"),
            EditEvent::other(3, 30, "compositionupdate"),
            EditEvent::other(4, 35, "compositionupdate"),
            EditEvent::other(5, 40, "compositionend"),
        ];
        let result = ScenarioClassifier::new().classify(&pair, None, Some(history.as_slice()));
        assert!(!result.is_abnormal);
    }

    #[test]
    fn history_window_bounds_the_inspected_tail() {
        let pair = PairBuilder::new().build();
        let config = DetectorConfig::builder().history_window(2).build();
        let classifier = ScenarioClassifier::with_config(config);

        // The garbage is older than the window; the tail is a clean
        // selection-change + commit.
        let mut history = vec![
            EditEvent::other(1, 10, "pointermove"),
            EditEvent::other(2, 15, "pointermove"),
        ];
        history.push(EditEvent::other(3, 20, "selectionchange"));
        history.push(EditEvent::commit(
            4,
            30,
            CommitRecord {
                discriminator: "insertText".to_string(),
                data: None,
                parent: None,
                node: None,
                node_kind: None,
                caret_offset: 0,
                text: String::new(),
                container: ContainerKind::Block,
            },
        ));
        let result = classifier.classify(&pair, None, Some(history.as_slice()));
        assert!(!result.is_abnormal);
    }

    #[test]
    fn all_predicates_are_evaluated_not_short_circuited() {
        // Build a pair that trips a broad range of predicates at once.
        let mut registry: IdentityRegistry<u32> = IdentityRegistry::new();
        let p1 = registry.identity_of(&1);
        let p2 = registry.identity_of(&2);

        let mut builder = PairBuilder::new();
        builder.commit.discriminator = "insertCompositionText".to_string();
        builder.intent.parent = Some(p1);
        builder.commit.parent = Some(p2);
        builder.commit.node_kind = Some("element".to_string());
        builder.intent.selection = Selection::Range {
            anchor: 0,
            focus: 2,
        };
        builder.commit.caret_offset = 99;
        builder.commit.container = ContainerKind::Inline;
        let result = classify(&builder.build());

        assert_eq!(
            result.triggered,
            vec![
                AnomalyPredicate::DiscriminatorMismatch,
                AnomalyPredicate::ParentMismatch,
                AnomalyPredicate::NodeKindMismatch,
                AnomalyPredicate::RangeSelection,
                AnomalyPredicate::OffsetBeyondContent,
            ]
        );
        assert_eq!(result.scenario_id.as_deref(), Some("1.2.3.8.10"));
        assert_eq!(result.primary, Some(AnomalyPredicate::DiscriminatorMismatch));
    }
}
