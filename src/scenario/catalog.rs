//! The anomaly-predicate catalog and the known-good sequence table.
//!
//! Both catalogs are data: the classifier walks them, and tests exercise
//! each entry on its own. Ranks are stable — they are the wire format of
//! scenario identifiers — so new predicates may only be appended, never
//! renumbered.

use crate::model::{EditEvent, EventKind};
use serde::{Deserialize, Serialize};

/// One anomaly predicate from the fixed 11-member catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyPredicate {
    /// Intent and commit disagree on the edit discriminator.
    DiscriminatorMismatch,
    /// Intent and commit resolve to different structural parents.
    ParentMismatch,
    /// The leaf's type name differs between intent and commit.
    NodeKindMismatch,
    /// The cursor moved further than the threshold within one parent.
    CursorJump,
    /// A commit arrived with no pre-mutation intent.
    MissingIntent,
    /// An intent never produced a commit.
    MissingCommit,
    /// The caret sits exactly on a content boundary of an inline container.
    BoundaryHit,
    /// The intent carried a non-collapsed (range) selection.
    RangeSelection,
    /// The commit offset drifted from the expected insertion point.
    OffsetDrift,
    /// The commit offset points beyond the commit's own text.
    OffsetBeyondContent,
    /// The recent event sequence matches no known-good shape.
    UnexpectedSequence,
}

impl AnomalyPredicate {
    /// Stable rank used for canonical ordering and scenario identifiers.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::DiscriminatorMismatch => 1,
            Self::ParentMismatch => 2,
            Self::NodeKindMismatch => 3,
            Self::CursorJump => 4,
            Self::MissingIntent => 5,
            Self::MissingCommit => 6,
            Self::BoundaryHit => 7,
            Self::RangeSelection => 8,
            Self::OffsetDrift => 9,
            Self::OffsetBeyondContent => 10,
            Self::UnexpectedSequence => 11,
        }
    }

    /// The predicate with the given rank, if any.
    #[must_use]
    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.rank() == rank)
    }

    /// Human-readable label, used in scenario descriptions.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::DiscriminatorMismatch => "intent/commit discriminator mismatch",
            Self::ParentMismatch => "structural parent changed between intent and commit",
            Self::NodeKindMismatch => "node kind changed between intent and commit",
            Self::CursorJump => "cursor jumped beyond threshold",
            Self::MissingIntent => "commit without intent",
            Self::MissingCommit => "intent without commit",
            Self::BoundaryHit => "caret at inline container boundary",
            Self::RangeSelection => "non-collapsed selection on intent",
            Self::OffsetDrift => "commit offset drifted from expected insertion point",
            Self::OffsetBeyondContent => "commit offset beyond reported content",
            Self::UnexpectedSequence => "unexpected recent event sequence",
        }
    }

    /// What the predicate checks, for diagnostics output.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::DiscriminatorMismatch => {
                "the committed operation differs from the one the intent proposed"
            }
            Self::ParentMismatch => {
                "the mutation landed under a different structural parent than intended"
            }
            Self::NodeKindMismatch => "the mutated leaf is of a different kind than the target",
            Self::CursorJump => {
                "the cursor position within the parent moved further than a single edit explains"
            }
            Self::MissingIntent => "the tree changed without a preceding pre-mutation notification",
            Self::MissingCommit => "a proposed edit never materialized in the tree",
            Self::BoundaryHit => {
                "the caret landed exactly on the start or end of an inline container's content"
            }
            Self::RangeSelection => "the edit replaced a range rather than inserting at a caret",
            Self::OffsetDrift => {
                "the post-edit caret is not where a pure insertion would have left it"
            }
            Self::OffsetBeyondContent => "the reported caret lies outside the committed text",
            Self::UnexpectedSequence => {
                "the surrounding event flow matches no known editing pattern"
            }
        }
    }

    /// The full catalog in rank order.
    #[must_use]
    pub const fn all() -> &'static [AnomalyPredicate; 11] {
        &[
            Self::DiscriminatorMismatch,
            Self::ParentMismatch,
            Self::NodeKindMismatch,
            Self::CursorJump,
            Self::MissingIntent,
            Self::MissingCommit,
            Self::BoundaryHit,
            Self::RangeSelection,
            Self::OffsetDrift,
            Self::OffsetBeyondContent,
            Self::UnexpectedSequence,
        ]
    }
}

/// One step of a coarse event-flow shape, derived from an event's kind and
/// discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceStep {
    SelectionChange,
    CompositionStart,
    CompositionUpdate,
    CompositionEnd,
    Commit,
    Unknown,
}

impl SequenceStep {
    /// Derive the step for one event.
    ///
    /// Intents return `None`: they always accompany a commit and carry no
    /// flow information of their own.
    #[must_use]
    pub fn of(event: &EditEvent) -> Option<Self> {
        match event.kind() {
            EventKind::Intent => None,
            EventKind::Commit => Some(Self::Commit),
            EventKind::Other => Some(match event.discriminator() {
                "selectionchange" => Self::SelectionChange,
                "compositionstart" => Self::CompositionStart,
                "compositionupdate" => Self::CompositionUpdate,
                "compositionend" => Self::CompositionEnd,
                _ => Self::Unknown,
            }),
        }
    }
}

/// Known-good trailing shapes of an event flow: a plain commit, a commit
/// preceded by a selection change, and the full composition sequence with
/// or without a leading selection change.
#[must_use]
pub fn known_good_sequences() -> &'static [&'static [SequenceStep]] {
    use SequenceStep::{Commit, CompositionEnd, CompositionStart, CompositionUpdate, SelectionChange};
    &[
        &[Commit],
        &[SelectionChange, Commit],
        &[CompositionStart, CompositionUpdate, CompositionEnd],
        &[SelectionChange, CompositionStart, CompositionUpdate, CompositionEnd],
    ]
}

/// Project a window of events onto flow steps.
///
/// Intents are dropped and consecutive `CompositionUpdate` steps collapse
/// into one, so that update bursts of any length match the catalog shapes.
#[must_use]
pub fn sequence_steps(events: &[EditEvent]) -> Vec<SequenceStep> {
    let mut steps: Vec<SequenceStep> = Vec::new();
    for event in events {
        let Some(step) = SequenceStep::of(event) else {
            continue;
        };
        if step == SequenceStep::CompositionUpdate
            && steps.last() == Some(&SequenceStep::CompositionUpdate)
        {
            continue;
        }
        steps.push(step);
    }
    steps
}
