//! Edit events observed on the surface.
//!
//! An event stream mixes three kinds: *intent* events fired before a
//! mutation, *commit* events fired after the tree has actually changed, and
//! *other* events (selection changes, composition lifecycle) that never pair
//! but still matter for sequence analysis.
//!
//! The payload is a tagged union so that kind-specific requirements are
//! enforced by construction: a commit always carries its live text and caret
//! offset, an intent always carries its selection. Host adapters own the
//! bounded event log and the id/timestamp assignment; this crate only reads
//! events.

use super::identity::NodeIdentity;
use serde::{Deserialize, Serialize};

/// Coarse event kind, derived from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Intent,
    Commit,
    Other,
}

/// Whether the container element lays out inline or as a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    Inline,
    Block,
}

/// Cursor selection carried by an intent event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Selection {
    /// A collapsed selection at a single offset.
    Caret { offset: u32 },
    /// A non-collapsed selection spanning `anchor..focus`.
    Range { anchor: u32, focus: u32 },
}

impl Selection {
    /// True for a caret, or for a range whose endpoints coincide.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        match self {
            Self::Caret { .. } => true,
            Self::Range { anchor, focus } => anchor == focus,
        }
    }

    /// The caret offset, when the selection is collapsed.
    #[must_use]
    pub fn caret_offset(&self) -> Option<u32> {
        match self {
            Self::Caret { offset } => Some(*offset),
            Self::Range { anchor, focus } if anchor == focus => Some(*anchor),
            Self::Range { .. } => None,
        }
    }
}

/// Pre-mutation notification describing a proposed edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentRecord {
    /// Edit operation discriminator, e.g. `insertText`.
    pub discriminator: String,
    /// Proposed payload data, when the operation carries any.
    pub data: Option<String>,
    /// Identity of the structural parent the edit targets.
    pub parent: Option<NodeIdentity>,
    /// Identity of the targeted leaf.
    pub node: Option<NodeIdentity>,
    /// Type name of the targeted leaf, as reported by the host.
    pub node_kind: Option<String>,
    /// Selection state at intent time.
    pub selection: Selection,
}

/// Post-mutation notification fired after the tree has changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Edit operation discriminator, e.g. `insertText`.
    pub discriminator: String,
    /// Committed payload data, when the operation carries any.
    pub data: Option<String>,
    /// Identity of the structural parent that was mutated.
    pub parent: Option<NodeIdentity>,
    /// Identity of the mutated leaf.
    pub node: Option<NodeIdentity>,
    /// Type name of the mutated leaf, as reported by the host.
    pub node_kind: Option<String>,
    /// Caret offset after the mutation.
    pub caret_offset: u32,
    /// The leaf's live text content at commit time.
    pub text: String,
    /// Layout kind of the containing element.
    pub container: ContainerKind,
}

impl CommitRecord {
    /// Length of the committed text in characters.
    #[must_use]
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Any event that is neither an intent nor a commit.
///
/// Selection changes and composition lifecycle events land here; they are
/// ignored for pairing but feed the sequence predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherRecord {
    /// Host event name, e.g. `selectionchange` or `compositionstart`.
    pub discriminator: String,
}

/// Kind-specific event payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EventPayload {
    Intent(IntentRecord),
    Commit(CommitRecord),
    Other(OtherRecord),
}

/// One immutable observation from the surface's event stream.
///
/// `id` and `timestamp` are host-assigned; timestamps share one monotonic
/// clock domain across the whole stream (milliseconds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditEvent {
    pub id: u64,
    pub timestamp: u64,
    pub payload: EventPayload,
}

impl EditEvent {
    pub fn intent(id: u64, timestamp: u64, record: IntentRecord) -> Self {
        Self {
            id,
            timestamp,
            payload: EventPayload::Intent(record),
        }
    }

    pub fn commit(id: u64, timestamp: u64, record: CommitRecord) -> Self {
        Self {
            id,
            timestamp,
            payload: EventPayload::Commit(record),
        }
    }

    pub fn other(id: u64, timestamp: u64, discriminator: impl Into<String>) -> Self {
        Self {
            id,
            timestamp,
            payload: EventPayload::Other(OtherRecord {
                discriminator: discriminator.into(),
            }),
        }
    }

    /// Coarse kind of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match &self.payload {
            EventPayload::Intent(_) => EventKind::Intent,
            EventPayload::Commit(_) => EventKind::Commit,
            EventPayload::Other(_) => EventKind::Other,
        }
    }

    /// The event's discriminator, regardless of kind.
    #[must_use]
    pub fn discriminator(&self) -> &str {
        match &self.payload {
            EventPayload::Intent(record) => &record.discriminator,
            EventPayload::Commit(record) => &record.discriminator,
            EventPayload::Other(record) => &record.discriminator,
        }
    }

    /// The payload data, for kinds that carry any.
    #[must_use]
    pub fn data(&self) -> Option<&str> {
        match &self.payload {
            EventPayload::Intent(record) => record.data.as_deref(),
            EventPayload::Commit(record) => record.data.as_deref(),
            EventPayload::Other(_) => None,
        }
    }

    /// The intent record, when this is an intent event.
    #[must_use]
    pub fn as_intent(&self) -> Option<&IntentRecord> {
        match &self.payload {
            EventPayload::Intent(record) => Some(record),
            _ => None,
        }
    }

    /// The commit record, when this is a commit event.
    #[must_use]
    pub fn as_commit(&self) -> Option<&CommitRecord> {
        match &self.payload {
            EventPayload::Commit(record) => Some(record),
            _ => None,
        }
    }
}
