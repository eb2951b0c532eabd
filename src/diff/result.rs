//! Diff result structures.

use crate::model::{NodeDescriptor, NodeIdentity};
use crate::tree::Rect;
use serde::{Deserialize, Serialize};

/// How a node changed between the before and after snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// Present before, absent after.
    Deleted,
    /// Absent before, present after.
    Added,
    /// Same place in the structure, different text.
    Modified,
    /// Same text, different parent signature.
    Moved,
}

impl ChangeType {
    /// Short human label, e.g. for log lines.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Deleted => "deleted",
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Moved => "moved",
        }
    }
}

/// One changed node.
///
/// Exactly one of `before`/`after` is set for `Deleted`/`Added`; both are
/// set for `Modified`/`Moved`. `regions` is populated only on `Added`
/// entries, and only when a geometry capability is available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct DiffEntry<K> {
    pub change: ChangeType,
    pub before: Option<NodeDescriptor<K>>,
    pub after: Option<NodeDescriptor<K>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<Rect>,
}

impl<K> DiffEntry<K> {
    pub fn deleted(before: NodeDescriptor<K>) -> Self {
        Self {
            change: ChangeType::Deleted,
            before: Some(before),
            after: None,
            regions: Vec::new(),
        }
    }

    pub fn added(after: NodeDescriptor<K>, regions: Vec<Rect>) -> Self {
        Self {
            change: ChangeType::Added,
            before: None,
            after: Some(after),
            regions,
        }
    }

    pub fn modified(before: NodeDescriptor<K>, after: NodeDescriptor<K>) -> Self {
        Self {
            change: ChangeType::Modified,
            before: Some(before),
            after: Some(after),
            regions: Vec::new(),
        }
    }

    pub fn moved(before: NodeDescriptor<K>, after: NodeDescriptor<K>) -> Self {
        Self {
            change: ChangeType::Moved,
            before: Some(before),
            after: Some(after),
            regions: Vec::new(),
        }
    }

    /// Identity of the changed node, whichever side carries it.
    ///
    /// # Panics
    ///
    /// Never: construction guarantees at least one side is present.
    #[must_use]
    pub fn identity(&self) -> NodeIdentity {
        self.before
            .as_ref()
            .or(self.after.as_ref())
            .map(|descriptor| descriptor.identity)
            .expect("a diff entry always has at least one side")
    }
}

/// Per-change-type counts for a diff result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub deleted: usize,
    pub added: usize,
    pub modified: usize,
    pub moved: usize,
}

impl DiffSummary {
    /// Tally entries by change type.
    #[must_use]
    pub fn from_entries<K>(entries: &[DiffEntry<K>]) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            match entry.change {
                ChangeType::Deleted => summary.deleted += 1,
                ChangeType::Added => summary.added += 1,
                ChangeType::Modified => summary.modified += 1,
                ChangeType::Moved => summary.moved += 1,
            }
        }
        summary
    }

    /// Total number of changed nodes.
    #[must_use]
    pub fn total(&self) -> usize {
        self.deleted + self.added + self.modified + self.moved
    }

    /// True when nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
