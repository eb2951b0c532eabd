//! Point-in-time structural snapshots.

use super::descriptor::NodeDescriptor;
use super::identity::NodeIdentity;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;
use xxhash_rust::xxh3::Xxh3;

/// One full traversal of the surface at one instant: an insertion-ordered
/// map from node identity to descriptor.
///
/// Snapshots are immutable once built and always compared pairwise (before,
/// after). The entry order is the document order of the capture walk, which
/// makes diff output order deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<K> {
    entries: IndexMap<NodeIdentity, NodeDescriptor<K>>,
    content_hash: u64,
}

impl<K: Clone + Eq + Hash> Snapshot<K> {
    /// Build a snapshot from descriptors in document order.
    ///
    /// Normally produced by [`build_snapshot`](crate::capture::build_snapshot);
    /// public so hosts and tests can assemble snapshots from other sources.
    /// A duplicate identity keeps the first descriptor observed.
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = NodeDescriptor<K>>) -> Self {
        let mut entries = IndexMap::new();
        for descriptor in descriptors {
            entries.entry(descriptor.identity).or_insert(descriptor);
        }
        let content_hash = hash_entries(&entries);
        Self {
            entries,
            content_hash,
        }
    }

    /// Descriptor for `identity`, if the snapshot observed it.
    #[must_use]
    pub fn get(&self, identity: NodeIdentity) -> Option<&NodeDescriptor<K>> {
        self.entries.get(&identity)
    }

    /// True when the snapshot observed `identity`.
    #[must_use]
    pub fn contains(&self, identity: NodeIdentity) -> bool {
        self.entries.contains_key(&identity)
    }

    /// Descriptors in document order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeDescriptor<K>> {
        self.entries.values()
    }

    /// Identities in document order.
    pub fn identities(&self) -> impl Iterator<Item = NodeIdentity> + '_ {
        self.entries.keys().copied()
    }

    /// Number of observed leaves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True for a snapshot of an empty (or fully skipped) subtree.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Content hash over `(identity, text, parent signature)` triples in
    /// document order. Equal hashes short-circuit diffing.
    #[must_use]
    pub fn content_hash(&self) -> u64 {
        self.content_hash
    }
}

fn hash_entries<K>(entries: &IndexMap<NodeIdentity, NodeDescriptor<K>>) -> u64 {
    let mut hasher = Xxh3::new();
    for (identity, descriptor) in entries {
        hasher.update(&identity.value().to_le_bytes());
        hasher.update(descriptor.text.as_bytes());
        hasher.update(descriptor.parent_signature.to_string().as_bytes());
        // Separator keeps adjacent fields from gluing together.
        hasher.update(&[0xff]);
    }
    hasher.digest()
}
