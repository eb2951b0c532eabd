//! Snapshot diff engine implementation.

use super::result::{DiffEntry, DiffSummary};
use crate::model::Snapshot;
use crate::tree::{Geometry, Rect};
use std::hash::Hash;
use tracing::{debug, trace};

/// Diff engine over (before, after) snapshot pairs.
///
/// A deterministic pure function of its two inputs: identical snapshots in,
/// identical entry list out, regardless of call history. The optional
/// geometry capability only annotates `Added` entries; its failures are
/// swallowed.
pub struct TreeDiffEngine<K> {
    geometry: Option<Box<dyn Geometry<Node = K>>>,
}

impl<K: Clone + Eq + Hash> TreeDiffEngine<K> {
    /// Create an engine without geometry annotation.
    #[must_use]
    pub fn new() -> Self {
        Self { geometry: None }
    }

    /// Attach a geometry capability for annotating added nodes.
    #[must_use]
    pub fn with_geometry(mut self, geometry: Box<dyn Geometry<Node = K>>) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Check if a geometry capability is attached.
    pub fn has_geometry(&self) -> bool {
        self.geometry.is_some()
    }

    /// Compare two snapshots.
    ///
    /// Classification per node identity:
    /// - in `before` only → `Deleted`;
    /// - text differs → `Modified` (checked before the move test);
    /// - parent signature differs → `Moved`;
    /// - in `after` only → `Added`.
    ///
    /// Output order: deletions/modifications/moves in `before`'s document
    /// order, then additions in `after`'s document order. Unchanged nodes
    /// produce no entry.
    pub fn diff(&self, before: &Snapshot<K>, after: &Snapshot<K>) -> Vec<DiffEntry<K>> {
        if before.content_hash() == after.content_hash() && before.content_hash() != 0 {
            trace!("content hashes equal, snapshots identical");
            return Vec::new();
        }

        let mut entries = Vec::new();

        for old in before.iter() {
            match after.get(old.identity) {
                None => entries.push(DiffEntry::deleted(old.clone())),
                Some(new) => {
                    if old.text != new.text {
                        entries.push(DiffEntry::modified(old.clone(), new.clone()));
                    } else if old.parent_signature != new.parent_signature {
                        entries.push(DiffEntry::moved(old.clone(), new.clone()));
                    }
                }
            }
        }

        for new in after.iter() {
            if !before.contains(new.identity) {
                let regions = self.added_regions(new);
                entries.push(DiffEntry::added(new.clone(), regions));
            }
        }

        debug!(
            before = before.len(),
            after = after.len(),
            changes = entries.len(),
            "snapshot diff computed"
        );
        entries
    }

    /// Convenience: diff and summarize in one call.
    pub fn diff_with_summary(
        &self,
        before: &Snapshot<K>,
        after: &Snapshot<K>,
    ) -> (Vec<DiffEntry<K>>, DiffSummary) {
        let entries = self.diff(before, after);
        let summary = DiffSummary::from_entries(&entries);
        (entries, summary)
    }

    fn added_regions(&self, descriptor: &crate::model::NodeDescriptor<K>) -> Vec<Rect> {
        let Some(geometry) = &self.geometry else {
            return Vec::new();
        };
        match geometry.content_rects(&descriptor.node) {
            Ok(rects) => rects,
            Err(err) => {
                debug!(identity = %descriptor.identity, error = %err, "geometry lookup failed, omitting regions");
                Vec::new()
            }
        }
    }
}

impl<K: Clone + Eq + Hash> Default for TreeDiffEngine<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::ChangeType;
    use crate::model::{IdentityRegistry, NodeDescriptor, ParentSignature};
    use crate::tree::GeometryError;

    fn descriptor(
        registry: &mut IdentityRegistry<u32>,
        key: u32,
        text: &str,
        signature: &str,
    ) -> NodeDescriptor<u32> {
        let (tag, rest) = signature.split_once('[').expect("tag[rank].class");
        let (rank, class) = rest.split_once("].").expect("tag[rank].class");
        NodeDescriptor {
            identity: registry.identity_of(&key),
            text: text.to_string(),
            parent_signature: ParentSignature::new(tag, rank.parse().expect("rank"), class),
            offset_in_parent: 0,
            node: key,
        }
    }

    fn snapshot(descriptors: Vec<NodeDescriptor<u32>>) -> Snapshot<u32> {
        Snapshot::from_descriptors(descriptors)
    }

    #[test]
    fn identical_snapshots_produce_no_entries() {
        let mut registry = IdentityRegistry::new();
        let before = snapshot(vec![descriptor(&mut registry, 1, "hello", "p[0].")]);
        let after = snapshot(vec![descriptor(&mut registry, 1, "hello", "p[0].")]);
        assert!(TreeDiffEngine::new().diff(&before, &after).is_empty());
    }

    #[test]
    fn text_change_is_modified() {
        let mut registry = IdentityRegistry::new();
        let before = snapshot(vec![descriptor(&mut registry, 1, "hello", "p[0].")]);
        let after = snapshot(vec![descriptor(&mut registry, 1, "hello world", "p[0].")]);

        let entries = TreeDiffEngine::new().diff(&before, &after);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].change, ChangeType::Modified);
    }

    #[test]
    fn signature_change_with_same_text_is_moved() {
        let mut registry = IdentityRegistry::new();
        let before = snapshot(vec![descriptor(&mut registry, 1, "x", "p[0].")]);
        let after = snapshot(vec![descriptor(&mut registry, 1, "x", "p[1].")]);

        let entries = TreeDiffEngine::new().diff(&before, &after);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].change, ChangeType::Moved);
    }

    #[test]
    fn text_change_wins_over_move() {
        // Both text and signature changed: the modified classification is
        // checked first.
        let mut registry = IdentityRegistry::new();
        let before = snapshot(vec![descriptor(&mut registry, 1, "x", "p[0].")]);
        let after = snapshot(vec![descriptor(&mut registry, 1, "y", "p[1].")]);

        let entries = TreeDiffEngine::new().diff(&before, &after);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].change, ChangeType::Modified);
    }

    #[test]
    fn removals_precede_additions_in_document_order() {
        let mut registry = IdentityRegistry::new();
        let before = snapshot(vec![
            descriptor(&mut registry, 1, "a", "p[0]."),
            descriptor(&mut registry, 2, "b", "p[0]."),
        ]);
        let after = snapshot(vec![
            descriptor(&mut registry, 2, "b2", "p[0]."),
            descriptor(&mut registry, 3, "c", "p[1]."),
        ]);

        let entries = TreeDiffEngine::new().diff(&before, &after);
        let changes: Vec<ChangeType> = entries.iter().map(|e| e.change).collect();
        assert_eq!(
            changes,
            vec![ChangeType::Deleted, ChangeType::Modified, ChangeType::Added]
        );
    }

    #[test]
    fn diff_is_deterministic() {
        let mut registry = IdentityRegistry::new();
        let before = snapshot(vec![
            descriptor(&mut registry, 1, "a", "p[0]."),
            descriptor(&mut registry, 2, "b", "q[0].x"),
            descriptor(&mut registry, 3, "c", "q[1].x"),
        ]);
        let after = snapshot(vec![
            descriptor(&mut registry, 3, "c!", "q[1].x"),
            descriptor(&mut registry, 4, "d", "q[2].x"),
        ]);

        let engine = TreeDiffEngine::new();
        let first = engine.diff(&before, &after);
        let second = engine.diff(&before, &after);
        assert_eq!(first, second);
    }

    struct FixedGeometry(Vec<Rect>);

    impl Geometry for FixedGeometry {
        type Node = u32;

        fn content_rects(&self, _leaf: &u32) -> Result<Vec<Rect>, GeometryError> {
            Ok(self.0.clone())
        }
    }

    struct FailingGeometry;

    impl Geometry for FailingGeometry {
        type Node = u32;

        fn content_rects(&self, _leaf: &u32) -> Result<Vec<Rect>, GeometryError> {
            Err(GeometryError("layout not ready".to_string()))
        }
    }

    #[test]
    fn added_entries_carry_geometry_regions() {
        let mut registry = IdentityRegistry::new();
        let before = snapshot(vec![]);
        let after = snapshot(vec![descriptor(&mut registry, 1, "new", "p[0].")]);

        let rect = Rect::new(1.0, 2.0, 30.0, 4.0);
        let engine =
            TreeDiffEngine::new().with_geometry(Box::new(FixedGeometry(vec![rect])));
        let entries = engine.diff(&before, &after);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].regions, vec![rect]);
    }

    #[test]
    fn geometry_failure_is_swallowed() {
        let mut registry = IdentityRegistry::new();
        let before = snapshot(vec![]);
        let after = snapshot(vec![descriptor(&mut registry, 1, "new", "p[0].")]);

        let engine = TreeDiffEngine::new().with_geometry(Box::new(FailingGeometry));
        let entries = engine.diff(&before, &after);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].regions.is_empty());
    }
}
