//! Snapshot capture: one read-only walk of the surface.

use crate::error::{ForensicsError, Result, SnapshotErrorKind};
use crate::model::{IdentityRegistry, NodeDescriptor, ParentSignature, Snapshot};
use crate::tree::TreeRead;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Capture a structural snapshot of every text-bearing leaf under `root`.
///
/// One document-order depth-first walk, pure read. For each leaf the walk
/// resolves its durable identity, its parent signature, and its offset
/// within the parent (the summed character lengths of preceding text-bearing
/// siblings under the same parent).
///
/// Degradation rules:
/// - a leaf whose parent cannot be resolved is skipped;
/// - a leaf that detaches mid-walk ends the walk, returning the entries
///   collected so far.
///
/// # Errors
///
/// Returns [`SnapshotErrorKind::InvalidRoot`] when the capability cannot
/// enumerate under `root` at all — host misuse, not a runtime state.
pub fn build_snapshot<T: TreeRead>(
    tree: &T,
    registry: &mut IdentityRegistry<T::Node>,
    root: &T::Node,
) -> Result<Snapshot<T::Node>> {
    let leaves = tree.text_leaves(root).ok_or_else(|| {
        ForensicsError::snapshot("enumerating leaves under root", SnapshotErrorKind::InvalidRoot)
    })?;

    let mut descriptors = Vec::with_capacity(leaves.len());
    let mut parent_offsets: HashMap<T::Node, usize> = HashMap::new();
    let mut skipped = 0usize;

    for leaf in leaves {
        let Some(text) = tree.text_content(&leaf) else {
            debug!(
                collected = descriptors.len(),
                "leaf detached mid-walk, returning partial snapshot"
            );
            break;
        };

        let Some(parent) = tree.parent(&leaf) else {
            skipped += 1;
            continue;
        };
        let (Some(tag), Some(rank)) = (tree.element_tag(&parent), tree.same_tag_rank(&parent))
        else {
            skipped += 1;
            continue;
        };
        let class = tree.element_class(&parent).unwrap_or_default();

        let offset_entry = parent_offsets.entry(parent).or_insert(0);
        let offset_in_parent = *offset_entry;
        *offset_entry += text.chars().count();

        descriptors.push(NodeDescriptor {
            identity: registry.identity_of(&leaf),
            text,
            parent_signature: ParentSignature::new(tag, rank, class),
            offset_in_parent,
            node: leaf,
        });
    }

    if skipped > 0 {
        trace!(skipped, "leaves without a resolvable parent were skipped");
    }
    Ok(Snapshot::from_descriptors(descriptors))
}
