//! Structural descriptors for text-bearing leaves.

use super::identity::NodeIdentity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural fingerprint of a leaf's parent.
///
/// Detects re-parenting independently of node identity: two observations of
/// the same leaf under structurally different parents produce different
/// signatures even though the leaf's identity is unchanged.
///
/// The canonical display form is `tag[rank].class`, e.g. `p[0].note` for a
/// `<p class="note">` that is the first `p` among its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParentSignature {
    /// Parent element's tag name.
    pub tag: String,
    /// Parent's ordinal rank among same-tag siblings (0-based).
    pub rank: usize,
    /// Parent's class attribute; empty when absent.
    pub class: String,
}

impl ParentSignature {
    pub fn new(tag: impl Into<String>, rank: usize, class: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            rank,
            class: class.into(),
        }
    }
}

impl fmt::Display for ParentSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}].{}", self.tag, self.rank, self.class)
    }
}

/// Point-in-time structural description of one text-bearing leaf.
///
/// `K` is the host's node handle; it is retained only so the diff engine
/// can resolve geometry for added nodes, and never read back otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor<K> {
    /// Durable identity of the leaf.
    pub identity: NodeIdentity,
    /// The leaf's text content at capture time.
    pub text: String,
    /// Fingerprint of the leaf's parent at capture time.
    pub parent_signature: ParentSignature,
    /// Sum of the lengths (in characters) of preceding text-bearing
    /// siblings under the same parent.
    pub offset_in_parent: usize,
    /// Host handle of the leaf at capture time. May be stale by the time it
    /// is read; consumers must tolerate failed resolution.
    pub node: K,
}

impl<K> NodeDescriptor<K> {
    /// Length of the text content in characters.
    #[must_use]
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }
}
