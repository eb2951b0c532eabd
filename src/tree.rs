//! Capability traits through which the host exposes its editable tree.
//!
//! The core never owns or mutates the tree. Everything it learns about the
//! surface flows through [`TreeRead`]; on-screen geometry (used only to
//! annotate added nodes) flows through the optional [`Geometry`] capability.
//!
//! Implementations hand out lightweight node *handles* (the associated
//! `Node` type), not owning references. A handle may go stale while a walk
//! is in progress; read methods signal that by returning `None`, and the
//! callers degrade to partial results rather than erroring.

use serde::{Deserialize, Serialize};
use std::hash::Hash;
use thiserror::Error;

/// Read access to the host's tree of text-bearing nodes.
///
/// `Node` is expected to be a cheap, copyable key (an index, a slotmap key,
/// a host object id) — never a strong reference that would extend a node's
/// lifetime.
pub trait TreeRead {
    /// Host-defined node handle.
    type Node: Clone + Eq + Hash;

    /// Enumerate the text-bearing leaves under `root` in document order
    /// (depth-first).
    ///
    /// Returns `None` when `root` is not part of the tree — the one
    /// contract violation the snapshot builder surfaces as an error.
    /// Implementations may return fewer leaves than exist if the tree
    /// mutates mid-enumeration.
    fn text_leaves(&self, root: &Self::Node) -> Option<Vec<Self::Node>>;

    /// The leaf's text content, or `None` once the leaf has detached.
    fn text_content(&self, leaf: &Self::Node) -> Option<String>;

    /// The node's structural parent, or `None` when unresolvable.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Tag name of an element node.
    fn element_tag(&self, element: &Self::Node) -> Option<String>;

    /// Class attribute of an element node. `None` and an empty string are
    /// equivalent.
    fn element_class(&self, element: &Self::Node) -> Option<String>;

    /// Ordinal rank of an element among its same-tag siblings (0-based).
    fn same_tag_rank(&self, element: &Self::Node) -> Option<usize>;
}

/// An axis-aligned on-screen rectangle, in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the rectangle covers no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Failure of a geometry lookup.
///
/// Never escapes the diff engine: a failed lookup simply leaves the entry
/// without regions.
#[derive(Error, Debug, Clone)]
#[error("geometry lookup failed: {0}")]
pub struct GeometryError(pub String);

/// Optional capability resolving a leaf's content to on-screen rectangles.
///
/// Consulted only when the diff engine annotates `Added` entries.
pub trait Geometry {
    /// Node handle type, matching the host's [`TreeRead::Node`].
    type Node;

    /// The rectangles covering the leaf's rendered content.
    fn content_rects(&self, leaf: &Self::Node) -> std::result::Result<Vec<Rect>, GeometryError>;
}
