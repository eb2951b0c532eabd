//! Structural diff over snapshot pairs.
//!
//! The engine compares exactly two snapshots — (before, after) — and
//! classifies every node that changed. Node identity does the heavy
//! lifting: because identities survive re-parenting, a moved node is
//! recognized as moved rather than as a delete/add pair.

mod engine;
mod result;

pub use engine::TreeDiffEngine;
pub use result::{ChangeType, DiffEntry, DiffSummary};
