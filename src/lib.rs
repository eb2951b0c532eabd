//! **Mutation diagnostics for editable text surfaces.**
//!
//! `edit-forensics` diagnoses anomalous behavior in an editable tree of
//! text-bearing nodes by observing two independent signals: structural
//! snapshots of the tree taken before and after a mutation, and a stream of
//! paired *intent* (pre-mutation) and *commit* (post-mutation) events. It
//! is the analysis core behind editor-debugging tooling: the host captures,
//! renders, and persists; this crate only transforms already-captured data.
//!
//! ## Key Features
//!
//! - **Stable Node Identity**: a weak side-table assigns each observed leaf
//!   a durable identity, so diffs survive re-parenting without relying on
//!   host handles staying valid.
//! - **Snapshot Diffing**: one document-order walk per snapshot, then a
//!   deterministic pairwise diff classifying every node as deleted, added,
//!   modified, or moved.
//! - **Event Pairing**: intent and commit events are matched 1:1 under a
//!   tunable time window, tolerating missing, delayed, and duplicated
//!   events.
//! - **Scenario Classification**: every correlated pair is checked against
//!   a fixed catalog of 11 anomaly predicates; the triggered set encodes to
//!   a compact, canonical, round-trippable scenario id like `"1.2"`.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the data model — [`NodeIdentity`], [`Snapshot`],
//!   [`EditEvent`] and friends. Plain immutable values throughout.
//! - **[`tree`]**: the capability traits ([`TreeRead`], [`Geometry`])
//!   through which the host exposes its tree. The crate never touches the
//!   tree directly.
//! - **[`capture`]**: builds a [`Snapshot`] from one read-only walk.
//! - **[`diff`]**: the [`TreeDiffEngine`] comparing before/after snapshot
//!   pairs.
//! - **[`pairing`]**: the [`PairingEngine`] correlating intent/commit
//!   events.
//! - **[`scenario`]**: the predicate catalog, the [`ScenarioClassifier`],
//!   and the scenario-id codec.
//!
//! ## Getting Started: Diffing Two Snapshots
//!
//! ```no_run
//! use edit_forensics::{build_snapshot, IdentityRegistry, TreeDiffEngine};
//! # use edit_forensics::tree::TreeRead;
//! # fn demo<T: TreeRead>(tree: &T, root: &T::Node) -> edit_forensics::Result<()> {
//! let mut registry = IdentityRegistry::new();
//!
//! let before = build_snapshot(tree, &mut registry, root)?;
//! // ... the host mutates the tree ...
//! let after = build_snapshot(tree, &mut registry, root)?;
//!
//! let engine = TreeDiffEngine::new();
//! for entry in engine.diff(&before, &after) {
//!     println!("{} {}", entry.change.label(), entry.identity());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Classifying an Event Stream
//!
//! ```
//! use edit_forensics::{PairingEngine, ScenarioClassifier};
//!
//! # let events: Vec<edit_forensics::EditEvent> = Vec::new();
//! let pairing = PairingEngine::new();
//! let classifier = ScenarioClassifier::new();
//!
//! for pair in pairing.extract_pairs(&events) {
//!     let result = classifier.classify(&pair, None, Some(events.as_slice()));
//!     if result.is_abnormal {
//!         println!(
//!             "scenario {}: {}",
//!             result.scenario_id.as_deref().unwrap_or("?"),
//!             result.description.as_deref().unwrap_or("?"),
//!         );
//!     }
//! }
//! ```
//!
//! Everything is synchronous and single-threaded: pure transformations over
//! already-captured, finite-size inputs. The only mutable state is the
//! [`IdentityRegistry`], which the host must externally synchronize if it
//! ever shares one across threads.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Offset arithmetic mixes u32 cursor offsets with usize text lengths
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    // # Errors / # Panics sections are aspirational for the small API
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod capture;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod pairing;
pub mod scenario;
pub mod tree;

// Re-export main types for convenience
pub use capture::build_snapshot;
pub use config::{ConfigError, DetectorConfig, DetectorConfigBuilder, Validatable};
pub use diff::{ChangeType, DiffEntry, DiffSummary, TreeDiffEngine};
pub use error::{ForensicsError, Result, SnapshotErrorKind};
pub use model::{
    CommitRecord, ContainerKind, EditEvent, EventKind, EventPayload, IdentityRegistry,
    IntentRecord, NodeDescriptor, NodeIdentity, OtherRecord, ParentSignature, Selection, Snapshot,
};
pub use pairing::{EventPair, PairingEngine, PairingSummary};
pub use scenario::{
    decode, describe, encode, AnomalyPredicate, CursorState, DetectionResult, ScenarioClassifier,
    SequenceStep,
};
pub use tree::{Geometry, GeometryError, Rect, TreeRead};
