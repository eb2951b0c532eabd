//! Core data model: node identity, structural descriptors, snapshots, and
//! edit events.
//!
//! Everything in this module is a plain immutable value. Snapshots and
//! events are produced once and never mutated; the only stateful type is
//! [`IdentityRegistry`], which owns the identity counter for one editable
//! surface.

mod descriptor;
mod event;
mod identity;
mod snapshot;

pub use descriptor::{NodeDescriptor, ParentSignature};
pub use event::{
    CommitRecord, ContainerKind, EditEvent, EventKind, EventPayload, IntentRecord, OtherRecord,
    Selection,
};
pub use identity::{IdentityRegistry, NodeIdentity};
pub use snapshot::Snapshot;
