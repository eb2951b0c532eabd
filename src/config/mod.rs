//! Configuration for the detection pipeline.
//!
//! The reference constants (200 ms pairing window, 10-unit cursor-jump
//! threshold, 5-unit offset tolerance) are empirical; they are exposed as
//! tunable configuration rather than hard-coded behavior.

mod types;
mod validation;

pub use types::{DetectorConfig, DetectorConfigBuilder};
pub use validation::{ConfigError, Validatable};
