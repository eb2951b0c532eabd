//! Configuration types for detection operations.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tunables for pairing and classification.
///
/// The defaults are the reference values; hosts with slower event delivery
/// (virtualized input, IME-heavy surfaces) typically widen them via
/// [`DetectorConfig::relaxed`] or the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DetectorConfig {
    /// Maximum intent→commit distance, in milliseconds, for two events to
    /// pair. The window is half-open: `0 <= delta < pair_window_ms`.
    pub pair_window_ms: u64,
    /// Minimum offset difference, against the prior cursor position in the
    /// same parent, that counts as a cursor jump.
    pub cursor_jump_threshold: u32,
    /// Allowed deviation, in characters, for the offset-consistency
    /// predicates.
    pub offset_tolerance: u32,
    /// How many trailing events the sequence predicate inspects.
    pub history_window: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            pair_window_ms: 200,
            cursor_jump_threshold: 10,
            offset_tolerance: 5,
            history_window: 10,
        }
    }
}

impl DetectorConfig {
    /// Create a config with the reference values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `DetectorConfig` builder.
    pub fn builder() -> DetectorConfigBuilder {
        DetectorConfigBuilder::default()
    }

    /// Tight thresholds: flags more, tolerates less. For test rigs and
    /// surfaces with fast, local event delivery.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            pair_window_ms: 100,
            cursor_jump_threshold: 5,
            offset_tolerance: 2,
            history_window: 10,
        }
    }

    /// The reference values.
    #[must_use]
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Wide thresholds for slow or indirect event delivery.
    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            pair_window_ms: 400,
            cursor_jump_threshold: 20,
            offset_tolerance: 10,
            history_window: 16,
        }
    }
}

/// Builder for constructing `DetectorConfig` with a fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct DetectorConfigBuilder {
    config: DetectorConfig,
}

impl DetectorConfigBuilder {
    /// Set the pairing window in milliseconds.
    pub const fn pair_window_ms(mut self, window: u64) -> Self {
        self.config.pair_window_ms = window;
        self
    }

    /// Set the cursor-jump threshold.
    pub const fn cursor_jump_threshold(mut self, threshold: u32) -> Self {
        self.config.cursor_jump_threshold = threshold;
        self
    }

    /// Set the offset tolerance.
    pub const fn offset_tolerance(mut self, tolerance: u32) -> Self {
        self.config.offset_tolerance = tolerance;
        self
    }

    /// Set the sequence-predicate history window.
    pub const fn history_window(mut self, window: usize) -> Self {
        self.config.history_window = window;
        self
    }

    /// Finish building.
    pub fn build(self) -> DetectorConfig {
        self.config
    }
}
