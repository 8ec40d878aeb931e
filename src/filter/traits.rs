//! Trait shared by per-frame filters

use crate::types::{Cluster, Timestamp, TrackEstimate, TrackPhase};

/// Stateful per-frame filter.
///
/// Implementors own all cross-frame state for one target and must be fed
/// frames in non-decreasing timestamp order.
pub trait Filter {
    /// Type of internal filter state
    type State;

    /// Process one frame of size-filtered candidates.
    ///
    /// Returns at most one estimate for the frame.
    fn step(&mut self, candidates: &[Cluster], stamp: Timestamp) -> Option<TrackEstimate>;

    /// Get current internal state (read-only)
    fn state(&self) -> &Self::State;

    /// Lifecycle phase derived from the current state
    fn phase(&self) -> TrackPhase;

    /// Reset filter to its initial state
    fn reset(&mut self);
}
