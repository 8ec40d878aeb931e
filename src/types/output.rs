//! Output types for filter results
//!
//! This module defines what the track filter hands back each frame.

use serde::{Deserialize, Serialize};

use super::BoundingBox;

/// Where a frame's box came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EstimateSource {
    /// First sample of a (re)confirmation attempt, taken without velocity gating
    Seed,
    /// Candidate that passed the velocity gate
    Measured,
    /// Dead-reckoned from the last accepted sample
    Predicted,
}

/// Track estimate for a single frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackEstimate {
    /// Frame time in seconds
    pub time: f64,
    /// Estimated box
    pub bbox: BoundingBox,
    /// How the box was obtained
    pub source: EstimateSource,
}

impl TrackEstimate {
    /// Create a new track estimate
    pub fn new(time: f64, bbox: BoundingBox, source: EstimateSource) -> Self {
        Self { time, bbox, source }
    }

    /// Whether the box was extrapolated rather than observed
    #[inline]
    pub fn is_predicted(&self) -> bool {
        self.source == EstimateSource::Predicted
    }
}

/// Lifecycle phase of a track, derived from the filter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackPhase {
    /// Nothing seen yet, or reset
    Uninitialized,
    /// Confirmation timer running
    Confirming,
    /// Confirmed and receiving gated candidates
    Tracking,
    /// Confirmed, but the last frame(s) had no gated candidate
    Coasting,
    /// Previously confirmed, demoted, and not currently re-confirming
    Lost,
}

impl TrackPhase {
    /// Whether downstream consumers should trust the track
    #[inline]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, TrackPhase::Tracking | TrackPhase::Coasting)
    }
}
