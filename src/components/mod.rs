//! Core algorithmic components
//!
//! This module provides the building blocks the track filter is assembled from:
//!
//! - [`gating`] - Velocity gating and candidate arbitration
//! - [`prediction`] - Dead-reckoning of the last accepted box

pub mod gating;
pub mod prediction;

pub use gating::{admits, gate_candidates, select_best, GatedCandidate, ReferenceSample};
pub use prediction::dead_reckon;
