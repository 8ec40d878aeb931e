//! Dead-reckoning of the last accepted box
//!
//! When no candidate survives gating the filter extrapolates the previous
//! box along the previous velocity estimate. Only the ground-plane position
//! moves; height and extents are carried over unchanged.

use nalgebra::Vector2;

use crate::types::BoundingBox;

/// Predict a box forward in time under constant velocity
///
/// - `p' = p + v × Δt`
#[inline]
pub fn dead_reckon(prev_box: &BoundingBox, velocity: &Vector2<f64>, elapsed: f64) -> BoundingBox {
    prev_box.translated(velocity * elapsed)
}
