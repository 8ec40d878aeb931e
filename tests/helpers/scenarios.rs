//! Synthetic cluster fixtures shared by the integration tests
//!
//! Frame times are multiples of 1/8 s so that elapsed-time comparisons
//! against the hysteresis windows are exact in floating point.

#![allow(dead_code)]

use cluster_tracker::config::GROUND_Z;
use cluster_tracker::{Cluster, Timestamp};
use nalgebra::Vector3;

/// Frame period used by all scenarios (s)
pub const FRAME_PERIOD: f64 = 0.125;

/// Timestamp for fractional seconds
pub fn at(seconds: f64) -> Timestamp {
    Timestamp::from_secs_f64(seconds)
}

/// Time of frame `index`
pub fn frame_time(index: u32) -> f64 {
    f64::from(index) * FRAME_PERIOD
}

/// Cluster with explicit ground-plane size, standing on the ground.
pub fn block(x: f64, y: f64, length: f64, width: f64, height: f64, points: usize) -> Cluster {
    Cluster::from_bounds(
        Vector3::new(x - length / 2.0, y - width / 2.0, GROUND_Z),
        Vector3::new(x + length / 2.0, y + width / 2.0, GROUND_Z + height),
        points,
    )
}

/// 4.5 x 1.8 x 1.5 car centered at (x, y)
pub fn car(x: f64, y: f64, points: usize) -> Cluster {
    block(x, y, 4.5, 1.8, 1.5, points)
}

/// 0.6 x 0.5 x 1.7 pedestrian centered at (x, y)
pub fn pedestrian(x: f64, y: f64, points: usize) -> Cluster {
    block(x, y, 0.6, 0.5, 1.7, points)
}

/// A parked-bus-sized cluster that neither class accepts
pub fn bus(x: f64, y: f64) -> Cluster {
    block(x, y, 12.0, 2.5, 3.2, 800)
}

/// Position along x after `t` seconds at `speed` from `x0`
pub fn along_x(x0: f64, speed: f64, t: f64) -> f64 {
    x0 + speed * t
}
