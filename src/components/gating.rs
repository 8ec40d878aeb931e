//! Velocity gating and candidate arbitration
//!
//! Every candidate in a frame is compared against the same reference sample:
//! the last accepted box, its time, and the velocity estimated when it was
//! accepted. A candidate survives if the velocity it implies passes the
//! configured [`VelocityGate`]. Among survivors the one with the most points
//! wins.
//!
//! A seed has no measured velocity. Until one exists, the speed-change gate
//! falls back to the absolute speed limit.

use nalgebra::Vector2;

use crate::config::VelocityGate;
use crate::types::{BoundingBox, Cluster};

/// Last accepted sample that velocities are measured against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceSample {
    /// Ground-plane position of the last accepted box
    pub position: Vector2<f64>,
    /// Time the box was accepted (s)
    pub time: f64,
    /// Velocity estimated at acceptance, `None` for an ungated seed
    pub velocity: Option<Vector2<f64>>,
}

impl ReferenceSample {
    /// Reference built from an accepted box
    pub fn new(bbox: &BoundingBox, time: f64, velocity: Option<Vector2<f64>>) -> Self {
        Self {
            position: bbox.position_2d(),
            time,
            velocity,
        }
    }

    /// Velocity implied by moving from the reference to `point` at `time`.
    ///
    /// Returns `None` when no time has elapsed (or time ran backwards), since
    /// no finite velocity exists.
    #[inline]
    pub fn velocity_to(&self, point: &Vector2<f64>, time: f64) -> Option<Vector2<f64>> {
        let elapsed = time - self.time;
        if elapsed > 0.0 && elapsed.is_finite() {
            Some((point - self.position) / elapsed)
        } else {
            None
        }
    }
}

/// Candidate that passed the velocity gate, with the velocity it implies
#[derive(Debug, Clone, Copy)]
pub struct GatedCandidate<'a> {
    pub cluster: &'a Cluster,
    pub velocity: Vector2<f64>,
}

/// Whether a velocity is admissible under the gate policy.
///
/// Without a reference velocity every policy reduces to the speed limit.
#[inline]
pub fn admits(
    gate: VelocityGate,
    speed_limit: f64,
    velocity: &Vector2<f64>,
    reference_velocity: Option<&Vector2<f64>>,
) -> bool {
    match (gate, reference_velocity) {
        (VelocityGate::SpeedChange { max_change }, Some(reference)) => {
            (velocity - reference).norm() < max_change
        }
        _ => velocity.norm() < speed_limit,
    }
}

/// Keep the candidates whose implied velocity passes the gate.
///
/// Order is preserved.
pub fn gate_candidates<'a>(
    candidates: &'a [Cluster],
    reference: &ReferenceSample,
    time: f64,
    speed_limit: f64,
    gate: VelocityGate,
) -> Vec<GatedCandidate<'a>> {
    candidates
        .iter()
        .filter_map(|cluster| {
            let velocity = reference.velocity_to(&cluster.center_2d(), time)?;
            if admits(gate, speed_limit, &velocity, reference.velocity.as_ref()) {
                Some(GatedCandidate { cluster, velocity })
            } else {
                log::trace!(
                    "gate rejected cluster at ({:.2}, {:.2}): speed {:.2} m/s",
                    cluster.center.x,
                    cluster.center.y,
                    velocity.norm()
                );
                None
            }
        })
        .collect()
}

/// Pick the item with the largest point count.
///
/// Ties keep the earliest item. Returns `None` for an empty slice.
pub fn select_best<T>(items: &[T], point_count: impl Fn(&T) -> usize) -> Option<&T> {
    let mut iter = items.iter();
    let mut best = iter.next()?;
    for item in iter {
        if point_count(item) > point_count(best) {
            best = item;
        }
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn cluster_at(x: f64, y: f64, points: usize) -> Cluster {
        Cluster::from_bounds(
            Vector3::new(x - 1.0, y - 1.0, -1.5),
            Vector3::new(x + 1.0, y + 1.0, 0.0),
            points,
        )
    }

    fn reference_at_origin(time: f64) -> ReferenceSample {
        ReferenceSample {
            position: Vector2::zeros(),
            time,
            velocity: None,
        }
    }

    #[test]
    fn test_velocity_to() {
        let reference = reference_at_origin(1.0);
        let v = reference.velocity_to(&Vector2::new(3.0, 4.0), 1.5).unwrap();
        assert_relative_eq!(v.x, 6.0);
        assert_relative_eq!(v.y, 8.0);
    }

    #[test]
    fn test_zero_elapsed_time_has_no_velocity() {
        let reference = reference_at_origin(2.0);
        assert!(reference.velocity_to(&Vector2::new(1.0, 0.0), 2.0).is_none());
        assert!(reference.velocity_to(&Vector2::new(1.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn test_speed_gate_is_strict() {
        let zero = Vector2::zeros();
        assert!(admits(VelocityGate::Speed, 5.0, &Vector2::new(4.999, 0.0), Some(&zero)));
        assert!(!admits(VelocityGate::Speed, 5.0, &Vector2::new(3.0, 4.0), Some(&zero)));
    }

    #[test]
    fn test_speed_change_gate_uses_reference_velocity() {
        let gate = VelocityGate::SpeedChange { max_change: 2.0 };
        let reference = Vector2::new(20.0, 0.0);
        // Fast but steady passes
        assert!(admits(gate, 1.0, &Vector2::new(21.0, 0.0), Some(&reference)));
        // Slow but abrupt fails
        assert!(!admits(gate, 100.0, &Vector2::new(0.0, 0.0), Some(&reference)));
    }

    #[test]
    fn test_speed_change_gate_without_reference_uses_speed_limit() {
        let gate = VelocityGate::SpeedChange { max_change: 2.0 };
        assert!(admits(gate, 30.0, &Vector2::new(8.0, 0.0), None));
        assert!(!admits(gate, 30.0, &Vector2::new(30.0, 0.0), None));
    }

    #[test]
    fn test_gate_candidates_preserves_order() {
        let candidates = vec![
            cluster_at(1.0, 0.0, 10),
            cluster_at(50.0, 0.0, 500),
            cluster_at(0.0, 1.0, 20),
        ];
        let gated = gate_candidates(&candidates, &reference_at_origin(0.0), 1.0, 5.0, VelocityGate::Speed);

        assert_eq!(gated.len(), 2);
        assert_eq!(gated[0].cluster.point_count, 10);
        assert_eq!(gated[1].cluster.point_count, 20);
        assert_relative_eq!(gated[1].velocity.y, 1.0);
    }

    #[test]
    fn test_select_best_prefers_first_on_tie() {
        let candidates = vec![
            cluster_at(0.0, 0.0, 30),
            cluster_at(1.0, 0.0, 50),
            cluster_at(2.0, 0.0, 50),
        ];
        let best = select_best(&candidates, |c| c.point_count).unwrap();
        assert_eq!(best.center.x, 1.0);

        let empty: Vec<Cluster> = Vec::new();
        assert!(select_best(&empty, |c| c.point_count).is_none());
    }
}
