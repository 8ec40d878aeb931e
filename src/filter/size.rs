//! Class-specific geometric classification of clusters.
//!
//! The size filter is stateless: it keeps the clusters whose extents, height
//! above ground, point count, and footprint are plausible for the target
//! class, in input order.

use thiserror::Error;

use crate::config::{SizeThresholds, TargetClass};
use crate::types::Cluster;

/// Why a cluster failed the size gates. Carries the measured value.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SizeRejection {
    #[error("max width {0:.2} m is not above the lower width bound")]
    TooNarrow(f64),
    #[error("max width {0:.2} m exceeds the upper width bound")]
    TooWide(f64),
    #[error("top at z={0:.2} is below the accepted range")]
    TooLow(f64),
    #[error("top at z={0:.2} is above the accepted range")]
    TooHigh(f64),
    #[error("base at z={0:.2} is too far above ground")]
    BaseTooHigh(f64),
    #[error("only {0} points")]
    TooFewPoints(usize),
    #[error("footprint area {0:.2} m² is too large")]
    AreaTooLarge(f64),
}

/// Stateless size filter for one target class
#[derive(Debug, Clone, PartialEq)]
pub struct SizeFilter {
    class: TargetClass,
    thresholds: SizeThresholds,
}

impl SizeFilter {
    /// Create a size filter with the class defaults
    pub fn new(class: TargetClass) -> Self {
        Self::with_thresholds(class, class.size_thresholds())
    }

    /// Create a size filter with explicit thresholds
    pub fn with_thresholds(class: TargetClass, thresholds: SizeThresholds) -> Self {
        Self { class, thresholds }
    }

    /// Target class
    #[inline]
    pub fn class(&self) -> TargetClass {
        self.class
    }

    /// Thresholds in use
    #[inline]
    pub fn thresholds(&self) -> &SizeThresholds {
        &self.thresholds
    }

    /// Run the gates on a single cluster, stopping at the first failure.
    pub fn check(&self, cluster: &Cluster) -> Result<(), SizeRejection> {
        let t = &self.thresholds;

        let max_width = cluster.max_width();
        if let Some(min_width) = t.min_width {
            if max_width <= min_width {
                return Err(SizeRejection::TooNarrow(max_width));
            }
        }
        if max_width > t.max_width {
            return Err(SizeRejection::TooWide(max_width));
        }

        let top = cluster.top();
        let (lowest_top, highest_top) = t.top_range();
        if top < lowest_top {
            return Err(SizeRejection::TooLow(top));
        }
        if top > highest_top {
            return Err(SizeRejection::TooHigh(top));
        }

        if let Some(max_base) = t.max_base {
            if cluster.base() > max_base {
                return Err(SizeRejection::BaseTooHigh(cluster.base()));
            }
        }

        if cluster.point_count < t.min_point_count {
            return Err(SizeRejection::TooFewPoints(cluster.point_count));
        }

        if cluster.area > t.max_area {
            return Err(SizeRejection::AreaTooLarge(cluster.area));
        }

        Ok(())
    }

    /// Whether a cluster passes every gate
    #[inline]
    pub fn accepts(&self, cluster: &Cluster) -> bool {
        self.check(cluster).is_ok()
    }

    /// Keep the clusters that pass every gate, preserving order.
    pub fn filter(&self, clusters: &[Cluster]) -> Vec<Cluster> {
        clusters
            .iter()
            .filter(|cluster| match self.check(cluster) {
                Ok(()) => true,
                Err(reason) => {
                    log::trace!(
                        "{} size filter rejected cluster at ({:.2}, {:.2}): {}",
                        self.class,
                        cluster.center.x,
                        cluster.center.y,
                        reason
                    );
                    false
                }
            })
            .cloned()
            .collect()
    }
}

impl From<TargetClass> for SizeFilter {
    fn from(class: TargetClass) -> Self {
        Self::new(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::*;
    use nalgebra::Vector3;

    /// Car-shaped cluster standing on the ground: 4.5 x 1.8, top 1.5 m up.
    fn car() -> Cluster {
        Cluster::new(
            Vector3::new(10.0, 0.0, GROUND_Z),
            Vector3::new(14.5, 1.8, GROUND_Z + 1.5),
            Vector3::new(12.25, 0.9, GROUND_Z + 0.75),
            200,
            8.1,
        )
    }

    /// Pedestrian-shaped cluster: 0.6 x 0.5, top 1.7 m up.
    fn pedestrian() -> Cluster {
        Cluster::new(
            Vector3::new(5.0, 3.0, GROUND_Z + 0.05),
            Vector3::new(5.6, 3.5, GROUND_Z + 1.7),
            Vector3::new(5.3, 3.25, GROUND_Z + 0.9),
            40,
            0.3,
        )
    }

    #[test]
    fn test_car_accepts_car_rejects_pedestrian() {
        let filter = SizeFilter::new(TargetClass::Car);
        assert!(filter.accepts(&car()));
        assert!(matches!(filter.check(&pedestrian()), Err(SizeRejection::TooNarrow(_))));
    }

    #[test]
    fn test_pedestrian_accepts_pedestrian_rejects_car() {
        let filter = SizeFilter::new(TargetClass::Pedestrian);
        assert!(filter.accepts(&pedestrian()));
        assert!(matches!(filter.check(&car()), Err(SizeRejection::TooWide(_))));
    }

    #[test]
    fn test_gates_short_circuit_in_order() {
        let filter = SizeFilter::new(TargetClass::Car);
        let mut cluster = car();
        cluster.point_count = 1;
        cluster.area = 1000.0;
        cluster.max.z = GROUND_Z + 10.0;
        // Top is checked before point count and area
        assert!(matches!(filter.check(&cluster), Err(SizeRejection::TooHigh(_))));

        cluster.max.z = GROUND_Z + 1.5;
        assert_eq!(filter.check(&cluster), Err(SizeRejection::TooFewPoints(1)));

        cluster.point_count = CAR_MIN_POINT_COUNT;
        assert_eq!(filter.check(&cluster), Err(SizeRejection::AreaTooLarge(1000.0)));
    }

    #[test]
    fn test_pedestrian_base_gate() {
        let filter = SizeFilter::new(TargetClass::Pedestrian);
        let mut floating = pedestrian();
        floating.min.z = PEDESTRIAN_MAX_BASE + 0.1;
        assert!(matches!(filter.check(&floating), Err(SizeRejection::BaseTooHigh(_))));

        floating.min.z = PEDESTRIAN_MAX_BASE;
        assert!(filter.accepts(&floating));
    }

    #[test]
    fn test_filter_preserves_order() {
        let filter = SizeFilter::new(TargetClass::Pedestrian);
        let mut second = pedestrian();
        second.center.x = 42.0;
        let input = vec![pedestrian(), car(), second.clone(), car()];

        let kept = filter.filter(&input);
        assert_eq!(kept, vec![pedestrian(), second]);
    }
}
