//! Core types for the tracking library
//!
//! # Types
//!
//! - [`Cluster`] - Axis-aligned summary of one point-cloud segment
//! - [`BoundingBox`] - Tracked object estimate (position + extents)
//! - [`Timestamp`] - Frame time as a seconds/nanoseconds pair
//! - [`TrackEstimate`] - Per-frame filter output
//! - [`TrackPhase`] - Lifecycle view of a track

pub mod output;

use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

pub use output::{EstimateSource, TrackEstimate, TrackPhase};

/// Axis-aligned bounding region over a point-cloud segment.
///
/// Produced by upstream segmentation once per frame. The filters only borrow
/// clusters, they never modify them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Lower corner (x, y, z)
    pub min: Vector3<f64>,
    /// Upper corner (x, y, z)
    pub max: Vector3<f64>,
    /// Point centroid
    pub center: Vector3<f64>,
    /// Number of points in the segment
    pub point_count: usize,
    /// Footprint area on the ground plane
    pub area: f64,
}

impl Cluster {
    /// Create a new cluster
    pub fn new(
        min: Vector3<f64>,
        max: Vector3<f64>,
        center: Vector3<f64>,
        point_count: usize,
        area: f64,
    ) -> Self {
        Self {
            min,
            max,
            center,
            point_count,
            area,
        }
    }

    /// Create a cluster from its corners only.
    ///
    /// The centroid is the midpoint of the corners and the footprint is the
    /// full x/y rectangle.
    pub fn from_bounds(min: Vector3<f64>, max: Vector3<f64>, point_count: usize) -> Self {
        let center = (min + max) * 0.5;
        let area = (max.x - min.x) * (max.y - min.y);
        Self::new(min, max, center, point_count, area)
    }

    /// Extents along each axis (`max - min`)
    #[inline]
    pub fn extents(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Larger of the two horizontal extents
    #[inline]
    pub fn max_width(&self) -> f64 {
        (self.max.x - self.min.x).max(self.max.y - self.min.y)
    }

    /// Vertical extent.
    ///
    /// Not used by the size gates, whose depth thresholds bound [`top`]
    /// above the ground plane instead.
    ///
    /// [`top`]: Cluster::top
    #[inline]
    pub fn depth(&self) -> f64 {
        self.max.z - self.min.z
    }

    /// Highest z coordinate
    #[inline]
    pub fn top(&self) -> f64 {
        self.max.z
    }

    /// Lowest z coordinate
    #[inline]
    pub fn base(&self) -> f64 {
        self.min.z
    }

    /// Centroid projected onto the ground plane
    #[inline]
    pub fn center_2d(&self) -> Vector2<f64> {
        self.center.xy()
    }
}

/// Bounding box estimate of the tracked object.
///
/// `width`, `height` and `depth` are the x, y and z extents respectively.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl BoundingBox {
    /// Create a new bounding box
    pub fn new(position: Vector3<f64>, extents: Vector3<f64>) -> Self {
        Self {
            px: position.x,
            py: position.y,
            pz: position.z,
            width: extents.x,
            height: extents.y,
            depth: extents.z,
        }
    }

    /// Box center
    #[inline]
    pub fn position(&self) -> Vector3<f64> {
        Vector3::new(self.px, self.py, self.pz)
    }

    /// Box center on the ground plane
    #[inline]
    pub fn position_2d(&self) -> Vector2<f64> {
        Vector2::new(self.px, self.py)
    }

    /// Box extents
    #[inline]
    pub fn extents(&self) -> Vector3<f64> {
        Vector3::new(self.width, self.height, self.depth)
    }

    /// Copy of this box moved by `offset` on the ground plane.
    ///
    /// Height and extents are unchanged.
    pub fn translated(&self, offset: Vector2<f64>) -> Self {
        Self {
            px: self.px + offset.x,
            py: self.py + offset.y,
            ..*self
        }
    }
}

impl From<&Cluster> for BoundingBox {
    fn from(cluster: &Cluster) -> Self {
        Self::new(cluster.center, cluster.extents())
    }
}

/// Frame timestamp as carried by sensor message headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Timestamp {
    /// Whole seconds
    pub sec: i64,
    /// Nanoseconds past `sec`
    pub nsec: u32,
}

impl Timestamp {
    /// Create a new timestamp
    pub fn new(sec: i64, nsec: u32) -> Self {
        Self { sec, nsec }
    }

    /// Build a timestamp from fractional seconds.
    ///
    /// Intended for synthetic scenarios; the nanosecond part is rounded.
    pub fn from_secs_f64(seconds: f64) -> Self {
        let mut sec = seconds.floor() as i64;
        let mut nsec = ((seconds - sec as f64) * 1e9).round() as u32;
        if nsec >= 1_000_000_000 {
            sec += 1;
            nsec -= 1_000_000_000;
        }
        Self { sec, nsec }
    }

    /// Combined time in seconds (`sec + nsec * 1e-9`)
    #[inline]
    pub fn as_secs_f64(&self) -> f64 {
        1e-9 * f64::from(self.nsec) + self.sec as f64
    }
}

/// Convert a cluster to its bounding box.
///
/// Center becomes position, `max - min` becomes extents.
#[inline]
pub fn cluster_to_box(cluster: &Cluster) -> BoundingBox {
    BoundingBox::from(cluster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_cluster() -> Cluster {
        Cluster::new(
            Vector3::new(1.0, 2.0, -1.5),
            Vector3::new(5.5, 4.0, 0.0),
            Vector3::new(3.0, 3.1, -0.8),
            120,
            7.5,
        )
    }

    #[test]
    fn test_cluster_to_box_uses_center_and_extents() {
        let cluster = sample_cluster();
        let bbox = cluster_to_box(&cluster);

        assert_eq!(bbox.position(), cluster.center);
        assert_relative_eq!(bbox.width, 4.5);
        assert_relative_eq!(bbox.height, 2.0);
        assert_relative_eq!(bbox.depth, 1.5);
    }

    #[test]
    fn test_cluster_geometry() {
        let cluster = sample_cluster();
        assert_relative_eq!(cluster.max_width(), 4.5);
        assert_relative_eq!(cluster.depth(), 1.5);
        assert_relative_eq!(cluster.top(), 0.0);
        assert_relative_eq!(cluster.base(), -1.5);
        assert_eq!(cluster.center_2d(), Vector2::new(3.0, 3.1));
    }

    #[test]
    fn test_from_bounds() {
        let cluster = Cluster::from_bounds(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(2.0, 4.0, 1.0),
            10,
        );
        assert_eq!(cluster.center, Vector3::new(1.0, 2.0, 0.5));
        assert_relative_eq!(cluster.area, 8.0);
    }

    #[test]
    fn test_translated_keeps_extents() {
        let bbox = BoundingBox::new(Vector3::new(1.0, 1.0, 0.5), Vector3::new(4.0, 2.0, 1.5));
        let moved = bbox.translated(Vector2::new(0.5, -1.0));
        assert_relative_eq!(moved.px, 1.5);
        assert_relative_eq!(moved.py, 0.0);
        assert_relative_eq!(moved.pz, 0.5);
        assert_eq!(moved.extents(), bbox.extents());
    }

    #[test]
    fn test_timestamp_conversion() {
        let t = Timestamp::new(12, 500_000_000);
        assert_relative_eq!(t.as_secs_f64(), 12.5);

        let t = Timestamp::from_secs_f64(3.25);
        assert_eq!(t, Timestamp::new(3, 250_000_000));
        assert_relative_eq!(t.as_secs_f64(), 3.25);
    }
}
