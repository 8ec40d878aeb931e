//! Per-frame tracking pipeline.
//!
//! [`Tracker`] chains the stateless [`SizeFilter`] with a [`TrackFilter`]
//! built from the same [`TrackerConfig`], so a caller only hands over the raw
//! clusters of each frame.

use crate::config::{TargetClass, TrackerConfig};
use crate::filter::{Filter, SizeFilter, TrackFilter, TrackState};
use crate::reporter::{NoOpReporter, TrackReporter};
use crate::types::{Cluster, Timestamp, TrackEstimate, TrackPhase};

/// Size filter followed by the track filter for one target class.
///
/// # Example
///
/// ```
/// use cluster_tracker::{Cluster, TargetClass, Timestamp, Tracker};
/// use nalgebra::Vector3;
///
/// let mut tracker = Tracker::new(TargetClass::Car);
///
/// // A bicycle-sized cluster never reaches the track filter
/// let bike = Cluster::from_bounds(
///     Vector3::new(0.0, 0.0, -1.5),
///     Vector3::new(1.0, 0.5, -0.3),
///     50,
/// );
/// assert!(tracker.process_frame(&[bike], Timestamp::new(0, 0)).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Tracker<R: TrackReporter = NoOpReporter> {
    size_filter: SizeFilter,
    track_filter: TrackFilter<R>,
}

impl Tracker<NoOpReporter> {
    /// Create a tracker with the class defaults
    pub fn new(class: TargetClass) -> Self {
        Self::with_config(TrackerConfig::for_class(class))
    }

    /// Create a tracker from a configuration
    pub fn with_config(config: TrackerConfig) -> Self {
        Self::with_reporter(config, NoOpReporter)
    }
}

impl<R: TrackReporter> Tracker<R> {
    /// Create a tracker that reports to `reporter`
    pub fn with_reporter(config: TrackerConfig, reporter: R) -> Self {
        let size_filter = SizeFilter::with_thresholds(config.class, config.size.clone());
        Self {
            size_filter,
            track_filter: TrackFilter::with_reporter(config, reporter),
        }
    }

    /// Run one frame of raw clusters through both filters.
    ///
    /// Frames must arrive in non-decreasing timestamp order.
    pub fn process_frame(&mut self, clusters: &[Cluster], stamp: Timestamp) -> Option<TrackEstimate> {
        let candidates = self.size_filter.filter(clusters);
        self.track_filter.reporter_mut().on_size_filtered(
            stamp.as_secs_f64(),
            clusters.len(),
            candidates.len(),
        );
        self.track_filter.step(&candidates, stamp)
    }

    /// Configuration in use
    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        self.track_filter.config()
    }

    /// Size filter stage
    #[inline]
    pub fn size_filter(&self) -> &SizeFilter {
        &self.size_filter
    }

    /// Track filter stage
    #[inline]
    pub fn track_filter(&self) -> &TrackFilter<R> {
        &self.track_filter
    }

    /// Track state (read-only)
    #[inline]
    pub fn state(&self) -> &TrackState {
        self.track_filter.state()
    }

    /// Current lifecycle phase
    #[inline]
    pub fn phase(&self) -> TrackPhase {
        self.track_filter.phase()
    }

    /// Reporter (read-only)
    #[inline]
    pub fn reporter(&self) -> &R {
        self.track_filter.reporter()
    }

    /// Reporter (mutable)
    #[inline]
    pub fn reporter_mut(&mut self) -> &mut R {
        self.track_filter.reporter_mut()
    }

    /// Forget the track, keeping the configuration
    pub fn reset(&mut self) {
        self.track_filter.reset();
    }
}
