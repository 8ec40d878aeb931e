/*!
# cluster-tracker - Single-target tracking of LiDAR point-cloud clusters

Turns per-frame clusters from a point-cloud segmenter into at most one
tracked bounding box per frame for a single target of a known class
(car or pedestrian).

## Features

- Class-specific size filter (width, height above ground, base height,
  point count, footprint area)
- Velocity-gated single-target track filter with confirmation and loss
  hysteresis
- Dead-reckoned estimates while the target is briefly unobserved
- Pluggable reporters for logging and event capture

## Modules

- [`types`] - Clusters, boxes, timestamps and filter output
- [`config`] - Per-class thresholds, builder and JSON configuration
- [`components`] - Velocity gating, arbitration and prediction
- [`filter`] - Size filter and track filter
- [`pipeline`] - Size filter and track filter chained per frame
- [`reporter`] - Lifecycle callbacks

## Example

```rust
use cluster_tracker::{Cluster, EstimateSource, TargetClass, Timestamp, Tracker, TrackPhase};
use nalgebra::Vector3;

let mut tracker = Tracker::new(TargetClass::Car);

// A car driving along x at 8 m/s, one frame every 0.125 s
for i in 0..=9 {
    let t = f64::from(i) * 0.125;
    let x = 8.0 * t;
    let car = Cluster::from_bounds(
        Vector3::new(x, 0.0, -1.5),
        Vector3::new(x + 4.5, 1.8, 0.0),
        200,
    );
    let estimate = tracker.process_frame(&[car], Timestamp::from_secs_f64(t)).unwrap();
    assert_ne!(estimate.source, EstimateSource::Predicted);
}
assert_eq!(tracker.phase(), TrackPhase::Tracking);

// Target occluded: the tracker keeps dead-reckoning
let estimate = tracker.process_frame(&[], Timestamp::from_secs_f64(1.25)).unwrap();
assert!(estimate.is_predicted());
```
*/

// ============================================================================
// Core modules
// ============================================================================

/// Clusters, boxes, timestamps and filter output
pub mod types;

/// Per-class thresholds and tracker configuration
pub mod config;

/// Shared tracking components (gating, prediction)
pub mod components;

/// Size filter, track filter and the `Filter` trait
pub mod filter;

/// Size filter and track filter chained per frame
pub mod pipeline;

/// Observability callbacks
pub mod reporter;

// ============================================================================
// Re-exports for convenience
// ============================================================================

// Core types
pub use types::{cluster_to_box, BoundingBox, Cluster, Timestamp};

// Output types
pub use types::{EstimateSource, TrackEstimate, TrackPhase};

// Configuration
pub use config::{
    MotionLimits, SizeThresholds, TargetClass, TrackerConfig, TrackerConfigBuilder, VelocityGate,
};

// Errors
pub use filter::{ConfigError, SizeRejection};

// Traits
pub use filter::Filter;

// Filters
pub use filter::{SizeFilter, TrackFilter, TrackState};
pub use pipeline::Tracker;

// Reporters
pub use reporter::{
    CompositeReporter, DebugReporter, LoggingReporter, NoOpReporter, TrackEvent, TrackReporter,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
