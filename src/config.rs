//! Configuration types for filters
//!
//! Every threshold the size and track filters use is resolved from the
//! [`TargetClass`] at construction time. The per-class defaults are exposed as
//! named constants; [`TrackerConfigBuilder`] can override any of them before a
//! filter is built, after which the configuration is immutable.
//!
//! Heights are in the sensor frame: `GROUND_Z` is the ground plane height
//! and the depth bounds are measured upwards from it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::filter::errors::ConfigError;

// ============================================================================
// Defaults
// ============================================================================

/// Ground plane height in the sensor frame (m)
pub const GROUND_Z: f64 = -1.5;

/// Maximum horizontal extent of a pedestrian cluster (m)
pub const PEDESTRIAN_MAX_WIDTH: f64 = 1.2;
/// Minimum height of a pedestrian's top above ground (m)
pub const PEDESTRIAN_MIN_DEPTH: f64 = 1.0;
/// Maximum height of a pedestrian's top above ground (m)
pub const PEDESTRIAN_MAX_DEPTH: f64 = 2.2;
/// Maximum z of a pedestrian's lowest point, absolute (m)
pub const PEDESTRIAN_MAX_BASE: f64 = -0.8;
/// Minimum number of points in a pedestrian cluster
pub const PEDESTRIAN_MIN_POINT_COUNT: usize = 10;
/// Maximum footprint area of a pedestrian cluster (m²)
pub const PEDESTRIAN_MAX_AREA: f64 = 1.2;
/// Maximum plausible pedestrian speed (m/s)
pub const PEDESTRIAN_SPEED_LIMIT: f64 = 5.0;
/// Time a pedestrian track must be sustained before confirmation (s)
pub const PEDESTRIAN_FILTER_INIT_TIME: f64 = 1.0;
/// Time a confirmed pedestrian track may go unmatched before loss (s)
pub const PEDESTRIAN_FILTER_RESET_TIME: f64 = 2.0;

/// Maximum horizontal extent of a car cluster (m)
pub const CAR_MAX_WIDTH: f64 = 6.0;
/// Minimum height of a car's top above ground (m)
pub const CAR_MIN_DEPTH: f64 = 0.8;
/// Maximum height of a car's top above ground (m)
pub const CAR_MAX_DEPTH: f64 = 2.6;
/// Minimum number of points in a car cluster
pub const CAR_MIN_POINT_COUNT: usize = 30;
/// Maximum footprint area of a car cluster (m²)
pub const CAR_MAX_AREA: f64 = 15.0;
/// Maximum plausible car speed (m/s)
pub const CAR_SPEED_LIMIT: f64 = 30.0;
/// Time a car track must be sustained before confirmation (s)
pub const CAR_FILTER_INIT_TIME: f64 = 1.0;
/// Time a confirmed car track may go unmatched before loss (s)
pub const CAR_FILTER_RESET_TIME: f64 = 1.0;

/// Default bound on sample-to-sample velocity change for
/// [`VelocityGate::SpeedChange`] (20 km/h, in m/s)
pub const DEFAULT_MAX_SPEED_CHANGE: f64 = 4.17;

// ============================================================================
// Target class
// ============================================================================

/// Class of object a filter instance tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetClass {
    #[serde(rename = "car")]
    Car,
    #[serde(rename = "ped", alias = "pedestrian")]
    Pedestrian,
}

impl TargetClass {
    /// Default size gates for this class
    pub fn size_thresholds(self) -> SizeThresholds {
        match self {
            TargetClass::Car => SizeThresholds {
                ground_z: GROUND_Z,
                min_width: Some(PEDESTRIAN_MAX_WIDTH),
                max_width: CAR_MAX_WIDTH,
                min_depth: CAR_MIN_DEPTH,
                max_depth: CAR_MAX_DEPTH,
                max_base: None,
                min_point_count: CAR_MIN_POINT_COUNT,
                max_area: CAR_MAX_AREA,
            },
            TargetClass::Pedestrian => SizeThresholds {
                ground_z: GROUND_Z,
                min_width: None,
                max_width: PEDESTRIAN_MAX_WIDTH,
                min_depth: PEDESTRIAN_MIN_DEPTH,
                max_depth: PEDESTRIAN_MAX_DEPTH,
                max_base: Some(PEDESTRIAN_MAX_BASE),
                min_point_count: PEDESTRIAN_MIN_POINT_COUNT,
                max_area: PEDESTRIAN_MAX_AREA,
            },
        }
    }

    /// Default motion limits for this class
    pub fn motion_limits(self) -> MotionLimits {
        match self {
            TargetClass::Car => MotionLimits {
                speed_limit: CAR_SPEED_LIMIT,
                init_duration: CAR_FILTER_INIT_TIME,
                reset_duration: CAR_FILTER_RESET_TIME,
            },
            TargetClass::Pedestrian => MotionLimits {
                speed_limit: PEDESTRIAN_SPEED_LIMIT,
                init_duration: PEDESTRIAN_FILTER_INIT_TIME,
                reset_duration: PEDESTRIAN_FILTER_RESET_TIME,
            },
        }
    }

    /// Short name used in logs and configuration files
    pub fn as_str(self) -> &'static str {
        match self {
            TargetClass::Car => "car",
            TargetClass::Pedestrian => "ped",
        }
    }
}

impl fmt::Display for TargetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetClass {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car" => Ok(TargetClass::Car),
            "ped" | "pedestrian" => Ok(TargetClass::Pedestrian),
            _ => Err(ConfigError::UnknownTargetClass(s.to_string())),
        }
    }
}

// ============================================================================
// Threshold records
// ============================================================================

/// Geometric gates applied by the size filter.
///
/// Gates run in field order: width, top height, base height, point count,
/// footprint area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeThresholds {
    /// Ground plane height; depth bounds are relative to it
    pub ground_z: f64,
    /// Exclusive lower bound on the larger horizontal extent, if any
    pub min_width: Option<f64>,
    /// Inclusive upper bound on the larger horizontal extent
    pub max_width: f64,
    /// Lowest accepted top height above ground (inclusive)
    pub min_depth: f64,
    /// Highest accepted top height above ground (inclusive)
    pub max_depth: f64,
    /// Highest accepted base z, absolute (inclusive), if any
    pub max_base: Option<f64>,
    /// Minimum point count (inclusive)
    pub min_point_count: usize,
    /// Maximum footprint area (inclusive)
    pub max_area: f64,
}

impl SizeThresholds {
    /// Accepted range of `top` in absolute z
    #[inline]
    pub fn top_range(&self) -> (f64, f64) {
        (self.ground_z + self.min_depth, self.ground_z + self.max_depth)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_finite("ground_z", self.ground_z)?;
        check_non_negative("max_width", self.max_width)?;
        check_non_negative("min_depth", self.min_depth)?;
        check_non_negative("max_depth", self.max_depth)?;
        check_non_negative("max_area", self.max_area)?;
        if let Some(min_width) = self.min_width {
            check_non_negative("min_width", min_width)?;
            if min_width >= self.max_width {
                return Err(ConfigError::InvertedRange {
                    name: "width",
                    lower: min_width,
                    upper: self.max_width,
                });
            }
        }
        if let Some(max_base) = self.max_base {
            check_finite("max_base", max_base)?;
        }
        if self.min_depth > self.max_depth {
            return Err(ConfigError::InvertedRange {
                name: "depth",
                lower: self.min_depth,
                upper: self.max_depth,
            });
        }
        Ok(())
    }
}

/// Kinematic limits and hysteresis windows used by the track filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionLimits {
    /// Candidates implying a speed at or above this are rejected (m/s)
    pub speed_limit: f64,
    /// Sustained evidence required before a track is confirmed (s)
    pub init_duration: f64,
    /// Tolerated gap before a confirmed track is declared lost (s)
    pub reset_duration: f64,
}

impl MotionLimits {
    fn validate(&self) -> Result<(), ConfigError> {
        check_positive("speed_limit", self.speed_limit)?;
        check_non_negative("init_duration", self.init_duration)?;
        check_non_negative("reset_duration", self.reset_duration)
    }
}

/// Admissibility test applied to a candidate's implied velocity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VelocityGate {
    /// `|v| < speed_limit`
    #[default]
    Speed,
    /// `|v - previous velocity| < max_change`
    SpeedChange {
        /// Largest accepted velocity change between samples (m/s)
        max_change: f64,
    },
}

impl VelocityGate {
    /// Speed-change gate with the default bound
    pub fn speed_change() -> Self {
        VelocityGate::SpeedChange {
            max_change: DEFAULT_MAX_SPEED_CHANGE,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            VelocityGate::Speed => Ok(()),
            VelocityGate::SpeedChange { max_change } => check_positive("max_change", max_change),
        }
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            name,
            value,
            reason: "must be finite",
        })
    }
}

fn check_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    check_finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            name,
            value,
            reason: "must be non-negative",
        })
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    check_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            name,
            value,
            reason: "must be positive",
        })
    }
}

// ============================================================================
// Tracker configuration
// ============================================================================

/// Complete configuration of one tracked target.
///
/// # Example
///
/// ```
/// use cluster_tracker::{TargetClass, TrackerConfig, VelocityGate};
///
/// let config = TrackerConfig::builder(TargetClass::Pedestrian)
///     .speed_limit(3.0)
///     .gate(VelocityGate::speed_change())
///     .build()
///     .unwrap();
/// assert_eq!(config.motion.speed_limit, 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Tracked class
    pub class: TargetClass,
    /// Size filter gates
    pub size: SizeThresholds,
    /// Track filter limits
    pub motion: MotionLimits,
    /// Velocity gate policy
    #[serde(default)]
    pub gate: VelocityGate,
}

impl TrackerConfig {
    /// Default configuration for a class
    pub fn for_class(class: TargetClass) -> Self {
        Self {
            class,
            size: class.size_thresholds(),
            motion: class.motion_limits(),
            gate: VelocityGate::Speed,
        }
    }

    /// Start a builder seeded with the class defaults
    pub fn builder(class: TargetClass) -> TrackerConfigBuilder {
        TrackerConfigBuilder::new(class)
    }

    /// Check every threshold for domain errors and inverted ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.size.validate()?;
        self.motion.validate()?;
        self.gate.validate()
    }

    /// Decode and validate a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TrackerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Encode the configuration as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<TargetClass> for TrackerConfig {
    fn from(class: TargetClass) -> Self {
        Self::for_class(class)
    }
}

/// Builder for TrackerConfig.
#[derive(Debug, Clone)]
pub struct TrackerConfigBuilder {
    config: TrackerConfig,
}

impl TrackerConfigBuilder {
    /// Create a builder holding the class defaults
    pub fn new(class: TargetClass) -> Self {
        Self {
            config: TrackerConfig::for_class(class),
        }
    }

    /// Replace all size gates.
    pub fn size(mut self, size: SizeThresholds) -> Self {
        self.config.size = size;
        self
    }

    /// Set ground plane height.
    pub fn ground_z(mut self, ground_z: f64) -> Self {
        self.config.size.ground_z = ground_z;
        self
    }

    /// Set the accepted top-height range above ground.
    pub fn depth_range(mut self, min_depth: f64, max_depth: f64) -> Self {
        self.config.size.min_depth = min_depth;
        self.config.size.max_depth = max_depth;
        self
    }

    /// Set the upper width bound.
    pub fn max_width(mut self, max_width: f64) -> Self {
        self.config.size.max_width = max_width;
        self
    }

    /// Set minimum point count.
    pub fn min_point_count(mut self, count: usize) -> Self {
        self.config.size.min_point_count = count;
        self
    }

    /// Set maximum footprint area.
    pub fn max_area(mut self, area: f64) -> Self {
        self.config.size.max_area = area;
        self
    }

    /// Set speed limit.
    pub fn speed_limit(mut self, speed_limit: f64) -> Self {
        self.config.motion.speed_limit = speed_limit;
        self
    }

    /// Set confirmation window.
    pub fn init_duration(mut self, seconds: f64) -> Self {
        self.config.motion.init_duration = seconds;
        self
    }

    /// Set loss tolerance window.
    pub fn reset_duration(mut self, seconds: f64) -> Self {
        self.config.motion.reset_duration = seconds;
        self
    }

    /// Set velocity gate policy.
    pub fn gate(mut self, gate: VelocityGate) -> Self {
        self.config.gate = gate;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<TrackerConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
