//! Observability for track filter execution.
//!
//! This module provides the [`TrackReporter`] trait. Reporters receive
//! callbacks at every lifecycle decision the track filter makes without
//! polluting the state machine itself.
//!
//! # Zero-Cost Abstraction
//!
//! The default [`NoOpReporter`] compiles to zero overhead - all callback
//! methods are empty and will be optimized away by the compiler.
//!
//! # Example
//!
//! ```
//! use cluster_tracker::{DebugReporter, Filter, TargetClass, Timestamp, TrackFilter};
//!
//! let mut filter = TrackFilter::with_reporter(TargetClass::Car.into(), DebugReporter::new());
//! filter.step(&[], Timestamp::new(0, 0));
//!
//! // Nothing was seen, so nothing was reported
//! assert_eq!(filter.reporter().total_events(), 0);
//! ```

use nalgebra::Vector2;

use crate::types::BoundingBox;

// ============================================================================
// TrackReporter Trait
// ============================================================================

/// Observability trait for track filter execution.
///
/// All methods have default empty implementations, so you only need
/// to override the events you care about. `time` is always the frame time
/// in seconds.
pub trait TrackReporter {
    /// Called by the tracker pipeline after the size filter ran.
    fn on_size_filtered(&mut self, _time: f64, _raw: usize, _kept: usize) {}

    /// Called when a candidate seeds a new confirmation attempt.
    fn on_seed(&mut self, _time: f64, _bbox: &BoundingBox) {}

    /// Called when a candidate passes the velocity gate and is accepted.
    fn on_measured(&mut self, _time: f64, _bbox: &BoundingBox, _velocity: &Vector2<f64>) {}

    /// Called when the output box is dead-reckoned.
    fn on_predicted(&mut self, _time: f64, _bbox: &BoundingBox) {}

    /// Called when the confirmation window elapses and the track becomes valid.
    fn on_confirmed(&mut self, _time: f64) {}

    /// Called when a running confirmation is abandoned for lack of gated candidates.
    fn on_confirmation_aborted(&mut self, _time: f64) {}

    /// Called when a valid track first misses and the reset timer starts.
    fn on_coast_started(&mut self, _time: f64) {}

    /// Called when the reset window elapses and the track is demoted.
    fn on_lost(&mut self, _time: f64) {}

    /// Called when the filter state is reset in place.
    fn on_reset(&mut self) {}
}

// ============================================================================
// NoOpReporter
// ============================================================================

/// Zero-cost reporter that does nothing.
///
/// This is the default reporter used when no observability is needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpReporter;

impl NoOpReporter {
    /// Create a new no-op reporter.
    pub fn new() -> Self {
        Self
    }
}

impl TrackReporter for NoOpReporter {}

// ============================================================================
// DebugReporter
// ============================================================================

/// Single captured filter event.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackEvent {
    SizeFiltered { time: f64, raw: usize, kept: usize },
    Seed { time: f64, bbox: BoundingBox },
    Measured { time: f64, bbox: BoundingBox, velocity: Vector2<f64> },
    Predicted { time: f64, bbox: BoundingBox },
    Confirmed { time: f64 },
    ConfirmationAborted { time: f64 },
    CoastStarted { time: f64 },
    Lost { time: f64 },
    Reset,
}

/// Reporter that captures all events in order.
///
/// Intended for tests and offline inspection; memory grows with every frame.
#[derive(Debug, Clone, Default)]
pub struct DebugReporter {
    events: Vec<TrackEvent>,
}

impl DebugReporter {
    /// Create a new debug reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all captured events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// All captured events, oldest first.
    pub fn events(&self) -> &[TrackEvent] {
        &self.events
    }

    /// Times at which the track was confirmed.
    pub fn confirmations(&self) -> Vec<f64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TrackEvent::Confirmed { time } => Some(*time),
                _ => None,
            })
            .collect()
    }

    /// Times at which the track was lost.
    pub fn losses(&self) -> Vec<f64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TrackEvent::Lost { time } => Some(*time),
                _ => None,
            })
            .collect()
    }

    /// Total number of captured events.
    pub fn total_events(&self) -> usize {
        self.events.len()
    }
}

impl TrackReporter for DebugReporter {
    fn on_size_filtered(&mut self, time: f64, raw: usize, kept: usize) {
        self.events.push(TrackEvent::SizeFiltered { time, raw, kept });
    }

    fn on_seed(&mut self, time: f64, bbox: &BoundingBox) {
        self.events.push(TrackEvent::Seed { time, bbox: *bbox });
    }

    fn on_measured(&mut self, time: f64, bbox: &BoundingBox, velocity: &Vector2<f64>) {
        self.events.push(TrackEvent::Measured {
            time,
            bbox: *bbox,
            velocity: *velocity,
        });
    }

    fn on_predicted(&mut self, time: f64, bbox: &BoundingBox) {
        self.events.push(TrackEvent::Predicted { time, bbox: *bbox });
    }

    fn on_confirmed(&mut self, time: f64) {
        self.events.push(TrackEvent::Confirmed { time });
    }

    fn on_confirmation_aborted(&mut self, time: f64) {
        self.events.push(TrackEvent::ConfirmationAborted { time });
    }

    fn on_coast_started(&mut self, time: f64) {
        self.events.push(TrackEvent::CoastStarted { time });
    }

    fn on_lost(&mut self, time: f64) {
        self.events.push(TrackEvent::Lost { time });
    }

    fn on_reset(&mut self) {
        self.events.push(TrackEvent::Reset);
    }
}

// ============================================================================
// LoggingReporter
// ============================================================================

/// Reporter that forwards events to the `log` facade.
///
/// By default:
/// - lifecycle transitions (`on_confirmed`, `on_lost`, `on_reset`): INFO
/// - per-frame outcomes (`on_seed`, `on_predicted`, `on_coast_started`,
///   `on_confirmation_aborted`): DEBUG
/// - `on_measured`, `on_size_filtered`: TRACE, or DEBUG when verbose
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingReporter {
    /// Whether to log accepted samples at DEBUG instead of TRACE
    verbose: bool,
}

impl LoggingReporter {
    /// Create a new logging reporter.
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Create a verbose logging reporter.
    pub fn verbose() -> Self {
        Self { verbose: true }
    }

    fn detail_level(&self) -> log::Level {
        if self.verbose {
            log::Level::Debug
        } else {
            log::Level::Trace
        }
    }
}

impl TrackReporter for LoggingReporter {
    fn on_size_filtered(&mut self, time: f64, raw: usize, kept: usize) {
        log::log!(
            self.detail_level(),
            "[{:.3}] size filter kept {} of {} clusters",
            time,
            kept,
            raw
        );
    }

    fn on_seed(&mut self, time: f64, bbox: &BoundingBox) {
        log::debug!(
            "[{:.3}] seeded track at ({:.2}, {:.2})",
            time,
            bbox.px,
            bbox.py
        );
    }

    fn on_measured(&mut self, time: f64, bbox: &BoundingBox, velocity: &Vector2<f64>) {
        log::log!(
            self.detail_level(),
            "[{:.3}] accepted candidate at ({:.2}, {:.2}), speed {:.2} m/s",
            time,
            bbox.px,
            bbox.py,
            velocity.norm()
        );
    }

    fn on_predicted(&mut self, time: f64, bbox: &BoundingBox) {
        log::debug!(
            "[{:.3}] dead-reckoned to ({:.2}, {:.2})",
            time,
            bbox.px,
            bbox.py
        );
    }

    fn on_confirmed(&mut self, time: f64) {
        log::info!("[{:.3}] track confirmed", time);
    }

    fn on_confirmation_aborted(&mut self, time: f64) {
        log::debug!("[{:.3}] confirmation aborted, no gated candidate", time);
    }

    fn on_coast_started(&mut self, time: f64) {
        log::debug!("[{:.3}] track coasting", time);
    }

    fn on_lost(&mut self, time: f64) {
        log::info!("[{:.3}] track lost", time);
    }

    fn on_reset(&mut self) {
        log::info!("track state reset");
    }
}

// ============================================================================
// CompositeReporter
// ============================================================================

/// Reporter that forwards events to two child reporters.
///
/// Useful when you need both logging and event capture. Nest composites
/// for more than two.
#[derive(Debug, Clone, Default)]
pub struct CompositeReporter<A: TrackReporter, B: TrackReporter> {
    first: A,
    second: B,
}

impl<A: TrackReporter, B: TrackReporter> CompositeReporter<A, B> {
    /// Create a new composite reporter.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// Get reference to the first reporter.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// Get reference to the second reporter.
    pub fn second(&self) -> &B {
        &self.second
    }

    /// Consume and return both reporters.
    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: TrackReporter, B: TrackReporter> TrackReporter for CompositeReporter<A, B> {
    fn on_size_filtered(&mut self, time: f64, raw: usize, kept: usize) {
        self.first.on_size_filtered(time, raw, kept);
        self.second.on_size_filtered(time, raw, kept);
    }

    fn on_seed(&mut self, time: f64, bbox: &BoundingBox) {
        self.first.on_seed(time, bbox);
        self.second.on_seed(time, bbox);
    }

    fn on_measured(&mut self, time: f64, bbox: &BoundingBox, velocity: &Vector2<f64>) {
        self.first.on_measured(time, bbox, velocity);
        self.second.on_measured(time, bbox, velocity);
    }

    fn on_predicted(&mut self, time: f64, bbox: &BoundingBox) {
        self.first.on_predicted(time, bbox);
        self.second.on_predicted(time, bbox);
    }

    fn on_confirmed(&mut self, time: f64) {
        self.first.on_confirmed(time);
        self.second.on_confirmed(time);
    }

    fn on_confirmation_aborted(&mut self, time: f64) {
        self.first.on_confirmation_aborted(time);
        self.second.on_confirmation_aborted(time);
    }

    fn on_coast_started(&mut self, time: f64) {
        self.first.on_coast_started(time);
        self.second.on_coast_started(time);
    }

    fn on_lost(&mut self, time: f64) {
        self.first.on_lost(time);
        self.second.on_lost(time);
    }

    fn on_reset(&mut self) {
        self.first.on_reset();
        self.second.on_reset();
    }
}
