//! Single-target track filter.
//!
//! The track filter turns a stream of size-filtered candidate clusters into
//! at most one box per frame. It keeps a single previous sample (box, time,
//! velocity) and two hysteresis timers:
//!
//! - the *confirmation* timer requires velocity-consistent candidates for
//!   longer than `init_duration` before the track is trusted
//! - the *reset* timer tolerates frames without a consistent candidate for up
//!   to `reset_duration` before a trusted track is dropped
//!
//! Between confirmation and loss the filter dead-reckons rather than going
//! silent. When a trusted track is dropped, the same frame's candidates get
//! one chance to seed a new confirmation.

use nalgebra::Vector2;

use crate::components::gating::{gate_candidates, select_best, GatedCandidate, ReferenceSample};
use crate::components::prediction::dead_reckon;
use crate::config::{TargetClass, TrackerConfig};
use crate::reporter::{NoOpReporter, TrackReporter};
use crate::types::{BoundingBox, Cluster, EstimateSource, Timestamp, TrackEstimate, TrackPhase};

use super::traits::Filter;

/// Mutable state of one track.
///
/// Invariants: `valid` implies `initialized`, and at most one of the two
/// timers is running.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackState {
    /// Track has been confirmed at least once
    pub initialized: bool,
    /// Track is currently trusted
    pub valid: bool,
    /// Start of the running confirmation window
    pub init_started: Option<f64>,
    /// Start of the running loss window
    pub reset_started: Option<f64>,
    /// Time of the last accepted sample
    pub prev_time: f64,
    /// Velocity estimated at the last accepted sample
    pub prev_velocity: Vector2<f64>,
    /// `prev_velocity` was measured rather than zeroed by a seed
    pub velocity_known: bool,
    /// Last accepted box
    pub prev_box: BoundingBox,
}

impl TrackState {
    /// Lifecycle phase implied by the flags and timers
    pub fn phase(&self) -> TrackPhase {
        if self.init_started.is_some() {
            TrackPhase::Confirming
        } else if !self.initialized {
            TrackPhase::Uninitialized
        } else if !self.valid {
            TrackPhase::Lost
        } else if self.reset_started.is_some() {
            TrackPhase::Coasting
        } else {
            TrackPhase::Tracking
        }
    }

    #[inline]
    fn is_trusted(&self) -> bool {
        self.initialized && self.valid
    }

    #[inline]
    fn reference(&self) -> ReferenceSample {
        let velocity = self.velocity_known.then_some(self.prev_velocity);
        ReferenceSample::new(&self.prev_box, self.prev_time, velocity)
    }
}

/// Outcome of processing a frame while the track is trusted
enum TrustedOutcome {
    Estimate(TrackEstimate),
    Demoted,
}

/// Single-target track filter.
///
/// # Type Parameters
///
/// * `R` - Reporter receiving lifecycle callbacks (default: [`NoOpReporter`])
///
/// # Example
///
/// ```
/// use cluster_tracker::{Cluster, EstimateSource, Filter, TargetClass, Timestamp, TrackFilter};
/// use nalgebra::Vector3;
///
/// let mut filter = TrackFilter::new(TargetClass::Car);
/// let car = Cluster::from_bounds(
///     Vector3::new(10.0, 0.0, -1.5),
///     Vector3::new(14.5, 1.8, 0.0),
///     200,
/// );
///
/// let estimate = filter.step(&[car], Timestamp::new(100, 0)).unwrap();
/// assert_eq!(estimate.source, EstimateSource::Seed);
/// ```
#[derive(Debug, Clone)]
pub struct TrackFilter<R: TrackReporter = NoOpReporter> {
    config: TrackerConfig,
    state: TrackState,
    reporter: R,
}

impl TrackFilter<NoOpReporter> {
    /// Create a filter with the class defaults
    pub fn new(class: TargetClass) -> Self {
        Self::with_config(TrackerConfig::for_class(class))
    }

    /// Create a filter from a configuration.
    ///
    /// The configuration is trusted as given; build it through
    /// [`TrackerConfig::builder`] or [`TrackerConfig::from_json`] to have it
    /// validated.
    pub fn with_config(config: TrackerConfig) -> Self {
        Self::with_reporter(config, NoOpReporter)
    }
}

impl<R: TrackReporter> TrackFilter<R> {
    /// Create a filter that reports to `reporter`
    pub fn with_reporter(config: TrackerConfig, reporter: R) -> Self {
        Self {
            config,
            state: TrackState::default(),
            reporter,
        }
    }

    /// Configuration in use
    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Reporter (read-only)
    #[inline]
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Reporter (mutable)
    #[inline]
    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    /// Dead-reckoned estimate, or nothing if the track was never confirmed.
    fn predict(&mut self, time: f64) -> Option<TrackEstimate> {
        if self.state.initialized {
            Some(self.extrapolate(time))
        } else {
            None
        }
    }

    fn extrapolate(&mut self, time: f64) -> TrackEstimate {
        let bbox = dead_reckon(
            &self.state.prev_box,
            &self.state.prev_velocity,
            time - self.state.prev_time,
        );
        self.reporter.on_predicted(time, &bbox);
        TrackEstimate::new(time, bbox, EstimateSource::Predicted)
    }

    /// Make `candidate` the new reference sample.
    fn accept(&mut self, candidate: &GatedCandidate<'_>, time: f64) -> TrackEstimate {
        let bbox = BoundingBox::from(candidate.cluster);
        self.state.prev_velocity = candidate.velocity;
        self.state.velocity_known = true;
        self.state.prev_time = time;
        self.state.prev_box = bbox;
        self.reporter.on_measured(time, &bbox, &candidate.velocity);
        TrackEstimate::new(time, bbox, EstimateSource::Measured)
    }

    /// Start a confirmation window from the best candidate, without gating.
    fn seed(&mut self, candidates: &[Cluster], time: f64) -> Option<TrackEstimate> {
        let best = select_best(candidates, |c| c.point_count)?;
        let bbox = BoundingBox::from(best);

        debug_assert!(self.state.reset_started.is_none());
        self.state.prev_velocity = Vector2::zeros();
        self.state.velocity_known = false;
        self.state.prev_time = time;
        self.state.prev_box = bbox;
        self.state.init_started = Some(time);

        self.reporter.on_seed(time, &bbox);
        Some(TrackEstimate::new(time, bbox, EstimateSource::Seed))
    }

    /// Frame handling while the track is not trusted.
    fn confirm(&mut self, candidates: &[Cluster], time: f64) -> Option<TrackEstimate> {
        let Some(started) = self.state.init_started else {
            return self.seed(candidates, time);
        };

        let gated = self.gate(candidates, time);
        let Some(best) = select_best(&gated, |g| g.cluster.point_count) else {
            self.state.init_started = None;
            self.reporter.on_confirmation_aborted(time);
            return self.predict(time);
        };

        let estimate = self.accept(best, time);
        if time - started > self.config.motion.init_duration {
            self.state.initialized = true;
            self.state.valid = true;
            self.state.init_started = None;
            self.reporter.on_confirmed(time);
        }
        Some(estimate)
    }

    /// Frame handling while the track is trusted.
    fn track(&mut self, candidates: &[Cluster], time: f64) -> TrustedOutcome {
        let gated = self.gate(candidates, time);
        if let Some(best) = select_best(&gated, |g| g.cluster.point_count) {
            let estimate = self.accept(best, time);
            self.state.init_started = None;
            self.state.reset_started = None;
            return TrustedOutcome::Estimate(estimate);
        }

        match self.state.reset_started {
            Some(started) if time - started > self.config.motion.reset_duration => {
                self.state.valid = false;
                self.state.reset_started = None;
                self.reporter.on_lost(time);
                TrustedOutcome::Demoted
            }
            Some(_) => TrustedOutcome::Estimate(self.extrapolate(time)),
            None => {
                self.state.reset_started = Some(time);
                self.reporter.on_coast_started(time);
                TrustedOutcome::Estimate(self.extrapolate(time))
            }
        }
    }

    fn gate<'a>(&self, candidates: &'a [Cluster], time: f64) -> Vec<GatedCandidate<'a>> {
        gate_candidates(
            candidates,
            &self.state.reference(),
            time,
            self.config.motion.speed_limit,
            self.config.gate,
        )
    }
}

impl<R: TrackReporter> Filter for TrackFilter<R> {
    type State = TrackState;

    fn step(&mut self, candidates: &[Cluster], stamp: Timestamp) -> Option<TrackEstimate> {
        let time = stamp.as_secs_f64();

        if candidates.is_empty() {
            return self.predict(time);
        }

        if self.state.is_trusted() {
            match self.track(candidates, time) {
                TrustedOutcome::Estimate(estimate) => return Some(estimate),
                // Demoted this frame: retry once as a fresh confirmation
                TrustedOutcome::Demoted => {}
            }
        }

        self.confirm(candidates, time)
    }

    fn state(&self) -> &TrackState {
        &self.state
    }

    fn phase(&self) -> TrackPhase {
        self.state.phase()
    }

    fn reset(&mut self) {
        self.state = TrackState::default();
        self.reporter.on_reset();
    }
}
