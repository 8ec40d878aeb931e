//! End-to-end tests of the size filter + track filter pipeline

#[path = "helpers/scenarios.rs"]
mod scenarios;

use cluster_tracker::{
    Cluster, DebugReporter, EstimateSource, TargetClass, TrackEvent, TrackPhase, Tracker,
    TrackerConfig,
};

use scenarios::{along_x, at, bus, car, frame_time, pedestrian};

/// Street scene: a pedestrian walking at 1.2 m/s past a parked bus and a
/// moving car, occluded between frames 12 and 15.
fn street_frame(i: u32) -> Vec<Cluster> {
    let t = frame_time(i);
    let mut clusters = vec![bus(-15.0, 6.0), car(along_x(-30.0, 12.0, t), -4.0, 300)];
    if !(12..=15).contains(&i) {
        clusters.push(pedestrian(along_x(2.0, 1.2, t), 1.0, 45));
    }
    clusters
}

#[test]
fn test_pedestrian_tracked_through_clutter_and_occlusion() {
    let mut tracker = Tracker::new(TargetClass::Pedestrian);
    let mut sources = Vec::new();

    for i in 0..24 {
        let t = frame_time(i);
        let estimate = tracker.process_frame(&street_frame(i), at(t)).unwrap();
        assert_eq!(estimate.time, t);
        // Only the pedestrian ever gets through the size filter
        assert!((estimate.bbox.py - 1.0).abs() < 1e-9);
        sources.push(estimate.source);
    }

    assert_eq!(sources[0], EstimateSource::Seed);
    assert!(sources[1..12].iter().all(|s| *s == EstimateSource::Measured));
    assert!(sources[12..16].iter().all(|s| *s == EstimateSource::Predicted));
    assert!(sources[16..].iter().all(|s| *s == EstimateSource::Measured));
    assert_eq!(tracker.phase(), TrackPhase::Tracking);
}

#[test]
fn test_car_tracker_ignores_pedestrian_and_bus() {
    let mut tracker = Tracker::with_reporter(TargetClass::Car.into(), DebugReporter::new());

    for i in 0..12 {
        let t = frame_time(i);
        let estimate = tracker.process_frame(&street_frame(i), at(t)).unwrap();
        assert!((estimate.bbox.py + 4.0).abs() < 1e-9);
    }
    assert_eq!(tracker.phase(), TrackPhase::Tracking);
    assert_eq!(tracker.reporter().confirmations(), vec![frame_time(9)]);

    let filtered: Vec<_> = tracker
        .reporter()
        .events()
        .iter()
        .filter_map(|e| match e {
            TrackEvent::SizeFiltered { raw, kept, .. } => Some((*raw, *kept)),
            _ => None,
        })
        .collect();
    assert_eq!(filtered.len(), 12);
    assert!(filtered.iter().all(|&(raw, kept)| raw == 3 && kept == 1));
}

#[test]
fn test_tracker_from_json_config() {
    let json = r#"{
        "class": "ped",
        "size": {
            "ground_z": -1.5,
            "min_width": null,
            "max_width": 1.2,
            "min_depth": 1.0,
            "max_depth": 2.2,
            "max_base": -0.8,
            "min_point_count": 10,
            "max_area": 1.2
        },
        "motion": {
            "speed_limit": 5.0,
            "init_duration": 0.5,
            "reset_duration": 0.5
        },
        "gate": { "kind": "speed_change", "max_change": 4.17 }
    }"#;
    let config = TrackerConfig::from_json(json).unwrap();
    let mut tracker = Tracker::with_config(config);

    for i in 0..=5 {
        let t = frame_time(i);
        tracker.process_frame(&[pedestrian(along_x(0.0, 1.0, t), 0.0, 30)], at(t));
    }
    // Shorter confirmation window than the pedestrian default
    assert_eq!(tracker.phase(), TrackPhase::Tracking);
}
