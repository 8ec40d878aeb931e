//! Simulated replay of a single tracked target
//!
//! Generates a target of the chosen class moving in a straight line through
//! random clutter, with missed detections, and prints the tracker output for
//! every frame.
//!
//! Run with: cargo run --example replay -- --class ped --frames 80

use std::process;

use clap::Parser;
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use cluster_tracker::config::GROUND_Z;
use cluster_tracker::{
    Cluster, CompositeReporter, DebugReporter, LoggingReporter, TargetClass, Timestamp, Tracker,
    TrackerConfig, VelocityGate,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Target class: car or ped
    #[arg(short = 'k', long, default_value = "car")]
    class: String,

    /// Random seed for deterministic runs
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 100)]
    frames: usize,

    /// Frame period (s)
    #[arg(long, default_value_t = 0.1)]
    period: f64,

    /// Probability that the target is missing from a frame
    #[arg(short, long, default_value_t = 0.1)]
    dropout: f64,

    /// Number of random clutter clusters per frame
    #[arg(short, long, default_value_t = 5)]
    clutter: usize,

    /// Gate on change of velocity instead of absolute speed
    #[arg(long)]
    speed_change: bool,

    /// Load the tracker configuration from a JSON file
    #[arg(long)]
    config: Option<String>,
}

/// Nominal target dimensions (length, width, height) and speed for a class
fn target_profile(class: TargetClass) -> (f64, f64, f64, f64) {
    match class {
        TargetClass::Car => (4.5, 1.8, 1.5, 8.0),
        TargetClass::Pedestrian => (0.6, 0.5, 1.7, 1.4),
    }
}

fn target_cluster(class: TargetClass, t: f64, rng: &mut StdRng) -> Cluster {
    let (length, width, height, speed) = target_profile(class);
    let x = -10.0 + speed * t + rng.gen_range(-0.05..0.05);
    let y = 3.0 + rng.gen_range(-0.05..0.05);
    let points = match class {
        TargetClass::Car => rng.gen_range(60..300),
        TargetClass::Pedestrian => rng.gen_range(15..80),
    };
    Cluster::from_bounds(
        Vector3::new(x - length / 2.0, y - width / 2.0, GROUND_Z),
        Vector3::new(x + length / 2.0, y + width / 2.0, GROUND_Z + height),
        points,
    )
}

fn clutter_cluster(rng: &mut StdRng) -> Cluster {
    let x = rng.gen_range(-30.0..30.0);
    let y = rng.gen_range(-30.0..30.0);
    let length = rng.gen_range(0.2..8.0);
    let width = rng.gen_range(0.2..3.0);
    let height = rng.gen_range(0.3..3.5);
    Cluster::from_bounds(
        Vector3::new(x, y, GROUND_Z),
        Vector3::new(x + length, y + width, GROUND_Z + height),
        rng.gen_range(5..400),
    )
}

fn load_config(args: &Args) -> TrackerConfig {
    if let Some(path) = &args.config {
        let json = std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Failed to read {}: {}", path, e);
            process::exit(1);
        });
        return TrackerConfig::from_json(&json).unwrap_or_else(|e| {
            eprintln!("Invalid configuration in {}: {}", path, e);
            process::exit(1);
        });
    }

    let class: TargetClass = args.class.parse().unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    });
    let gate = if args.speed_change {
        VelocityGate::speed_change()
    } else {
        VelocityGate::Speed
    };
    TrackerConfig::builder(class).gate(gate).build().unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        process::exit(1);
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args);
    let class = config.class;

    println!("Cluster Tracker Replay ({})", class);
    println!("=====================================");
    println!("Seed: {}", args.seed);
    println!("Frames: {} at {} s", args.frames, args.period);
    println!("Dropout: {}", args.dropout);
    println!("Clutter: {} per frame", args.clutter);
    println!("Gate: {:?}", config.gate);
    println!();

    let mut rng = StdRng::seed_from_u64(args.seed);
    let reporter = CompositeReporter::new(LoggingReporter::new(), DebugReporter::new());
    let mut tracker = Tracker::with_reporter(config, reporter);

    let mut emitted = 0usize;
    for k in 0..args.frames {
        let t = k as f64 * args.period;
        let mut clusters: Vec<Cluster> = (0..args.clutter).map(|_| clutter_cluster(&mut rng)).collect();
        if !rng.gen_bool(args.dropout.clamp(0.0, 1.0)) {
            let at = rng.gen_range(0..=clusters.len());
            clusters.insert(at, target_cluster(class, t, &mut rng));
        }

        match tracker.process_frame(&clusters, Timestamp::from_secs_f64(t)) {
            Some(estimate) => {
                emitted += 1;
                println!(
                    "t={:7.3}  {:<9}  phase={:<13}  pos=({:7.2}, {:6.2})  size={:.2}x{:.2}x{:.2}",
                    estimate.time,
                    format!("{:?}", estimate.source),
                    format!("{:?}", tracker.phase()),
                    estimate.bbox.px,
                    estimate.bbox.py,
                    estimate.bbox.width,
                    estimate.bbox.height,
                    estimate.bbox.depth,
                );
            }
            None => println!("t={:7.3}  -", t),
        }
    }

    let debug = tracker.reporter().second();
    println!();
    println!("=== Summary ===");
    println!("Frames with output: {}/{}", emitted, args.frames);
    println!("Confirmations at: {:?}", debug.confirmations());
    println!("Losses at: {:?}", debug.losses());
    println!("Final phase: {:?}", tracker.phase());
}
