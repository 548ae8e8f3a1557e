//! Demonstration of the gaze pointer agent engine.
//!
//! This example shows how to:
//! 1. Build an engine against the simulated pointer host
//! 2. Feed it a fixation sequence
//! 3. Observe the speed decisions it makes
//!
//! Run with: cargo run --example replay_demo
//!
//! The simulated host is used so the demo works on any platform without
//! touching the real OS pointer settings.

use gaze_pointer_agent::{
    engine::{Engine, SpeedPolicy},
    event::FixationEvent,
    pointer::{PointerHost, SimulatedPointerHost},
    telemetry::SessionLog,
    EngineOutcome,
};

fn main() {
    println!("Gaze Pointer Agent - Replay Demo");
    println!("================================");
    println!();

    let mut host = SimulatedPointerHost::new();
    host.set_cursor(50, 50);

    let mut engine = Engine::new(host, SpeedPolicy::default());
    let telemetry = SessionLog::new();

    println!("Session ID: {}", telemetry.session_id());
    println!("Cursor pinned at (50, 50); replaying a fixation sequence...");
    println!();

    // A fixation that starts near the cursor, drifts far away, and ends.
    let events = vec![
        FixationEvent::begin(50.0, 50.0, 1000.0),
        FixationEvent::data(52.0, 51.0, 1200.0),
        FixationEvent::data(60.0, 55.0, 1500.0),
        FixationEvent::data(500.0, 500.0, 2200.0),
        FixationEvent::end(500.0, 500.0, 3000.0),
        // A second, shorter fixation right on the cursor.
        FixationEvent::begin(49.0, 50.0, 3500.0),
        FixationEvent::data(49.0, 50.0, 3600.0),
        FixationEvent::end(49.0, 50.0, 3900.0),
    ];

    for event in &events {
        match engine.handle(event) {
            Ok(EngineOutcome::FixationStarted { point }) => {
                telemetry.record_fixation_begun();
                println!("Fixation started at ({:.0}, {:.0})", point.x, point.y);
            }
            Ok(EngineOutcome::SpeedAdjusted { point, decision }) => {
                telemetry.record_sample();
                match decision {
                    Some(d) => {
                        telemetry.record_speed_change();
                        println!(
                            "  Sample at ({:.0}, {:.0}): distance² = {:.0} → speed {}",
                            point.x, point.y, d.distance_sq, d.speed
                        );
                    }
                    None => {
                        telemetry.record_query_failure();
                        println!(
                            "  Sample at ({:.0}, {:.0}): cursor query failed, skipped",
                            point.x, point.y
                        );
                    }
                }
            }
            Ok(EngineOutcome::FixationEnded { point, duration_ms }) => {
                telemetry.record_fixation_ended();
                println!(
                    "Fixation ended at ({:.0}, {:.0}) after {:.0} ms → resting speed",
                    point.x, point.y, duration_ms
                );
                println!();
            }
            Err(e) => {
                eprintln!("Fatal: {e}");
                return;
            }
        }
    }

    let applied: Vec<u8> = engine
        .host()
        .applied_speeds()
        .iter()
        .map(|s| s.get())
        .collect();
    println!("Speeds applied to the host, in order: {applied:?}");
    println!(
        "Host speed now: {}",
        engine.host_mut().pointer_speed().unwrap()
    );
    println!();
    println!("{}", telemetry.summary());
    println!();
    println!("Demo complete!");
}
