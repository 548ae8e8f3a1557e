//! Gaze Pointer Agent CLI
//!
//! Adapts the OS pointer speed to the user's gaze fixations.

use clap::{Parser, Subcommand};
use gaze_pointer_agent::{
    config::Config,
    engine::Engine,
    event::{ReplaySource, TraceInput},
    pointer::Host,
    telemetry::create_shared_log_with_persistence,
    EngineOutcome, VERSION,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gaze-pointer")]
#[command(version = VERSION)]
#[command(about = "Gaze-reactive pointer speed agent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the agent against a fixation event stream
    Run {
        /// Fixation trace to consume: a JSONL file, or `-` for stdin
        /// (a device bridge piping events)
        #[arg(long, default_value = "-")]
        trace: String,

        /// Pace trace events by their timestamps instead of replaying at
        /// full speed
        #[arg(long)]
        realtime: bool,

        /// Override the configured near radius (pixels)
        #[arg(long)]
        near_radius: Option<f64>,
    },

    /// Pause speed adaptation (a running agent falls back to resting speed)
    Pause,

    /// Resume speed adaptation
    Resume,

    /// Show current agent status
    Status,

    /// Show configuration
    Config,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            trace,
            realtime,
            near_radius,
        } => {
            cmd_run(&trace, realtime, near_radius);
        }
        Commands::Pause => {
            cmd_pause();
        }
        Commands::Resume => {
            cmd_resume();
        }
        Commands::Status => {
            cmd_status();
        }
        Commands::Config => {
            cmd_config();
        }
    }
}

fn cmd_run(trace: &str, realtime: bool, near_radius: Option<f64>) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("Gaze Pointer Agent v{VERSION}");
    println!();

    // Load or create configuration
    let mut config = Config::load().unwrap_or_default();
    if let Err(e) = config.ensure_directories() {
        eprintln!("Warning: Could not create directories: {e}");
    }
    if let Some(radius) = near_radius {
        config.near_radius_px = radius;
    }

    println!("Starting speed adaptation...");
    println!("  Trace: {}", if trace == "-" { "stdin" } else { trace });
    println!("  Near radius: {} px", config.near_radius_px);
    println!(
        "  Speeds: near {}, far {}, resting {}",
        config.speeds.near, config.speeds.far, config.speeds.resting
    );
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    // Set up telemetry
    let telemetry = create_shared_log_with_persistence(config.data_path.join("telemetry.json"));
    tracing::info!(session_id = %telemetry.session_id(), "Session started");

    // Create the engine against the platform pointer host
    let mut engine = Engine::new(Host::new(), config.policy());

    // Remember the host speed so shutdown can restore it
    let initial_speed = match engine.current_speed() {
        Ok(speed) => Some(speed),
        Err(e) => {
            eprintln!("Warning: Could not read current pointer speed: {e}");
            None
        }
    };

    // Create the event source
    let mut source = ReplaySource::new(TraceInput::from_arg(trace), realtime);
    if let Err(e) = source.start() {
        eprintln!("Error starting event source: {e}");
        std::process::exit(1);
    }

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc_handler(r);

    // Support pause/resume from another process by polling the config file.
    let mut paused = config.paused;
    let mut last_config_check = std::time::Instant::now();

    if paused {
        println!("Speed adaptation is currently paused.");
        println!("Run `gaze-pointer resume` to re-enable it.");
        println!();
        engine.apply_speed(config.policy().resting());
    }

    // Main event loop
    let receiver = source.receiver().clone();

    while running.load(Ordering::SeqCst) {
        // Periodically reload config so `gaze-pointer pause/resume` can
        // control a running agent.
        if last_config_check.elapsed() >= Duration::from_secs(1) {
            if let Ok(cfg) = Config::load() {
                if cfg.paused != paused {
                    paused = cfg.paused;

                    if paused {
                        println!();
                        println!("Pausing speed adaptation...");
                        engine.apply_speed(config.policy().resting());

                        // Drain any queued events.
                        while receiver.try_recv().is_ok() {}
                    } else {
                        println!();
                        println!("Resuming speed adaptation...");
                    }
                }
            }
            last_config_check = std::time::Instant::now();
        }

        if paused {
            thread::sleep(Duration::from_millis(100));
            continue;
        }

        match receiver.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => match engine.handle(&event) {
                Ok(outcome) => match outcome {
                    EngineOutcome::FixationStarted { .. } => telemetry.record_fixation_begun(),
                    EngineOutcome::SpeedAdjusted { decision, .. } => {
                        telemetry.record_sample();
                        match decision {
                            Some(_) => telemetry.record_speed_change(),
                            None => telemetry.record_query_failure(),
                        }
                    }
                    EngineOutcome::FixationEnded { .. } => telemetry.record_fixation_ended(),
                },
                Err(e) => {
                    // Malformed stream: an upstream contract violation, abort
                    // the session.
                    eprintln!("Fatal: {e}");
                    break;
                }
            },
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {
                if !source.is_running() {
                    println!("Trace exhausted.");
                    break;
                }
            }
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                eprintln!("Event source disconnected unexpectedly");
                break;
            }
        }
    }

    // Stop delivery and restore the pointer speed we found at startup
    println!();
    println!("Stopping...");
    source.stop();

    if let Some(speed) = initial_speed {
        engine.apply_speed(speed);
        println!("Restored pointer speed {speed}");
    } else {
        engine.apply_speed(config.policy().resting());
    }

    // Save telemetry
    if let Err(e) = telemetry.save() {
        eprintln!("Warning: Could not save telemetry: {e}");
    }

    // Final stats
    println!();
    println!("{}", telemetry.summary());
}

fn cmd_pause() {
    let mut config = Config::load().unwrap_or_default();
    config.paused = true;
    if let Err(e) = config.save() {
        eprintln!("Error saving config: {e}");
        std::process::exit(1);
    }
    println!("Speed adaptation paused. Use 'gaze-pointer resume' to continue.");
}

fn cmd_resume() {
    let mut config = Config::load().unwrap_or_default();
    config.paused = false;
    if let Err(e) = config.save() {
        eprintln!("Error saving config: {e}");
        std::process::exit(1);
    }
    println!("Speed adaptation resumed.");
}

fn cmd_status() {
    let config = Config::load().unwrap_or_default();

    println!("Gaze Pointer Agent Status");
    println!("=========================");
    println!();

    println!("Configuration:");
    println!("  Near radius: {} px", config.near_radius_px);
    println!(
        "  Speeds: near {}, far {}, resting {}",
        config.speeds.near, config.speeds.far, config.speeds.resting
    );
    println!("  Paused: {}", config.paused);
    println!();

    // Load and show cumulative telemetry if available
    let stats_path = config.data_path.join("telemetry.json");
    if stats_path.exists() {
        if let Ok(content) = std::fs::read_to_string(&stats_path) {
            if let Ok(stats) = serde_json::from_str::<serde_json::Value>(&content) {
                println!("Cumulative Statistics:");
                if let Some(begun) = stats.get("fixations_begun") {
                    println!("  Fixations begun: {begun}");
                }
                if let Some(ended) = stats.get("fixations_ended") {
                    println!("  Fixations ended: {ended}");
                }
                if let Some(samples) = stats.get("samples_processed") {
                    println!("  Samples processed: {samples}");
                }
                if let Some(changes) = stats.get("speed_changes") {
                    println!("  Speed changes applied: {changes}");
                }
            }
        }
    } else {
        println!("No previous session data found.");
    }
}

fn cmd_config() {
    let config = Config::load().unwrap_or_default();

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}

/// Set up Ctrl+C handler.
fn ctrlc_handler(running: Arc<AtomicBool>) {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");
}
