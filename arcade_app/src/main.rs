//! Headless arcade session driver
//!
//! Runs the simulation without a window or GPU: a scripted input
//! sequence flies the ship through the asteroid field, fires at whatever
//! crosses the aim ray, and logs HUD state every half second of
//! simulated time. Useful as a smoke test of the simulation crate and
//! for profiling the per-frame cost in isolation.

use std::process;

use astro_sim::prelude::*;
use log::{error, info};

/// Fixed display cadence for the synthetic session, close to 60 Hz
const FRAME_MS: u64 = 17;

/// Session length in displayed frames (about one minute)
const SESSION_FRAMES: u64 = 3600;

fn session_seed() -> u64 {
    std::env::args()
        .nth(2)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xA57E_401D)
}

/// Scripted input for one frame: cruise forward, sweep the aim around,
/// and hold fire after the opening run-up
fn scripted_input(frame: u64) -> InputSnapshot {
    let mut controls = Controls::FORWARD;
    if frame > 120 {
        controls |= Controls::SHOOT;
    }
    if frame % 600 > 450 {
        controls |= Controls::ROLL_CW;
    }
    let mouse_dx = if frame % 200 < 40 { 3.0 } else { 0.0 };
    let mouse_dy = if frame % 330 < 25 { -2.0 } else { 0.0 };
    InputSnapshot {
        controls,
        mouse_dx,
        mouse_dy,
        drift_cam: true,
    }
}

fn run() -> Result<(), ConfigError> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "astro_sim.toml".to_string());
    let config = SimConfig::load_or_default(&config_path)?;

    let seed = session_seed();
    let mut sim = Simulation::new(config, seed);
    info!("session start: seed {seed:#x}, {SESSION_FRAMES} frames");

    let mut now_ms = 0;
    let mut last_report_ms = 0;
    for frame in 0..SESSION_FRAMES {
        now_ms += FRAME_MS;
        let packet = sim.step(&scripted_input(frame), now_ms);

        if now_ms - last_report_ms >= 500 {
            last_report_ms = now_ms;
            info!(
                "t={:>6} ms  score {:>5}  top {:>5}  vel {:>7.2}  draws {:>3}  ship {}",
                now_ms,
                packet.hud.score,
                packet.hud.top_score,
                packet.hud.relative_velocity,
                packet.draws.len(),
                if packet.player_visible { "alive" } else { "down" },
            );
        }
    }

    info!(
        "session end: score {}, top score {}",
        sim.score(),
        sim.top_score()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        error!("startup failed: {e}");
        process::exit(1);
    }
}
