//! Alien Invasion headless demo
//!
//! Runs the attract-mode autopilot against the simulation for a fixed span of
//! simulated time and prints the final snapshot as JSON. An optional settings
//! file path may be passed as the only argument.

#[cfg(not(target_arch = "wasm32"))]
use alien_invasion::Settings;
#[cfg(not(target_arch = "wasm32"))]
use alien_invasion::consts::{SIM_DT, TICK_RATE};
#[cfg(not(target_arch = "wasm32"))]
use alien_invasion::sim::{Autopilot, FixedTimestep, GameEvent, GameState, TickInput, tick};

/// Simulated seconds to run
#[cfg(not(target_arch = "wasm32"))]
const DEMO_SECONDS: u32 = 120;
/// Fixed seed so demo runs are repeatable
#[cfg(not(target_arch = "wasm32"))]
const DEMO_SEED: u64 = 0x5EED_A11E;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Alien Invasion (headless demo) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {}: {}", path, e);
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let mut state = GameState::new(settings);
    let mut pilot = Autopilot::new(DEMO_SEED);
    let mut clock = FixedTimestep::default();

    // Feed the clock whole frames at the tick rate, as a vsynced loop would
    let frames = DEMO_SECONDS * TICK_RATE;
    'frames: for _ in 0..frames {
        for _ in 0..clock.advance(SIM_DT) {
            let input = TickInput::new(pilot.plan(&state));
            for event in tick(&mut state, &input) {
                log_event(&event);
                if event == GameEvent::QuitRequested {
                    break 'frames;
                }
            }
        }
    }

    log::info!(
        "Demo finished after {} ticks: level {}, score {}, high score {}",
        state.time_ticks,
        state.stats.level,
        state.stats.score,
        state.stats.high_score()
    );

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn log_event(event: &GameEvent) {
    match event {
        GameEvent::ProjectileFired(_) | GameEvent::FleetReversed => log::trace!("{:?}", event),
        GameEvent::MembersDestroyed { .. } | GameEvent::NewHighScore(_) => {
            log::debug!("{:?}", event)
        }
        _ => log::info!("{:?}", event),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is driven by the embedding page on wasm
}
