//! Fixed-rate simulation tick
//!
//! Core game loop step. Order inside an active tick is fixed:
//! 1. ship movement
//! 2. projectile movement
//! 3. stale projectile cleanup
//! 4. projectile/fleet collisions (scoring, level-up on wipe)
//! 5. fleet edge handling and movement
//! 6. ship/fleet collision and bottom breach

use serde::{Deserialize, Serialize};

use super::collision::{life_loss_cause, resolve_projectile_hits};
use super::kinematics::{advance_projectiles, fire, reclaim_projectiles};
use super::session::{advance_pause, level_up, lose_life, start_game};
use super::state::{GameEvent, GamePhase, GameState};

/// Discrete input events produced by the platform input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    MoveLeftStart,
    MoveLeftStop,
    MoveRightStart,
    MoveRightStop,
    Fire,
    /// Start or restart a game (e.g. the play button was clicked)
    Start,
    Quit,
}

/// Input events collected since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn single(event: InputEvent) -> Self {
        Self {
            events: vec![event],
        }
    }
}

/// Apply one input event
///
/// Gameplay input (move start, fire) only counts while Active; releasing a
/// direction always clears the flag so a key let go during a pause doesn't
/// stick.
fn handle_input(state: &mut GameState, event: InputEvent, events: &mut Vec<GameEvent>) {
    let playing = state.phase == GamePhase::Active;

    match event {
        InputEvent::Quit => events.push(GameEvent::QuitRequested),
        InputEvent::Start => {
            start_game(state, events);
        }
        InputEvent::MoveLeftStop => state.ship.moving_left = false,
        InputEvent::MoveRightStop => state.ship.moving_right = false,
        InputEvent::MoveLeftStart if playing => state.ship.moving_left = true,
        InputEvent::MoveRightStart if playing => state.ship.moving_right = true,
        InputEvent::Fire if playing => {
            if let Some(id) = fire(state) {
                events.push(GameEvent::ProjectileFired(id));
            }
        }
        _ => {}
    }
}

/// Advance the game state by one tick, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    for &event in &input.events {
        handle_input(state, event, &mut events);
    }

    state.time_ticks += 1;

    match state.phase {
        GamePhase::Inactive | GamePhase::GameOver => {}
        GamePhase::Starting { .. } | GamePhase::LifeLost { .. } => {
            advance_pause(state, &mut events);
        }
        GamePhase::Active => step_active(state, &mut events),
    }

    events
}

/// One tick of live gameplay
fn step_active(state: &mut GameState, events: &mut Vec<GameEvent>) {
    // Captured up front so a level-up inside this tick doesn't change them
    let dynamic = *state.settings.dynamic();
    let statics = state.settings.statics.clone();

    // --- KINEMATICS ---
    state.ship.update(statics.screen_width, dynamic.ship_speed);
    advance_projectiles(&mut state.projectiles, dynamic.projectile_speed);
    reclaim_projectiles(&mut state.projectiles);

    // --- PROJECTILE HITS ---
    let report = resolve_projectile_hits(
        &mut state.projectiles,
        &mut state.fleet,
        dynamic.alien_points,
    );
    if !report.hits.is_empty() {
        events.push(GameEvent::MembersDestroyed {
            count: report.count(),
            points: report.points,
        });
        if state.stats.add_points(report.points) {
            events.push(GameEvent::NewHighScore(state.stats.high_score()));
        }
    }

    if state.fleet.is_wiped() {
        level_up(state, events);
    }

    // --- FLEET ---
    let speed = state.settings.dynamic().fleet_speed;
    if state
        .fleet
        .update(statics.screen_width, statics.fleet_drop_speed, speed)
    {
        events.push(GameEvent::FleetReversed);
    }

    // --- LIFE LOSS ---
    if let Some(cause) = life_loss_cause(&state.ship, &state.fleet, statics.screen_height) {
        lose_life(state, cause, events);
    }
}
