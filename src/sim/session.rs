//! Session state machine
//!
//! ```text
//! Inactive/GameOver --start--> Starting --(pause over)--> Active
//! Active --fleet wiped--> Active (level + 1)
//! Active --life lost, lives remain--> LifeLost --(pause over)--> Active
//! Active --life lost, none remain--> GameOver
//! ```

use super::state::{GameEvent, GamePhase, GameState, LifeLossCause, Ship};
use crate::consts::{LIFE_LOST_PAUSE_TICKS, START_PAUSE_TICKS};

/// Begin a new game (only from Inactive or GameOver)
///
/// Returns false when a game is already running.
pub fn start_game(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    if !state.phase.accepts_start() {
        log::debug!("Start ignored in phase {:?}", state.phase);
        return false;
    }

    state.settings.reset_dynamic();
    state.stats.reset(state.settings.statics.ship_limit);

    state.projectiles.clear();
    state.fleet.reset_direction();
    state.regenerate_fleet();
    state.ship = Ship::new(&state.settings.statics);

    state.pointer_visible = false;
    state.phase = GamePhase::Starting {
        ticks_left: START_PAUSE_TICKS,
    };

    log::info!(
        "New game started ({} lives, high score {})",
        state.stats.lives_left,
        state.stats.high_score()
    );
    events.push(GameEvent::Started);
    true
}

/// Fleet wiped: rebuild it and make everything faster
pub fn level_up(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.projectiles.clear();
    state.regenerate_fleet();
    state.settings.increase_speed();
    state.stats.advance_level();

    log::info!("Level {} reached", state.stats.level);
    events.push(GameEvent::LevelUp {
        level: state.stats.level,
    });
}

/// Take a life; either reset the round or end the game
pub fn lose_life(state: &mut GameState, cause: LifeLossCause, events: &mut Vec<GameEvent>) {
    let lives_left = state.stats.lose_life();

    if lives_left == 0 {
        state.phase = GamePhase::GameOver;
        state.pointer_visible = true;
        log::info!(
            "Game over ({:?}) with score {} (high score {})",
            cause,
            state.stats.score,
            state.stats.high_score()
        );
        events.push(GameEvent::GameOver {
            score: state.stats.score,
        });
        return;
    }

    state.projectiles.clear();
    state.regenerate_fleet();
    state.ship.center(&state.settings.statics);
    state.phase = GamePhase::LifeLost {
        ticks_left: LIFE_LOST_PAUSE_TICKS,
    };

    log::debug!("Life lost ({:?}), {} remaining", cause, lives_left);
    events.push(GameEvent::LifeLost { cause, lives_left });
}

/// Count down a timed pause, switching to Active when it runs out
pub fn advance_pause(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let remaining = match state.phase {
        GamePhase::Starting { ticks_left } | GamePhase::LifeLost { ticks_left } => ticks_left,
        _ => return,
    };

    if remaining <= 1 {
        state.phase = GamePhase::Active;
        events.push(GameEvent::Resumed);
        return;
    }

    state.phase = match state.phase {
        GamePhase::Starting { .. } => GamePhase::Starting {
            ticks_left: remaining - 1,
        },
        _ => GamePhase::LifeLost {
            ticks_left: remaining - 1,
        },
    };
}
