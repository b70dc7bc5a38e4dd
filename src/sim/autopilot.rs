//! Attract-mode autopilot
//!
//! Plays the game through the same [`InputEvent`] stream a human would
//! produce: steer under the lowest fleet member nearest the ship, fire when
//! lined up, and press start again a little after game over. Randomness comes
//! from a seeded PCG so demo runs are reproducible.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{GamePhase, GameState};
use super::tick::InputEvent;

/// Ticks to wait on the title/game-over screen before pressing start
const RESTART_DELAY_TICKS: u32 = 90;
/// Re-roll the aim offset this often
const AIM_REROLL_TICKS: u32 = 45;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    fire_cooldown: u32,
    idle_ticks: u32,
    aim_offset: f32,
    aim_age: u32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            fire_cooldown: 0,
            idle_ticks: 0,
            aim_offset: 0.0,
            aim_age: 0,
        }
    }

    /// Decide the input events for the next tick
    pub fn plan(&mut self, state: &GameState) -> Vec<InputEvent> {
        match state.phase {
            GamePhase::Inactive | GamePhase::GameOver => self.plan_restart(),
            GamePhase::Active => {
                self.idle_ticks = 0;
                self.plan_play(state)
            }
            // Nothing to do while paused
            GamePhase::Starting { .. } | GamePhase::LifeLost { .. } => Vec::new(),
        }
    }

    fn plan_restart(&mut self) -> Vec<InputEvent> {
        self.idle_ticks += 1;
        if self.idle_ticks >= RESTART_DELAY_TICKS {
            self.idle_ticks = 0;
            return vec![InputEvent::Start];
        }
        Vec::new()
    }

    fn plan_play(&mut self, state: &GameState) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let ship = &state.ship;
        let ship_x = ship.rect().center_x();

        self.aim_age += 1;
        if self.aim_age >= AIM_REROLL_TICKS {
            self.aim_age = 0;
            let spread = state.settings.statics.member_width * 0.3;
            self.aim_offset = self.rng.random_range(-spread..=spread);
        }

        // Lowest member first, then nearest to the ship
        let target = state.fleet.members().iter().max_by(|a, b| {
            let (ra, rb) = (a.rect(), b.rect());
            ra.bottom().total_cmp(&rb.bottom()).then_with(|| {
                let da = (ra.center_x() - ship_x).abs();
                let db = (rb.center_x() - ship_x).abs();
                db.total_cmp(&da)
            })
        });

        let Some(target) = target else {
            // Between waves: let go of everything
            if ship.moving_left {
                events.push(InputEvent::MoveLeftStop);
            }
            if ship.moving_right {
                events.push(InputEvent::MoveRightStop);
            }
            return events;
        };

        let target_rect = target.rect();
        let dx = target_rect.center_x() + self.aim_offset - ship_x;
        let dead_zone = state.settings.dynamic().ship_speed;

        let want_right = dx > dead_zone;
        let want_left = dx < -dead_zone;

        if want_right != ship.moving_right {
            events.push(if want_right {
                InputEvent::MoveRightStart
            } else {
                InputEvent::MoveRightStop
            });
        }
        if want_left != ship.moving_left {
            events.push(if want_left {
                InputEvent::MoveLeftStart
            } else {
                InputEvent::MoveLeftStop
            });
        }

        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
        let lined_up = dx.abs() < target_rect.width() / 2.0;
        if lined_up && self.fire_cooldown == 0 && self.rng.random_bool(0.8) {
            events.push(InputEvent::Fire);
            self.fire_cooldown = self.rng.random_range(4..12);
        }

        events
    }
}
