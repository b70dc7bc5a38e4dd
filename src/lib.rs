//! Alien Invasion - simulation core for a fleet-descending arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, fleet, collisions, session)
//! - `settings`: Static and dynamic tunables
//! - `stats`: Score, level, lives and the running high score
//! - `error`: Settings errors
//!
//! Rendering and raw input polling live outside this crate: a frontend feeds
//! [`sim::InputEvent`]s into [`sim::tick`] and draws [`sim::Snapshot`]s.

pub mod error;
pub mod settings;
pub mod sim;
pub mod stats;

pub use error::SettingsError;
pub use settings::{DynamicSettings, Rgb, Settings, StaticSettings};
pub use stats::GameStats;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum ticks run for a single frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Pause after a start action (0.35 s)
    pub const START_PAUSE_TICKS: u32 = 21;
    /// Pause after losing a life (1 s)
    pub const LIFE_LOST_PAUSE_TICKS: u32 = TICK_RATE;
}
