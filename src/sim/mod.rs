//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed-rate ticks only (one tick = one 60 Hz frame)
//! - Seeded RNG only (autopilot)
//! - Stable iteration order (by entity id)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod fleet;
pub mod kinematics;
pub mod rect;
pub mod session;
pub mod state;
pub mod store;
pub mod tick;

pub use autopilot::Autopilot;
pub use clock::FixedTimestep;
pub use collision::{Hit, HitReport, find_hits, resolve_projectile_hits};
pub use fleet::{Fleet, FleetDirection, FleetMember};
pub use rect::Rect;
pub use state::{
    GameEvent, GamePhase, GameState, IdAllocator, LifeLossCause, Projectile, Ship, Snapshot,
};
pub use store::{Entity, EntityId, EntityStore};
pub use tick::{InputEvent, TickInput, tick};
