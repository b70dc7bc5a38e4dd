//! Game state and core simulation types
//!
//! Everything a renderer needs is reachable from [`GameState`]; the
//! [`Snapshot`] type is the read-only, serializable view handed across the
//! render boundary.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::fleet::{Fleet, FleetMember};
use super::rect::Rect;
use super::store::{Entity, EntityId, EntityStore};
use crate::settings::{Rgb, Settings, StaticSettings};
use crate::stats::GameStats;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start action
    Inactive,
    /// Short pause after a start so the start action isn't read as gameplay input
    Starting { ticks_left: u32 },
    /// Simulation running
    Active,
    /// Pause after losing a life; fleet and ship have already been reset
    LifeLost { ticks_left: u32 },
    /// Out of lives; waits for a restart
    GameOver,
}

impl GamePhase {
    /// True while a game is in progress (including its pauses)
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            GamePhase::Starting { .. } | GamePhase::Active | GamePhase::LifeLost { .. }
        )
    }

    /// True during a timed pause
    pub fn is_paused(&self) -> bool {
        matches!(self, GamePhase::Starting { .. } | GamePhase::LifeLost { .. })
    }

    /// Whether a start action begins a new game in this phase
    pub fn accepts_start(&self) -> bool {
        matches!(self, GamePhase::Inactive | GamePhase::GameOver)
    }
}

/// What cost the player a life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeLossCause {
    /// A fleet member touched the ship
    ShipHit,
    /// A fleet member reached the bottom of the screen
    BottomBreach,
}

/// Things that happened during a tick, for audio/HUD frontends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    /// A timed pause ended and play continues
    Resumed,
    ProjectileFired(EntityId),
    MembersDestroyed { count: u32, points: u64 },
    NewHighScore(u64),
    FleetReversed,
    LevelUp { level: u32 },
    LifeLost { cause: LifeLossCause, lives_left: u32 },
    GameOver { score: u64 },
    QuitRequested,
}

/// Hands out entity ids in increasing order
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    /// Top-left corner; x is fractional, y is whole pixels
    pub pos: Vec2,
    pub size: Vec2,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Ship {
    /// A ship centered at the bottom of the screen with no movement intent
    pub fn new(statics: &StaticSettings) -> Self {
        let mut ship = Self {
            pos: Vec2::ZERO,
            size: statics.ship_size(),
            moving_left: false,
            moving_right: false,
        };
        ship.center(statics);
        ship
    }

    /// Move back to the bottom-center of the screen
    pub fn center(&mut self, statics: &StaticSettings) {
        self.pos = Vec2::new(
            ((statics.screen_width - self.size.x) / 2.0).floor(),
            (statics.screen_height - self.size.y).floor(),
        );
    }

    /// Pixel rect used for bounds, collisions and drawing
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size).snapped()
    }

    /// Apply movement intent for one tick
    ///
    /// Each direction only moves while the ship's edge is inside the screen;
    /// the result is kept within `[0, screen_width - width]`.
    pub fn update(&mut self, screen_width: f32, speed: f32) {
        let rect = self.rect();
        if self.moving_right && rect.right() < screen_width {
            self.pos.x += speed;
        }
        if self.moving_left && rect.left() > 0.0 {
            self.pos.x -= speed;
        }
        self.pos.x = self.pos.x.clamp(0.0, (screen_width - self.size.x).max(0.0));
    }
}

/// A projectile fired upward by the ship
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: EntityId,
    /// Top-left corner; x is fixed at fire time
    pub pos: Vec2,
    pub size: Vec2,
}

impl Entity for Projectile {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Projectile {
    /// A projectile whose top edge sits at the ship's top, centered on it
    pub fn from_ship(id: EntityId, ship: &Ship, size: Vec2) -> Self {
        let ship_rect = ship.rect();
        Self {
            id,
            pos: Vec2::new(
                ship_rect.center_x().floor() - (size.x / 2.0).floor(),
                ship_rect.top(),
            ),
            size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size).snapped()
    }

    /// Move up by `speed` pixels
    pub fn update(&mut self, speed: f32) {
        self.pos.y -= speed;
    }

    /// Fully scrolled past the top edge
    pub fn is_off_screen(&self) -> bool {
        self.rect().bottom() <= 0.0
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub stats: GameStats,
    pub phase: GamePhase,
    pub ship: Ship,
    pub projectiles: EntityStore<Projectile>,
    pub fleet: Fleet,
    /// Whether the renderer should show the pointer cursor
    pub pointer_visible: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    ids: IdAllocator,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl GameState {
    /// Create an inactive session with a fleet already laid out
    ///
    /// `settings` are expected to have passed [`Settings::validate`].
    pub fn new(settings: Settings) -> Self {
        let mut ids = IdAllocator::default();
        let mut fleet = Fleet::new();
        fleet.layout(&settings.statics, &mut ids);

        Self {
            stats: GameStats::new(settings.statics.ship_limit),
            phase: GamePhase::Inactive,
            ship: Ship::new(&settings.statics),
            projectiles: EntityStore::new(),
            fleet,
            pointer_visible: true,
            time_ticks: 0,
            ids,
            settings,
        }
    }

    /// Allocate a new entity id
    pub fn next_entity_id(&mut self) -> EntityId {
        self.ids.next_id()
    }

    /// Lay out a fresh fleet generation
    pub fn regenerate_fleet(&mut self) -> usize {
        self.fleet.layout(&self.settings.statics, &mut self.ids)
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        let statics = &self.settings.statics;
        Snapshot {
            phase: self.phase,
            active: self.phase.is_active(),
            score: self.stats.score,
            level: self.stats.level,
            lives_left: self.stats.lives_left,
            high_score: self.stats.high_score(),
            pointer_visible: self.pointer_visible,
            bg_color: statics.bg_color,
            ship: self.ship.rect(),
            projectile_color: statics.projectile_color,
            projectiles: self.projectiles.iter().map(Projectile::rect).collect(),
            fleet: self.fleet.members().iter().map(FleetMember::rect).collect(),
        }
    }
}

/// Everything a renderer reads after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub active: bool,
    pub score: u64,
    pub level: u32,
    pub lives_left: u32,
    pub high_score: u64,
    pub pointer_visible: bool,
    pub bg_color: Rgb,
    pub ship: Rect,
    pub projectile_color: Rgb,
    pub projectiles: Vec<Rect>,
    pub fleet: Vec<Rect>,
}
