//! Fleet formation and collective movement
//!
//! Members never move on their own: one shared direction and speed drive the
//! whole fleet, and touching either screen edge drops and reverses all of
//! them together.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::IdAllocator;
use super::store::{Entity, EntityId, EntityStore};
use crate::settings::StaticSettings;

/// Column spacing, in member widths
const COLUMN_STEP: f32 = 1.25;
/// Row spacing, in member heights
const ROW_STEP: f32 = 2.0;
/// First row offset from the top, in member heights
const FIRST_ROW_OFFSET: f32 = 1.75;
/// Columns stop this many member widths before the right edge
const RIGHT_MARGIN: f32 = 2.0;
/// Rows stop this many member heights above the bottom edge
const BOTTOM_MARGIN: f32 = 12.0;

/// Horizontal heading shared by every fleet member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FleetDirection {
    #[default]
    Right,
    Left,
}

impl FleetDirection {
    /// +1 for right, -1 for left
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            FleetDirection::Right => 1.0,
            FleetDirection::Left => -1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            FleetDirection::Right => FleetDirection::Left,
            FleetDirection::Left => FleetDirection::Right,
        }
    }
}

/// A single fleet member
#[derive(Debug, Clone, PartialEq)]
pub struct FleetMember {
    pub id: EntityId,
    /// Top-left corner; x is fractional, y is whole pixels
    pub pos: Vec2,
    pub size: Vec2,
    /// Layout generation this member was created in
    pub generation: u32,
}

impl Entity for FleetMember {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl FleetMember {
    pub fn new(id: EntityId, pos: Vec2, size: Vec2, generation: u32) -> Self {
        Self {
            id,
            pos,
            size,
            generation,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size).snapped()
    }

    /// Touching or past either side of the screen
    pub fn at_edge(&self, screen_width: f32) -> bool {
        let rect = self.rect();
        rect.right() >= screen_width || rect.left() <= 0.0
    }
}

/// The enemy fleet
#[derive(Debug, Clone, Default)]
pub struct Fleet {
    members: EntityStore<FleetMember>,
    direction: FleetDirection,
    generation: u32,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn members(&self) -> &EntityStore<FleetMember> {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut EntityStore<FleetMember> {
        &mut self.members
    }

    #[inline]
    pub fn direction(&self) -> FleetDirection {
        self.direction
    }

    /// Current layout generation (0 before the first layout)
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Head right again (new game)
    pub fn reset_direction(&mut self) {
        self.direction = FleetDirection::Right;
    }

    /// No members left
    pub fn is_wiped(&self) -> bool {
        self.members.is_empty()
    }

    /// Replace every member with a fresh grid
    ///
    /// The grid only depends on screen and member size, so repeated layouts
    /// produce identical geometry. Returns the number of members placed.
    pub fn layout(&mut self, statics: &StaticSettings, ids: &mut IdAllocator) -> usize {
        self.members.clear();
        self.generation += 1;

        let size = statics.member_size();
        let (w, h) = (size.x, size.y);
        let max_x = statics.screen_width - RIGHT_MARGIN * w;
        let max_y = statics.screen_height - BOTTOM_MARGIN * h;

        let mut y = FIRST_ROW_OFFSET * h;
        while y < max_y {
            let mut x = w;
            while x < max_x {
                let pos = Vec2::new(x, y.floor());
                self.members
                    .insert(FleetMember::new(ids.next_id(), pos, size, self.generation));
                x += COLUMN_STEP * w;
            }
            y += ROW_STEP * h;
        }

        log::debug!(
            "Fleet generation {} laid out with {} members",
            self.generation,
            self.members.len()
        );
        self.members.len()
    }

    /// Any member touching a screen edge
    pub fn any_at_edge(&self, screen_width: f32) -> bool {
        self.members.iter().any(|m| m.at_edge(screen_width))
    }

    /// Advance the fleet one tick
    ///
    /// If any member is at an edge, the whole fleet drops by `drop_speed` and
    /// the direction flips once before the horizontal move. Returns true if
    /// the fleet reversed.
    pub fn update(&mut self, screen_width: f32, drop_speed: f32, speed: f32) -> bool {
        let reversed = self.any_at_edge(screen_width);
        if reversed {
            for member in self.members.iter_mut() {
                member.pos.y += drop_speed;
            }
            self.direction = self.direction.reversed();
        }

        let dx = speed * self.direction.sign();
        for member in self.members.iter_mut() {
            member.pos.x += dx;
        }
        reversed
    }

    /// Lowest bottom edge of any member (None when wiped)
    pub fn lowest_bottom(&self) -> Option<f32> {
        self.members
            .iter()
            .map(|m| m.rect().bottom())
            .max_by(|a, b| a.total_cmp(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_statics() -> StaticSettings {
        StaticSettings {
            member_width: 22.0,
            member_height: 16.0,
            ..StaticSettings::default()
        }
    }

    #[test]
    fn test_layout_grid_geometry() {
        let statics = small_statics();
        let mut ids = IdAllocator::default();
        let mut fleet = Fleet::new();
        let count = fleet.layout(&statics, &mut ids);

        // Columns: x = 22 + 27.5k < 1156 -> k in 0..=41
        // Rows:    y = 28 + 32k   < 608  -> k in 0..=18
        assert_eq!(count, 42 * 19);

        let first = fleet.members().iter().next().unwrap();
        assert_eq!(first.pos, Vec2::new(22.0, 28.0));

        let max_x = fleet
            .members()
            .iter()
            .map(|m| m.pos.x)
            .fold(f32::MIN, f32::max);
        assert!(max_x < statics.screen_width - 2.0 * statics.member_width);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let statics = small_statics();
        let mut ids = IdAllocator::default();
        let mut fleet = Fleet::new();
        fleet.layout(&statics, &mut ids);
        let first: Vec<Vec2> = fleet.members().iter().map(|m| m.pos).collect();

        fleet.layout(&statics, &mut ids);
        let second: Vec<Vec2> = fleet.members().iter().map(|m| m.pos).collect();

        assert_eq!(first, second);
        assert_eq!(fleet.generation(), 2);
        assert!(fleet.members().iter().all(|m| m.generation == 2));
    }

    #[test]
    fn test_default_layout_rows_are_whole_pixels() {
        let statics = StaticSettings::default();
        let mut ids = IdAllocator::default();
        let mut fleet = Fleet::new();
        fleet.layout(&statics, &mut ids);
        assert!(fleet.members().iter().all(|m| m.pos.y.fract() == 0.0));
    }

    #[test]
    fn test_update_moves_members_together() {
        let statics = small_statics();
        let mut ids = IdAllocator::default();
        let mut fleet = Fleet::new();
        fleet.layout(&statics, &mut ids);
        let before: Vec<Vec2> = fleet.members().iter().map(|m| m.pos).collect();

        let reversed = fleet.update(statics.screen_width, 5.0, 1.5);
        assert!(!reversed);
        for (m, b) in fleet.members().iter().zip(&before) {
            assert_eq!(m.pos.x, b.x + 1.5);
            assert_eq!(m.pos.y, b.y);
        }
    }

    #[test]
    fn test_edge_drops_and_reverses_once() {
        let statics = small_statics();
        let mut ids = IdAllocator::default();
        let mut fleet = Fleet::new();

        // Two members at the right edge at once
        let size = statics.member_size();
        for y in [100.0, 200.0] {
            let member = FleetMember::new(ids.next_id(), Vec2::new(1178.0, y), size, 1);
            fleet.members_mut().insert(member);
        }
        assert!(fleet.any_at_edge(statics.screen_width));

        let reversed = fleet.update(statics.screen_width, 5.0, 1.5);
        assert!(reversed);
        assert_eq!(fleet.direction(), FleetDirection::Left);

        let positions: Vec<Vec2> = fleet.members().iter().map(|m| m.pos).collect();
        assert_eq!(positions[0], Vec2::new(1176.5, 105.0));
        assert_eq!(positions[1], Vec2::new(1176.5, 205.0));

        // Off the edge now: no further reversal
        assert!(!fleet.update(statics.screen_width, 5.0, 1.5));
        assert_eq!(fleet.direction(), FleetDirection::Left);
    }

    #[test]
    fn test_left_edge_reverses() {
        let statics = small_statics();
        let mut ids = IdAllocator::default();
        let mut fleet = Fleet::new();
        fleet
            .members_mut()
            .insert(FleetMember::new(ids.next_id(), Vec2::new(0.0, 50.0), statics.member_size(), 1));

        // Heading left into the wall
        fleet.direction = FleetDirection::Left;
        assert!(fleet.update(statics.screen_width, 5.0, 1.5));
        assert_eq!(fleet.direction(), FleetDirection::Right);
    }

    #[test]
    fn test_direction_sign() {
        assert_eq!(FleetDirection::Right.sign(), 1.0);
        assert_eq!(FleetDirection::Left.sign(), -1.0);
        assert_eq!(FleetDirection::Right.reversed(), FleetDirection::Left);
    }

    #[test]
    fn test_lowest_bottom() {
        let statics = small_statics();
        let mut ids = IdAllocator::default();
        let mut fleet = Fleet::new();
        assert!(fleet.lowest_bottom().is_none());
        fleet.layout(&statics, &mut ids);
        // Last row starts at 28 + 32 * 18 = 604
        assert_eq!(fleet.lowest_bottom(), Some(620.0));
    }
}
