//! Collision detection and scoring
//!
//! Projectile hits are resolved in a single batched pass per tick: every
//! pair is found against the state at the start of the pass, both sides are
//! marked, and the stores are compacted once at the end.

use super::fleet::Fleet;
use super::state::{LifeLossCause, Projectile, Ship};
use super::store::{EntityId, EntityStore};

/// A projectile that destroyed a fleet member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub projectile: EntityId,
    pub member: EntityId,
}

/// Outcome of a projectile/fleet pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitReport {
    pub hits: Vec<Hit>,
    /// Points earned by this pass
    pub points: u64,
}

impl HitReport {
    /// Members destroyed
    pub fn count(&self) -> u32 {
        self.hits.len() as u32
    }
}

/// Pair projectiles with the members they overlap
///
/// Projectiles are visited in id order; each claims the lowest-id member it
/// overlaps that no earlier projectile claimed. A projectile claims at most
/// one member and a member is claimed at most once.
pub fn find_hits(projectiles: &EntityStore<Projectile>, fleet: &Fleet) -> Vec<Hit> {
    let mut hits: Vec<Hit> = Vec::new();

    for projectile in projectiles.iter() {
        let rect = projectile.rect();
        let target = fleet.members().iter().find(|member| {
            !hits.iter().any(|h| h.member == member.id) && rect.overlaps(&member.rect())
        });
        if let Some(member) = target {
            hits.push(Hit {
                projectile: projectile.id,
                member: member.id,
            });
        }
    }

    hits
}

/// Remove every colliding projectile/member pair and tally the points
///
/// `alien_points` is the per-member value in effect at the start of the tick.
pub fn resolve_projectile_hits(
    projectiles: &mut EntityStore<Projectile>,
    fleet: &mut Fleet,
    alien_points: u64,
) -> HitReport {
    let hits = find_hits(projectiles, fleet);
    if hits.is_empty() {
        return HitReport::default();
    }

    for hit in &hits {
        projectiles.mark(hit.projectile);
        fleet.members_mut().mark(hit.member);
    }
    projectiles.compact();
    fleet.members_mut().compact();

    let points = alien_points.saturating_mul(hits.len() as u64);
    HitReport { hits, points }
}

/// Any fleet member overlapping the ship
pub fn ship_collides(ship: &Ship, fleet: &Fleet) -> bool {
    let ship_rect = ship.rect();
    fleet.members().iter().any(|m| m.rect().overlaps(&ship_rect))
}

/// Any fleet member touching or past the bottom of the screen
pub fn fleet_reached_bottom(fleet: &Fleet, screen_height: f32) -> bool {
    fleet
        .lowest_bottom()
        .is_some_and(|bottom| bottom >= screen_height)
}

/// Check for the two ways to lose a life (ship hit wins if both happen)
pub fn life_loss_cause(ship: &Ship, fleet: &Fleet, screen_height: f32) -> Option<LifeLossCause> {
    if ship_collides(ship, fleet) {
        Some(LifeLossCause::ShipHit)
    } else if fleet_reached_bottom(fleet, screen_height) {
        Some(LifeLossCause::BottomBreach)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::settings::StaticSettings;
    use crate::sim::fleet::FleetMember;
    use crate::sim::state::IdAllocator;

    const MEMBER: Vec2 = Vec2::new(22.0, 16.0);
    const BOLT: Vec2 = Vec2::new(3.0, 15.0);

    fn fleet_at(ids: &mut IdAllocator, positions: &[(f32, f32)]) -> Fleet {
        let mut fleet = Fleet::new();
        for &(x, y) in positions {
            fleet
                .members_mut()
                .insert(FleetMember::new(ids.next_id(), Vec2::new(x, y), MEMBER, 1));
        }
        fleet
    }

    fn projectiles_at(ids: &mut IdAllocator, positions: &[(f32, f32)]) -> EntityStore<Projectile> {
        let mut store = EntityStore::new();
        for &(x, y) in positions {
            store.insert(Projectile {
                id: ids.next_id(),
                pos: Vec2::new(x, y),
                size: BOLT,
            });
        }
        store
    }

    #[test]
    fn test_three_hits_score_together() {
        let mut ids = IdAllocator::default();
        let mut fleet = fleet_at(&mut ids, &[(100.0, 100.0), (200.0, 100.0), (300.0, 100.0), (400.0, 100.0)]);
        let mut projectiles =
            projectiles_at(&mut ids, &[(110.0, 105.0), (210.0, 105.0), (310.0, 105.0)]);

        let report = resolve_projectile_hits(&mut projectiles, &mut fleet, 50);
        assert_eq!(report.count(), 3);
        assert_eq!(report.points, 150);
        assert!(projectiles.is_empty());
        assert_eq!(fleet.members().len(), 1);
    }

    #[test]
    fn test_two_projectiles_one_member() {
        let mut ids = IdAllocator::default();
        let mut fleet = fleet_at(&mut ids, &[(100.0, 100.0)]);
        let mut projectiles = projectiles_at(&mut ids, &[(105.0, 105.0), (110.0, 105.0)]);

        let report = resolve_projectile_hits(&mut projectiles, &mut fleet, 50);
        assert_eq!(report.count(), 1);
        assert_eq!(report.points, 50);
        assert!(fleet.is_wiped());
        // The second projectile survives
        assert_eq!(projectiles.len(), 1);
    }

    #[test]
    fn test_one_projectile_two_members() {
        let mut ids = IdAllocator::default();
        // Members overlap each other; the projectile touches both
        let mut fleet = fleet_at(&mut ids, &[(100.0, 100.0), (110.0, 100.0)]);
        let first_member = fleet.members().iter().next().unwrap().id;
        let mut projectiles = projectiles_at(&mut ids, &[(115.0, 105.0)]);

        let hits = find_hits(&projectiles, &fleet);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].member, first_member);

        let report = resolve_projectile_hits(&mut projectiles, &mut fleet, 50);
        assert_eq!(report.count(), 1);
        assert_eq!(fleet.members().len(), 1);
    }

    #[test]
    fn test_miss_changes_nothing() {
        let mut ids = IdAllocator::default();
        let mut fleet = fleet_at(&mut ids, &[(100.0, 100.0)]);
        let mut projectiles = projectiles_at(&mut ids, &[(500.0, 500.0)]);

        let report = resolve_projectile_hits(&mut projectiles, &mut fleet, 50);
        assert_eq!(report, HitReport::default());
        assert_eq!(projectiles.len(), 1);
        assert_eq!(fleet.members().len(), 1);
    }

    #[test]
    fn test_ship_collision() {
        let statics = StaticSettings::default();
        let ship = Ship::new(&statics);
        let mut ids = IdAllocator::default();

        let far = fleet_at(&mut ids, &[(100.0, 100.0)]);
        assert!(!ship_collides(&ship, &far));

        let r = ship.rect();
        let near = fleet_at(&mut ids, &[(r.left() + 5.0, r.top() - 10.0)]);
        assert!(ship_collides(&ship, &near));
        assert_eq!(
            life_loss_cause(&ship, &near, statics.screen_height),
            Some(LifeLossCause::ShipHit)
        );
    }

    #[test]
    fn test_bottom_breach() {
        let statics = StaticSettings::default();
        let ship = Ship::new(&statics);
        let mut ids = IdAllocator::default();

        // Far left of the ship, bottom edge exactly on the screen bottom
        let fleet = fleet_at(&mut ids, &[(10.0, statics.screen_height - MEMBER.y)]);
        assert!(fleet_reached_bottom(&fleet, statics.screen_height));
        assert_eq!(
            life_loss_cause(&ship, &fleet, statics.screen_height),
            Some(LifeLossCause::BottomBreach)
        );

        let safe = fleet_at(&mut ids, &[(10.0, statics.screen_height - MEMBER.y - 1.0)]);
        assert!(!fleet_reached_bottom(&safe, statics.screen_height));
        assert_eq!(life_loss_cause(&ship, &safe, statics.screen_height), None);
    }
}
