//! Ship and projectile motion

use super::state::{GameState, Projectile};
use super::store::{EntityId, EntityStore};

/// Fire a projectile from the ship's current position
///
/// Ignored (returns None) once the live count reaches the fire limit.
pub fn fire(state: &mut GameState) -> Option<EntityId> {
    let limit = state.settings.dynamic().fire_limit;
    if state.projectiles.len() as f32 >= limit {
        log::debug!(
            "Fire ignored: {} projectiles live (limit {:.2})",
            state.projectiles.len(),
            limit
        );
        return None;
    }

    let id = state.next_entity_id();
    let size = state.settings.statics.projectile_size();
    state
        .projectiles
        .insert(Projectile::from_ship(id, &state.ship, size));
    Some(id)
}

/// Move every projectile up by `speed`
pub fn advance_projectiles(projectiles: &mut EntityStore<Projectile>, speed: f32) {
    for projectile in projectiles.iter_mut() {
        projectile.update(speed);
    }
}

/// Drop projectiles that scrolled past the top, returning how many
pub fn reclaim_projectiles(projectiles: &mut EntityStore<Projectile>) -> usize {
    let stale: Vec<EntityId> = projectiles
        .iter()
        .filter(|p| p.is_off_screen())
        .map(|p| p.id)
        .collect();
    for id in stale {
        projectiles.mark(id);
    }
    projectiles.compact()
}
