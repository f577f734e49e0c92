//! Cleanup system: removes resolved projectiles and reclaimed targets.
//!
//! Runs after the projectile and target systems so that ids dropped here are
//! never seen by the spawner in the same tick.

use std::collections::BTreeMap;

use hecs::{Entity, World};

use range_core::components::{Projectile, Target};
use range_core::types::ProjectileId;

use crate::session::Session;

/// Despawn every resolved projectile and every target marked for removal,
/// dropping their ids from the projectile map and the session registry.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    session: &mut Session,
    projectiles: &mut BTreeMap<ProjectileId, Entity>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if projectile.resolution.is_some() {
            projectiles.remove(&projectile.id);
            despawn_buffer.push(entity);
        }
    }

    for (entity, target) in world.query_mut::<&Target>() {
        if target.removal.is_some() {
            session.active_targets.remove(&target.id);
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
