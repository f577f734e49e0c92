//! Kinematic integration system.
//!
//! Updates Position from Velocity each tick: position += velocity * dt.
//! Only projectiles carry a velocity; collision detection stays with the
//! physics adapter, which reports hits back as impacts.

use glam::DVec3;
use hecs::World;

use range_core::types::{Position, Velocity};

/// Run kinematic integration for all entities with Position + Velocity.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        *pos = (DVec3::from(*pos) + DVec3::from(*vel) * dt).into();
    }
}
