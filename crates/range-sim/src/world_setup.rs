//! Entity spawn factories for populating the range.
//!
//! Creates weapon, projectile and target entities with their component
//! bundles and hands out ids. Registry bookkeeping is the caller's job.

use hecs::{Entity, World};

use range_core::components::*;
use range_core::config::SessionConfig;
use range_core::enums::WeaponPhase;
use range_core::types::{Muzzle, ProjectileId, TargetId, Velocity, WeaponId};

/// Sequential id source. Ids are never reused within one engine.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next_weapon: u32,
    next_target: u32,
    next_projectile: u32,
}

impl IdAllocator {
    pub fn weapon(&mut self) -> WeaponId {
        let id = WeaponId(self.next_weapon);
        self.next_weapon += 1;
        id
    }

    pub fn target(&mut self) -> TargetId {
        let id = TargetId(self.next_target);
        self.next_target += 1;
        id
    }

    pub fn projectile(&mut self) -> ProjectileId {
        let id = ProjectileId(self.next_projectile);
        self.next_projectile += 1;
        id
    }
}

/// Health, score and lifetime for one target spawn.
#[derive(Debug, Clone)]
pub struct TargetParams {
    pub variant: String,
    pub max_health: f64,
    pub score_value: i64,
    pub lifetime_secs: Option<f64>,
}

/// Spawn a weapon with a full magazine, idle.
pub fn spawn_weapon(
    world: &mut World,
    ids: &mut IdAllocator,
    config: &SessionConfig,
    slot: Option<usize>,
) -> (WeaponId, Entity) {
    let id = ids.weapon();
    let weapon = Weapon {
        id,
        slot,
        ammo_current: config.ammo_max,
        ammo_max: config.ammo_max,
        infinite_ammo: config.infinite_ammo,
        phase: WeaponPhase::Idle,
        cooldown_remaining: 0.0,
        reload_remaining: 0.0,
        profile: config.weapon_profile(),
    };
    (id, world.spawn((weapon,)))
}

/// Spawn a projectile leaving `muzzle` with the weapon's damage and lifetime.
pub fn spawn_projectile(
    world: &mut World,
    ids: &mut IdAllocator,
    weapon_id: WeaponId,
    profile: &WeaponProfile,
    muzzle: Muzzle,
) -> (ProjectileId, Entity) {
    let id = ids.projectile();
    let projectile = Projectile {
        id,
        weapon_id,
        damage: profile.projectile_damage,
        remaining_lifetime: profile.projectile_lifetime_secs,
        resolution: None,
    };
    let velocity = Velocity::along(muzzle.direction, profile.muzzle_speed);
    (id, world.spawn((projectile, muzzle.origin, velocity)))
}

/// Spawn a live target at full health in `slot`.
pub fn spawn_target(
    world: &mut World,
    ids: &mut IdAllocator,
    slot: usize,
    params: TargetParams,
) -> (TargetId, Entity) {
    let id = ids.target();
    let target = Target {
        id,
        slot,
        variant: params.variant,
        health_current: params.max_health,
        health_max: params.max_health,
        score_value: params.score_value,
        alive: true,
        lifetime_remaining: params.lifetime_secs,
        removal: None,
    };
    (id, world.spawn((target,)))
}
