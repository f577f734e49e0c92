//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{ProjectileId, TargetId, WeaponId};

/// Per-weapon tuning, copied from the session config when the weapon is created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponProfile {
    pub cooldown_secs: f64,
    pub reload_secs: f64,
    pub projectile_damage: f64,
    pub projectile_lifetime_secs: f64,
    pub muzzle_speed: f64,
}

/// A weapon: magazine, cooldown and reload state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub id: WeaponId,
    /// Weapon slot it was placed at, `None` when equipped directly.
    pub slot: Option<usize>,
    /// Rounds left. Always `<= ammo_max`.
    pub ammo_current: u32,
    pub ammo_max: u32,
    /// Firing never consumes ammo.
    pub infinite_ammo: bool,
    pub phase: WeaponPhase,
    /// Seconds until the cooldown ends (only meaningful in `Cooldown`).
    pub cooldown_remaining: f64,
    /// Seconds until the reload completes (only meaningful in `Reloading`).
    pub reload_remaining: f64,
    pub profile: WeaponProfile,
}

/// A fired round. Transient: despawned once resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    /// Weapon that fired it.
    pub weapon_id: WeaponId,
    pub damage: f64,
    /// Seconds until expiry. Never negative.
    pub remaining_lifetime: f64,
    /// Set exactly once, by impact or expiry.
    pub resolution: Option<ProjectileResolution>,
}

/// A damageable target placed by the spawner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    /// Spawn slot index.
    pub slot: usize,
    /// Variant name (empty for the base target).
    pub variant: String,
    pub health_current: f64,
    pub health_max: f64,
    pub score_value: i64,
    /// Once false, no further damage is accepted.
    pub alive: bool,
    /// Seconds until forced removal, `None` for targets that stay until destroyed.
    pub lifetime_remaining: Option<f64>,
    /// Set when the target is due for reclamation.
    pub removal: Option<TargetRemoval>,
}
