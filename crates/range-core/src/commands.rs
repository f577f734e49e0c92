//! Commands sent from the input/physics adapters to the simulation.
//!
//! Commands are queued and processed at the next tick boundary, before any
//! timer advances, so impacts resolve ahead of expiry and cleanup.

use serde::{Deserialize, Serialize};

use crate::types::{Muzzle, ProjectileId, TargetId, WeaponId};

/// All actions an adapter can request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RangeCommand {
    // --- Session ---
    /// Begin a session with the engine's configuration.
    StartSession,
    /// Tear down the running session and everything it spawned.
    ResetSession,

    // --- Weapon ---
    /// Pull the trigger.
    RequestFire {
        weapon_id: WeaponId,
        #[serde(default)]
        muzzle: Muzzle,
    },
    /// Refill the magazine.
    RequestReload { weapon_id: WeaponId },
    /// Add a weapon to the running session.
    EquipWeapon,
    /// Drop a weapon; it is destroyed.
    UnequipWeapon { weapon_id: WeaponId },

    // --- Physics adapter ---
    /// A projectile touched a target.
    ReportImpact {
        projectile_id: ProjectileId,
        target_id: TargetId,
    },
}
