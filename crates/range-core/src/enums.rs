//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::types::ProjectileId;

/// Weapon firing state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponPhase {
    /// Ready to fire.
    #[default]
    Idle,
    /// A shot was just fired; waiting for the cooldown to elapse.
    Cooldown,
    /// Magazine is being refilled. Fire requests are rejected, not queued.
    Reloading,
}

/// Session (spawner) state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Stopped,
    Running,
}

/// How the spawner picks a slot for a new target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotPolicy {
    /// Uniform over all slots; several live targets may share a slot.
    #[default]
    WithReplacement,
    /// Uniform over slots without a live target. Spawn is skipped when full.
    WithoutReplacement,
}

/// How a projectile left play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileResolution {
    /// Hit something (damage delivered at most once).
    Impact,
    /// Lifetime ran out; no damage delivered.
    Expired,
}

/// Why a target left the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetRemoval {
    /// Health depleted; score was awarded.
    Destroyed,
    /// Forced lifetime elapsed; no score.
    Expired,
}

/// Result of a fire request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireOutcome {
    Fired(ProjectileId),
    Rejected(FireRejection),
}

/// Why a fire request did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireRejection {
    CoolingDown,
    Reloading,
    OutOfAmmo,
    UnknownWeapon,
}

/// Result of a reload request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReloadOutcome {
    Started,
    Rejected(ReloadRejection),
}

/// Why a reload request did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReloadRejection {
    AlreadyReloading,
    AmmoFull,
    UnknownWeapon,
}

/// Result of damage applied to a target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DamageOutcome {
    /// Target survived with the given health.
    Damaged { remaining_health: f64 },
    /// This hit depleted the target; its score was reported.
    Destroyed { score_awarded: i64 },
    /// Target was already dead or removed; nothing changed.
    Ignored,
}

/// Result of a projectile impact report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ImpactOutcome {
    /// Projectile resolved; the damage outcome on the target.
    Resolved(DamageOutcome),
    /// Projectile had already resolved (or no longer exists); nothing changed.
    AlreadyResolved,
}
