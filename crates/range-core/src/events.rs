//! Events emitted by the simulation for UI, audio and VFX feedback.
//!
//! Fire-and-forget: the engine never waits on a consumer.

use serde::{Deserialize, Serialize};

use crate::types::{ProjectileId, TargetId, WeaponId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RangeEvent {
    /// A weapon fired a projectile.
    Fired {
        weapon_id: WeaponId,
        projectile_id: ProjectileId,
    },
    ReloadStarted { weapon_id: WeaponId },
    ReloadComplete { weapon_id: WeaponId },
    AmmoChanged {
        weapon_id: WeaponId,
        current: u32,
        max: u32,
    },
    /// A weapon was placed (session start or equip).
    WeaponSpawned {
        weapon_id: WeaponId,
        slot: Option<usize>,
    },
    /// A projectile ran out of lifetime without hitting anything.
    ProjectileExpired { projectile_id: ProjectileId },
    TargetSpawned { target_id: TargetId, slot: usize },
    /// Health depleted; `score_awarded` went to the scoreboard.
    TargetDestroyed {
        target_id: TargetId,
        score_awarded: i64,
    },
    /// Forced lifetime elapsed; no score.
    TargetExpired { target_id: TargetId },
    /// Emitted once per running tick.
    SessionTick { remaining_secs: f64 },
    SessionEnded { final_score: i64 },
}
