//! Snapshot: the complete visible state handed to the presentation layer each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::RangeEvent;
use crate::types::{Position, ProjectileId, SimTime, TargetId, Velocity, WeaponId};

/// Complete state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RangeSnapshot {
    pub time: SimTime,
    pub phase: SessionPhase,
    pub session_remaining_secs: f64,
    pub session_duration_secs: f64,
    pub weapons: Vec<WeaponView>,
    pub targets: Vec<TargetView>,
    pub projectiles: Vec<ProjectileView>,
    pub score: ScoreView,
    /// Events emitted since the previous snapshot, in emission order.
    pub events: Vec<RangeEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponView {
    pub weapon_id: WeaponId,
    pub slot: Option<usize>,
    pub phase: WeaponPhase,
    pub ammo_current: u32,
    pub ammo_max: u32,
    pub infinite_ammo: bool,
    /// Seconds left on the active cooldown or reload, 0 when idle.
    pub busy_remaining_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetView {
    pub target_id: TargetId,
    pub slot: usize,
    pub variant: String,
    pub health_current: f64,
    pub health_max: f64,
    pub score_value: i64,
    pub lifetime_remaining_secs: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub projectile_id: ProjectileId,
    pub weapon_id: WeaponId,
    pub position: Position,
    pub velocity: Velocity,
    pub remaining_lifetime_secs: f64,
}

/// Running score for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub total_score: i64,
    pub targets_destroyed: u32,
    pub targets_expired: u32,
    pub shots_fired: u32,
}
