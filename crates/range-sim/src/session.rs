//! Spawner session state and the registry of spawned entities.
//!
//! Stored in `RangeEngine`, NOT as an ECS entity. The registry is the only
//! owner of weapon/target ids, which is what makes `Reset` total.

use std::collections::BTreeMap;

use hecs::Entity;

use range_core::config::SessionConfig;
use range_core::enums::SessionPhase;
use range_core::types::{TargetId, WeaponId};

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub phase: SessionPhase,
    /// Seconds until the session ends. 0 when stopped.
    pub remaining_secs: f64,
    pub duration_secs: f64,
    pub spawn_interval_secs: f64,
    /// Time accumulated toward the next spawn.
    pub spawn_accumulator: f64,
    pub active_targets: BTreeMap<TargetId, Entity>,
    pub active_weapons: BTreeMap<WeaponId, Entity>,
}

impl Session {
    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Enter `Running` with a fresh clock and empty registry.
    pub fn begin(&mut self, config: &SessionConfig) {
        self.active_targets.clear();
        self.active_weapons.clear();
        self.phase = SessionPhase::Running;
        self.duration_secs = config.session_duration_secs;
        self.remaining_secs = config.session_duration_secs;
        self.spawn_interval_secs = config.spawn_interval_secs;
        self.spawn_accumulator = 0.0;
    }

    /// Back to `Stopped`. The caller despawns the entities first.
    pub fn clear(&mut self) {
        self.active_targets.clear();
        self.active_weapons.clear();
        self.phase = SessionPhase::Stopped;
        self.remaining_secs = 0.0;
        self.spawn_accumulator = 0.0;
    }

    pub fn target_entity(&self, id: TargetId) -> Option<Entity> {
        self.active_targets.get(&id).copied()
    }

    pub fn weapon_entity(&self, id: WeaponId) -> Option<Entity> {
        self.active_weapons.get(&id).copied()
    }
}
