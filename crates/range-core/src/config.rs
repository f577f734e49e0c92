//! Session configuration, supplied before `Start`.
//!
//! Every field has a default taken from the constants module, so partial
//! TOML/JSON documents deserialize into a complete config.

use serde::{Deserialize, Serialize};

use crate::components::WeaponProfile;
use crate::constants::*;
use crate::enums::SlotPolicy;
use crate::error::RangeError;

/// One kind of target the spawner can place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetVariant {
    pub name: String,
    pub max_health: f64,
    pub score_value: i64,
}

/// Tuning for one session: weapon, projectile, target and spawn schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub ammo_max: u32,
    pub infinite_ammo: bool,
    pub cooldown_secs: f64,
    pub reload_secs: f64,
    pub muzzle_speed: f64,
    pub projectile_damage: f64,
    pub projectile_lifetime_secs: f64,
    pub spawn_interval_secs: f64,
    pub session_duration_secs: f64,
    pub spawn_slot_count: usize,
    pub slot_policy: SlotPolicy,
    pub weapon_slot_count: usize,
    pub target_max_health: f64,
    pub target_score_value: i64,
    /// Forced removal after this many seconds; `None` keeps targets until destroyed.
    pub target_lifetime_secs: Option<f64>,
    /// When non-empty, each spawn picks one of these uniformly at random.
    pub target_variants: Vec<TargetVariant>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ammo_max: DEFAULT_AMMO_MAX,
            infinite_ammo: false,
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            reload_secs: DEFAULT_RELOAD_SECS,
            muzzle_speed: DEFAULT_MUZZLE_SPEED,
            projectile_damage: DEFAULT_PROJECTILE_DAMAGE,
            projectile_lifetime_secs: DEFAULT_PROJECTILE_LIFETIME_SECS,
            spawn_interval_secs: DEFAULT_SPAWN_INTERVAL_SECS,
            session_duration_secs: DEFAULT_SESSION_DURATION_SECS,
            spawn_slot_count: DEFAULT_SPAWN_SLOT_COUNT,
            slot_policy: SlotPolicy::default(),
            weapon_slot_count: DEFAULT_WEAPON_SLOT_COUNT,
            target_max_health: DEFAULT_TARGET_MAX_HEALTH,
            target_score_value: DEFAULT_TARGET_SCORE_VALUE,
            target_lifetime_secs: Some(DEFAULT_TARGET_LIFETIME_SECS),
            target_variants: Vec::new(),
        }
    }
}

impl SessionConfig {
    /// Weapon tuning derived from this config.
    pub fn weapon_profile(&self) -> WeaponProfile {
        WeaponProfile {
            cooldown_secs: self.cooldown_secs,
            reload_secs: self.reload_secs,
            projectile_damage: self.projectile_damage,
            projectile_lifetime_secs: self.projectile_lifetime_secs,
            muzzle_speed: self.muzzle_speed,
        }
    }

    /// Check every field is usable. The engine refuses to start otherwise.
    pub fn validate(&self) -> Result<(), RangeError> {
        if self.ammo_max == 0 && !self.infinite_ammo {
            return Err(invalid("ammo_max", "must be at least 1"));
        }
        non_negative("cooldown_secs", self.cooldown_secs)?;
        non_negative("reload_secs", self.reload_secs)?;
        non_negative("muzzle_speed", self.muzzle_speed)?;
        positive("projectile_damage", self.projectile_damage)?;
        non_negative("projectile_lifetime_secs", self.projectile_lifetime_secs)?;
        positive("spawn_interval_secs", self.spawn_interval_secs)?;
        if self.spawn_interval_secs <= TIMER_EPSILON {
            return Err(invalid(
                "spawn_interval_secs",
                &format!("must be longer than {TIMER_EPSILON} s"),
            ));
        }
        positive("session_duration_secs", self.session_duration_secs)?;
        positive("target_max_health", self.target_max_health)?;
        if self.target_score_value < 0 {
            return Err(invalid("target_score_value", "must not be negative"));
        }
        if let Some(lifetime) = self.target_lifetime_secs {
            positive("target_lifetime_secs", lifetime)?;
        }
        for variant in &self.target_variants {
            positive("target_variants.max_health", variant.max_health)?;
            if variant.score_value < 0 {
                return Err(invalid(
                    "target_variants.score_value",
                    "must not be negative",
                ));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> RangeError {
    RangeError::InvalidConfig {
        field,
        reason: reason.to_string(),
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), RangeError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), RangeError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &format!("must not be negative, got {value}")))
    }
}
