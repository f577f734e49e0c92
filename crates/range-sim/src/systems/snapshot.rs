//! Snapshot system: queries the ECS world and builds a complete RangeSnapshot.
//!
//! This system is read-only; it never modifies the world. Views are sorted
//! by id so identical runs serialize identically.

use hecs::World;

use range_core::components::*;
use range_core::enums::WeaponPhase;
use range_core::events::RangeEvent;
use range_core::state::*;
use range_core::types::{Position, SimTime, Velocity};

use crate::score::ScoreBoard;
use crate::session::Session;

/// Build a complete RangeSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    session: &Session,
    score: &ScoreBoard,
    events: Vec<RangeEvent>,
) -> RangeSnapshot {
    RangeSnapshot {
        time: *time,
        phase: session.phase,
        session_remaining_secs: session.remaining_secs,
        session_duration_secs: session.duration_secs,
        weapons: build_weapons(world),
        targets: build_targets(world),
        projectiles: build_projectiles(world),
        score: score.view(),
        events,
    }
}

fn build_weapons(world: &World) -> Vec<WeaponView> {
    let mut weapons: Vec<WeaponView> = world
        .query::<&Weapon>()
        .iter()
        .map(|(_, weapon)| WeaponView {
            weapon_id: weapon.id,
            slot: weapon.slot,
            phase: weapon.phase,
            ammo_current: weapon.ammo_current,
            ammo_max: weapon.ammo_max,
            infinite_ammo: weapon.infinite_ammo,
            busy_remaining_secs: match weapon.phase {
                WeaponPhase::Idle => 0.0,
                WeaponPhase::Cooldown => weapon.cooldown_remaining,
                WeaponPhase::Reloading => weapon.reload_remaining,
            },
        })
        .collect();
    weapons.sort_by_key(|w| w.weapon_id);
    weapons
}

/// Only live targets are shown; reclaimed ones disappear with this tick's cleanup.
fn build_targets(world: &World) -> Vec<TargetView> {
    let mut targets: Vec<TargetView> = world
        .query::<&Target>()
        .iter()
        .filter(|(_, target)| target.alive)
        .map(|(_, target)| TargetView {
            target_id: target.id,
            slot: target.slot,
            variant: target.variant.clone(),
            health_current: target.health_current,
            health_max: target.health_max,
            score_value: target.score_value,
            lifetime_remaining_secs: target.lifetime_remaining,
        })
        .collect();
    targets.sort_by_key(|t| t.target_id);
    targets
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Projectile, &Position, &Velocity)>()
        .iter()
        .filter(|(_, (projectile, _, _))| projectile.resolution.is_none())
        .map(|(_, (projectile, pos, vel))| ProjectileView {
            projectile_id: projectile.id,
            weapon_id: projectile.weapon_id,
            position: *pos,
            velocity: *vel,
            remaining_lifetime_secs: projectile.remaining_lifetime,
        })
        .collect();
    projectiles.sort_by_key(|p| p.projectile_id);
    projectiles
}
