//! Weapon system: fire/reload transitions and cooldown/reload countdowns.
//!
//! `Idle → Cooldown → Idle` on fire, `Idle/Cooldown → Reloading → Idle` on
//! reload. Firing and reloading are mutually exclusive; a fire request
//! during a reload is rejected, never queued.

use hecs::World;

use range_core::components::Weapon;
use range_core::enums::{FireRejection, ReloadRejection, WeaponPhase};
use range_core::events::RangeEvent;

use super::countdown;

/// Transition produced by advancing a weapon's timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponTransition {
    CooldownEnded,
    ReloadCompleted,
}

/// Attempt to fire. On success one round is consumed (unless infinite)
/// and the cooldown starts; the caller spawns the projectile.
pub fn try_fire(weapon: &mut Weapon) -> Result<(), FireRejection> {
    match weapon.phase {
        WeaponPhase::Reloading => return Err(FireRejection::Reloading),
        WeaponPhase::Cooldown => return Err(FireRejection::CoolingDown),
        WeaponPhase::Idle => {}
    }
    if !weapon.infinite_ammo {
        if weapon.ammo_current == 0 {
            return Err(FireRejection::OutOfAmmo);
        }
        weapon.ammo_current -= 1;
    }
    weapon.phase = WeaponPhase::Cooldown;
    weapon.cooldown_remaining = weapon.profile.cooldown_secs;
    Ok(())
}

/// Attempt to start a reload. Cancels any running cooldown.
pub fn try_reload(weapon: &mut Weapon) -> Result<(), ReloadRejection> {
    if weapon.phase == WeaponPhase::Reloading {
        return Err(ReloadRejection::AlreadyReloading);
    }
    if weapon.infinite_ammo || weapon.ammo_current >= weapon.ammo_max {
        return Err(ReloadRejection::AmmoFull);
    }
    weapon.phase = WeaponPhase::Reloading;
    weapon.cooldown_remaining = 0.0;
    weapon.reload_remaining = weapon.profile.reload_secs;
    Ok(())
}

/// Advance the active countdown by `dt`. Zero-length ticks change nothing
/// unless a countdown is already at zero.
pub fn advance(weapon: &mut Weapon, dt: f64) -> Option<WeaponTransition> {
    match weapon.phase {
        WeaponPhase::Idle => None,
        WeaponPhase::Cooldown => {
            weapon.cooldown_remaining = countdown(weapon.cooldown_remaining, dt);
            if weapon.cooldown_remaining > 0.0 {
                return None;
            }
            weapon.phase = WeaponPhase::Idle;
            Some(WeaponTransition::CooldownEnded)
        }
        WeaponPhase::Reloading => {
            weapon.reload_remaining = countdown(weapon.reload_remaining, dt);
            if weapon.reload_remaining > 0.0 {
                return None;
            }
            weapon.ammo_current = weapon.ammo_max;
            weapon.phase = WeaponPhase::Idle;
            Some(WeaponTransition::ReloadCompleted)
        }
    }
}

/// Run the weapon system: advance every weapon's timers.
pub fn run(world: &mut World, dt: f64, events: &mut Vec<RangeEvent>) {
    for (_entity, weapon) in world.query_mut::<&mut Weapon>() {
        if advance(weapon, dt) == Some(WeaponTransition::ReloadCompleted) {
            events.push(RangeEvent::ReloadComplete {
                weapon_id: weapon.id,
            });
            events.push(RangeEvent::AmmoChanged {
                weapon_id: weapon.id,
                current: weapon.ammo_current,
                max: weapon.ammo_max,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use range_core::components::WeaponProfile;
    use range_core::types::WeaponId;

    fn make_weapon(ammo_max: u32) -> Weapon {
        Weapon {
            id: WeaponId(0),
            slot: None,
            ammo_current: ammo_max,
            ammo_max,
            infinite_ammo: false,
            phase: WeaponPhase::Idle,
            cooldown_remaining: 0.0,
            reload_remaining: 0.0,
            profile: WeaponProfile {
                cooldown_secs: 0.3,
                reload_secs: 1.5,
                projectile_damage: 25.0,
                projectile_lifetime_secs: 5.0,
                muzzle_speed: 20.0,
            },
        }
    }

    #[test]
    fn test_fire_consumes_round_and_starts_cooldown() {
        let mut weapon = make_weapon(3);
        assert!(try_fire(&mut weapon).is_ok());
        assert_eq!(weapon.ammo_current, 2);
        assert_eq!(weapon.phase, WeaponPhase::Cooldown);
        assert!((weapon.cooldown_remaining - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_fire_rejected_during_cooldown() {
        let mut weapon = make_weapon(3);
        try_fire(&mut weapon).unwrap();
        assert_eq!(try_fire(&mut weapon), Err(FireRejection::CoolingDown));
        assert_eq!(weapon.ammo_current, 2, "rejected fire must not consume ammo");
    }

    #[test]
    fn test_cooldown_boundary_with_fractional_ticks() {
        let mut weapon = make_weapon(3);
        try_fire(&mut weapon).unwrap();
        // 0.1 + 0.1 + 0.1 does not sum exactly to 0.3 in binary.
        assert_eq!(advance(&mut weapon, 0.1), None);
        assert_eq!(advance(&mut weapon, 0.1), None);
        assert_eq!(
            advance(&mut weapon, 0.1),
            Some(WeaponTransition::CooldownEnded)
        );
        assert_eq!(weapon.phase, WeaponPhase::Idle);
        assert!(try_fire(&mut weapon).is_ok());
    }

    #[test]
    fn test_zero_ticks_are_idempotent() {
        let mut weapon = make_weapon(3);
        try_fire(&mut weapon).unwrap();
        for _ in 0..10 {
            assert_eq!(advance(&mut weapon, 0.0), None);
        }
        assert_eq!(weapon.phase, WeaponPhase::Cooldown);
        assert!((weapon.cooldown_remaining - 0.3).abs() < 1e-12);

        let mut idle = make_weapon(3);
        assert_eq!(advance(&mut idle, 0.0), None);
        assert_eq!(idle.phase, WeaponPhase::Idle);
    }

    #[test]
    fn test_empty_magazine_rejects_fire() {
        let mut weapon = make_weapon(1);
        try_fire(&mut weapon).unwrap();
        advance(&mut weapon, 1.0);
        assert_eq!(try_fire(&mut weapon), Err(FireRejection::OutOfAmmo));
        assert_eq!(weapon.ammo_current, 0);
        assert_eq!(weapon.phase, WeaponPhase::Idle);
    }

    #[test]
    fn test_infinite_ammo_never_depletes() {
        let mut weapon = make_weapon(1);
        weapon.infinite_ammo = true;
        for _ in 0..5 {
            try_fire(&mut weapon).unwrap();
            advance(&mut weapon, 1.0);
        }
        assert_eq!(weapon.ammo_current, 1);
        assert_eq!(try_reload(&mut weapon), Err(ReloadRejection::AmmoFull));
    }

    #[test]
    fn test_reload_full_is_noop() {
        let mut weapon = make_weapon(3);
        assert_eq!(try_reload(&mut weapon), Err(ReloadRejection::AmmoFull));
        assert_eq!(weapon.phase, WeaponPhase::Idle);
        assert_eq!(weapon.ammo_current, 3);
    }

    #[test]
    fn test_reload_cycle_restores_ammo() {
        let mut weapon = make_weapon(3);
        try_fire(&mut weapon).unwrap();
        assert!(try_reload(&mut weapon).is_ok(), "reload may interrupt cooldown");
        assert_eq!(weapon.phase, WeaponPhase::Reloading);
        assert_eq!(
            try_reload(&mut weapon),
            Err(ReloadRejection::AlreadyReloading)
        );
        assert_eq!(try_fire(&mut weapon), Err(FireRejection::Reloading));

        assert_eq!(advance(&mut weapon, 1.0), None);
        assert_eq!(weapon.ammo_current, 2, "ammo refills only on completion");
        assert_eq!(
            advance(&mut weapon, 0.5),
            Some(WeaponTransition::ReloadCompleted)
        );
        assert_eq!(weapon.ammo_current, 3);
        assert_eq!(weapon.phase, WeaponPhase::Idle);
    }

    #[test]
    fn test_run_emits_reload_events() {
        let mut world = World::new();
        let mut weapon = make_weapon(2);
        weapon.ammo_current = 0;
        try_reload(&mut weapon).unwrap();
        world.spawn((weapon,));

        let mut events = Vec::new();
        run(&mut world, 2.0, &mut events);
        assert_eq!(
            events,
            vec![
                RangeEvent::ReloadComplete {
                    weapon_id: WeaponId(0)
                },
                RangeEvent::AmmoChanged {
                    weapon_id: WeaponId(0),
                    current: 2,
                    max: 2
                },
            ]
        );
    }
}
