//! Projectile system: lifetime countdown and single-use impact resolution.
//!
//! A projectile resolves exactly once: whichever of impact or expiry is
//! processed first wins and the other becomes a no-op. Resolved projectiles
//! stay in the world until cleanup despawns them at the end of the tick.

use hecs::World;

use range_core::components::Projectile;
use range_core::enums::ProjectileResolution;
use range_core::events::RangeEvent;

use super::countdown;

/// Resolve as an impact. Returns the damage to deliver, or `None` if the
/// projectile already resolved.
pub fn resolve_impact(projectile: &mut Projectile) -> Option<f64> {
    if projectile.resolution.is_some() {
        return None;
    }
    projectile.resolution = Some(ProjectileResolution::Impact);
    Some(projectile.damage)
}

/// Advance the lifetime. Returns true if the projectile expired on this call.
pub fn advance(projectile: &mut Projectile, dt: f64) -> bool {
    if projectile.resolution.is_some() {
        return false;
    }
    projectile.remaining_lifetime = countdown(projectile.remaining_lifetime, dt);
    if projectile.remaining_lifetime > 0.0 {
        return false;
    }
    projectile.resolution = Some(ProjectileResolution::Expired);
    true
}

/// Run the projectile system: expire projectiles whose lifetime ran out.
pub fn run(world: &mut World, dt: f64, events: &mut Vec<RangeEvent>) {
    for (_entity, projectile) in world.query_mut::<&mut Projectile>() {
        if advance(projectile, dt) {
            events.push(RangeEvent::ProjectileExpired {
                projectile_id: projectile.id,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use range_core::types::{ProjectileId, WeaponId};

    fn make_projectile(lifetime: f64) -> Projectile {
        Projectile {
            id: ProjectileId(0),
            weapon_id: WeaponId(0),
            damage: 25.0,
            remaining_lifetime: lifetime,
            resolution: None,
        }
    }

    #[test]
    fn test_impact_delivers_damage_once() {
        let mut p = make_projectile(5.0);
        assert_eq!(resolve_impact(&mut p), Some(25.0));
        assert_eq!(resolve_impact(&mut p), None, "second contact ignored");
        assert_eq!(p.resolution, Some(ProjectileResolution::Impact));
    }

    #[test]
    fn test_expiry_after_lifetime() {
        let mut p = make_projectile(1.0);
        assert!(!advance(&mut p, 0.5));
        assert!(advance(&mut p, 0.5));
        assert_eq!(p.remaining_lifetime, 0.0);
        assert!(!advance(&mut p, 0.5), "expiry is reported once");
        assert_eq!(resolve_impact(&mut p), None, "expired projectile deals no damage");
    }

    #[test]
    fn test_impacted_projectile_does_not_expire() {
        let mut p = make_projectile(0.1);
        resolve_impact(&mut p).unwrap();
        assert!(!advance(&mut p, 1.0));
        assert_eq!(p.resolution, Some(ProjectileResolution::Impact));
    }

    #[test]
    fn test_zero_tick_keeps_lifetime() {
        let mut p = make_projectile(2.0);
        for _ in 0..5 {
            assert!(!advance(&mut p, 0.0));
        }
        assert!((p.remaining_lifetime - 2.0).abs() < 1e-12);
    }
}
