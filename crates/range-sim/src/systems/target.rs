//! Target system: damage application and forced lifetime expiry.
//!
//! Target lifecycle is monotonic: there is no heal, and once `alive` is
//! false the target accepts no further damage and awards no further score.

use hecs::World;
use tracing::debug;

use range_core::components::Target;
use range_core::enums::{DamageOutcome, TargetRemoval};
use range_core::error::RangeError;
use range_core::events::RangeEvent;

use crate::score::ScoreBoard;

use super::countdown;

/// Apply `amount` damage. A hit that depletes health reports the target's
/// score to `score` exactly once. Negative or non-finite amounts are rejected
/// and leave the target untouched.
pub fn apply_damage(
    target: &mut Target,
    amount: f64,
    score: &mut ScoreBoard,
) -> Result<DamageOutcome, RangeError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(RangeError::NegativeDamage { amount });
    }
    if !target.alive {
        return Ok(DamageOutcome::Ignored);
    }

    let remaining = target.health_current - amount;
    if remaining > 0.0 {
        target.health_current = remaining;
        return Ok(DamageOutcome::Damaged {
            remaining_health: remaining,
        });
    }

    // Award first: a rejected score leaves the target alive and unchanged.
    score.add_score(target.score_value)?;
    score.record_destroyed();
    target.health_current = remaining;
    target.alive = false;
    target.removal = Some(TargetRemoval::Destroyed);
    debug!(target = %target.id, score = target.score_value, "target destroyed");
    Ok(DamageOutcome::Destroyed {
        score_awarded: target.score_value,
    })
}

/// Advance the forced lifetime. Returns true if the target expired on this call.
pub fn advance_lifetime(target: &mut Target, dt: f64) -> bool {
    if !target.alive {
        return false;
    }
    let Some(remaining) = target.lifetime_remaining else {
        return false;
    };
    let remaining = countdown(remaining, dt);
    target.lifetime_remaining = Some(remaining);
    if remaining > 0.0 {
        return false;
    }
    target.alive = false;
    target.removal = Some(TargetRemoval::Expired);
    true
}

/// Run the target system: expire targets whose lifetime elapsed.
pub fn run(world: &mut World, dt: f64, score: &mut ScoreBoard, events: &mut Vec<RangeEvent>) {
    for (_entity, target) in world.query_mut::<&mut Target>() {
        if advance_lifetime(target, dt) {
            score.record_expired();
            events.push(RangeEvent::TargetExpired {
                target_id: target.id,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use range_core::types::TargetId;

    fn make_target(health: f64, lifetime: Option<f64>) -> Target {
        Target {
            id: TargetId(0),
            slot: 0,
            variant: String::new(),
            health_current: health,
            health_max: health,
            score_value: 10,
            alive: true,
            lifetime_remaining: lifetime,
            removal: None,
        }
    }

    #[test]
    fn test_damage_reduces_health() {
        let mut score = ScoreBoard::default();
        let mut target = make_target(100.0, None);
        let outcome = apply_damage(&mut target, 25.0, &mut score).unwrap();
        assert_eq!(
            outcome,
            DamageOutcome::Damaged {
                remaining_health: 75.0
            }
        );
        assert!(target.alive);
        assert_eq!(score.total(), 0);
    }

    #[test]
    fn test_destruction_scores_exactly_once() {
        let mut score = ScoreBoard::default();
        let mut target = make_target(50.0, None);
        apply_damage(&mut target, 25.0, &mut score).unwrap();
        let outcome = apply_damage(&mut target, 25.0, &mut score).unwrap();
        assert_eq!(outcome, DamageOutcome::Destroyed { score_awarded: 10 });
        assert!(!target.alive);
        assert_eq!(target.removal, Some(TargetRemoval::Destroyed));

        for _ in 0..5 {
            assert_eq!(
                apply_damage(&mut target, 25.0, &mut score).unwrap(),
                DamageOutcome::Ignored
            );
        }
        assert_eq!(score.total(), 10);
        assert_eq!(score.targets_destroyed(), 1);
    }

    #[test]
    fn test_negative_damage_rejected() {
        let mut score = ScoreBoard::default();
        let mut target = make_target(100.0, None);
        let err = apply_damage(&mut target, -5.0, &mut score).unwrap_err();
        assert_eq!(err, RangeError::NegativeDamage { amount: -5.0 });
        assert_eq!(target.health_current, 100.0);
        assert!(apply_damage(&mut target, f64::NAN, &mut score).is_err());
        assert_eq!(target.health_current, 100.0);
    }

    #[test]
    fn test_lifetime_expiry_awards_nothing() {
        let mut score = ScoreBoard::default();
        let mut target = make_target(100.0, Some(1.0));
        assert!(!advance_lifetime(&mut target, 0.5));
        assert!(advance_lifetime(&mut target, 0.5));
        assert_eq!(target.removal, Some(TargetRemoval::Expired));
        assert_eq!(
            apply_damage(&mut target, 500.0, &mut score).unwrap(),
            DamageOutcome::Ignored
        );
        assert_eq!(score.total(), 0);
    }

    #[test]
    fn test_destroyed_target_does_not_expire() {
        let mut score = ScoreBoard::default();
        let mut target = make_target(10.0, Some(1.0));
        apply_damage(&mut target, 10.0, &mut score).unwrap();
        assert!(!advance_lifetime(&mut target, 5.0));
        assert_eq!(target.removal, Some(TargetRemoval::Destroyed));
    }

    #[test]
    fn test_permanent_target_never_expires() {
        let mut target = make_target(10.0, None);
        assert!(!advance_lifetime(&mut target, 1_000.0));
        assert!(target.alive);
    }
}
