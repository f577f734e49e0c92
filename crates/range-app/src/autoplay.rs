//! Fast-forward autoplay: runs one whole session headless with a scripted
//! shooter standing in for the input and physics adapters.
//!
//! Each tick every idle weapon fires at the oldest live target; the shot
//! connects with probability `accuracy`, otherwise the projectile flies on
//! until its lifetime runs out. Empty weapons reload.

use anyhow::ensure;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::debug;

use range_core::enums::{DamageOutcome, FireOutcome, ImpactOutcome, SessionPhase, WeaponPhase};
use range_core::events::RangeEvent;
use range_core::state::RangeSnapshot;
use range_core::types::{Muzzle, Position, Velocity};
use range_sim::RangeEngine;

use crate::settings::AppSettings;

/// Outcome of one autoplayed session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub final_score: i64,
    pub shots_fired: u32,
    pub hits: u32,
    pub targets_spawned: u32,
    pub targets_destroyed: u32,
    pub targets_expired: u32,
    pub ticks: u64,
}

/// Run one session to completion at the settings' tick rate without sleeping.
pub fn run_session(settings: &AppSettings, accuracy: f64) -> anyhow::Result<SessionReport> {
    ensure!(
        (0.0..=1.0).contains(&accuracy),
        "accuracy must be within 0..=1, got {accuracy}"
    );
    settings.validate()?;

    let mut engine = RangeEngine::new(settings.sim_config());
    // Separate stream so the shooter never perturbs the engine's spawn rolls.
    let mut aim = ChaCha8Rng::seed_from_u64(settings.seed.wrapping_add(1));
    let dt = settings.dt();

    engine.start_session()?;
    let mut report = SessionReport {
        final_score: 0,
        shots_fired: 0,
        hits: 0,
        targets_spawned: 0,
        targets_destroyed: 0,
        targets_expired: 0,
        ticks: 0,
    };
    let mut snapshot = engine.tick(dt)?;

    loop {
        tally(&mut report, &snapshot);
        if snapshot.phase == SessionPhase::Stopped {
            break;
        }
        take_shots(&mut engine, &snapshot, &mut aim, accuracy, &mut report)?;
        snapshot = engine.tick(dt)?;
    }

    report.ticks = engine.time().tick;
    let score = engine.score();
    report.shots_fired = score.shots_fired();
    report.targets_destroyed = score.targets_destroyed();
    report.targets_expired = score.targets_expired();
    Ok(report)
}

fn take_shots(
    engine: &mut RangeEngine,
    snapshot: &RangeSnapshot,
    aim: &mut ChaCha8Rng,
    accuracy: f64,
    report: &mut SessionReport,
) -> anyhow::Result<()> {
    for weapon in &snapshot.weapons {
        if weapon.phase != WeaponPhase::Idle {
            continue;
        }
        if weapon.ammo_current == 0 && !weapon.infinite_ammo {
            engine.request_reload(weapon.weapon_id);
            continue;
        }
        let Some(target) = snapshot.targets.first() else {
            continue;
        };
        let muzzle = Muzzle {
            origin: Position::new(0.0, 1.5, 0.0),
            direction: Velocity::new(0.0, 0.0, 1.0),
        };
        let FireOutcome::Fired(projectile_id) = engine.request_fire(weapon.weapon_id, muzzle)
        else {
            continue;
        };
        if aim.gen_bool(accuracy) {
            let outcome = engine.report_impact(projectile_id, target.target_id)?;
            debug!(projectile = %projectile_id, target = %target.target_id, ?outcome, "hit");
            // A second weapon can land on a target the first one just destroyed.
            if matches!(
                outcome,
                ImpactOutcome::Resolved(
                    DamageOutcome::Damaged { .. } | DamageOutcome::Destroyed { .. }
                )
            ) {
                report.hits += 1;
            }
        }
    }
    Ok(())
}

fn tally(report: &mut SessionReport, snapshot: &RangeSnapshot) {
    for event in &snapshot.events {
        match event {
            RangeEvent::TargetSpawned { .. } => report.targets_spawned += 1,
            RangeEvent::SessionEnded { final_score } => report.final_score = *final_score,
            _ => {}
        }
    }
}
