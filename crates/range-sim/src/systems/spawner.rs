//! Spawner system: session clock and the repeating target spawn schedule.
//!
//! The accumulator is decremented by the interval rather than zeroed, so a
//! fractional overrun carries into the next spawn and the average rate holds
//! for any tick cadence.

use std::collections::BTreeSet;

use hecs::World;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use range_core::components::Target;
use range_core::config::SessionConfig;
use range_core::constants::{MAX_SPAWNS_PER_TICK, TIMER_EPSILON};
use range_core::enums::SlotPolicy;
use range_core::events::RangeEvent;
use range_core::types::TargetId;

use crate::session::Session;
use crate::world_setup::{self, IdAllocator, TargetParams};

use super::countdown;

/// What the session clock did this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    Continue,
    /// Remaining time reached zero; the caller must reset the session.
    Expired,
}

/// Pick a spawn slot uniformly at random under `policy`.
/// Returns `None` when no slot is available.
pub fn pick_slot(
    rng: &mut ChaCha8Rng,
    slot_count: usize,
    occupied: &BTreeSet<usize>,
    policy: SlotPolicy,
) -> Option<usize> {
    match policy {
        SlotPolicy::WithReplacement => {
            (slot_count > 0).then(|| rng.gen_range(0..slot_count))
        }
        SlotPolicy::WithoutReplacement => {
            let free: Vec<usize> = (0..slot_count).filter(|s| !occupied.contains(s)).collect();
            free.choose(rng).copied()
        }
    }
}

/// Slots currently holding a live target.
pub fn occupied_slots(world: &World) -> BTreeSet<usize> {
    world
        .query::<&Target>()
        .iter()
        .filter(|(_, target)| target.alive)
        .map(|(_, target)| target.slot)
        .collect()
}

/// Health/score/lifetime for the next target: a random variant when the
/// config lists any, otherwise the base target.
fn next_target_params(config: &SessionConfig, rng: &mut ChaCha8Rng) -> TargetParams {
    match config.target_variants.choose(rng) {
        Some(variant) => TargetParams {
            variant: variant.name.clone(),
            max_health: variant.max_health,
            score_value: variant.score_value,
            lifetime_secs: config.target_lifetime_secs,
        },
        None => TargetParams {
            variant: String::new(),
            max_health: config.target_max_health,
            score_value: config.target_score_value,
            lifetime_secs: config.target_lifetime_secs,
        },
    }
}

/// Spawn one target into the session, if a slot is available.
pub fn spawn_target(
    world: &mut World,
    session: &mut Session,
    config: &SessionConfig,
    rng: &mut ChaCha8Rng,
    ids: &mut IdAllocator,
    events: &mut Vec<RangeEvent>,
) -> Option<TargetId> {
    if config.spawn_slot_count == 0 {
        warn!("no spawn slots configured; skipping target spawn");
        return None;
    }

    let occupied = match config.slot_policy {
        SlotPolicy::WithReplacement => BTreeSet::new(),
        SlotPolicy::WithoutReplacement => occupied_slots(world),
    };
    let Some(slot) = pick_slot(rng, config.spawn_slot_count, &occupied, config.slot_policy)
    else {
        debug!("all spawn slots occupied; skipping target spawn");
        return None;
    };

    let params = next_target_params(config, rng);
    let (target_id, entity) = world_setup::spawn_target(world, ids, slot, params);
    session.active_targets.insert(target_id, entity);
    events.push(RangeEvent::TargetSpawned { target_id, slot });
    debug!(target = %target_id, slot, "target spawned");
    Some(target_id)
}

/// Advance the session clock by `dt` and spawn any targets that came due.
pub fn run(
    world: &mut World,
    session: &mut Session,
    config: &SessionConfig,
    rng: &mut ChaCha8Rng,
    ids: &mut IdAllocator,
    dt: f64,
    events: &mut Vec<RangeEvent>,
) -> SessionStep {
    if !session.is_running() {
        return SessionStep::Continue;
    }

    session.remaining_secs = countdown(session.remaining_secs, dt);
    events.push(RangeEvent::SessionTick {
        remaining_secs: session.remaining_secs,
    });
    if session.remaining_secs <= 0.0 {
        return SessionStep::Expired;
    }

    let interval = session.spawn_interval_secs;
    session.spawn_accumulator += dt;
    let mut spawned = 0;
    while spawned < MAX_SPAWNS_PER_TICK && session.spawn_accumulator + TIMER_EPSILON >= interval {
        session.spawn_accumulator -= interval;
        spawn_target(world, session, config, rng, ids, events);
        spawned += 1;
    }
    if session.spawn_accumulator + TIMER_EPSILON >= interval {
        warn!(
            backlog_secs = session.spawn_accumulator,
            "spawn backlog exceeds per-tick cap; dropping it"
        );
        session.spawn_accumulator %= interval;
    }

    SessionStep::Continue
}
