//! Session engine: the core of the range.
//!
//! `RangeEngine` owns the hecs ECS world, processes adapter commands, runs
//! all systems, and produces `RangeSnapshot`s. Completely headless, driven
//! only by the `dt` passed to [`RangeEngine::tick`], enabling deterministic
//! testing.

use std::collections::{BTreeMap, VecDeque};

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use range_core::commands::RangeCommand;
use range_core::components::{Projectile, Target, Weapon};
use range_core::config::SessionConfig;
use range_core::enums::{
    DamageOutcome, FireOutcome, FireRejection, ImpactOutcome, ReloadOutcome, ReloadRejection,
    SessionPhase,
};
use range_core::error::RangeError;
use range_core::events::RangeEvent;
use range_core::state::RangeSnapshot;
use range_core::types::{Muzzle, ProjectileId, SimTime, TargetId, WeaponId};

use crate::score::ScoreBoard;
use crate::session::Session;
use crate::systems;
use crate::systems::spawner::SessionStep;
use crate::world_setup::{self, IdAllocator};

/// Configuration for a new engine.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Tuning applied at every session start.
    pub session: SessionConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            session: SessionConfig::default(),
        }
    }
}

/// The session engine. Owns the ECS world and all session state.
pub struct RangeEngine {
    world: World,
    time: SimTime,
    config: SessionConfig,
    rng: ChaCha8Rng,
    ids: IdAllocator,
    command_queue: VecDeque<RangeCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<RangeEvent>,
    session: Session,
    score: ScoreBoard,
    projectiles: BTreeMap<ProjectileId, Entity>,
}

impl RangeEngine {
    /// Create a new engine with the given config. The session starts stopped.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            config: config.session,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            ids: IdAllocator::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            session: Session::default(),
            score: ScoreBoard::default(),
            projectiles: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Replace the session tuning. Takes effect at the next `Start`.
    pub fn set_config(&mut self, config: SessionConfig) -> Result<(), RangeError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: RangeCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = RangeCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the session by `dt` seconds and return the resulting snapshot.
    ///
    /// A negative or non-finite `dt` is rejected before anything runs,
    /// including queued commands.
    pub fn tick(&mut self, dt: f64) -> Result<RangeSnapshot, RangeError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(RangeError::InvalidDelta { dt });
        }

        self.process_commands();

        if self.session.is_running() {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.events);
        Ok(systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.session,
            &self.score,
            events,
        ))
    }

    /// Begin a session: zero the score, spawn the configured weapons and the
    /// first target.
    pub fn start_session(&mut self) -> Result<(), RangeError> {
        if self.session.is_running() {
            return Err(RangeError::SessionAlreadyRunning);
        }
        self.config.validate()?;

        self.score.reset();
        self.session.begin(&self.config);
        self.time = SimTime::default();

        for slot in 0..self.config.weapon_slot_count {
            self.spawn_weapon(Some(slot));
        }
        systems::spawner::spawn_target(
            &mut self.world,
            &mut self.session,
            &self.config,
            &mut self.rng,
            &mut self.ids,
            &mut self.events,
        );

        info!(
            duration_secs = self.config.session_duration_secs,
            interval_secs = self.config.spawn_interval_secs,
            "session started"
        );
        Ok(())
    }

    /// Tear down the session and every entity it spawned. Emits
    /// `SessionEnded` only when a session was running.
    pub fn reset_session(&mut self) {
        if self.session.is_running() {
            let final_score = self.score.total();
            self.events.push(RangeEvent::SessionEnded { final_score });
            info!(final_score, "session ended");
        }
        self.world.clear();
        self.projectiles.clear();
        self.session.clear();
    }

    /// Pull the trigger on `weapon_id`, launching a projectile from `muzzle`.
    pub fn request_fire(&mut self, weapon_id: WeaponId, muzzle: Muzzle) -> FireOutcome {
        let Some(entity) = self.session.weapon_entity(weapon_id) else {
            return FireOutcome::Rejected(FireRejection::UnknownWeapon);
        };
        let Ok(mut weapon) = self.world.get::<&mut Weapon>(entity) else {
            return FireOutcome::Rejected(FireRejection::UnknownWeapon);
        };
        if let Err(rejection) = systems::weapon::try_fire(&mut weapon) {
            return FireOutcome::Rejected(rejection);
        }
        let profile = weapon.profile;
        let consumed = !weapon.infinite_ammo;
        let (current, max) = (weapon.ammo_current, weapon.ammo_max);
        drop(weapon);

        let (projectile_id, projectile) = world_setup::spawn_projectile(
            &mut self.world,
            &mut self.ids,
            weapon_id,
            &profile,
            muzzle,
        );
        self.projectiles.insert(projectile_id, projectile);
        self.score.record_shot();

        self.events.push(RangeEvent::Fired {
            weapon_id,
            projectile_id,
        });
        if consumed {
            self.events.push(RangeEvent::AmmoChanged {
                weapon_id,
                current,
                max,
            });
        }
        FireOutcome::Fired(projectile_id)
    }

    /// Start reloading `weapon_id`.
    pub fn request_reload(&mut self, weapon_id: WeaponId) -> ReloadOutcome {
        let Some(entity) = self.session.weapon_entity(weapon_id) else {
            return ReloadOutcome::Rejected(ReloadRejection::UnknownWeapon);
        };
        let Ok(mut weapon) = self.world.get::<&mut Weapon>(entity) else {
            return ReloadOutcome::Rejected(ReloadRejection::UnknownWeapon);
        };
        match systems::weapon::try_reload(&mut weapon) {
            Ok(()) => {
                self.events.push(RangeEvent::ReloadStarted { weapon_id });
                ReloadOutcome::Started
            }
            Err(rejection) => ReloadOutcome::Rejected(rejection),
        }
    }

    /// A projectile touched a target. The projectile is consumed even when
    /// the target is gone; it then delivers no damage.
    pub fn report_impact(
        &mut self,
        projectile_id: ProjectileId,
        target_id: TargetId,
    ) -> Result<ImpactOutcome, RangeError> {
        let Some(entity) = self.projectiles.get(&projectile_id).copied() else {
            return Ok(ImpactOutcome::AlreadyResolved);
        };
        let damage = match self.world.get::<&mut Projectile>(entity) {
            Ok(mut projectile) => systems::projectile::resolve_impact(&mut projectile),
            Err(_) => None,
        };
        let Some(damage) = damage else {
            return Ok(ImpactOutcome::AlreadyResolved);
        };

        let outcome = self.apply_damage(target_id, damage)?;
        Ok(ImpactOutcome::Resolved(outcome))
    }

    /// Damage `target_id` directly. Unknown or reclaimed targets are ignored.
    pub fn apply_damage(
        &mut self,
        target_id: TargetId,
        amount: f64,
    ) -> Result<DamageOutcome, RangeError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(RangeError::NegativeDamage { amount });
        }
        let Some(entity) = self.session.target_entity(target_id) else {
            return Ok(DamageOutcome::Ignored);
        };
        let Ok(mut target) = self.world.get::<&mut Target>(entity) else {
            return Ok(DamageOutcome::Ignored);
        };
        let outcome = systems::target::apply_damage(&mut target, amount, &mut self.score)?;
        if let DamageOutcome::Destroyed { score_awarded } = outcome {
            self.events.push(RangeEvent::TargetDestroyed {
                target_id,
                score_awarded,
            });
        }
        Ok(outcome)
    }

    /// Add a weapon to the running session. Returns `None` while stopped.
    pub fn equip_weapon(&mut self) -> Option<WeaponId> {
        if !self.session.is_running() {
            return None;
        }
        Some(self.spawn_weapon(None))
    }

    /// Destroy a tracked weapon. Returns false if the id is unknown.
    pub fn unequip_weapon(&mut self, weapon_id: WeaponId) -> bool {
        let Some(entity) = self.session.active_weapons.remove(&weapon_id) else {
            return false;
        };
        let _ = self.world.despawn(entity);
        debug!(weapon = %weapon_id, "weapon unequipped");
        true
    }

    /// Get the current session phase.
    pub fn phase(&self) -> SessionPhase {
        self.session.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn score(&self) -> &ScoreBoard {
        &self.score
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn weapon(&self, id: WeaponId) -> Option<Weapon> {
        let entity = self.session.weapon_entity(id)?;
        self.world.get::<&Weapon>(entity).ok().map(|w| (*w).clone())
    }

    pub fn target(&self, id: TargetId) -> Option<Target> {
        let entity = self.session.target_entity(id)?;
        self.world.get::<&Target>(entity).ok().map(|t| (*t).clone())
    }

    pub fn projectile(&self, id: ProjectileId) -> Option<Projectile> {
        let entity = self.projectiles.get(&id).copied()?;
        self.world.get::<&Projectile>(entity).ok().map(|p| (*p).clone())
    }

    fn spawn_weapon(&mut self, slot: Option<usize>) -> WeaponId {
        let (weapon_id, entity) =
            world_setup::spawn_weapon(&mut self.world, &mut self.ids, &self.config, slot);
        self.session.active_weapons.insert(weapon_id, entity);
        self.events.push(RangeEvent::WeaponSpawned { weapon_id, slot });
        debug!(weapon = %weapon_id, ?slot, "weapon spawned");
        weapon_id
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command. Rejections are logged, never fatal.
    fn handle_command(&mut self, command: RangeCommand) {
        match command {
            RangeCommand::StartSession => {
                if let Err(err) = self.start_session() {
                    warn!(%err, "start rejected");
                }
            }
            RangeCommand::ResetSession => self.reset_session(),
            RangeCommand::RequestFire { weapon_id, muzzle } => {
                if let FireOutcome::Rejected(reason) = self.request_fire(weapon_id, muzzle) {
                    debug!(weapon = %weapon_id, ?reason, "fire rejected");
                }
            }
            RangeCommand::RequestReload { weapon_id } => {
                if let ReloadOutcome::Rejected(reason) = self.request_reload(weapon_id) {
                    debug!(weapon = %weapon_id, ?reason, "reload rejected");
                }
            }
            RangeCommand::EquipWeapon => {
                if self.equip_weapon().is_none() {
                    debug!("equip rejected: no session running");
                }
            }
            RangeCommand::UnequipWeapon { weapon_id } => {
                if !self.unequip_weapon(weapon_id) {
                    debug!(weapon = %weapon_id, "unequip of unknown weapon");
                }
            }
            RangeCommand::ReportImpact {
                projectile_id,
                target_id,
            } => match self.report_impact(projectile_id, target_id) {
                Ok(ImpactOutcome::AlreadyResolved) => {
                    debug!(projectile = %projectile_id, "impact on resolved projectile");
                }
                Ok(ImpactOutcome::Resolved(_)) => {}
                Err(err) => warn!(%err, "impact rejected"),
            },
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Weapon cooldown/reload timers
        systems::weapon::run(&mut self.world, dt, &mut self.events);
        // 2. Projectile kinematics + lifetime
        systems::movement::run(&mut self.world, dt);
        systems::projectile::run(&mut self.world, dt, &mut self.events);
        // 3. Target forced lifetime
        systems::target::run(&mut self.world, dt, &mut self.score, &mut self.events);
        // 4. Cleanup (resolved projectiles, destroyed/expired targets)
        systems::cleanup::run(
            &mut self.world,
            &mut self.session,
            &mut self.projectiles,
            &mut self.despawn_buffer,
        );
        // 5. Session clock + spawn schedule
        let step = systems::spawner::run(
            &mut self.world,
            &mut self.session,
            &self.config,
            &mut self.rng,
            &mut self.ids,
            dt,
            &mut self.events,
        );
        if step == SessionStep::Expired {
            self.reset_session();
        }
    }
}
