//! Simulation constants and default tuning parameters.

/// Default driver tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick at the default tick rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Weapon ---

/// Magazine capacity.
pub const DEFAULT_AMMO_MAX: u32 = 10;

/// Minimum time between two shots (seconds).
pub const DEFAULT_COOLDOWN_SECS: f64 = 0.3;

/// Time to refill the magazine (seconds).
pub const DEFAULT_RELOAD_SECS: f64 = 1.5;

/// Muzzle speed applied along the aim direction (m/s).
pub const DEFAULT_MUZZLE_SPEED: f64 = 20.0;

/// Weapons placed at session start, one per weapon slot.
pub const DEFAULT_WEAPON_SLOT_COUNT: usize = 1;

// --- Projectile ---

/// Damage delivered by a single projectile impact.
pub const DEFAULT_PROJECTILE_DAMAGE: f64 = 25.0;

/// Seconds before an unresolved projectile expires.
pub const DEFAULT_PROJECTILE_LIFETIME_SECS: f64 = 5.0;

// --- Targets ---

pub const DEFAULT_TARGET_MAX_HEALTH: f64 = 100.0;

/// Points awarded for destroying a target.
pub const DEFAULT_TARGET_SCORE_VALUE: i64 = 10;

/// Seconds a spawned target stays up before it is removed without score.
pub const DEFAULT_TARGET_LIFETIME_SECS: f64 = 5.0;

// --- Session ---

/// Length of one session (seconds).
pub const DEFAULT_SESSION_DURATION_SECS: f64 = 60.0;

/// Time between target spawns (seconds).
pub const DEFAULT_SPAWN_INTERVAL_SECS: f64 = 3.0;

/// Number of spawn slots targets are placed at.
pub const DEFAULT_SPAWN_SLOT_COUNT: usize = 4;

/// Upper bound on spawns processed in a single tick; any further backlog
/// in the accumulator is dropped.
pub const MAX_SPAWNS_PER_TICK: u32 = 64;

/// Countdowns within this many seconds of zero count as elapsed.
pub const TIMER_EPSILON: f64 = 1e-9;
