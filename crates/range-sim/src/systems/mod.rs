//! ECS systems that operate on the range world each tick.
//!
//! Systems are functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components, the session
//! registry and the scoreboard, which are passed in explicitly.

pub mod cleanup;
pub mod movement;
pub mod projectile;
pub mod snapshot;
pub mod spawner;
pub mod target;
pub mod weapon;

use range_core::constants::TIMER_EPSILON;

/// Decrement a countdown by `dt`, clamped at zero.
pub(crate) fn countdown(remaining: f64, dt: f64) -> f64 {
    let next = remaining - dt;
    if next <= TIMER_EPSILON {
        0.0
    } else {
        next
    }
}
