//! Session engine for the shooting range.
//!
//! Owns the hecs ECS world, runs systems once per externally driven tick,
//! and produces `RangeSnapshot`s for the presentation layer.

pub mod engine;
pub mod score;
pub mod session;
pub mod systems;
pub mod world_setup;

pub use engine::{RangeEngine, SimConfig};
pub use range_core as core;
