//! Shooting range driver.
//!
//! Wires the session engine to its adapters: TOML settings, a real-time game
//! loop fed over a command channel, a JSON-lines stdin/stdout bridge and a
//! headless autoplay mode.

pub mod autoplay;
pub mod game_loop;
pub mod input;
pub mod jsonl;
pub mod settings;
pub mod state;

pub use range_core as core;
