//! Core types and definitions for the shooting-range session engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! ids, components, commands, events, snapshots, configuration and errors.
//! It has no dependency on the ECS or any runtime driver.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
