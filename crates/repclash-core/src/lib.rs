//! Core types and definitions for the repclash battle engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! the battle snapshot model, enums, change/cue events, the effect
//! catalog, presentation views, and tuning constants. It has no engine
//! logic and no dependency on any runtime framework.

pub mod battle;
pub mod catalog;
pub mod constants;
pub mod enums;
pub mod events;
pub mod types;
pub mod views;
