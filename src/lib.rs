//! Grid Snake - a single-screen snake game
//!
//! This library provides:
//! - Core game logic (game module): direction rules, grid occupancy, the tick-driven engine
//! - Terminal presentation (render and input modules)
//! - Session statistics (metrics module)
//! - The interactive play loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
