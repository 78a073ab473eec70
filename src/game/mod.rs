//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The engine is driven by `tick` and `submit_key`/`submit_direction`, and reports
//! what changed through [`GameEvent`]s for whatever presentation layer sits on top.

pub mod config;
pub mod direction;
pub mod engine;
pub mod events;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use config::{GameConfig, KeyCode};
pub use direction::{are_opposite, turn_angle, Direction};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use events::{GameEvent, Presenter, SegmentSprite};
pub use grid::Grid;
pub use state::{CollisionType, GamePhase, GameState, Head, Position, Segment, SegmentId};
