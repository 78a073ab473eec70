use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use super::direction::Direction;
use super::state::Position;

/// Raw key code as delivered by the presentation layer
pub type KeyCode = u32;

/// Largest board the terminal front end can lay out
pub const MAX_GRID_LENGTH: usize = 64;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square game grid
    pub grid_length: usize,
    /// Time budget consumed by one move of the snake
    pub move_interval_ms: u64,
    /// Cell the head starts on
    pub start_position: Position,
    /// Direction the snake is moving when the game starts
    pub initial_direction: Direction,
    /// Number of body segments laid behind the head at start (head excluded)
    pub initial_body_length: usize,
    /// Cell of the first apple; defaults to one cell in from the far corner
    pub initial_apple: Option<Position>,
    /// Key code to direction table
    pub key_map: BTreeMap<KeyCode, Direction>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_length: 12,
            move_interval_ms: 95,
            start_position: Position::new(2, 2),
            initial_direction: Direction::Right,
            initial_body_length: 2,
            initial_apple: None,
            key_map: default_key_map(),
        }
    }
}

/// W/A/S/D plus the arrow keys
pub fn default_key_map() -> BTreeMap<KeyCode, Direction> {
    BTreeMap::from([
        (87, Direction::Up),
        (65, Direction::Left),
        (83, Direction::Down),
        (68, Direction::Right),
        (38, Direction::Up),
        (37, Direction::Left),
        (40, Direction::Down),
        (39, Direction::Right),
    ])
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(grid_length: usize) -> Self {
        Self {
            grid_length,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(6)
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .validate()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn move_interval(&self) -> Duration {
        Duration::from_millis(self.move_interval_ms)
    }

    /// Position of the first apple
    pub fn apple_position(&self) -> Position {
        self.initial_apple.unwrap_or_else(|| {
            let far = self.grid_length as i32 - 2;
            Position::new(far, far)
        })
    }

    /// Body cells laid behind the head at start, tail first.
    ///
    /// Never longer than [`MAX_GRID_LENGTH`]; a longer body cannot fit any grid.
    pub fn initial_body(&self) -> Vec<Position> {
        let (dx, dy) = self.initial_direction.shift();
        let length = self.initial_body_length.min(MAX_GRID_LENGTH) as i32;
        (1..=length)
            .rev()
            .map(|i| self.start_position.moved_by(-dx * i, -dy * i))
            .collect()
    }

    pub fn direction_for_key(&self, key: KeyCode) -> Option<Direction> {
        self.key_map.get(&key).copied()
    }

    /// Validate configuration parameters
    ///
    /// Returns `Err(String)` describing the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if !(2..=MAX_GRID_LENGTH).contains(&self.grid_length) {
            return Err(format!(
                "grid_length must be in [2, {}], got {}",
                MAX_GRID_LENGTH, self.grid_length
            ));
        }

        if self.move_interval_ms == 0 {
            return Err("move_interval_ms must be at least 1".to_string());
        }

        let on_board = |pos: Position| pos.is_within(self.grid_length);

        if !on_board(self.start_position) {
            return Err(format!(
                "start_position {} is outside a {}x{} grid",
                self.start_position, self.grid_length, self.grid_length
            ));
        }

        if self.initial_body_length == 0 {
            return Err("initial_body_length must be at least 1".to_string());
        }
        if self.initial_body_length >= self.grid_length {
            return Err(format!(
                "initial_body_length must be less than grid_length ({}), got {}",
                self.grid_length, self.initial_body_length
            ));
        }

        let body = self.initial_body();
        if let Some(pos) = body.iter().find(|pos| !on_board(**pos)) {
            return Err(format!(
                "initial body cell {} is outside the grid; move start_position or shorten the body",
                pos
            ));
        }

        let apple = self.apple_position();
        if !on_board(apple) {
            return Err(format!("initial apple {} is outside the grid", apple));
        }
        if apple == self.start_position || body.contains(&apple) {
            return Err(format!("initial apple {} is on the snake", apple));
        }

        if self.key_map.is_empty() {
            return Err("key_map must bind at least one key".to_string());
        }

        Ok(())
    }
}
