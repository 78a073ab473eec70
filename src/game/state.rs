use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use super::direction::Direction;
use super::grid::Grid;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.shift();
        self.moved_by(dx, dy)
    }

    /// True if the position lies on a square board of side `length`
    pub fn is_within(&self, length: usize) -> bool {
        let length = length as i32;
        (0..length).contains(&self.x) && (0..length).contains(&self.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Stable identity of a body segment, used by the presentation layer to key its visuals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(pub u64);

/// One cell of the snake's body, excluding the head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub id: SegmentId,
    pub position: Position,
    /// Direction the snake was moving when this segment was laid down
    pub direction: Direction,
}

/// The snake's leading cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Head {
    pub position: Position,
    pub facing: Direction,
}

/// Lifecycle of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    GameOver,
    /// The snake covers every cell; no apple can be placed
    Won,
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid: Grid,
    pub head: Head,
    /// Body segments, tail at the front, neck at the back
    pub body: VecDeque<Segment>,
    /// None once the board is full
    pub apple: Option<Position>,
    /// Direction applied by the most recent move
    pub direction: Direction,
    /// Most recent accepted input, applied on the next move
    pub input_direction: Direction,
    pub phase: GamePhase,
    pub score: u32,
    pub steps: u32,
}

impl GameState {
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn tail(&self) -> Option<&Segment> {
        self.body.front()
    }

    pub fn neck(&self) -> Option<&Segment> {
        self.body.back()
    }

    /// Check if a position is covered by the snake, head included
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        pos == self.head.position || self.grid.is_occupied(pos)
    }

    /// True if the grid marks exactly the body cells and nothing else
    pub fn occupancy_matches_body(&self) -> bool {
        self.grid.occupied_count() == self.body.len()
            && self
                .body
                .iter()
                .all(|segment| self.grid.is_occupied(segment.position))
            && !self.grid.is_occupied(self.head.position)
    }
}
