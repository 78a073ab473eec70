//! Notifications the engine emits for the presentation layer.
//!
//! The engine never holds visuals. It names each body segment with a
//! [`SegmentId`] and the presentation layer keeps whatever it draws keyed by
//! that id: created on `SegmentPlaced`, destroyed on `SegmentRemoved`.

use super::direction::Direction;
use super::state::{CollisionType, Position, SegmentId};

/// Artwork to use for a body segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentSprite {
    /// Straight piece; vertical when the segment's direction is vertical
    Straight,
    /// Bend, rotated clockwise by `angle` degrees
    Corner { angle: u16 },
    /// End of the snake, rotated clockwise by `angle` degrees
    Tail { angle: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Create the visual for a segment. An id that already has a visual is re-skinned.
    SegmentPlaced {
        id: SegmentId,
        position: Position,
        direction: Direction,
        sprite: SegmentSprite,
    },
    /// Destroy the visual for a segment
    SegmentRemoved { id: SegmentId },
    /// Reposition and re-orient the head
    HeadMoved { position: Position, angle: u16 },
    ApplePlaced { position: Position },
    AppleRemoved,
    /// Success cue
    AppleEaten { score: u32 },
    /// Failure cue
    GameOver { collision: CollisionType },
    /// The snake fills the board
    Won,
}

/// Receiver of engine notifications
pub trait Presenter {
    fn present(&mut self, event: &GameEvent);

    fn present_all<'a, I>(&mut self, events: I)
    where
        I: IntoIterator<Item = &'a GameEvent>,
    {
        for event in events {
            self.present(event);
        }
    }
}
