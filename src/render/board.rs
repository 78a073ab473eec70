//! Presentation-side model of the game.
//!
//! The board is the only owner of visuals. It follows the engine's
//! notifications and keeps one [`SegmentVisual`] per live [`SegmentId`].

use std::collections::HashMap;

use crate::game::{
    CollisionType, Direction, GameEvent, Position, Presenter, SegmentId, SegmentSprite,
};

/// How many moves the apple cue stays on screen
const CUE_MOVES: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentVisual {
    pub position: Position,
    pub direction: Direction,
    pub sprite: SegmentSprite,
}

/// Sound-effect stand-ins shown in the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Ding,
    Oof(CollisionType),
    Won,
}

impl Cue {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Cue::Ding)
    }
}

/// What to draw in one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellGlyph {
    Empty,
    Apple,
    Head { angle: u16 },
    Segment(SegmentVisual),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    grid_length: usize,
    segments: HashMap<SegmentId, SegmentVisual>,
    head: Option<(Position, u16)>,
    apple: Option<Position>,
    score: u32,
    cue: Option<Cue>,
    moves_since_cue: u32,
}

impl Board {
    pub fn new(grid_length: usize) -> Self {
        Self {
            grid_length,
            segments: HashMap::new(),
            head: None,
            apple: None,
            score: 0,
            cue: None,
            moves_since_cue: 0,
        }
    }

    pub fn grid_length(&self) -> usize {
        self.grid_length
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn segment(&self, id: SegmentId) -> Option<&SegmentVisual> {
        self.segments.get(&id)
    }

    pub fn head(&self) -> Option<(Position, u16)> {
        self.head
    }

    pub fn apple(&self) -> Option<Position> {
        self.apple
    }

    /// The cue to show right now; the apple cue fades after a few moves
    pub fn cue(&self) -> Option<Cue> {
        match self.cue {
            Some(Cue::Ding) if self.moves_since_cue > CUE_MOVES => None,
            cue => cue,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.cue.is_some_and(|cue| cue.is_terminal())
    }

    /// Row-major cells, `rows[y][x]`
    pub fn cells(&self) -> Vec<Vec<CellGlyph>> {
        let mut rows = vec![vec![CellGlyph::Empty; self.grid_length]; self.grid_length];

        let mut put = |pos: Position, glyph: CellGlyph| {
            if pos.is_within(self.grid_length) {
                rows[pos.y as usize][pos.x as usize] = glyph;
            }
        };

        if let Some(apple) = self.apple {
            put(apple, CellGlyph::Apple);
        }
        for visual in self.segments.values() {
            put(visual.position, CellGlyph::Segment(*visual));
        }
        if let Some((position, angle)) = self.head {
            put(position, CellGlyph::Head { angle });
        }

        rows
    }
}

impl Presenter for Board {
    fn present(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::SegmentPlaced {
                id,
                position,
                direction,
                sprite,
            } => {
                // Replaces the old visual when the tail is re-skinned
                self.segments.insert(
                    id,
                    SegmentVisual {
                        position,
                        direction,
                        sprite,
                    },
                );
            }
            GameEvent::SegmentRemoved { id } => {
                self.segments.remove(&id);
            }
            GameEvent::HeadMoved { position, angle } => {
                self.head = Some((position, angle));
                self.moves_since_cue = self.moves_since_cue.saturating_add(1);
            }
            GameEvent::ApplePlaced { position } => self.apple = Some(position),
            GameEvent::AppleRemoved => self.apple = None,
            GameEvent::AppleEaten { score } => {
                self.score = score;
                self.cue = Some(Cue::Ding);
                self.moves_since_cue = 0;
            }
            GameEvent::GameOver { collision } => self.cue = Some(Cue::Oof(collision)),
            GameEvent::Won => self.cue = Some(Cue::Won),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine};

    fn board_for(engine: &mut GameEngine) -> Board {
        let mut board = Board::new(engine.config().grid_length);
        engine.present_to(&mut board);
        board
    }

    fn assert_mirrors(board: &Board, engine: &GameEngine) {
        let state = engine.state();
        assert_eq!(board.segment_count(), state.body.len());
        for segment in &state.body {
            let visual = board.segment(segment.id).expect("visual for live segment");
            assert_eq!(visual.position, segment.position);
        }
        assert_eq!(board.head().map(|(pos, _)| pos), Some(state.head.position));
        assert_eq!(board.apple(), state.apple);
    }

    #[test]
    fn test_initial_board() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        let board = board_for(&mut engine);

        assert_mirrors(&board, &engine);
        let cells = board.cells();
        assert_eq!(cells[2][2], CellGlyph::Head { angle: 0 });
        assert_eq!(cells[10][10], CellGlyph::Apple);
        assert!(matches!(
            cells[2][0],
            CellGlyph::Segment(SegmentVisual {
                sprite: SegmentSprite::Tail { angle: 0 },
                ..
            })
        ));
        assert_eq!(cells[0][0], CellGlyph::Empty);
    }

    #[test]
    fn test_board_follows_engine() {
        let config = GameConfig {
            initial_apple: Some(Position::new(4, 2)),
            ..Default::default()
        };
        let mut engine = GameEngine::with_seed(config, 5);
        let mut board = board_for(&mut engine);

        let turns = [
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Down,
            Direction::Left,
            Direction::Down,
        ];
        for direction in turns {
            engine.submit_direction(direction);
            engine.step();
            engine.present_to(&mut board);
            assert_mirrors(&board, &engine);
        }

        assert_eq!(board.score(), engine.state().score);
        assert!(board.score() >= 1);
        assert!(!board.is_finished());
    }

    #[test]
    fn test_tail_reskin_replaces_visual() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        let mut board = board_for(&mut engine);

        engine.step();
        engine.present_to(&mut board);

        assert!(board.segment(SegmentId(0)).is_none());
        assert_eq!(
            board.segment(SegmentId(1)).map(|visual| visual.sprite),
            Some(SegmentSprite::Tail { angle: 0 })
        );
    }

    #[test]
    fn test_apple_cue_fades() {
        let mut board = Board::new(12);
        assert_eq!(board.cue(), None);

        board.present(&GameEvent::AppleEaten { score: 1 });
        board.present(&GameEvent::HeadMoved {
            position: Position::new(3, 2),
            angle: 0,
        });
        assert_eq!(board.cue(), Some(Cue::Ding));
        assert_eq!(board.score(), 1);
        assert!(!board.is_finished());

        for x in 4..4 + CUE_MOVES as i32 {
            board.present(&GameEvent::HeadMoved {
                position: Position::new(x, 2),
                angle: 0,
            });
        }
        assert_eq!(board.cue(), None);
    }

    #[test]
    fn test_game_over_cue_sticks() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        let mut board = board_for(&mut engine);

        while engine.state().is_running() {
            engine.step();
        }
        engine.present_to(&mut board);

        assert!(matches!(board.cue(), Some(Cue::Oof(CollisionType::Wall))));
        assert!(board.is_finished());
        assert_mirrors(&board, &engine);
    }
}
