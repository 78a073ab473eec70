use super::{
    config::{GameConfig, KeyCode},
    direction::{turn_angle, Direction},
    events::{GameEvent, Presenter, SegmentSprite},
    grid::Grid,
    state::{CollisionType, GamePhase, GameState, Head, Position, Segment, SegmentId},
};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::time::Duration;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate the apple this step
    pub ate_apple: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the head moved this step
    pub moved: bool,
    /// Whether the game has ended, lost or won
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine: owns the state of one game and every rule that mutates it.
///
/// A new game is a new engine. Notifications for the presentation layer are
/// queued as [`GameEvent`]s and drained with [`GameEngine::drain_events`].
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    rng: StdRng,
    /// Remaining time before the next move, in microseconds; may go negative
    move_budget_us: i64,
    next_segment_id: u64,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// Start a new game. `config` is expected to have passed [`GameConfig::validate`].
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Start a new game whose apple placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let direction = config.initial_direction;
        let state = GameState {
            grid: Grid::new(config.grid_length),
            head: Head {
                position: config.start_position,
                facing: direction,
            },
            body: VecDeque::new(),
            apple: Some(config.apple_position()),
            direction,
            input_direction: direction,
            phase: GamePhase::Running,
            score: 0,
            steps: 0,
        };

        let mut engine = Self {
            move_budget_us: micros(config.move_interval()),
            config,
            state,
            rng,
            next_segment_id: 0,
            events: Vec::new(),
        };
        engine.lay_initial_snake();
        engine
    }

    fn lay_initial_snake(&mut self) {
        let direction = self.state.direction;

        if let Some(apple) = self.state.apple {
            self.events.push(GameEvent::ApplePlaced { position: apple });
        }

        for (i, position) in self.config.initial_body().into_iter().enumerate() {
            let sprite = if i == 0 {
                SegmentSprite::Tail {
                    angle: direction.facing_angle(),
                }
            } else {
                SegmentSprite::Straight
            };
            self.push_segment(position, direction, sprite);
        }

        self.emit_head();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Take every notification queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Deliver every queued notification to `presenter`
    pub fn present_to<P: Presenter>(&mut self, presenter: &mut P) {
        let events = self.drain_events();
        presenter.present_all(&events);
    }

    /// Translate a raw key through the key table and submit the direction.
    ///
    /// Returns true if the input was accepted.
    pub fn submit_key(&mut self, key: KeyCode) -> bool {
        match self.config.direction_for_key(key) {
            Some(direction) => self.submit_direction(direction),
            None => false,
        }
    }

    /// Buffer a direction change for the next move.
    ///
    /// Rejected once the game has ended, or when it would reverse the snake
    /// onto itself. A later accepted input before the next move replaces this one.
    pub fn submit_direction(&mut self, direction: Direction) -> bool {
        if !self.state.is_running() || direction.is_opposite(self.state.direction) {
            return false;
        }
        self.state.input_direction = direction;
        true
    }

    /// Advance the clock by `elapsed` and move once if the move budget runs out.
    ///
    /// Overshoot is carried into the next budget so the cadence does not
    /// depend on the frame rate. At most one move happens per call.
    pub fn tick(&mut self, elapsed: Duration) -> Option<StepResult> {
        if !self.state.is_running() {
            return None;
        }

        self.move_budget_us = self.move_budget_us.saturating_sub(micros(elapsed));
        if self.move_budget_us > 0 {
            return None;
        }
        self.move_budget_us = self
            .move_budget_us
            .saturating_add(micros(self.config.move_interval()));

        Some(self.step())
    }

    /// Execute one move of the snake, ignoring the clock
    pub fn step(&mut self) -> StepResult {
        if !self.state.is_running() {
            return StepResult {
                moved: false,
                terminated: true,
                info: StepInfo {
                    ate_apple: false,
                    collision_type: None,
                },
            };
        }

        self.state.direction = self.state.input_direction;
        let direction = self.state.direction;

        let old_head = self.state.head.position;
        let new_head = old_head.moved_in_direction(direction);

        if let Some(collision_type) = self.check_collision(new_head) {
            info!(
                "game over: {:?} moving {:?} from {} after {} steps, score {}",
                collision_type, direction, old_head, self.state.steps, self.state.score
            );
            self.state.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver {
                collision: collision_type,
            });

            return StepResult {
                moved: false,
                terminated: true,
                info: StepInfo {
                    ate_apple: false,
                    collision_type: Some(collision_type),
                },
            };
        }

        self.state.head = Head {
            position: new_head,
            facing: direction,
        };
        self.add_segment(old_head);

        let ate_apple = self.state.apple == Some(new_head);
        if ate_apple {
            self.state.score += 1;
            self.events.push(GameEvent::AppleEaten {
                score: self.state.score,
            });
            self.place_new_apple();
        } else {
            self.update_tail();
        }

        self.emit_head();
        self.state.steps += 1;

        StepResult {
            moved: true,
            terminated: !self.state.is_running(),
            info: StepInfo {
                ate_apple,
                collision_type: None,
            },
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !self.state.grid.contains(pos) {
            return Some(CollisionType::Wall);
        }

        // The tail has not moved yet, so its cell still counts
        if self.state.grid.is_occupied(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Lay a segment where the head just left, bent if the direction changed
    fn add_segment(&mut self, position: Position) {
        let direction = self.state.direction;
        let sprite = match self.state.neck() {
            Some(neck) if neck.direction != direction => SegmentSprite::Corner {
                angle: turn_angle(neck.direction, direction),
            },
            _ => SegmentSprite::Straight,
        };
        self.push_segment(position, direction, sprite);
    }

    fn push_segment(&mut self, position: Position, direction: Direction, sprite: SegmentSprite) {
        let id = SegmentId(self.next_segment_id);
        self.next_segment_id += 1;

        self.state.grid.mark(position);
        self.state.body.push_back(Segment {
            id,
            position,
            direction,
        });
        self.events.push(GameEvent::SegmentPlaced {
            id,
            position,
            direction,
            sprite,
        });
    }

    /// Drop the oldest segment and re-skin the one behind it as the tail
    fn update_tail(&mut self) {
        let Some(old_tail) = self.state.body.pop_front() else {
            return;
        };
        self.state.grid.clear(old_tail.position);
        self.events.push(GameEvent::SegmentRemoved { id: old_tail.id });

        if let Some(tail) = self.state.tail() {
            self.events.push(GameEvent::SegmentPlaced {
                id: tail.id,
                position: tail.position,
                direction: tail.direction,
                sprite: SegmentSprite::Tail {
                    angle: tail.direction.facing_angle(),
                },
            });
        }
    }

    /// Move the apple to a random free cell, or end the game if there is none
    fn place_new_apple(&mut self) {
        self.events.push(GameEvent::AppleRemoved);

        let free = self.state.grid.free_cells(self.state.head.position);
        match free.choose(&mut self.rng) {
            Some(&position) => {
                debug!("apple moved to {} ({} free cells)", position, free.len());
                self.state.apple = Some(position);
                self.events.push(GameEvent::ApplePlaced { position });
            }
            None => {
                info!("board filled with score {}", self.state.score);
                self.state.apple = None;
                self.state.phase = GamePhase::Won;
                self.events.push(GameEvent::Won);
            }
        }
    }

    fn emit_head(&mut self) {
        let head = self.state.head;
        self.events.push(GameEvent::HeadMoved {
            position: head.position,
            angle: head.facing.facing_angle(),
        });
    }
}

fn micros(duration: Duration) -> i64 {
    i64::try_from(duration.as_micros()).unwrap_or(i64::MAX)
}
