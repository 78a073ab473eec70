use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use log::{debug, info};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};
use tokio::time::{interval, MissedTickBehavior};

use crate::game::{GameConfig, GameEngine, GamePhase};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Board, Renderer};

/// Frame cadence; the engine's own move budget decides when the snake moves
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Keyboard play in the terminal.
///
/// Owns the engine for the current game and the board that mirrors it.
/// Restarting throws both away and builds fresh ones.
pub struct PlayMode {
    config: GameConfig,
    seed: Option<u64>,
    games_started: u64,
    engine: GameEngine,
    board: Board,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl PlayMode {
    /// `seed` makes apple placement reproducible; each restart derives the next seed from it
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let (engine, board) = new_game(&config, seed);

        Self {
            config,
            seed,
            games_started: 1,
            engine,
            board,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(
            "starting {}x{} game, move interval {}ms",
            self.config.grid_length, self.config.grid_length, self.config.move_interval_ms
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            "quit after {} games, high score {}",
            self.metrics.games_played, self.metrics.high_score
        );
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut frame_timer = interval(FRAME_INTERVAL);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Advance the game clock and draw
                _ = frame_timer.tick() => {
                    let now = Instant::now();
                    self.advance(now - last_frame);
                    last_frame = now;

                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.board, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(code) => {
                    if let Some(direction) = self.config.direction_for_key(code) {
                        if !self.engine.submit_key(code) {
                            debug!("turn {:?} rejected", direction);
                        }
                    }
                }
                KeyAction::Restart => self.reset_game(),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    /// Feed elapsed wall-clock time to the engine and mirror what changed
    fn advance(&mut self, elapsed: Duration) {
        let result = self.engine.tick(elapsed);
        self.engine.present_to(&mut self.board);

        if let Some(result) = result {
            if result.terminated {
                let state = self.engine.state();
                self.metrics
                    .on_game_end(state.score, state.phase == GamePhase::Won);
            }
        }
    }

    fn reset_game(&mut self) {
        let seed = self
            .seed
            .map(|seed| seed.wrapping_add(self.games_started));
        let (engine, board) = new_game(&self.config, seed);
        self.engine = engine;
        self.board = board;
        self.games_started += 1;
        self.metrics.on_game_start();
        info!("restarted, game {}", self.games_started);
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

fn new_game(config: &GameConfig, seed: Option<u64>) -> (GameEngine, Board) {
    let mut engine = match seed {
        Some(seed) => GameEngine::with_seed(config.clone(), seed),
        None => GameEngine::new(config.clone()),
    };
    let mut board = Board::new(config.grid_length);
    engine.present_to(&mut board);
    (engine, board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Position};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = PlayMode::new(GameConfig::default(), Some(1));
        assert!(mode.engine.state().is_running());
        assert_eq!(mode.engine.state().score, 0);
        assert_eq!(mode.board.segment_count(), 2);
        assert_eq!(mode.board.head(), Some((Position::new(2, 2), 0)));
    }

    #[test]
    fn test_steering_waits_for_move() {
        let mut mode = PlayMode::new(GameConfig::default(), Some(1));

        mode.handle_event(key(KeyCode::Char('s')));
        assert_eq!(mode.engine.state().input_direction, Direction::Down);
        assert_eq!(mode.engine.state().direction, Direction::Right);

        mode.advance(Duration::from_millis(40));
        assert_eq!(mode.engine.state().steps, 0);

        mode.advance(Duration::from_millis(60));
        assert_eq!(mode.engine.state().head.position, Position::new(2, 3));
        assert_eq!(mode.board.head(), Some((Position::new(2, 3), 90)));
    }

    #[test]
    fn test_unmapped_and_reversing_keys_leave_input_alone() {
        let mut mode = PlayMode::new(GameConfig::default(), Some(1));

        mode.handle_event(key(KeyCode::Char('x')));
        mode.handle_event(key(KeyCode::Char('7')));
        assert_eq!(mode.engine.state().input_direction, Direction::Right);

        // Moving right, so left would reverse onto the neck
        mode.handle_event(key(KeyCode::Char('a')));
        assert_eq!(mode.engine.state().input_direction, Direction::Right);
    }

    #[test]
    fn test_game_end_is_recorded() {
        let config = GameConfig {
            start_position: Position::new(11, 5),
            ..Default::default()
        };
        let mut mode = PlayMode::new(config, Some(1));

        mode.advance(Duration::from_millis(95));
        assert_eq!(mode.engine.phase(), GamePhase::GameOver);
        assert!(mode.board.is_finished());
        assert_eq!(mode.metrics.games_played, 1);

        // Frozen: further frames change nothing
        mode.advance(Duration::from_millis(500));
        assert_eq!(mode.metrics.games_played, 1);
    }

    #[test]
    fn test_game_reset() {
        let config = GameConfig {
            start_position: Position::new(11, 5),
            ..Default::default()
        };
        let mut mode = PlayMode::new(config, Some(1));
        mode.advance(Duration::from_millis(95));
        assert!(!mode.engine.state().is_running());

        mode.handle_event(key(KeyCode::Char('r')));
        assert!(mode.engine.state().is_running());
        assert_eq!(mode.engine.state().score, 0);
        assert!(!mode.board.is_finished());
        assert_eq!(mode.games_started, 2);
    }

    #[test]
    fn test_quit() {
        let mut mode = PlayMode::new(GameConfig::default(), None);
        mode.handle_event(key(KeyCode::Esc));
        assert!(mode.should_quit);
    }
}
