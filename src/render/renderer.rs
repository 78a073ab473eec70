use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::board::{Board, CellGlyph, Cue, SegmentVisual};
use crate::game::{CollisionType, SegmentSprite};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, board: &Board, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(board, metrics), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if board.is_finished() {
            frame.render_widget(self.render_game_over(board), game_area);
        } else {
            frame.render_widget(self.render_grid(board), game_area);
        }

        frame.render_widget(self.render_controls(board), chunks[2]);
    }

    fn render_grid(&self, board: &Board) -> Paragraph<'static> {
        let lines: Vec<Line> = board
            .cells()
            .into_iter()
            .map(|row| Line::from(row.into_iter().map(cell_span).collect::<Vec<_>>()))
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, board: &Board, metrics: &GameMetrics) -> Paragraph<'static> {
        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                board.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Wins: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}/{}", metrics.games_won, metrics.games_played),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ];

        if let Some(Cue::Ding) = board.cue() {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                "ding!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_game_over(&self, board: &Board) -> Paragraph<'static> {
        let (title, reason, color) = match board.cue() {
            Some(Cue::Won) => ("YOU WIN", "The snake fills the board", Color::Green),
            Some(Cue::Oof(CollisionType::Wall)) => ("GAME OVER", "Oof! Hit the wall", Color::Red),
            _ => ("GAME OVER", "Oof! Bit your own tail", Color::Red),
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    board.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self, board: &Board) -> Paragraph<'static> {
        let size = board.grid_length();
        let text = vec![Line::from(vec![
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(format!(" to quit | {}x{}", size, size)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_span(glyph: CellGlyph) -> Span<'static> {
    match glyph {
        CellGlyph::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        CellGlyph::Apple => Span::styled(
            "● ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        CellGlyph::Head { angle } => Span::styled(
            head_text(angle),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        CellGlyph::Segment(visual) => {
            Span::styled(segment_text(&visual), Style::default().fg(Color::Green))
        }
    }
}

/// Two columns per cell; the second column joins the cell to its right neighbour
fn head_text(angle: u16) -> &'static str {
    match angle {
        90 => "▼ ",
        180 => "◀ ",
        270 => "▲ ",
        _ => "▶ ",
    }
}

fn segment_text(visual: &SegmentVisual) -> &'static str {
    match visual.sprite {
        SegmentSprite::Straight if visual.direction.is_vertical() => "║ ",
        SegmentSprite::Straight => "══",
        // Unrotated corner joins left and bottom
        SegmentSprite::Corner { angle: 90 } => "╝ ",
        SegmentSprite::Corner { angle: 180 } => "╚═",
        SegmentSprite::Corner { angle: 270 } => "╔═",
        SegmentSprite::Corner { .. } => "╗ ",
        // Unrotated tail points right, into the body
        SegmentSprite::Tail { angle: 90 } => "╻ ",
        SegmentSprite::Tail { angle: 180 } => "╸ ",
        SegmentSprite::Tail { angle: 270 } => "╹ ",
        SegmentSprite::Tail { .. } => "╺═",
    }
}
