pub mod board;
pub mod renderer;

pub use board::{Board, CellGlyph, Cue, SegmentVisual};
pub use renderer::Renderer;
