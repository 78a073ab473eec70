use super::state::Position;

/// Square occupancy map of the board.
///
/// A cell is marked while a body segment sits on it. The head is not tracked
/// here; it is tested separately wherever it matters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    length: usize,
    cells: Vec<bool>,
}

impl Grid {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            cells: vec![false; length * length],
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.is_within(self.length)
    }

    /// True if a body segment occupies `pos`. Off-board positions are never occupied.
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.index(pos).is_some_and(|i| self.cells[i])
    }

    pub fn mark(&mut self, pos: Position) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = true;
        }
    }

    pub fn clear(&mut self, pos: Position) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = false;
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&occupied| occupied).count()
    }

    /// Unmarked cells other than `exclude`, column by column
    pub fn free_cells(&self, exclude: Position) -> Vec<Position> {
        self.positions()
            .filter(|pos| !self.is_occupied(*pos) && *pos != exclude)
            .collect()
    }

    fn positions(&self) -> impl Iterator<Item = Position> {
        let length = self.length as i32;
        (0..length).flat_map(move |x| (0..length).map(move |y| Position::new(x, y)))
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.y as usize * self.length + pos.x as usize)
        } else {
            None
        }
    }
}
