use serde::{Deserialize, Serialize};

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns true if `self` and `other` cancel each other out
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Returns the direction that cancels this one
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the delta (dx, dy) for one move in this direction.
    /// The y axis grows downward.
    pub fn shift(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Rotation, in clockwise degrees, of head and tail artwork facing this way
    pub fn facing_angle(&self) -> u16 {
        match self {
            Direction::Right => 0,
            Direction::Down => 90,
            Direction::Left => 180,
            Direction::Up => 270,
        }
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// Returns true if the two directions cancel each other out
pub fn are_opposite(a: Direction, b: Direction) -> bool {
    a.is_opposite(b)
}

/// Clockwise rotation of the corner artwork for a bend from `from` to `to`.
///
/// The unrotated corner joins the left and bottom edges of a cell, which is
/// the bend for Right -> Down and Up -> Left. Pairs that are not a bend
/// (same direction, or opposites) also map to 0.
pub fn turn_angle(from: Direction, to: Direction) -> u16 {
    use Direction::*;

    match (from, to) {
        (Down, Left) | (Right, Up) => 90,
        (Left, Up) | (Down, Right) => 180,
        (Up, Right) | (Left, Down) => 270,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        for direction in Direction::ALL {
            assert!(are_opposite(direction, direction.opposite()));
            assert!(!are_opposite(direction, direction));
        }

        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
    }

    #[test]
    fn test_direction_shift() {
        assert_eq!(Direction::Up.shift(), (0, -1));
        assert_eq!(Direction::Down.shift(), (0, 1));
        assert_eq!(Direction::Left.shift(), (-1, 0));
        assert_eq!(Direction::Right.shift(), (1, 0));

        for direction in Direction::ALL {
            let (dx, dy) = direction.shift();
            assert_eq!(dx.abs() + dy.abs(), 1);

            let (ox, oy) = direction.opposite().shift();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn test_turn_angles() {
        assert_eq!(turn_angle(Direction::Down, Direction::Left), 90);
        assert_eq!(turn_angle(Direction::Right, Direction::Up), 90);
        assert_eq!(turn_angle(Direction::Left, Direction::Up), 180);
        assert_eq!(turn_angle(Direction::Down, Direction::Right), 180);
        assert_eq!(turn_angle(Direction::Up, Direction::Right), 270);
        assert_eq!(turn_angle(Direction::Left, Direction::Down), 270);
        assert_eq!(turn_angle(Direction::Right, Direction::Down), 0);
        assert_eq!(turn_angle(Direction::Up, Direction::Left), 0);
    }

    #[test]
    fn test_turn_angle_non_bends() {
        for direction in Direction::ALL {
            assert_eq!(turn_angle(direction, direction), 0);
            assert_eq!(turn_angle(direction, direction.opposite()), 0);
        }
    }

    #[test]
    fn test_facing_angle() {
        assert_eq!(Direction::Right.facing_angle(), 0);
        assert_eq!(Direction::Down.facing_angle(), 90);
        assert_eq!(Direction::Left.facing_angle(), 180);
        assert_eq!(Direction::Up.facing_angle(), 270);
    }
}
