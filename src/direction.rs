use enum_iterator::{all, Sequence};
use serde::{Deserialize, Serialize};

/// One of the eight straight lines a word can run along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Sequence, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    UpLeft,
    Up,
    UpRight,
    Left,
    Right,
    DownLeft,
    Down,
    DownRight,
}

impl Direction {
    /// Number of directions a word search may use.
    pub const COUNT: usize = <Direction as Sequence>::CARDINALITY;

    /// The direction at `index` in declaration order, wrapping.
    pub fn nth(index: usize) -> Self {
        all::<Direction>()
            .nth(index % Self::COUNT)
            .unwrap_or(Direction::Right)
    }

    /// `(row, col)` step between consecutive letters.
    pub fn delta(self) -> (isize, isize) {
        self.into()
    }

    /// The direction whose unit step is `(drow, dcol)`, if any.
    pub fn from_delta(drow: isize, dcol: isize) -> Option<Self> {
        all::<Direction>().find(|dir| dir.delta() == (drow, dcol))
    }

    pub fn reversed(self) -> Self {
        let (dy, dx) = self.delta();
        Self::from_delta(-dy, -dx).unwrap_or(self)
    }

    /// The crossword axis this direction runs along, for `Right` and `Down` only.
    pub fn axis(self) -> Option<Axis> {
        match self {
            Direction::Right => Some(Axis::Across),
            Direction::Down => Some(Axis::Down),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl From<Direction> for (isize, isize) {
    fn from(value: Direction) -> Self {
        match value {
            Direction::UpLeft => (-1, -1),
            Direction::Up => (-1, 0),
            Direction::UpRight => (-1, 1),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::DownLeft => (1, -1),
            Direction::Down => (1, 0),
            Direction::DownRight => (1, 1),
        }
    }
}

/// Crossword words only run across or down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Across,
    Down,
}

impl Axis {
    pub fn perpendicular(self) -> Self {
        match self {
            Axis::Across => Axis::Down,
            Axis::Down => Axis::Across,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Axis::Across => Direction::Right,
            Axis::Down => Direction::Down,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Across => f.write_str("Across"),
            Axis::Down => f.write_str("Down"),
        }
    }
}
