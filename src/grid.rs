use itertools::{Itertools, Position};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::direction::Direction;

const TEXT_INSIDE_SPACING: &str = "   ";

/// Zero-indexed grid coordinate, `row` 0 at the top.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The cell `steps` moves away along `dir`, or `None` past the top or left edge.
    pub fn step(self, dir: Direction, steps: usize) -> Option<Self> {
        let (dy, dx) = dir.delta();
        let steps = isize::try_from(steps).ok()?;
        Some(Self {
            row: self.row.checked_add_signed(dy.checked_mul(steps)?)?,
            col: self.col.checked_add_signed(dx.checked_mul(steps)?)?,
        })
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(row {}, col {})", self.row + 1, self.col + 1)
    }
}

/// A used square of the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub letter: char,
    /// Clue number, on crossword cells that start a word.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    /// Set when a hint gave the letter away.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub revealed: bool,
    /// Result of the last explicit verification of this cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
}

impl GridCell {
    pub fn new(letter: char) -> Self {
        Self {
            letter,
            number: None,
            revealed: false,
            correct: None,
        }
    }
}

/// Inclusive extent of the used cells of a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl BoundingBox {
    pub fn of(cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        cells.into_iter().fold(None, |bbox, cell| {
            Some(match bbox {
                None => Self {
                    min_row: cell.row,
                    max_row: cell.row,
                    min_col: cell.col,
                    max_col: cell.col,
                },
                Some(b) => Self {
                    min_row: b.min_row.min(cell.row),
                    max_row: b.max_row.max(cell.row),
                    min_col: b.min_col.min(cell.col),
                    max_col: b.max_col.max(cell.col),
                },
            })
        })
    }

    pub fn width(&self) -> usize {
        self.max_col - self.min_col + 1
    }

    pub fn height(&self) -> usize {
        self.max_row - self.min_row + 1
    }
}

/// A rectangle of cells, each either unused (`None`) or holding a letter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Vec<Option<GridCell>>>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![None; width]; height],
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    pub fn get(&self, cell: Cell) -> Option<&GridCell> {
        self.cells
            .get(cell.row)
            .and_then(|row| row.get(cell.col))
            .and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, cell: Cell) -> Option<&mut GridCell> {
        self.cells
            .get_mut(cell.row)
            .and_then(|row| row.get_mut(cell.col))
            .and_then(Option::as_mut)
    }

    pub fn letter(&self, cell: Cell) -> Option<char> {
        self.get(cell).map(|grid_cell| grid_cell.letter)
    }

    /// Writes `letter` into `cell`, keeping any number already there.
    /// Returns `false` when the cell is out of bounds.
    pub fn set_letter(&mut self, cell: Cell, letter: char) -> bool {
        match self
            .cells
            .get_mut(cell.row)
            .and_then(|row| row.get_mut(cell.col))
        {
            Some(Some(grid_cell)) => {
                grid_cell.letter = letter;
                true
            }
            Some(slot) => {
                *slot = Some(GridCell::new(letter));
                true
            }
            None => false,
        }
    }

    /// Used cells in row-major order.
    pub fn used_cells(&self) -> impl Iterator<Item = (Cell, &GridCell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, grid_cell)| Some((Cell::new(row, col), grid_cell.as_ref()?)))
        })
    }

    pub fn used_cell_count(&self) -> usize {
        self.used_cells().count()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::of(self.used_cells().map(|(cell, _)| cell))
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height && self.cells.len() == self.height
    }

    /// Letters along `cells`, `None` if any is unused.
    pub fn letters_along(&self, cells: &[Cell]) -> Option<String> {
        cells.iter().map(|&cell| self.letter(cell)).collect()
    }
}

struct RowDisplay<'a>(&'a [Option<GridCell>]);

impl std::fmt::Display for RowDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (position, space) in self.0.iter().with_position() {
            if matches!(position, Position::Middle | Position::Last) {
                f.write_str(TEXT_INSIDE_SPACING)?;
            }
            match space {
                Some(grid_cell) => f.write_char(grid_cell.letter)?,
                None => f.write_char('-')?,
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (position, row) in self.cells.iter().with_position() {
            if matches!(position, Position::Middle | Position::Last) {
                writeln!(f)?;
            }
            writeln!(f, "{}", RowDisplay(row))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn step_stops_at_top_and_left_edges() {
        let origin = Cell::new(0, 0);
        assert_eq!(origin.step(Direction::Up, 1), None);
        assert_eq!(origin.step(Direction::Left, 1), None);
        assert_eq!(origin.step(Direction::DownRight, 3), Some(Cell::new(3, 3)));
        assert_eq!(Cell::new(4, 4).step(Direction::UpLeft, 4), Some(origin));
    }

    #[test]
    fn set_letter_respects_bounds() {
        let mut grid = Grid::new(3, 2);
        assert!(grid.set_letter(Cell::new(1, 2), 'A'));
        assert!(!grid.set_letter(Cell::new(2, 0), 'B'));
        assert_eq!(grid.letter(Cell::new(1, 2)), Some('A'));
        assert_eq!(grid.used_cell_count(), 1);
    }

    #[test]
    fn bounding_box_covers_used_cells() {
        let mut grid = Grid::new(6, 6);
        grid.set_letter(Cell::new(1, 4), 'A');
        grid.set_letter(Cell::new(3, 2), 'B');
        let bbox = grid.bounding_box().unwrap();
        assert_eq!((bbox.min_row, bbox.max_row), (1, 3));
        assert_eq!((bbox.min_col, bbox.max_col), (2, 4));
        assert_eq!((bbox.width(), bbox.height()), (3, 3));
        assert_eq!(Grid::new(4, 4).bounding_box(), None);
    }

    #[test]
    fn renders_rows_with_spacing() {
        let mut grid = Grid::new(3, 2);
        grid.set_letter(Cell::new(0, 0), 'S');
        grid.set_letter(Cell::new(0, 1), 'O');
        grid.set_letter(Cell::new(0, 2), 'L');
        grid.set_letter(Cell::new(1, 1), 'Ñ');
        let expected = indoc! {"
            S   O   L

            -   Ñ   -
        "};
        assert_eq!(grid.to_string(), expected);
    }
}
