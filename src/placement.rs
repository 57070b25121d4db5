use serde::{Deserialize, Serialize};

use crate::{
    direction::{Axis, Direction},
    grid::{Cell, Grid},
};

/// Where a single word ended up in a grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", into = "PlacementRecord")]
pub struct Placement {
    pub id: usize,
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clue: Option<String>,
    pub direction: Direction,
    /// Crossword clue number; placements starting on the same cell share it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    pub cells: Vec<Cell>,
}

/// Serialized form of a [`Placement`]. Crossword words also carry their
/// `axis`, `"across"` or `"down"`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlacementRecord {
    id: usize,
    word: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    clue: Option<String>,
    direction: Direction,
    #[serde(skip_serializing_if = "Option::is_none")]
    axis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<u32>,
    cells: Vec<Cell>,
}

impl From<Placement> for PlacementRecord {
    fn from(placement: Placement) -> Self {
        Self {
            axis: placement.axis(),
            id: placement.id,
            word: placement.word,
            clue: placement.clue,
            direction: placement.direction,
            number: placement.number,
            cells: placement.cells,
        }
    }
}

impl Placement {
    /// Lays `word` out from `start` along `direction`, or `None` if it would
    /// leave the top or left edge.
    pub fn along(id: usize, word: &str, start: Cell, direction: Direction) -> Option<Self> {
        let cells = (0..word.chars().count())
            .map(|char_no| start.step(direction, char_no))
            .collect::<Option<Vec<_>>>()?;
        Some(Self {
            id,
            word: word.to_owned(),
            clue: None,
            direction,
            number: None,
            cells,
        })
    }

    pub fn start(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn axis(&self) -> Option<Axis> {
        self.direction.axis()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Offset of `cell` within this word.
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        self.cells.iter().position(|&c| c == cell)
    }

    /// The cells just before the first letter and just after the last one.
    /// A letter in either would extend the word.
    pub fn continuation_cells(&self) -> impl Iterator<Item = Cell> {
        [
            self.start()
                .and_then(|start| start.step(self.direction.reversed(), 1)),
            self.cells
                .last()
                .and_then(|end| end.step(self.direction, 1)),
        ]
        .into_iter()
        .flatten()
    }

    /// The expected letter at each covered cell.
    pub fn letters(&self) -> impl Iterator<Item = (Cell, char)> + '_ {
        self.cells.iter().copied().zip(self.word.chars())
    }

    /// Checks the placement invariants against `grid`: one cell per letter,
    /// consecutive cells one step apart along `direction`, all in bounds, and
    /// each grid letter equal to the word's letter.
    pub fn is_valid_in(&self, grid: &Grid) -> bool {
        let lengths_match = self.cells.len() == self.word.chars().count();
        let contiguous = self
            .cells
            .windows(2)
            .all(|pair| pair[0].step(self.direction, 1) == Some(pair[1]));
        let letters_match = self
            .letters()
            .all(|(cell, letter)| grid.contains(cell) && grid.letter(cell) == Some(letter));
        lengths_match && contiguous && letters_match
    }
}

/// True if every cell shared by two placements agrees on its letter.
pub fn overlaps_agree(placements: &[Placement]) -> bool {
    placements.iter().enumerate().all(|(i, a)| {
        placements[i + 1..].iter().all(|b| {
            a.letters()
                .all(|(cell, letter)| b.letters().all(|(other, l)| other != cell || l == letter))
        })
    })
}
