//! Crossword generation.
//!
//! The longest word goes across the middle of an oversized working grid. Every
//! later word is tried at each perpendicular crossing with a placed word that
//! shares a letter, and the crossing scoring highest on spread, axis
//! alternation and how central the shared letter is wins. Ties are broken at
//! random. Words with no legal crossing are left out. The used area is then
//! cut out and centered in a square grid, and clue numbers are assigned.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    direction::Axis,
    grid::{BoundingBox, Cell, Grid},
    normalize::usable_word,
    placement::Placement,
    random::RandomSource,
    session::POINTS_PER_LETTER,
};

/// Smallest side of the working grid words are laid out in.
pub const MIN_WORKING_SIZE: usize = 15;

/// Added to a candidate's score when it runs along the other axis from the
/// word placed just before it.
pub const ALTERNATION_BONUS: f64 = 5.0;

/// Fewest placed words a playable crossword has.
pub const MIN_PLACED_WORDS: usize = 2;

const SCORE_EPSILON: f64 = 1e-9;

/// An answer and the clue shown for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueEntry {
    pub word: String,
    #[serde(default)]
    pub clue: String,
}

impl ClueEntry {
    pub fn new(word: impl Into<String>, clue: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            clue: clue.into(),
        }
    }
}

/// A generated crossword. The grid is always square; `placements` are sorted
/// by clue number and each placement's `id` is its index in that list.
#[derive(Clone, Debug, Serialize)]
pub struct Crossword {
    pub grid: Grid,
    pub placements: Vec<Placement>,
}

impl Crossword {
    /// [`POINTS_PER_LETTER`] for every letter of every placed word.
    pub fn max_score(&self) -> u32 {
        self.placements
            .iter()
            .map(|placement| placement.len() as u32 * POINTS_PER_LETTER)
            .sum()
    }

    /// The placement along `axis` that covers `cell`, if any.
    pub fn placement_at(&self, cell: Cell, axis: Axis) -> Option<&Placement> {
        self.placements
            .iter()
            .find(|placement| placement.axis() == Some(axis) && placement.contains(cell))
    }

    /// Placements along `axis`, in clue-number order.
    pub fn clues(&self, axis: Axis) -> impl Iterator<Item = &Placement> + '_ {
        self.placements
            .iter()
            .filter(move |placement| placement.axis() == Some(axis))
    }

    /// The letter each used cell must hold.
    pub fn solution(&self) -> impl Iterator<Item = (Cell, char)> + '_ {
        self.grid.used_cells().map(|(cell, grid_cell)| (cell, grid_cell.letter))
    }
}

#[derive(Clone, Debug)]
struct Candidate {
    placement: Placement,
    score: f64,
}

struct Layout<'r, R: ?Sized> {
    grid: Grid,
    placements: Vec<Placement>,
    rng: &'r mut R,
}

impl<'r, R: RandomSource + ?Sized> Layout<'r, R> {
    fn new(size: usize, rng: &'r mut R) -> Self {
        Self {
            grid: Grid::new(size, size),
            placements: Vec::new(),
            rng,
        }
    }

    fn size(&self) -> usize {
        self.grid.width
    }

    fn commit(&mut self, mut placement: Placement, clue: &str) {
        for (cell, letter) in placement.letters() {
            self.grid.set_letter(cell, letter);
        }
        placement.clue = Some(clue.to_owned());
        self.placements.push(placement);
    }

    fn place_first(&mut self, entry: &(String, String)) -> bool {
        let (word, clue) = entry;
        let len = word.chars().count();
        let start = Cell::new(self.size() / 2, self.size().saturating_sub(len) / 2);
        match Placement::along(0, word, start, Axis::Across.direction()) {
            Some(placement) if self.fits(&placement) => {
                self.commit(placement, clue);
                true
            }
            _ => false,
        }
    }

    fn place_next(&mut self, entry: &(String, String)) -> bool {
        let (word, clue) = entry;
        let candidates = self.candidates(word);
        let Some(best) = candidates
            .iter()
            .map(|candidate| candidate.score)
            .max_by(f64::total_cmp)
        else {
            return false;
        };

        let mut ties: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| best - candidate.score < SCORE_EPSILON)
            .collect();
        let chosen = ties.swap_remove(self.rng.next_index(ties.len()));
        debug!(%word, score = chosen.score, axis = ?chosen.placement.axis(), "Placed crossword word");
        self.commit(chosen.placement, clue);
        true
    }

    /// Every legal perpendicular crossing of `word` with a placed word.
    fn candidates(&self, word: &str) -> Vec<Candidate> {
        let id = self.placements.len();
        let previous_axis = self.placements.last().and_then(Placement::axis);
        let mut candidates = Vec::new();

        for placed in &self.placements {
            let Some(axis) = placed.axis().map(Axis::perpendicular) else {
                continue;
            };
            let backwards = axis.direction().reversed();
            for (crossing, placed_letter) in placed.letters() {
                for (index, letter) in word.chars().enumerate() {
                    if letter != placed_letter {
                        continue;
                    }
                    let Some(start) = crossing.step(backwards, index) else {
                        continue;
                    };
                    let Some(placement) = Placement::along(id, word, start, axis.direction())
                    else {
                        continue;
                    };
                    if !self.fits(&placement) {
                        continue;
                    }
                    let score = self.score(&placement, index, previous_axis);
                    candidates.push(Candidate { placement, score });
                }
            }
        }

        candidates
    }

    /// In bounds and agreeing on every shared letter. Neither this word nor
    /// any placed word may gain a letter past its ends, and no two words on
    /// the same axis may share a cell.
    fn fits(&self, placement: &Placement) -> bool {
        let in_bounds = placement.cells.iter().all(|&cell| self.grid.contains(cell));
        if !in_bounds {
            return false;
        }

        let letters_agree = placement.letters().all(|(cell, letter)| {
            self.grid
                .letter(cell)
                .map_or(true, |existing| existing == letter)
        });

        let ends_clear = placement
            .continuation_cells()
            .all(|cell| self.grid.letter(cell).is_none());

        let others_clear = self.placements.iter().all(|other| {
            other
                .continuation_cells()
                .all(|cell| !placement.contains(cell))
        });

        let no_parallel_overlap = self.placements.iter().all(|other| {
            other.axis() != placement.axis()
                || placement.cells.iter().all(|&cell| !other.contains(cell))
        });

        letters_agree && ends_clear && others_clear && no_parallel_overlap
    }

    /// Distance of the word's midpoint from the grid center, plus the
    /// alternation bonus, plus how close the crossing letter sits to the
    /// middle of the new word.
    fn score(&self, placement: &Placement, crossing_index: usize, previous: Option<Axis>) -> f64 {
        let center = (self.size() as f64 - 1.0) / 2.0;
        let (first, last) = match (placement.cells.first(), placement.cells.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return f64::MIN,
        };
        let mid_row = (first.row + last.row) as f64 / 2.0;
        let mid_col = (first.col + last.col) as f64 / 2.0;
        let dispersion = ((mid_row - center).powi(2) + (mid_col - center).powi(2)).sqrt();

        let alternation = if previous.is_some() && previous != placement.axis() {
            ALTERNATION_BONUS
        } else {
            0.0
        };

        let half = (placement.len() as f64 - 1.0) / 2.0;
        let position = half - (crossing_index as f64 - half).abs();

        dispersion + alternation + position
    }

    /// Crops to the used area, centers it in a square and numbers the clues.
    fn finish(self) -> Option<Crossword> {
        let bbox = BoundingBox::of(
            self.placements
                .iter()
                .flat_map(|placement| placement.cells.iter().copied()),
        )?;
        let side = bbox.width().max(bbox.height());
        // Floor division: odd leftovers put the extra cell after the content.
        let pad_row = (side - bbox.height()) / 2;
        let pad_col = (side - bbox.width()) / 2;
        let shift = |cell: Cell| {
            Cell::new(
                cell.row - bbox.min_row + pad_row,
                cell.col - bbox.min_col + pad_col,
            )
        };

        let mut grid = Grid::new(side, side);
        let mut placements: Vec<Placement> = self
            .placements
            .into_iter()
            .map(|mut placement| {
                placement.cells = placement.cells.iter().copied().map(shift).collect();
                placement
            })
            .collect();

        let mut numbers: HashMap<Cell, u32> = HashMap::new();
        for placement in &mut placements {
            for (cell, letter) in placement.letters() {
                grid.set_letter(cell, letter);
            }
            let Some(start) = placement.start() else {
                continue;
            };
            let next = numbers.len() as u32 + 1;
            let number = *numbers.entry(start).or_insert(next);
            placement.number = Some(number);
        }
        for (&cell, &number) in &numbers {
            if let Some(grid_cell) = grid.get_mut(cell) {
                grid_cell.number = Some(number);
            }
        }

        placements.sort_by_key(|placement| placement.number);
        for (id, placement) in placements.iter_mut().enumerate() {
            placement.id = id;
        }

        Some(Crossword { grid, placements })
    }
}

/// Builds a crossword from `clues`, or `None` when fewer than two words are
/// usable or fewer than two could be crossed into the puzzle.
#[instrument(skip_all, fields(clues = clues.len()))]
pub fn generate<R: RandomSource + ?Sized>(clues: &[ClueEntry], rng: &mut R) -> Option<Crossword> {
    let mut entries: Vec<(String, String)> = clues
        .iter()
        .filter_map(|entry| Some((usable_word(&entry.word)?, entry.clue.clone())))
        .collect();
    if entries.len() < MIN_PLACED_WORDS {
        debug!(usable = entries.len(), "Too few usable crossword words");
        return None;
    }
    entries.sort_by_key(|(word, _)| std::cmp::Reverse(word.chars().count()));

    let longest = entries[0].0.chars().count();
    let mut layout = Layout::new(MIN_WORKING_SIZE.max(longest + 4), rng);
    let (first, rest) = entries.split_first()?;
    if !layout.place_first(first) {
        return None;
    }
    for entry in rest {
        if !layout.place_next(entry) {
            debug!(word = %entry.0, "Skipped crossword word with no legal crossing");
        }
    }

    if layout.placements.len() < MIN_PLACED_WORDS {
        debug!(placed = layout.placements.len(), "Too few crossword words placed");
        return None;
    }
    layout.finish()
}
