//! Word search generation: random straight-line placement in eight
//! directions, then noise letters everywhere else.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    direction::Direction,
    grid::{Cell, Grid, GridCell},
    normalize::{usable_word, ALPHABET},
    placement::Placement,
    random::{RandomSource, Seed},
};

/// Random placements tried per word before it is given up on.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 150;

/// A filled word search.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordSearch {
    pub grid: Grid,
    pub placements: Vec<Placement>,
    /// Words that found no room; the caller is expected to tell the player.
    pub failed_words: Vec<String>,
    /// One point per placed word plus one per letter shared with an earlier word.
    #[serde(skip)]
    pub quality: usize,
}

impl WordSearch {
    pub fn width(&self) -> usize {
        self.grid.width
    }

    pub fn height(&self) -> usize {
        self.grid.height
    }

    /// Ranking used to pick between candidate puzzles: fewer failures first,
    /// then more shared letters.
    fn rank(&self) -> (std::cmp::Reverse<usize>, usize) {
        (std::cmp::Reverse(self.failed_words.len()), self.quality)
    }
}

/// A word search together with the seed that reproduces it.
#[derive(Clone, Debug)]
pub struct SeededWordSearch {
    pub seed: Seed,
    pub puzzle: WordSearch,
}

#[derive(Debug, PartialEq, Eq)]
pub enum MeasureError {
    DoesntFit,
    Conflicts,
}

/// Incremental builder behind [`generate`].
pub struct WordSearchGenerator<'r, R: ?Sized> {
    grid: Grid,
    placements: Vec<Placement>,
    failed_words: Vec<String>,
    quality: usize,
    rng: &'r mut R,
}

impl<'r, R: RandomSource + ?Sized> WordSearchGenerator<'r, R> {
    pub fn new(width: usize, height: usize, rng: &'r mut R) -> Self {
        Self {
            grid: Grid::new(width, height),
            placements: Vec::new(),
            failed_words: Vec::new(),
            quality: 0,
            rng,
        }
    }

    /// Normalizes `words`, drops unusable ones and places the rest longest first.
    pub fn with_words<S: AsRef<str>>(mut self, words: impl IntoIterator<Item = S>) -> Self {
        let mut words: Vec<String> = words
            .into_iter()
            .filter_map(|word| usable_word(word.as_ref()))
            .collect();
        words.sort_by_key(|word| std::cmp::Reverse(word.chars().count()));

        for word in &words {
            if !self.add_word(word) {
                self.failed_words.push(word.clone());
            }
        }
        self
    }

    /// Tries up to [`MAX_PLACEMENT_ATTEMPTS`] random starts and directions for
    /// an already-normalized `word`. The first that fits is kept.
    pub fn add_word(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }

        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let direction = Direction::nth(self.rng.next_index(Direction::COUNT));
            let start = Cell::new(
                self.rng.next_index(self.grid.height.max(1)),
                self.rng.next_index(self.grid.width.max(1)),
            );

            let Ok(shared) = self.measure(start, direction, word) else {
                continue;
            };
            let Some(placement) = Placement::along(self.placements.len(), word, start, direction)
            else {
                continue;
            };

            for (cell, letter) in placement.letters() {
                self.grid.set_letter(cell, letter);
            }
            debug!(%word, %start, %direction, shared, "Placed word");
            self.placements.push(placement);
            self.quality += shared + 1;
            return true;
        }

        debug!(%word, "Gave up placing word");
        false
    }

    /// Counts the letters `word` would share with words already placed, or
    /// reports why it cannot go at `start` along `dir`.
    pub fn measure(&self, start: Cell, dir: Direction, word: &str) -> Result<usize, MeasureError> {
        let mut score = 0;

        // Work from the end so that we can quickly fail if it doesn't fit
        let letters: Vec<char> = word.chars().collect();
        for (char_no, &c) in letters.iter().enumerate().rev() {
            let cell = start.step(dir, char_no).ok_or(MeasureError::DoesntFit)?;
            if !self.grid.contains(cell) {
                return Err(MeasureError::DoesntFit);
            }
            match self.grid.letter(cell) {
                None => (),
                Some(existing) if existing == c => score += 1,
                Some(_) => return Err(MeasureError::Conflicts),
            }
        }

        Ok(score)
    }

    /// Fills every unused cell with a random letter and hands back the puzzle.
    pub fn fill(mut self) -> WordSearch {
        for row in &mut self.grid.cells {
            for space in row.iter_mut().filter(|space| space.is_none()) {
                *space = Some(GridCell::new(rand_letter(&mut *self.rng)));
            }
        }

        WordSearch {
            grid: self.grid,
            placements: self.placements,
            failed_words: self.failed_words,
            quality: self.quality,
        }
    }
}

fn rand_letter<R: RandomSource + ?Sized>(rng: &mut R) -> char {
    ALPHABET[rng.next_index(ALPHABET.len())]
}

/// Builds a `width` x `height` word search from `words`.
///
/// Never fails outright: words that do not fit are listed in
/// [`WordSearch::failed_words`] and the rest of the puzzle is still built.
#[instrument(skip(words, rng))]
pub fn generate<S, R>(words: &[S], width: usize, height: usize, rng: &mut R) -> WordSearch
where
    S: AsRef<str>,
    R: RandomSource + ?Sized,
{
    let puzzle = WordSearchGenerator::new(width, height, rng)
        .with_words(words)
        .fill();
    debug!(
        placed = puzzle.placements.len(),
        failed = puzzle.failed_words.len(),
        "Generated word search"
    );
    puzzle
}

/// Builds the puzzle `seed` determines.
pub fn generate_seeded<S: AsRef<str>>(
    words: &[S],
    width: usize,
    height: usize,
    seed: Seed,
) -> SeededWordSearch {
    let mut rng = seed.rng();
    SeededWordSearch {
        seed,
        puzzle: generate(words, width, height, &mut rng),
    }
}

/// Generates fresh puzzles until `time_limit` runs out and keeps the best.
/// At least one puzzle is always generated.
#[instrument(skip(words))]
pub fn generate_best<S: AsRef<str>>(
    words: &[S],
    width: usize,
    height: usize,
    time_limit: Duration,
) -> Result<(SeededWordSearch, usize), getrandom::Error> {
    let start_time = Instant::now();
    let mut iterations = 1;
    let mut best = generate_seeded(words, width, height, Seed::fresh()?);

    while start_time.elapsed() < time_limit {
        iterations += 1;
        let candidate = generate_seeded(words, width, height, Seed::fresh()?);
        if candidate.puzzle.rank() >= best.puzzle.rank() {
            best = candidate;
        }
    }

    debug!(iterations, quality = best.puzzle.quality, "Picked best word search");
    Ok((best, iterations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::scripted::Scripted;

    #[test]
    fn measure_rejects_out_of_bounds_and_conflicts() {
        let mut rng = Seed([0; 32]).rng();
        let mut generator = WordSearchGenerator::new(5, 5, &mut rng);
        assert_eq!(
            generator.measure(Cell::new(0, 3), Direction::Right, "GATO"),
            Err(MeasureError::DoesntFit)
        );
        assert_eq!(
            generator.measure(Cell::new(0, 0), Direction::Up, "SOL"),
            Err(MeasureError::DoesntFit)
        );
        generator.grid.set_letter(Cell::new(0, 1), 'A');
        assert_eq!(
            generator.measure(Cell::new(0, 0), Direction::Right, "GATO"),
            Ok(1)
        );
        assert_eq!(
            generator.measure(Cell::new(0, 0), Direction::Right, "SOL"),
            Err(MeasureError::Conflicts)
        );
    }

    #[test]
    fn scripted_source_places_word_exactly() {
        // Direction index 4 is Right, then row 2, col 1.
        let mut rng = Scripted::new([4, 2, 1, 0]);
        let puzzle = generate(&["sol"], 8, 8, &mut rng);
        assert_eq!(puzzle.placements.len(), 1);
        assert_eq!(puzzle.placements[0].direction, Direction::Right);
        assert_eq!(
            puzzle.placements[0].cells,
            vec![Cell::new(2, 1), Cell::new(2, 2), Cell::new(2, 3)]
        );
    }

    #[test]
    fn too_long_word_fails_after_all_attempts() {
        let mut rng = Seed([3; 32]).rng();
        let puzzle = generate(&["hipopotamo", "sol"], 8, 8, &mut rng);
        assert_eq!(puzzle.failed_words, vec!["HIPOPOTAMO".to_string()]);
        assert_eq!(puzzle.placements.len(), 1);
    }

    #[test]
    fn fill_leaves_no_unused_cells() {
        let mut rng = Seed([9; 32]).rng();
        let puzzle = generate(&["perro", "gato"], 9, 8, &mut rng);
        assert_eq!(puzzle.grid.used_cell_count(), 72);
        assert!(puzzle
            .grid
            .used_cells()
            .all(|(_, cell)| ALPHABET.contains(&cell.letter)));
    }

    #[test]
    fn longest_words_go_first() {
        let mut rng = Seed([5; 32]).rng();
        let puzzle = generate(&["sol", "mariposa", "gato"], 12, 12, &mut rng);
        let words: Vec<_> = puzzle.placements.iter().map(|p| p.word.as_str()).collect();
        assert_eq!(words, vec!["MARIPOSA", "GATO", "SOL"]);
    }

    #[test]
    fn unusable_words_are_dropped_silently() {
        let mut rng = Seed([5; 32]).rng();
        let puzzle = generate(&["a", "123", "luna"], 8, 8, &mut rng);
        assert_eq!(puzzle.placements.len(), 1);
        assert!(puzzle.failed_words.is_empty());
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let seed = Seed([11; 32]);
        let a = generate_seeded(&["gato", "perro", "sol"], 10, 10, seed);
        let b = generate_seeded(&["gato", "perro", "sol"], 10, 10, seed);
        assert_eq!(a.puzzle.grid, b.puzzle.grid);
        assert_eq!(a.puzzle.placements, b.puzzle.placements);
    }
}
