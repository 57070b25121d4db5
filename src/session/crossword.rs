use std::collections::{HashMap, HashSet};
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use super::{
    score::{crossword_score, AttemptMetadata, AttemptSink, ScorePayload},
    Clock, Phase, Stopwatch, SystemClock,
};
use crate::{
    config::CrosswordConfig,
    crossword::{self, Crossword, MIN_PLACED_WORDS},
    direction::{Axis, Direction},
    error::ConfigurationError,
    grid::{Cell, Grid},
    normalize::normalize_letter,
    placement::Placement,
    random::RandomSource,
};

/// Arrow keys, moving the cursor one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

impl Arrow {
    fn direction(self) -> Direction {
        match self {
            Arrow::Up => Direction::Up,
            Arrow::Down => Direction::Down,
            Arrow::Left => Direction::Left,
            Arrow::Right => Direction::Right,
        }
    }

    fn axis(self) -> Axis {
        match self {
            Arrow::Up | Arrow::Down => Axis::Down,
            Arrow::Left | Arrow::Right => Axis::Across,
        }
    }
}

/// What a letter, deletion or hint did to the puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryOutcome {
    /// No cell selected, not a letter, or the game is over.
    Ignored,
    /// Accepted; the grid still has empty cells.
    Accepted,
    /// Every cell is filled but `wrong` of them are incorrect. Each wrong
    /// letter counts as one error the first time it is seen.
    FilledWithErrors { wrong: usize },
    /// Every cell is filled correctly.
    Completed,
}

/// Counts from an explicit verification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub correct: usize,
    pub incorrect: usize,
    pub empty: usize,
}

/// A crossword being played.
///
/// Focusing a cell picks the word through it along the current axis, or along
/// the other axis if there is none; focusing the same cell again flips axis.
/// Letters fill the cursor cell and advance along the active word. After every
/// letter and hint a full grid is checked, and the game completes once every
/// letter is right.
pub struct CrosswordSession<S, C = SystemClock> {
    game_id: String,
    puzzle: Crossword,
    inputs: HashMap<Cell, char>,
    /// Wrong letters already counted, so a mistake is only charged once.
    charged: HashSet<(Cell, char)>,
    errors: u32,
    hints_used: u32,
    selected: Option<Cell>,
    active: Option<usize>,
    axis: Axis,
    last_focused: Option<Cell>,
    phase: Phase,
    stopwatch: Stopwatch,
    sink: S,
    clock: C,
    reported: bool,
}

impl<S: AttemptSink> CrosswordSession<S, SystemClock> {
    /// Generates a crossword for `config` and wraps it in a session.
    #[instrument(skip(config, rng, sink))]
    pub fn from_config<R: RandomSource + ?Sized>(
        game_id: &str,
        config: &CrosswordConfig,
        rng: &mut R,
        sink: S,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let puzzle = crossword::generate(&config.clues, rng).ok_or(
            ConfigurationError::TooFewPlacements {
                placed: 1,
                required: MIN_PLACED_WORDS,
            },
        )?;
        Self::new(game_id, puzzle, sink)
    }

    pub fn new(game_id: &str, puzzle: Crossword, sink: S) -> Result<Self, ConfigurationError> {
        Self::with_clock(game_id, puzzle, sink, SystemClock)
    }
}

impl<S: AttemptSink, C: Clock> CrosswordSession<S, C> {
    pub fn with_clock(
        game_id: &str,
        mut puzzle: Crossword,
        sink: S,
        clock: C,
    ) -> Result<Self, ConfigurationError> {
        if puzzle.placements.len() < MIN_PLACED_WORDS {
            warn!(game_id, placed = puzzle.placements.len(), "Crossword has too few words");
            return Err(ConfigurationError::TooFewPlacements {
                placed: puzzle.placements.len(),
                required: MIN_PLACED_WORDS,
            });
        }
        for row in &mut puzzle.grid.cells {
            for grid_cell in row.iter_mut().flatten() {
                grid_cell.revealed = false;
                grid_cell.correct = None;
            }
        }

        info!(game_id, words = puzzle.placements.len(), "Created crossword session");
        Ok(Self {
            game_id: game_id.to_owned(),
            puzzle,
            inputs: HashMap::new(),
            charged: HashSet::new(),
            errors: 0,
            hints_used: 0,
            selected: None,
            active: None,
            axis: Axis::Across,
            last_focused: None,
            phase: Phase::NotStarted,
            stopwatch: Stopwatch::default(),
            sink,
            clock,
            reported: false,
        })
    }

    pub fn puzzle(&self) -> &Crossword {
        &self.puzzle
    }

    /// The grid with `revealed` and `correct` marks as the player sees them.
    pub fn grid(&self) -> &Grid {
        &self.puzzle.grid
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn errors(&self) -> u32 {
        self.errors
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn selected(&self) -> Option<Cell> {
        self.selected
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn active_placement(&self) -> Option<&Placement> {
        self.active.and_then(|id| self.puzzle.placements.get(id))
    }

    pub fn input_at(&self, cell: Cell) -> Option<char> {
        self.inputs.get(&cell).copied()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Whole seconds played, for the once-a-second timer display.
    pub fn tick(&self) -> u64 {
        self.stopwatch.elapsed_seconds(self.clock.now())
    }

    pub fn elapsed(&self) -> Duration {
        self.stopwatch.elapsed(self.clock.now())
    }

    pub fn start(&mut self) {
        if self.phase == Phase::NotStarted {
            self.phase = Phase::InProgress;
            self.stopwatch.start(self.clock.now());
            debug!(game_id = %self.game_id, "Crossword started");
        }
    }

    fn accepting(&self) -> bool {
        self.phase != Phase::Completed
    }

    fn placement_id_at(&self, cell: Cell, axis: Axis) -> Option<usize> {
        self.puzzle
            .placement_at(cell, axis)
            .map(|placement| placement.id)
    }

    /// Moves the cursor to `cell`, preferring `axis` and falling back to the
    /// other one.
    fn move_to(&mut self, cell: Cell, axis: Axis) -> bool {
        let preferred = self.placement_id_at(cell, axis).map(|id| (id, axis));
        let fallback = || {
            let other = axis.perpendicular();
            self.placement_id_at(cell, other).map(|id| (id, other))
        };
        let Some((id, axis)) = preferred.or_else(fallback) else {
            return false;
        };
        self.selected = Some(cell);
        self.active = Some(id);
        self.axis = axis;
        self.last_focused = Some(cell);
        true
    }

    /// Clicks or taps `cell`.
    pub fn focus(&mut self, cell: Cell) -> bool {
        if !self.accepting() || self.puzzle.grid.get(cell).is_none() {
            return false;
        }
        self.start();
        let axis = if self.last_focused == Some(cell) {
            self.axis.perpendicular()
        } else {
            self.axis
        };
        self.move_to(cell, axis)
    }

    /// Moves the cursor `steps` along the active word, staying inside it.
    fn shift_in_word(&mut self, forward: bool) {
        let (Some(cell), Some(placement)) = (self.selected, self.active_placement()) else {
            return;
        };
        let Some(index) = placement.index_of(cell) else {
            return;
        };
        let next = if forward {
            placement.cells.get(index + 1)
        } else {
            index.checked_sub(1).and_then(|i| placement.cells.get(i))
        };
        if let Some(&next) = next {
            self.selected = Some(next);
            self.last_focused = Some(next);
        }
    }

    /// Types `letter` into the cursor cell and advances. Revealed cells keep
    /// their letter.
    #[instrument(skip(self), fields(game_id = %self.game_id))]
    pub fn input(&mut self, letter: char) -> EntryOutcome {
        let Some(cell) = self.selected.filter(|_| self.accepting()) else {
            return EntryOutcome::Ignored;
        };
        let Some(letter) = normalize_letter(letter) else {
            return EntryOutcome::Ignored;
        };

        if let Some(grid_cell) = self.puzzle.grid.get_mut(cell) {
            if !grid_cell.revealed {
                grid_cell.correct = None;
                self.inputs.insert(cell, letter);
            }
        }
        self.shift_in_word(true);
        self.check_completion()
    }

    /// Clears the cursor cell and steps back one cell in the active word.
    pub fn backspace(&mut self) -> bool {
        let Some(cell) = self.selected.filter(|_| self.accepting()) else {
            return false;
        };
        if let Some(grid_cell) = self.puzzle.grid.get_mut(cell) {
            if !grid_cell.revealed {
                grid_cell.correct = None;
                self.inputs.remove(&cell);
            }
        }
        self.shift_in_word(false);
        true
    }

    /// Moves the cursor to the neighbouring used cell, if there is one.
    pub fn arrow(&mut self, arrow: Arrow) -> bool {
        let Some(cell) = self.selected.filter(|_| self.accepting()) else {
            return false;
        };
        match cell.step(arrow.direction(), 1) {
            Some(next) if self.puzzle.grid.get(next).is_some() => self.move_to(next, arrow.axis()),
            _ => false,
        }
    }

    /// Jumps to the first cell of the next (or previous) word, wrapping.
    pub fn tab(&mut self, forward: bool) -> bool {
        if !self.accepting() {
            return false;
        }
        self.start();
        let count = self.puzzle.placements.len();
        let next = match (self.active, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(id), true) => (id + 1) % count,
            (Some(id), false) => (id + count - 1) % count,
        };
        let Some(placement) = self.puzzle.placements.get(next) else {
            return false;
        };
        let (Some(start), Some(axis)) = (placement.start(), placement.axis()) else {
            return false;
        };
        self.selected = Some(start);
        self.active = Some(next);
        self.axis = axis;
        self.last_focused = Some(start);
        true
    }

    /// Reveals the correct letter of the cursor cell at [`HINT_COST`] points.
    ///
    /// [`HINT_COST`]: super::HINT_COST
    #[instrument(skip(self), fields(game_id = %self.game_id))]
    pub fn hint(&mut self) -> EntryOutcome {
        let Some(cell) = self.selected.filter(|_| self.accepting()) else {
            return EntryOutcome::Ignored;
        };
        let Some(grid_cell) = self.puzzle.grid.get_mut(cell) else {
            return EntryOutcome::Ignored;
        };
        if grid_cell.revealed {
            return EntryOutcome::Ignored;
        }
        grid_cell.revealed = true;
        grid_cell.correct = None;
        self.inputs.insert(cell, grid_cell.letter);
        self.hints_used += 1;
        debug!(%cell, hints_used = self.hints_used, "Revealed letter");

        self.shift_in_word(true);
        self.check_completion()
    }

    /// Marks every filled cell right or wrong. Does not end the game.
    pub fn verify(&mut self) -> VerifyReport {
        let mut report = VerifyReport::default();
        for (row_no, row) in self.puzzle.grid.cells.iter_mut().enumerate() {
            for (col_no, space) in row.iter_mut().enumerate() {
                let Some(grid_cell) = space else {
                    continue;
                };
                match self.inputs.get(&Cell::new(row_no, col_no)) {
                    Some(&input) => {
                        let correct = input == grid_cell.letter;
                        grid_cell.correct = Some(correct);
                        if correct {
                            report.correct += 1;
                        } else {
                            report.incorrect += 1;
                        }
                    }
                    None => {
                        grid_cell.correct = None;
                        report.empty += 1;
                    }
                }
            }
        }
        report
    }

    /// Cells currently holding the wrong letter, with that letter.
    fn wrong_cells(&self) -> Vec<(Cell, char)> {
        self.puzzle
            .solution()
            .filter_map(|(cell, letter)| {
                let input = *self.inputs.get(&cell)?;
                (input != letter).then_some((cell, input))
            })
            .collect()
    }

    fn check_completion(&mut self) -> EntryOutcome {
        let filled = self
            .puzzle
            .solution()
            .all(|(cell, _)| self.inputs.contains_key(&cell));
        if !filled {
            return EntryOutcome::Accepted;
        }

        let wrong = self.wrong_cells();
        if wrong.is_empty() {
            self.complete();
            return EntryOutcome::Completed;
        }

        for &(cell, input) in &wrong {
            if self.charged.insert((cell, input)) {
                self.errors += 1;
            }
            if let Some(grid_cell) = self.puzzle.grid.get_mut(cell) {
                grid_cell.correct = Some(false);
            }
        }
        debug!(wrong = wrong.len(), errors = self.errors, "Full grid has wrong letters");
        EntryOutcome::FilledWithErrors { wrong: wrong.len() }
    }

    pub fn score(&self) -> u32 {
        crossword_score(self.puzzle.max_score(), self.errors, self.hints_used)
    }

    pub fn payload(&self) -> ScorePayload {
        ScorePayload {
            score: self.score(),
            max_score: self.puzzle.max_score(),
            completed: self.phase == Phase::Completed,
            duration_seconds: self.tick(),
            metadata: AttemptMetadata::Crossword {
                words: self.puzzle.placements.len(),
                cells: self.puzzle.grid.used_cell_count(),
                errors: self.errors,
                hints_used: self.hints_used,
            },
        }
    }

    fn complete(&mut self) {
        self.phase = Phase::Completed;
        self.stopwatch.stop(self.clock.now());
        if self.reported {
            return;
        }
        self.reported = true;

        let payload = self.payload();
        info!(
            game_id = %self.game_id,
            score = payload.score,
            max_score = payload.max_score,
            "Crossword completed"
        );
        if let Err(err) = self.sink.save_attempt(&self.game_id, &payload) {
            warn!(game_id = %self.game_id, %err, "Could not save attempt");
        }
    }

    /// Leaves the game. Nothing is saved unless it was already completed.
    pub fn abandon(self) {
        if self.phase != Phase::Completed {
            info!(game_id = %self.game_id, filled = self.inputs.len(), "Crossword abandoned");
        }
    }
}
