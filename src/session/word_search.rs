use std::collections::BTreeSet;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use super::{
    score::{word_search_score, AttemptMetadata, AttemptSink, ScorePayload},
    Clock, Phase, Stopwatch, SystemClock,
};
use crate::{
    config::WordSearchConfig,
    error::ConfigurationError,
    grid::Cell,
    placement::Placement,
    random::RandomSource,
    selection::{match_placement, resolve_path, CellPath},
    word_search::{self, WordSearch},
};

/// Result of pressing "check" on a finished drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The selection spelled an unfound word.
    Found { placement_id: usize, completed: bool },
    /// The selection matched nothing still to find; counted as an error.
    Miss,
    /// Nothing was selected, or the game is over.
    NoSelection,
}

#[derive(Clone, Debug)]
struct Drag {
    start: Cell,
    path: CellPath,
}

/// A word search being played.
///
/// Pointer down starts a drag, pointer moves extend it (only along straight
/// lines; other moves keep the last straight preview), pointer up freezes the
/// selection, and [`check`](Self::check) accepts or rejects it.
pub struct WordSearchSession<S, C = SystemClock> {
    game_id: String,
    puzzle: WordSearch,
    found: BTreeSet<usize>,
    errors: u32,
    phase: Phase,
    stopwatch: Stopwatch,
    drag: Option<Drag>,
    selection: Option<CellPath>,
    sink: S,
    clock: C,
    reported: bool,
}

impl<S: AttemptSink> WordSearchSession<S, SystemClock> {
    /// Generates a puzzle for `config` and wraps it in a session.
    #[instrument(skip(config, rng, sink))]
    pub fn from_config<R: RandomSource + ?Sized>(
        game_id: &str,
        config: &WordSearchConfig,
        rng: &mut R,
        sink: S,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let (width, height) = config.dimensions();
        let puzzle = word_search::generate(config.words.as_slice(), width, height, rng);
        Self::new(game_id, puzzle, sink)
    }

    pub fn new(game_id: &str, puzzle: WordSearch, sink: S) -> Result<Self, ConfigurationError> {
        Self::with_clock(game_id, puzzle, sink, SystemClock)
    }
}

impl<S: AttemptSink, C: Clock> WordSearchSession<S, C> {
    /// A puzzle with nothing placed is not playable.
    pub fn with_clock(
        game_id: &str,
        puzzle: WordSearch,
        sink: S,
        clock: C,
    ) -> Result<Self, ConfigurationError> {
        if puzzle.placements.is_empty() {
            warn!(game_id, "Word search has no placed words");
            return Err(ConfigurationError::TooFewPlacements {
                placed: 0,
                required: 1,
            });
        }

        info!(
            game_id,
            words = puzzle.placements.len(),
            failed = puzzle.failed_words.len(),
            "Created word search session"
        );
        Ok(Self {
            game_id: game_id.to_owned(),
            puzzle,
            found: BTreeSet::new(),
            errors: 0,
            phase: Phase::NotStarted,
            stopwatch: Stopwatch::default(),
            drag: None,
            selection: None,
            sink,
            clock,
            reported: false,
        })
    }

    pub fn puzzle(&self) -> &WordSearch {
        &self.puzzle
    }

    pub fn placements(&self) -> &[Placement] {
        &self.puzzle.placements
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn errors(&self) -> u32 {
        self.errors
    }

    pub fn found_count(&self) -> usize {
        self.found.len()
    }

    pub fn is_found(&self, placement_id: usize) -> bool {
        self.found.contains(&placement_id)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn elapsed(&self) -> Duration {
        self.stopwatch.elapsed(self.clock.now())
    }

    /// Cells highlighted by the drag in progress.
    pub fn preview(&self) -> Option<&[Cell]> {
        self.drag.as_ref().map(|drag| drag.path.as_slice())
    }

    /// The finished drag waiting for a check.
    pub fn selection(&self) -> Option<&[Cell]> {
        self.selection.as_deref()
    }

    /// Starts the clock. Called implicitly by the first pointer event.
    pub fn start(&mut self) {
        if self.phase == Phase::NotStarted {
            self.phase = Phase::InProgress;
            self.stopwatch.start(self.clock.now());
            debug!(game_id = %self.game_id, "Word search started");
        }
    }

    pub fn pointer_down(&mut self, cell: Cell) -> bool {
        if self.phase == Phase::Completed || !self.puzzle.grid.contains(cell) {
            return false;
        }
        self.start();
        self.selection = None;
        self.drag = Some(Drag {
            start: cell,
            path: vec![cell],
        });
        true
    }

    /// Extends the drag to `cell` if the line to it is straight, and returns
    /// the current preview.
    pub fn pointer_move(&mut self, cell: Cell) -> Option<&[Cell]> {
        let in_grid = self.puzzle.grid.contains(cell);
        let drag = self.drag.as_mut()?;
        if in_grid {
            if let Some(path) = resolve_path(drag.start, cell) {
                drag.path = path;
            }
        }
        Some(drag.path.as_slice())
    }

    /// Ends the drag; its path becomes the selection awaiting a check.
    pub fn pointer_up(&mut self) -> Option<&[Cell]> {
        let drag = self.drag.take()?;
        self.selection = Some(drag.path);
        self.selection.as_deref()
    }

    /// Selects the straight line from `start` to `end` in one go.
    pub fn select(&mut self, start: Cell, end: Cell) -> Option<&[Cell]> {
        if !self.pointer_down(start) {
            return None;
        }
        self.pointer_move(end);
        self.pointer_up()
    }

    /// Compares the selection with every word not yet found.
    #[instrument(skip(self), fields(game_id = %self.game_id))]
    pub fn check(&mut self) -> CheckOutcome {
        if self.phase == Phase::Completed {
            return CheckOutcome::NoSelection;
        }
        let Some(path) = self.selection.take() else {
            return CheckOutcome::NoSelection;
        };

        let found = &self.found;
        let matched = match_placement(&path, &self.puzzle.placements, |placement| {
            found.contains(&placement.id)
        })
        .map(|placement| placement.id);

        match matched {
            Some(placement_id) => {
                self.found.insert(placement_id);
                debug!(placement_id, found = self.found.len(), "Word found");
                let completed = self.found.len() == self.puzzle.placements.len();
                if completed {
                    self.complete();
                }
                CheckOutcome::Found {
                    placement_id,
                    completed,
                }
            }
            None => {
                self.errors += 1;
                debug!(errors = self.errors, "Selection matched no word");
                CheckOutcome::Miss
            }
        }
    }

    /// `(score, max_score)` as things stand.
    pub fn score(&self) -> (u32, u32) {
        word_search_score(self.puzzle.placements.len(), self.errors)
    }

    pub fn payload(&self) -> ScorePayload {
        let (score, max_score) = self.score();
        ScorePayload {
            score,
            max_score,
            completed: self.phase == Phase::Completed,
            duration_seconds: self.stopwatch.elapsed_seconds(self.clock.now()),
            metadata: AttemptMetadata::WordSearch {
                words_found: self.found.len(),
                total_words: self.puzzle.placements.len(),
                errors: self.errors,
                failed_words: self.puzzle.failed_words.clone(),
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
            "Word search completed"
        );
        if let Err(err) = self.sink.save_attempt(&self.game_id, &payload) {
            warn!(game_id = %self.game_id, %err, "Could not save attempt");
        }
    }

    /// Leaves the game. Nothing is saved unless it was already completed.
    pub fn abandon(self) {
        if self.phase != Phase::Completed {
            info!(game_id = %self.game_id, found = self.found.len(), "Word search abandoned");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        direction::Direction,
        grid::{Grid, GridCell},
        session::{score::MemorySink, test_clock::ManualClock},
    };

    /// GATO across row 0 and SOL down column 5 on an 8x8 grid of filler.
    fn puzzle() -> WordSearch {
        let placements = vec![
            Placement::along(0, "GATO", Cell::new(0, 0), Direction::Right).unwrap(),
            Placement::along(1, "SOL", Cell::new(2, 5), Direction::Down).unwrap(),
        ];
        let mut grid = Grid::new(8, 8);
        for row in &mut grid.cells {
            for space in row.iter_mut() {
                *space = Some(GridCell::new('X'));
            }
        }
        for placement in &placements {
            for (cell, letter) in placement.letters() {
                grid.set_letter(cell, letter);
            }
        }
        WordSearch {
            grid,
            placements,
            failed_words: vec!["HIPOPOTAMO".into()],
            quality: 2,
        }
    }

    fn session() -> (WordSearchSession<MemorySink, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let session =
            WordSearchSession::with_clock("sopa", puzzle(), MemorySink::default(), clock.clone())
                .unwrap();
        (session, clock)
    }

    #[test]
    fn drag_snaps_to_straight_lines() {
        let (mut session, _) = session();
        assert_eq!(session.phase(), Phase::NotStarted);
        assert!(session.pointer_down(Cell::new(0, 0)));
        assert_eq!(session.phase(), Phase::InProgress);
        assert_eq!(session.pointer_move(Cell::new(0, 2)).unwrap().len(), 3);
        // Knight move keeps the previous straight preview.
        assert_eq!(session.pointer_move(Cell::new(2, 3)).unwrap().len(), 3);
        assert_eq!(session.pointer_move(Cell::new(3, 3)).unwrap().len(), 4);
        assert_eq!(session.pointer_up().unwrap().last(), Some(&Cell::new(3, 3)));
        assert!(session.preview().is_none());
    }

    #[test]
    fn finding_every_word_completes_and_saves_once() {
        let (mut session, clock) = session();
        session.select(Cell::new(0, 3), Cell::new(0, 0));
        assert_eq!(
            session.check(),
            CheckOutcome::Found {
                placement_id: 0,
                completed: false
            }
        );

        session.select(Cell::new(5, 5), Cell::new(5, 7));
        assert_eq!(session.check(), CheckOutcome::Miss);

        clock.advance(Duration::from_secs(30));
        session.select(Cell::new(2, 5), Cell::new(4, 5));
        assert_eq!(
            session.check(),
            CheckOutcome::Found {
                placement_id: 1,
                completed: true
            }
        );
        assert_eq!(session.phase(), Phase::Completed);
        assert!(!session.pointer_down(Cell::new(0, 0)));
        assert_eq!(session.check(), CheckOutcome::NoSelection);

        let attempts = &session.sink().attempts;
        assert_eq!(attempts.len(), 1);
        let payload = &attempts[0].payload;
        assert_eq!(attempts[0].game_id, "sopa");
        assert_eq!((payload.score, payload.max_score), (18, 20));
        assert!(payload.completed);
        assert_eq!(payload.duration_seconds, 30);
        assert_eq!(
            payload.metadata,
            AttemptMetadata::WordSearch {
                words_found: 2,
                total_words: 2,
                errors: 1,
                failed_words: vec!["HIPOPOTAMO".into()],
            }
        );
    }

    #[test]
    fn refinding_a_word_does_not_count_twice() {
        let (mut session, _) = session();
        session.select(Cell::new(2, 5), Cell::new(4, 5));
        session.check();
        session.select(Cell::new(2, 5), Cell::new(4, 5));
        assert_eq!(session.check(), CheckOutcome::Miss);
        assert_eq!(session.found_count(), 1);
    }

    #[test]
    fn check_without_selection_is_harmless() {
        let (mut session, _) = session();
        assert_eq!(session.check(), CheckOutcome::NoSelection);
        assert_eq!(session.errors(), 0);
    }

    #[test]
    fn abandoning_saves_nothing() {
        let (mut session, _) = session();
        session.select(Cell::new(0, 0), Cell::new(0, 3));
        session.check();
        assert!(session.sink().attempts.is_empty());
        session.abandon();
    }

    #[test]
    fn empty_puzzle_is_not_playable() {
        let mut empty = puzzle();
        empty.placements.clear();
        let err = WordSearchSession::new("sopa", empty, MemorySink::default()).err();
        assert_eq!(
            err,
            Some(ConfigurationError::TooFewPlacements {
                placed: 0,
                required: 1
            })
        );
    }
}
