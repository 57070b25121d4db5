//! Play sessions: the mutable state wrapped around a generated puzzle while a
//! player works on it.
//!
//! A session is owned by whoever mounted the game and is driven by calling its
//! event methods. It reports exactly one [`ScorePayload`] to its
//! [`AttemptSink`] when the puzzle is finished; dropping or
//! abandoning it before then saves nothing.

mod crossword;
mod score;
mod word_search;

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

pub use crossword::{Arrow, CrosswordSession, EntryOutcome, VerifyReport};
pub use score::{
    crossword_score, word_search_score, AttemptMetadata, AttemptSink, JsonLinesSink, MemorySink,
    SavedAttempt, ScorePayload, CROSSWORD_ERROR_COST, HINT_COST, POINTS_PER_LETTER,
    POINTS_PER_WORD, WORD_SEARCH_ERROR_COST,
};
pub use word_search::{CheckOutcome, WordSearchSession};

/// Where a session is in its lifecycle. There is no paused state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    NotStarted,
    InProgress,
    Completed,
}

/// Source of the current time, replaceable in tests.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Elapsed play time, frozen once stopped.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stopwatch {
    started: Option<Instant>,
    stopped: Option<Instant>,
}

impl Stopwatch {
    /// Starts timing unless already started.
    pub fn start(&mut self, now: Instant) {
        self.started.get_or_insert(now);
    }

    pub fn stop(&mut self, now: Instant) {
        if self.started.is_some() {
            self.stopped.get_or_insert(now);
        }
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.started {
            Some(started) => self.stopped.unwrap_or(now).saturating_duration_since(started),
            None => Duration::ZERO,
        }
    }

    /// Whole seconds, as shown by the once-a-second timer display.
    pub fn elapsed_seconds(&self, now: Instant) -> u64 {
        self.elapsed(now).as_secs()
    }
}
