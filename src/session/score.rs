use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::{debug, instrument};

use crate::error::SaveError;

/// Word search points per word found.
pub const POINTS_PER_WORD: u32 = 10;
/// Word search penalty per wrong selection.
pub const WORD_SEARCH_ERROR_COST: u32 = 2;
/// Crossword points per letter of every word.
pub const POINTS_PER_LETTER: u32 = 10;
/// Crossword penalty per wrong letter found on a full grid.
pub const CROSSWORD_ERROR_COST: u32 = 5;
/// Crossword penalty per revealed letter.
pub const HINT_COST: u32 = 3;

/// `(score, max_score)` for a word search with `words` placed words.
pub fn word_search_score(words: usize, errors: u32) -> (u32, u32) {
    let max_score = words as u32 * POINTS_PER_WORD;
    let score = max_score.saturating_sub(errors.saturating_mul(WORD_SEARCH_ERROR_COST));
    (score, max_score)
}

/// Crossword score out of `max_score`, never below zero.
pub fn crossword_score(max_score: u32, errors: u32, hints_used: u32) -> u32 {
    let penalty = errors
        .saturating_mul(CROSSWORD_ERROR_COST)
        .saturating_add(hints_used.saturating_mul(HINT_COST));
    max_score.saturating_sub(penalty)
}

/// What a finished game hands to persistence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorePayload {
    pub score: u32,
    pub max_score: u32,
    pub completed: bool,
    pub duration_seconds: u64,
    pub metadata: AttemptMetadata,
}

/// Game-specific counters stored with an attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "camelCase")]
pub enum AttemptMetadata {
    #[serde(rename_all = "camelCase")]
    WordSearch {
        words_found: usize,
        total_words: usize,
        errors: u32,
        failed_words: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    Crossword {
        words: usize,
        cells: usize,
        errors: u32,
        hints_used: u32,
    },
}

/// Where finished attempts go. Called once per completed session.
pub trait AttemptSink {
    fn save_attempt(&mut self, game_id: &str, payload: &ScorePayload) -> Result<(), SaveError>;
}

impl<F> AttemptSink for F
where
    F: FnMut(&str, &ScorePayload) -> Result<(), SaveError>,
{
    fn save_attempt(&mut self, game_id: &str, payload: &ScorePayload) -> Result<(), SaveError> {
        self(game_id, payload)
    }
}

/// An attempt as recorded by [`MemorySink`] and [`JsonLinesSink`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAttempt {
    pub game_id: String,
    #[serde(flatten)]
    pub payload: ScorePayload,
}

/// Keeps attempts in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub attempts: Vec<SavedAttempt>,
}

impl AttemptSink for MemorySink {
    fn save_attempt(&mut self, game_id: &str, payload: &ScorePayload) -> Result<(), SaveError> {
        self.attempts.push(SavedAttempt {
            game_id: game_id.to_owned(),
            payload: payload.clone(),
        });
        Ok(())
    }
}

/// Appends one JSON object per attempt to a writer.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> AttemptSink for JsonLinesSink<W> {
    #[instrument(skip(self, payload))]
    fn save_attempt(&mut self, game_id: &str, payload: &ScorePayload) -> Result<(), SaveError> {
        let attempt = SavedAttempt {
            game_id: game_id.to_owned(),
            payload: payload.clone(),
        };
        serde_json::to_writer(&mut self.writer, &attempt)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        debug!(score = payload.score, "Wrote attempt");
        Ok(())
    }
}
