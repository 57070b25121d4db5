//! Error types.
//!
//! Mistakes made while playing are not errors; these cover puzzles that cannot
//! be played, input that cannot be read and attempts that could not be saved.

use derive_more::{Display, Error};

/// A game configuration that does not yield a playable puzzle. The caller
/// shows this as a non-playable state with a way back to the menu.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ConfigurationError {
    #[display("Need at least {required} usable words, got {found}")]
    TooFewWords { found: usize, required: usize },

    #[display("Need at least {required} usable clues, got {found}")]
    TooFewClues { found: usize, required: usize },

    #[display("Only {placed} words could be placed, at least {required} are needed")]
    TooFewPlacements { placed: usize, required: usize },
}

/// The attempt sink could not store a finished game.
#[derive(Debug, Clone, Display, Error)]
#[display("Save error: {} at {}:{}", message, file, line)]
pub struct SaveError {
    pub message: String,
    pub line: u32,
    pub file: &'static str,
}

impl SaveError {
    /// Creates a save error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for SaveError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {err}"))
    }
}

impl From<serde_json::Error> for SaveError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Serialization error: {err}"))
    }
}

/// A word list or game configuration file that could not be loaded.
#[derive(Debug, Display, Error)]
pub enum LoadError {
    #[display("Reading word list: {_0}")]
    Io(std::io::Error),

    #[display("Parsing game configuration: {_0}")]
    Json(serde_json::Error),

    #[display("Word list is empty")]
    Empty,
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
