//! Word search and crossword puzzles for vocabulary practice.
//!
//! Two generators turn a word list into a placed grid:
//! [`word_search::generate`] scatters words in eight directions and fills the
//! rest with noise letters, while [`crossword::generate`] interlocks clued words
//! and centers them in a square. Sessions in [`session`] wrap a generated
//! puzzle with the state of one round of play and hand a score to an
//! [`AttemptSink`](session::AttemptSink) when the round is won.

pub mod config;
pub mod crossword;
pub mod direction;
pub mod error;
pub mod grid;
pub mod normalize;
pub mod placement;
pub mod random;
pub mod selection;
pub mod session;
pub mod word_search;

pub use config::{CrosswordConfig, GameConfig, WordSearchConfig};
pub use crossword::{ClueEntry, Crossword};
pub use direction::{Axis, Direction};
pub use error::{ConfigurationError, LoadError, SaveError};
pub use grid::{Cell, Grid, GridCell};
pub use placement::Placement;
pub use random::{RandomSource, Seed};
pub use selection::{resolve_path, CellPath};
pub use session::{CrosswordSession, Phase, ScorePayload, WordSearchSession};
pub use word_search::WordSearch;
