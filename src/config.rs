//! Game configuration as authored by the surrounding application, and loading
//! it from JSON documents or plain word list files.

use serde::{Deserialize, Serialize};
use std::{
    io::{BufRead, BufReader},
    path::Path,
};
use tracing::{debug, instrument};

use crate::{
    crossword::{ClueEntry, MIN_PLACED_WORDS},
    error::{ConfigurationError, LoadError},
    normalize::usable_word,
};

/// Smallest word search side.
pub const MIN_SIDE: usize = 8;
/// Largest word search side.
pub const MAX_SIDE: usize = 20;

/// A round of either game, as stored by the content admin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameConfig {
    WordSearch(WordSearchConfig),
    Crossword(CrosswordConfig),
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            GameConfig::WordSearch(config) => config.title.as_deref(),
            GameConfig::Crossword(config) => config.title.as_deref(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordSearchConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub words: Vec<String>,
    /// Defaults to the longest word.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_width: Option<usize>,
    /// Defaults to the width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_height: Option<usize>,
}

impl WordSearchConfig {
    pub fn new<S: Into<String>>(words: impl IntoIterator<Item = S>) -> Self {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.grid_width = Some(width);
        self.grid_height = Some(height);
        self
    }

    /// Words left after normalization.
    pub fn usable_words(&self) -> Vec<String> {
        self.words.iter().filter_map(|word| usable_word(word)).collect()
    }

    /// `(width, height)`, each clamped to `MIN_SIDE..=MAX_SIDE`.
    pub fn dimensions(&self) -> (usize, usize) {
        let longest = self
            .usable_words()
            .iter()
            .map(|word| word.chars().count())
            .max()
            .unwrap_or(MIN_SIDE);
        let width = self.grid_width.unwrap_or(longest).clamp(MIN_SIDE, MAX_SIDE);
        let height = self.grid_height.unwrap_or(width).clamp(MIN_SIDE, MAX_SIDE);
        (width, height)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let found = self.usable_words().len();
        if found == 0 {
            return Err(ConfigurationError::TooFewWords { found, required: 1 });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosswordConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub clues: Vec<ClueEntry>,
}

impl CrosswordConfig {
    pub fn new(clues: impl IntoIterator<Item = ClueEntry>) -> Self {
        Self {
            title: None,
            clues: clues.into_iter().collect(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let found = self
            .clues
            .iter()
            .filter(|entry| usable_word(&entry.word).is_some())
            .count();
        if found < MIN_PLACED_WORDS {
            return Err(ConfigurationError::TooFewClues {
                found,
                required: MIN_PLACED_WORDS,
            });
        }
        Ok(())
    }
}

/// Lines of a plain word list file: `#` lines set the title, blank lines are
/// skipped, everything else is an entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordList {
    pub title: Option<String>,
    pub entries: Vec<String>,
}

impl WordList {
    pub fn read(input: impl BufRead) -> Result<Self, LoadError> {
        let mut list = WordList::default();
        for line in input.lines() {
            let line = line?;
            if let Some(s) = line.strip_prefix('#') {
                list.title = Some(s.trim().to_owned());
            } else if !line.trim().is_empty() {
                list.entries.push(line.trim().to_owned());
            }
        }

        if list.entries.is_empty() {
            return Err(LoadError::Empty);
        }
        Ok(list)
    }

    pub fn into_word_search(self) -> WordSearchConfig {
        WordSearchConfig {
            title: self.title,
            words: self.entries,
            ..WordSearchConfig::default()
        }
    }

    /// Entries are `WORD: clue`; an entry without a colon has an empty clue.
    pub fn into_crossword(self) -> CrosswordConfig {
        let clues = self
            .entries
            .iter()
            .map(|entry| match entry.split_once(':') {
                Some((word, clue)) => ClueEntry::new(word.trim(), clue.trim()),
                None => ClueEntry::new(entry.as_str(), ""),
            })
            .collect();
        CrosswordConfig {
            title: self.title,
            clues,
        }
    }
}

/// Reads a game file: `.json` files hold a [`GameConfig`], anything else is a
/// plain word list. A path of `-` reads a word list from stdin.
#[instrument]
pub fn load(path: &Path) -> Result<Source, LoadError> {
    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
        let config = GameConfig::from_json(&std::fs::read_to_string(path)?)?;
        debug!(title = ?config.title(), "Loaded game configuration");
        return Ok(Source::Config(config));
    }

    let input = if path.to_str() == Some("-") {
        Box::new(BufReader::new(std::io::stdin())) as Box<dyn BufRead>
    } else {
        Box::new(BufReader::new(std::fs::File::open(path)?)) as Box<dyn BufRead>
    };
    let list = WordList::read(input)?;
    debug!(entries = list.entries.len(), "Loaded word list");
    Ok(Source::WordList(list))
}

/// What [`load`] found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Config(GameConfig),
    WordList(WordList),
}
