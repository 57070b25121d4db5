//! Command-line interface for word-puzzles.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Generate and play word searches and crosswords
#[derive(Parser, Debug)]
#[command(name = "word-puzzles")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a word search from a word list
    WordSearch(WordSearchArgs),

    /// Build a crossword from `WORD: clue` lines
    Crossword(CrosswordArgs),
}

#[derive(Args, Debug)]
pub struct WordSearchArgs {
    /// Puzzle width.  Defaults to the longest word, clamped to 8-20
    #[arg(long)]
    pub width: Option<usize>,

    /// Puzzle height. Defaults to the puzzle width.
    #[arg(long)]
    pub height: Option<usize>,

    /// Maximum computation time.  Longer allows for fewer omitted words and
    /// more crossings.
    #[arg(long, default_value = "1s")]
    pub time_limit: humantime::Duration,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct CrosswordArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Seed to regenerate a puzzle
    #[arg(long)]
    pub seed: Option<String>,

    /// Output type
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Play the puzzle in the terminal after printing it
    #[arg(long)]
    pub play: bool,

    /// Append finished attempts as JSON lines to this file instead of stdout
    #[arg(long)]
    pub attempts: Option<PathBuf>,

    /// Identifier stored with saved attempts
    #[arg(long, default_value = "local")]
    pub game_id: String,

    /// Word list file, `.json` game configuration, or `-` for stdin
    pub words: PathBuf,
}

#[derive(Default, Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}
