#![recursion_limit = "512"]

mod cli;
mod play;
mod render;

use anyhow::{anyhow, bail, Context as _, Result};
use clap::Parser;
use std::{
    fs::OpenOptions,
    io::{self, Write},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use word_puzzles::{
    config::{self, Source},
    crossword,
    session::JsonLinesSink,
    word_search, CrosswordConfig, CrosswordSession, GameConfig, Seed, WordSearchConfig,
    WordSearchSession,
};

use cli::{Cli, Command, CommonArgs, CrosswordArgs, OutputFormat, WordSearchArgs};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::WordSearch(args) => run_word_search(args),
        Command::Crossword(args) => run_crossword(args),
    }
}

fn load_source(common: &CommonArgs) -> Result<Source> {
    if common.play && common.words.to_str() == Some("-") {
        bail!("--play reads moves from stdin, so the word list must come from a file");
    }
    config::load(&common.words).with_context(|| format!("loading {}", common.words.display()))
}

fn parse_seed(common: &CommonArgs) -> Result<Option<Seed>> {
    Ok(common.seed.as_deref().map(Seed::from_hex).transpose()?)
}

/// Where finished attempts go: appended to `--attempts`, or printed.
fn attempt_sink(common: &CommonArgs) -> Result<JsonLinesSink<Box<dyn Write>>> {
    let writer: Box<dyn Write> = match &common.attempts {
        Some(path) => Box::new(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    Ok(JsonLinesSink::new(writer))
}

fn run_word_search(args: WordSearchArgs) -> Result<()> {
    let mut config: WordSearchConfig = match load_source(&args.common)? {
        Source::WordList(list) => list.into_word_search(),
        Source::Config(GameConfig::WordSearch(config)) => config,
        Source::Config(GameConfig::Crossword(_)) => {
            bail!("{} holds a crossword, not a word search", args.common.words.display())
        }
    };
    if let Some(width) = args.width {
        config.grid_width = Some(width);
    }
    if let Some(height) = args.height {
        config.grid_height = Some(height);
    }
    config.validate()?;
    let (width, height) = config.dimensions();
    info!(width, height, words = config.words.len(), "Building word search");

    let generated = match parse_seed(&args.common)? {
        Some(seed) => word_search::generate_seeded(config.words.as_slice(), width, height, seed),
        None => {
            let (best, iterations) = word_search::generate_best(
                config.words.as_slice(),
                width,
                height,
                args.time_limit.into(),
            )
            .map_err(|err| anyhow!("Getting a random seed: {err}"))?;
            eprintln!(
                "Best grid score out of {iterations} iterations: {}",
                best.puzzle.quality
            );
            best
        }
    };
    let puzzle = generated.puzzle;

    match args.common.format {
        OutputFormat::Text => {
            println!("{}", render::WordSearchText(&puzzle));
            eprintln!();
            eprintln!("Seed: {}", generated.seed);
            eprintln!("Key:");
            eprintln!("{}", render::word_search_key(&puzzle));
        }
        OutputFormat::Html => print!(
            "{}",
            render::word_search_html(&puzzle, config.title.as_deref())
        ),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&puzzle)?),
    }
    if !puzzle.failed_words.is_empty() {
        eprintln!("Omitted: {}", puzzle.failed_words.join(", "));
    }

    if args.common.play {
        let session = WordSearchSession::new(&args.common.game_id, puzzle, attempt_sink(&args.common)?)?;
        play::word_search(session, io::stdin().lock(), io::stdout())?;
    }
    Ok(())
}

fn run_crossword(args: CrosswordArgs) -> Result<()> {
    let config: CrosswordConfig = match load_source(&args.common)? {
        Source::WordList(list) => list.into_crossword(),
        Source::Config(GameConfig::Crossword(config)) => config,
        Source::Config(GameConfig::WordSearch(_)) => {
            bail!("{} holds a word search, not a crossword", args.common.words.display())
        }
    };
    config.validate()?;

    let seed = match parse_seed(&args.common)? {
        Some(seed) => seed,
        None => Seed::fresh().map_err(|err| anyhow!("Getting a random seed: {err}"))?,
    };
    let puzzle = crossword::generate(&config.clues, &mut seed.rng()).ok_or_else(|| {
        anyhow!("Fewer than two words interlock. Add words that share letters.")
    })?;
    debug!(words = puzzle.placements.len(), size = puzzle.grid.width, "Built crossword");
    if puzzle.placements.len() < config.clues.len() {
        eprintln!(
            "Placed {} of {} words",
            puzzle.placements.len(),
            config.clues.len()
        );
    }

    match args.common.format {
        OutputFormat::Text => {
            println!("{}", render::CrosswordText(&puzzle));
            eprintln!();
            eprintln!("Seed: {seed}");
            eprintln!("Solution:");
            eprintln!("{}", puzzle.grid);
        }
        OutputFormat::Html => print!(
            "{}",
            render::crossword_html(&puzzle, config.title.as_deref())
        ),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&puzzle)?),
    }

    if args.common.play {
        let session = CrosswordSession::new(&args.common.game_id, puzzle, attempt_sink(&args.common)?)?;
        play::crossword(session, io::stdin().lock(), io::stdout())?;
    }
    Ok(())
}
