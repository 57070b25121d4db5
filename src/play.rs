//! Line-oriented terminal play. Coordinates are 1-based `row col`.

use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;
use word_puzzles::{
    session::{Arrow, AttemptSink, CheckOutcome, EntryOutcome},
    Cell, CrosswordSession, Phase, WordSearchSession,
};

use crate::render::{board, clue_line};

const WORD_SEARCH_HELP: &str =
    "Commands: down R C, move R C, up, select R1 C1 R2 C2, check, board, quit";
const CROSSWORD_HELP: &str =
    "Commands: focus R C, type LETTERS, back, up/down/left/right, tab, prev, hint, verify, board, quit";

fn parse_cell<'a>(mut args: impl Iterator<Item = &'a str>) -> Option<Cell> {
    let row: usize = args.next()?.parse().ok()?;
    let col: usize = args.next()?.parse().ok()?;
    Some(Cell::new(row.checked_sub(1)?, col.checked_sub(1)?))
}

fn lower(letter: char) -> char {
    letter.to_lowercase().next().unwrap_or(letter)
}

fn word_search_board<S: AttemptSink>(session: &WordSearchSession<S>) -> String {
    let grid = &session.puzzle().grid;
    board(grid, |cell| {
        let letter = grid.letter(cell).unwrap_or(' ');
        let found = session
            .placements()
            .iter()
            .any(|placement| session.is_found(placement.id) && placement.contains(cell));
        if found {
            lower(letter)
        } else {
            letter
        }
    })
}

/// Plays a word search until every word is found or the player quits.
/// Found words are shown in lowercase.
pub fn word_search<S: AttemptSink>(
    mut session: WordSearchSession<S>,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<()> {
    writeln!(out, "{WORD_SEARCH_HELP}")?;
    for line in input.lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        debug!(command, "Word search command");

        match command {
            "down" => match parse_cell(words) {
                Some(cell) if session.pointer_down(cell) => (),
                _ => writeln!(out, "That cell is not on the board")?,
            },
            "move" => {
                let preview = match parse_cell(words) {
                    Some(cell) => session.pointer_move(cell),
                    None => None,
                };
                match preview {
                    Some(path) => writeln!(out, "Selecting {} cells", path.len())?,
                    None => writeln!(out, "Press down on a cell first")?,
                }
            }
            "up" => {
                if session.pointer_up().is_none() {
                    writeln!(out, "Nothing selected")?;
                }
            }
            "select" => {
                let (start, end) = (parse_cell(&mut words), parse_cell(&mut words));
                let selected = match (start, end) {
                    (Some(start), Some(end)) => session.select(start, end).is_some(),
                    _ => false,
                };
                if !selected {
                    writeln!(out, "That cell is not on the board")?;
                }
            }
            "check" => match session.check() {
                CheckOutcome::Found {
                    placement_id,
                    completed,
                } => {
                    let word = session
                        .placements()
                        .get(placement_id)
                        .map(|placement| placement.word.as_str())
                        .unwrap_or_default();
                    writeln!(
                        out,
                        "Found {word} ({}/{})",
                        session.found_count(),
                        session.placements().len()
                    )?;
                    if completed {
                        let (score, max_score) = session.score();
                        writeln!(out, "All words found! Score: {score}/{max_score}")?;
                        return Ok(());
                    }
                }
                CheckOutcome::Miss => writeln!(out, "No word there ({} errors)", session.errors())?,
                CheckOutcome::NoSelection => writeln!(out, "Select some letters first")?,
            },
            "board" => writeln!(out, "{}", word_search_board(&session))?,
            "quit" => break,
            _ => writeln!(out, "{WORD_SEARCH_HELP}")?,
        }
    }

    if session.phase() != Phase::Completed {
        writeln!(out, "Found {} of {} words", session.found_count(), session.placements().len())?;
    }
    session.abandon();
    Ok(())
}

fn crossword_board<S: AttemptSink>(session: &CrosswordSession<S>) -> String {
    board(session.grid(), |cell| {
        let Some(letter) = session.input_at(cell) else {
            return if session.selected() == Some(cell) { '_' } else { '.' };
        };
        match session.grid().get(cell).and_then(|grid_cell| grid_cell.correct) {
            Some(false) => lower(letter),
            _ => letter,
        }
    })
}

fn cursor_line<S: AttemptSink>(session: &CrosswordSession<S>) -> Option<String> {
    let cell = session.selected()?;
    let placement = session.active_placement()?;
    Some(format!("{cell} {}: {}", session.axis(), clue_line(placement)))
}

fn report_entry(out: &mut impl Write, outcome: EntryOutcome) -> std::io::Result<bool> {
    match outcome {
        EntryOutcome::Ignored => writeln!(out, "Focus a cell first")?,
        EntryOutcome::Accepted => (),
        EntryOutcome::FilledWithErrors { wrong } => {
            writeln!(out, "{wrong} letters are wrong, shown in lowercase")?
        }
        EntryOutcome::Completed => return Ok(true),
    }
    Ok(false)
}

/// Plays a crossword until it is solved or the player quits. Letters marked
/// wrong are shown in lowercase.
pub fn crossword<S: AttemptSink>(
    mut session: CrosswordSession<S>,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<()> {
    writeln!(out, "{CROSSWORD_HELP}")?;
    for line in input.lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        debug!(command, "Crossword command");

        let moved = match command {
            "focus" => parse_cell(words).is_some_and(|cell| session.focus(cell)),
            "up" => session.arrow(Arrow::Up),
            "down" => session.arrow(Arrow::Down),
            "left" => session.arrow(Arrow::Left),
            "right" => session.arrow(Arrow::Right),
            "tab" => session.tab(true),
            "prev" => session.tab(false),
            "back" => session.backspace(),
            "type" => {
                let mut solved = false;
                for letter in words.flat_map(str::chars) {
                    solved = report_entry(&mut out, session.input(letter))?;
                    if solved {
                        break;
                    }
                }
                if solved {
                    break;
                }
                true
            }
            "hint" => {
                if report_entry(&mut out, session.hint())? {
                    break;
                }
                true
            }
            "verify" => {
                let report = session.verify();
                writeln!(
                    out,
                    "{} right, {} wrong, {} empty",
                    report.correct, report.incorrect, report.empty
                )?;
                false
            }
            "board" => {
                writeln!(out, "{}", crossword_board(&session))?;
                false
            }
            "quit" => break,
            _ => {
                writeln!(out, "{CROSSWORD_HELP}")?;
                false
            }
        };
        if moved {
            if let Some(cursor) = cursor_line(&session) {
                writeln!(out, "{cursor}")?;
            }
        }
    }

    if session.phase() == Phase::Completed {
        writeln!(
            out,
            "Solved in {}s! Score: {}/{}",
            session.tick(),
            session.score(),
            session.puzzle().max_score()
        )?;
    }
    session.abandon();
    Ok(())
}
