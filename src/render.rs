//! Text and HTML renderings of generated puzzles.

use html::tables::{Table, TableCell, TableRow};
use itertools::{Itertools, Position};
use std::fmt::Write;
use word_puzzles::{
    grid::{Cell, Grid},
    Axis, Crossword, Placement, WordSearch,
};

const TEXT_INSIDE_SPACING: &str = "   ";

/// The grid followed by the list of words to find.
pub struct WordSearchText<'a>(pub &'a WordSearch);

impl std::fmt::Display for WordSearchText<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let puzzle = self.0;
        let words: Vec<&str> = puzzle.placements.iter().map(|p| p.word.as_str()).collect();
        writeln!(f)?;
        writeln!(f, "{}", puzzle.grid)?;
        writeln!(f, "Word List ({}):", words.len())?;
        writeln!(f)?;
        let max_word_len = words.iter().map(|w| w.chars().count()).max().unwrap_or(1);
        let n_columns =
            ((puzzle.width() * (1 + TEXT_INSIDE_SPACING.len())) / (max_word_len + 3)).max(1);
        to_text_columns(f, &words, n_columns, max_word_len)
    }
}

fn to_text_columns(
    mut f: impl Write,
    words: &[&str],
    n_columns: usize,
    max_word_len: usize,
) -> std::fmt::Result {
    for row in &words.iter().chunks(n_columns) {
        for word in row {
            write!(f, "* {word:<max_word_len$}  ")?;
        }
        writeln!(f)?;
    }
    Ok(())
}

/// Where each word is hidden.
pub fn word_search_key(puzzle: &WordSearch) -> String {
    puzzle
        .placements
        .iter()
        .sorted_by(|a, b| a.word.cmp(&b.word))
        .filter_map(|placement| {
            let start = placement.start()?;
            Some(format!("{}: {start}, {}", placement.word, placement.direction))
        })
        .join("\n")
}

/// Blank crossword grid with clue numbers, then the clues by axis.
pub struct CrosswordText<'a>(pub &'a Crossword);

impl std::fmt::Display for CrosswordText<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        for row in &self.0.grid.cells {
            for (position, space) in row.iter().with_position() {
                if matches!(position, Position::Middle | Position::Last) {
                    f.write_char(' ')?;
                }
                match space {
                    Some(grid_cell) => match grid_cell.number {
                        Some(number) => write!(f, "{number:>2}")?,
                        None => f.write_str(" .")?,
                    },
                    None => f.write_str(" #")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "{}", CrosswordClues(self.0))
    }
}

/// Clues listed under `Across:` and `Down:` in number order.
pub struct CrosswordClues<'a>(pub &'a Crossword);

impl std::fmt::Display for CrosswordClues<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for axis in [Axis::Across, Axis::Down] {
            writeln!(f)?;
            writeln!(f, "{axis}:")?;
            for placement in self.0.clues(axis) {
                writeln!(f, "  {}", clue_line(placement))?;
            }
        }
        Ok(())
    }
}

pub fn clue_line(placement: &Placement) -> String {
    format!(
        "{}. {} ({})",
        placement.number.unwrap_or_default(),
        placement.clue.as_deref().unwrap_or(""),
        placement.len()
    )
}

/// Rows of `grid` drawn with `cell_text` for used cells and `#` elsewhere.
pub fn board(grid: &Grid, cell_text: impl Fn(Cell) -> char) -> String {
    grid.cells
        .iter()
        .enumerate()
        .map(|(row_no, row)| {
            row.iter()
                .enumerate()
                .map(|(col_no, space)| match space {
                    Some(_) => cell_text(Cell::new(row_no, col_no)),
                    None => '#',
                })
                .join(TEXT_INSIDE_SPACING)
        })
        .join("\n")
}

fn document(title: &str, tables: Vec<Table>, sections: Vec<(String, Table)>) -> String {
    let mut doc = html::root::Html::builder();
    let mut body = html::root::Body::builder();
    doc.style("font-family: Arial");
    body.push(
        html::content::Heading1::builder()
            .style("text-align: center")
            .text(title.to_string())
            .build(),
    );
    for table in tables {
        body.push(table);
    }
    for (heading, table) in sections {
        body.push(
            html::content::Heading1::builder()
                .style("padding-top: 20px; text-align: center")
                .text(heading)
                .build(),
        );
        body.push(table);
    }
    doc.push(body.build());
    doc.build().to_string()
}

fn grid_table(grid: &Grid, cell: impl Fn(Option<&word_puzzles::GridCell>) -> (String, &'static str)) -> Table {
    let mut puzzle_table = Table::builder();
    puzzle_table
        .style(r#"font-family: Monaco, monospace; font-size: 20px; border: 1px solid; margin-left: auto; margin-right: auto; margin-top: 40px; padding: 20px"#);
    for row in &grid.cells {
        let mut html_row = TableRow::builder();
        html_row.style("height: 30px");
        for space in row {
            let (text, style) = cell(space.as_ref());
            html_row.push(TableCell::builder().text(text).style(style).build());
        }
        puzzle_table.push(html_row.build());
    }
    puzzle_table.build()
}

fn list_table(entries: &[String]) -> Table {
    let mut words_table = Table::builder();
    words_table.style("font-family: Monaco, monospace, font-size: 20px; margin-left: auto; margin-right: auto; border: 0px solid black");
    let mut words_table_row = TableRow::builder();
    for entries_in_col in &entries.iter().chunks(((entries.len() + 2) / 3).max(1)) {
        let mut entry_col = TableCell::builder();
        entry_col
            .style("font-family: Monaco, monospace; font-size: 14px; vertical-align: top; padding-right: 2em; padding-left: 2em");
        for entry in entries_in_col {
            entry_col.text(entry.to_string()).text("</br>");
        }
        words_table_row.push(entry_col.build());
    }
    words_table.push(words_table_row.build());
    words_table.build()
}

pub fn word_search_html(puzzle: &WordSearch, title: Option<&str>) -> String {
    let table = grid_table(&puzzle.grid, |space| {
        let text = space.map(|cell| cell.letter.to_string()).unwrap_or_default();
        (text, "text-align: center; width: 30px")
    });
    let words: Vec<String> = puzzle.placements.iter().map(|p| p.word.clone()).collect();
    document(
        title.unwrap_or("Word Search"),
        vec![table],
        vec![("Word List".to_string(), list_table(&words))],
    )
}

pub fn crossword_html(crossword: &Crossword, title: Option<&str>) -> String {
    let table = grid_table(&crossword.grid, |space| match space {
        Some(cell) => (
            cell.number.map(|n| n.to_string()).unwrap_or_default(),
            "vertical-align: top; font-size: 10px; width: 30px; border: 1px solid black",
        ),
        None => (String::new(), "width: 30px; background: black"),
    });
    let sections = [Axis::Across, Axis::Down]
        .into_iter()
        .map(|axis| {
            let clues: Vec<String> = crossword.clues(axis).map(clue_line).collect();
            (axis.to_string(), list_table(&clues))
        })
        .collect();
    document(title.unwrap_or("Crossword"), vec![table], sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use word_puzzles::{crossword, word_search, ClueEntry, Seed};

    fn gato_sol() -> Crossword {
        crossword::generate(
            &[ClueEntry::new("GATO", "Animal"), ClueEntry::new("SOL", "Astro")],
            &mut Seed([0; 32]).rng(),
        )
        .unwrap()
    }

    #[test]
    fn crossword_text_hides_answers() {
        let text = CrosswordText(&gato_sol()).to_string();
        assert!(text.contains(" #  #  #  2\n 1  .  .  ."));
        assert!(text.contains("  1. Animal (4)"));
        assert!(text.contains("  2. Astro (3)"));
        assert!(!text.contains("GATO"));
    }

    #[test]
    fn clues_are_grouped_by_axis() {
        assert_eq!(
            CrosswordClues(&gato_sol()).to_string(),
            "\nAcross:\n  1. Animal (4)\n\nDown:\n  2. Astro (3)\n"
        );
    }

    #[test]
    fn word_search_text_lists_words_in_columns() {
        let puzzle = word_search::generate(&["sol", "luna"], 8, 8, &mut Seed([2; 32]).rng());
        let text = WordSearchText(&puzzle).to_string();
        assert!(text.contains("Word List (2):\n\n* LUNA  * SOL   \n"));
    }

    #[test]
    fn board_marks_unused_cells() {
        let crossword = gato_sol();
        let drawn = board(&crossword.grid, |_| '.');
        assert_eq!(drawn.lines().next(), Some("#   #   #   ."));
    }
}
