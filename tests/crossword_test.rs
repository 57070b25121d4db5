//! Properties of generated crosswords.

use std::collections::HashSet;

use word_puzzles::{crossword, placement::overlaps_agree, Axis, ClueEntry, Crossword, Seed};

fn clues(entries: &[(&str, &str)]) -> Vec<ClueEntry> {
    entries
        .iter()
        .map(|(word, clue)| ClueEntry::new(*word, *clue))
        .collect()
}

fn assert_well_formed(puzzle: &Crossword) {
    assert!(puzzle.grid.is_square());
    assert!(puzzle.placements.len() >= 2);
    assert!(overlaps_agree(&puzzle.placements));

    for (index, placement) in puzzle.placements.iter().enumerate() {
        assert_eq!(placement.id, index);
        assert!(placement.is_valid_in(&puzzle.grid));
        assert!(placement.axis().is_some());
        let start = placement.start().unwrap();
        assert_eq!(puzzle.grid.get(start).unwrap().number, placement.number);
    }

    let numbers: Vec<u32> = puzzle.placements.iter().filter_map(|p| p.number).collect();
    assert_eq!(numbers.len(), puzzle.placements.len());
    assert!(numbers.windows(2).all(|pair| pair[0] <= pair[1]));
    let distinct: HashSet<u32> = numbers.iter().copied().collect();
    assert_eq!(distinct.len() as u32, *numbers.last().unwrap());

    // No word runs on into a letter past either end.
    for placement in &puzzle.placements {
        for cell in placement.continuation_cells() {
            assert_eq!(puzzle.grid.letter(cell), None, "{} runs on at {cell}", placement.word);
        }
    }

    // Every used cell belongs to some word.
    for (cell, _) in puzzle.grid.used_cells() {
        assert!(puzzle.placements.iter().any(|p| p.contains(cell)));
    }

    // The used area is centered, leftover padding split with the extra on the far side.
    let bbox = puzzle.grid.bounding_box().unwrap();
    let size = puzzle.grid.width;
    assert_eq!(bbox.min_row, (size - bbox.height()) / 2);
    assert_eq!(bbox.min_col, (size - bbox.width()) / 2);
}

#[test]
fn interlocking_words_form_a_valid_puzzle() {
    let entries = clues(&[
        ("casa", "Donde vives"),
        ("sopa", "Se toma con cuchara"),
        ("pato", "Ave que nada"),
        ("mapa", "Muestra el camino"),
        ("tomate", "Fruto rojo"),
    ]);
    for trial in 0..50u8 {
        let puzzle = crossword::generate(&entries, &mut Seed([trial; 32]).rng()).unwrap();
        assert_well_formed(&puzzle);
        assert_eq!(
            puzzle.max_score(),
            puzzle.placements.iter().map(|p| p.len() as u32 * 10).sum::<u32>()
        );
    }
}

#[test]
fn clues_travel_with_their_words() {
    let puzzle = crossword::generate(
        &clues(&[("gato", "Animal"), ("sol", "Astro")]),
        &mut Seed([7; 32]).rng(),
    )
    .unwrap();
    let across: Vec<_> = puzzle.clues(Axis::Across).collect();
    let down: Vec<_> = puzzle.clues(Axis::Down).collect();
    assert_eq!(across.len(), 1);
    assert_eq!(down.len(), 1);
    assert_eq!(across[0].word, "GATO");
    assert_eq!(across[0].clue.as_deref(), Some("Animal"));
    assert_eq!(down[0].clue.as_deref(), Some("Astro"));
}

#[test]
fn placements_serialize_with_their_axis() {
    let puzzle = crossword::generate(
        &clues(&[("gato", "Animal"), ("sol", "Astro")]),
        &mut Seed([7; 32]).rng(),
    )
    .unwrap();
    let json = serde_json::to_value(&puzzle).unwrap();
    let axes: Vec<_> = json["placements"]
        .as_array()
        .unwrap()
        .iter()
        .map(|placement| placement["axis"].as_str().unwrap())
        .collect();
    assert_eq!(axes, ["across", "down"]);
}

#[test]
fn words_without_a_crossing_are_left_out() {
    let puzzle = crossword::generate(
        &clues(&[("gato", ""), ("sol", ""), ("zzz", "")]),
        &mut Seed([1; 32]).rng(),
    )
    .unwrap();
    assert_eq!(puzzle.placements.len(), 2);
    assert!(puzzle.placements.iter().all(|p| p.word != "ZZZ"));
    assert_well_formed(&puzzle);
}

#[test]
fn nothing_to_cross_means_no_puzzle() {
    let entries = clues(&[("gato", ""), ("sur", "")]);
    assert!(crossword::generate(&entries, &mut Seed([0; 32]).rng()).is_none());
    assert!(crossword::generate(&clues(&[("gato", "")]), &mut Seed([0; 32]).rng()).is_none());
}

#[test]
fn large_word_lists_never_join_words_end_to_end() {
    let entries = clues(&[
        ("casa", ""),
        ("sopa", ""),
        ("pato", ""),
        ("mapa", ""),
        ("oso", ""),
        ("tomate", ""),
        ("gato", ""),
        ("perro", ""),
        ("luna", ""),
        ("sol", ""),
        ("mesa", ""),
        ("rosa", ""),
        ("palo", ""),
        ("naranja", ""),
    ]);
    for trial in 0..=255u8 {
        let puzzle = crossword::generate(&entries, &mut Seed([trial; 32]).rng()).unwrap();
        assert_well_formed(&puzzle);
    }
}
