//! Properties of generated word searches across many seeds.

use word_puzzles::{
    normalize::ALPHABET, placement::overlaps_agree, word_search, Seed, WordSearchConfig,
};

#[test]
fn placed_words_read_out_of_the_grid() {
    let words = ["gato", "perro", "sol"];
    let mut trials_with_failures = 0;
    for trial in 0..100u8 {
        let puzzle = word_search::generate_seeded(&words, 10, 10, Seed([trial; 32])).puzzle;
        if !puzzle.failed_words.is_empty() {
            trials_with_failures += 1;
        }

        assert_eq!(puzzle.placements.len() + puzzle.failed_words.len(), 3);
        assert_eq!(puzzle.grid.used_cell_count(), 100);
        assert!(overlaps_agree(&puzzle.placements));
        for placement in &puzzle.placements {
            assert!(placement.is_valid_in(&puzzle.grid), "trial {trial}: {placement:?}");
            assert_eq!(
                puzzle.grid.letters_along(&placement.cells).as_deref(),
                Some(placement.word.as_str())
            );
        }
        assert!(puzzle
            .grid
            .used_cells()
            .all(|(_, cell)| ALPHABET.contains(&cell.letter)));
    }
    assert!(
        trials_with_failures <= 5,
        "{trials_with_failures} of 100 puzzles left a word out"
    );
}

#[test]
fn accented_words_are_placed_normalized() {
    let puzzle = word_search::generate_seeded(&["canción", "niño", "árbol"], 12, 12, Seed([4; 32]))
        .puzzle;
    let mut words: Vec<_> = puzzle.placements.iter().map(|p| p.word.clone()).collect();
    words.sort();
    assert_eq!(words, vec!["ARBOL", "CANCION", "NIÑO"]);
}

#[test]
fn word_too_long_for_the_grid_is_reported() {
    let config = WordSearchConfig::new(["sol", "luna", "estrellas"]).with_size(8, 8);
    let (width, height) = config.dimensions();
    let puzzle =
        word_search::generate_seeded(config.words.as_slice(), width, height, Seed([2; 32])).puzzle;
    assert_eq!(puzzle.failed_words, vec!["ESTRELLAS".to_string()]);
    assert_eq!(puzzle.placements.len(), 2);
}

#[test]
fn best_of_many_keeps_every_word_when_it_can() {
    let (best, iterations) = word_search::generate_best(
        &["gato", "perro", "sol", "luna"],
        10,
        10,
        std::time::Duration::from_millis(50),
    )
    .unwrap();
    assert!(iterations >= 1);
    assert!(best.puzzle.failed_words.is_empty());

    let again = word_search::generate_seeded(&["gato", "perro", "sol", "luna"], 10, 10, best.seed);
    assert_eq!(again.puzzle.grid, best.puzzle.grid);
}
