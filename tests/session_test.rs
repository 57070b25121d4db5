//! Full rounds of play through the public session API.

use word_puzzles::{
    session::{
        AttemptMetadata, CheckOutcome, EntryOutcome, JsonLinesSink, MemorySink, SavedAttempt,
        HINT_COST,
    },
    ClueEntry, ConfigurationError, CrosswordConfig, CrosswordSession, Phase, Seed,
    WordSearchConfig, WordSearchSession,
};

#[test]
fn word_search_round_finds_every_word() {
    let config = WordSearchConfig::new(["gato", "perro", "sol"]).with_size(10, 10);
    let mut session = WordSearchSession::from_config(
        "animales",
        &config,
        &mut Seed([8; 32]).rng(),
        JsonLinesSink::new(Vec::new()),
    )
    .unwrap();

    let targets: Vec<_> = session
        .placements()
        .iter()
        .map(|p| (p.cells[0], *p.cells.last().unwrap()))
        .collect();
    let last = targets.len() - 1;
    for (index, (start, end)) in targets.into_iter().enumerate() {
        // Dragging from the end of the word works as well as from the start.
        assert!(session.select(end, start).is_some());
        match session.check() {
            CheckOutcome::Found { completed, .. } => assert_eq!(completed, index == last),
            other => panic!("expected a find, got {other:?}"),
        }
    }
    assert_eq!(session.phase(), Phase::Completed);

    let (score, max_score) = session.score();
    assert_eq!(score, max_score);
    let payload = session.payload();
    assert!(payload.completed);
    assert_eq!(
        payload.metadata,
        AttemptMetadata::WordSearch {
            words_found: session.found_count(),
            total_words: session.placements().len(),
            errors: 0,
            failed_words: session.puzzle().failed_words.clone(),
        }
    );
}

#[test]
fn selecting_sol_finds_it_once() {
    let config = WordSearchConfig::new(["GATO", "PERRO", "SOL"]).with_size(10, 10);
    for trial in 0..20u8 {
        let mut session = WordSearchSession::from_config(
            "sopa",
            &config,
            &mut Seed([trial; 32]).rng(),
            MemorySink::default(),
        )
        .unwrap();
        let Some(sol) = session.placements().iter().find(|p| p.word == "SOL").cloned() else {
            assert!(session.puzzle().failed_words.contains(&"SOL".to_string()));
            continue;
        };
        let (start, end) = (sol.cells[0], sol.cells[2]);

        session.select(start, end);
        assert_eq!(
            session.check(),
            CheckOutcome::Found {
                placement_id: sol.id,
                completed: session.placements().len() == 1
            }
        );
        assert_eq!(session.found_count(), 1);
        if session.phase() == Phase::Completed {
            continue;
        }

        session.select(start, end);
        assert_eq!(session.check(), CheckOutcome::Miss);
        assert_eq!(session.found_count(), 1);
        assert_eq!(session.errors(), 1);
    }
}

#[test]
fn json_lines_sink_writes_one_line_per_attempt() {
    let config = CrosswordConfig::new([ClueEntry::new("gato", "Animal"), ClueEntry::new("sol", "Astro")]);
    let mut session = CrosswordSession::from_config(
        "cruci",
        &config,
        &mut Seed([3; 32]).rng(),
        JsonLinesSink::new(Vec::new()),
    )
    .unwrap();

    let solution: Vec<_> = session.puzzle().solution().collect();
    let mut outcome = EntryOutcome::Ignored;
    for (cell, letter) in solution {
        assert!(session.focus(cell));
        outcome = session.input(letter.to_ascii_lowercase());
    }
    assert_eq!(outcome, EntryOutcome::Completed);
    assert_eq!(session.score(), 70);

    let written = String::from_utf8(session.sink().get_ref().clone()).unwrap();
    let lines: Vec<_> = written.lines().collect();
    assert_eq!(lines.len(), 1);
    let attempt: SavedAttempt = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(attempt.game_id, "cruci");
    assert_eq!(attempt.payload.max_score, 70);
    assert!(attempt.payload.completed);
}

#[test]
fn crossword_solved_with_hints_only() {
    let config = CrosswordConfig::new([
        ClueEntry::new("casa", "Donde vives"),
        ClueEntry::new("sopa", "Se toma con cuchara"),
        ClueEntry::new("pato", "Ave que nada"),
    ]);
    let mut session = CrosswordSession::from_config(
        "pistas",
        &config,
        &mut Seed([5; 32]).rng(),
        MemorySink::default(),
    )
    .unwrap();

    let cells: Vec<_> = session.puzzle().solution().map(|(cell, _)| cell).collect();
    for &cell in &cells {
        session.focus(cell);
        session.hint();
    }
    assert_eq!(session.phase(), Phase::Completed);
    assert_eq!(session.hints_used() as usize, cells.len());
    assert_eq!(session.errors(), 0);

    let expected = session
        .puzzle()
        .max_score()
        .saturating_sub(cells.len() as u32 * HINT_COST);
    let attempts = &session.sink().attempts;
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].game_id, "pistas");
    assert_eq!(attempts[0].payload.score, expected);

    let line = serde_json::to_string(&attempts[0]).unwrap();
    assert!(line.contains(r#""game":"crossword""#));
    assert!(line.contains(r#""hintsUsed""#));
    let back: SavedAttempt = serde_json::from_str(&line).unwrap();
    assert_eq!(&back, &attempts[0]);
}

#[test]
fn unplayable_configurations_are_rejected() {
    let err = WordSearchSession::from_config(
        "vacia",
        &WordSearchConfig::new(["1", "a"]),
        &mut Seed([0; 32]).rng(),
        MemorySink::default(),
    )
    .err();
    assert_eq!(
        err,
        Some(ConfigurationError::TooFewWords {
            found: 0,
            required: 1
        })
    );

    let err = CrosswordSession::from_config(
        "sin-cruces",
        &CrosswordConfig::new([ClueEntry::new("gato", ""), ClueEntry::new("sur", "")]),
        &mut Seed([0; 32]).rng(),
        MemorySink::default(),
    )
    .err();
    assert!(matches!(err, Some(ConfigurationError::TooFewPlacements { .. })));
}
