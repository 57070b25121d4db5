//! Reduction of raw vocabulary to the letters a puzzle grid can hold.

use unicode_normalization::UnicodeNormalization;

/// Every letter that may appear in a grid, noise letters included.
pub const ALPHABET: [char; 27] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'Ñ', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Shortest word either generator will place.
pub const MIN_WORD_LEN: usize = 2;

/// Uppercases `raw`, strips accents and drops everything outside `A-Z` and `Ñ`.
///
/// `Ñ` survives even though it decomposes to `N` plus a combining tilde, so
/// `"Niño"` becomes `"NIÑO"` while `"Canción"` becomes `"CANCION"`.
pub fn normalize_word(raw: &str) -> String {
    raw.nfc()
        .flat_map(char::to_uppercase)
        .filter_map(normalize_upper)
        .collect()
}

/// Normalizes a single typed character, as a crossword cell entry.
pub fn normalize_letter(c: char) -> Option<char> {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => normalize_upper(u),
        _ => None,
    }
}

fn normalize_upper(c: char) -> Option<char> {
    if c == 'Ñ' {
        return Some(c);
    }
    std::iter::once(c).nfd().find(char::is_ascii_uppercase)
}

/// Normalized word, or `None` when it is too short to place.
pub fn usable_word(raw: &str) -> Option<String> {
    let word = normalize_word(raw);
    (word.chars().count() >= MIN_WORD_LEN).then_some(word)
}
