//! Spoken-number lookup across English, transliterated Hindi/Marathi and
//! native Devanagari digit words (one through ten).

use once_cell::sync::Lazy;
use std::collections::HashMap;

static NUMBER_WORDS: Lazy<HashMap<&'static str, i64>> = Lazy::new(|| {
    HashMap::from([
        // English
        ("one", 1),
        ("two", 2),
        ("three", 3),
        ("four", 4),
        ("five", 5),
        ("six", 6),
        ("seven", 7),
        ("eight", 8),
        ("nine", 9),
        ("ten", 10),
        // Transliterated Hindi / Marathi
        ("ek", 1),
        ("do", 2),
        ("don", 2),
        ("teen", 3),
        ("char", 4),
        ("chaar", 4),
        ("panch", 5),
        ("paanch", 5),
        ("pach", 5),
        ("chhe", 6),
        ("cheh", 6),
        ("saha", 6),
        ("saat", 7),
        ("aath", 8),
        ("nau", 9),
        ("das", 10),
        ("dus", 10),
        ("daha", 10),
        // Devanagari (Hindi)
        ("एक", 1),
        ("दो", 2),
        ("तीन", 3),
        ("चार", 4),
        ("पांच", 5),
        ("पाँच", 5),
        ("छह", 6),
        ("सात", 7),
        ("आठ", 8),
        ("नौ", 9),
        ("दस", 10),
        // Devanagari (Marathi)
        ("दोन", 2),
        ("पाच", 5),
        ("सहा", 6),
        ("नऊ", 9),
        ("दहा", 10),
    ])
});

/// Parses a quantity token: numeric parse first (thousands separators
/// stripped), then the case-insensitive multilingual word table. `None` means
/// the caller should fall back to its policy default, never an error.
pub fn to_number(token: &str) -> Option<i64> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return None;
    }

    let digits: String = trimmed.chars().filter(|c| *c != ',').collect();
    if let Ok(n) = digits.parse::<i64>() {
        return Some(n);
    }

    NUMBER_WORDS.get(trimmed.to_lowercase().as_str()).copied()
}

/// The word alternatives, for embedding into the parser's quantity pattern.
pub fn number_word_alternation() -> String {
    let mut words: Vec<&str> = NUMBER_WORDS.keys().copied().collect();
    // Longest first so e.g. "chaar" wins over "char" inside an alternation.
    words.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    words.join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_parse_first() {
        assert_eq!(to_number("7"), Some(7));
        assert_eq!(to_number("42"), Some(42));
        assert_eq!(to_number("1,000"), Some(1000));
    }

    #[test]
    fn multilingual_words() {
        assert_eq!(to_number("दो"), Some(2));
        assert_eq!(to_number("three"), Some(3));
        assert_eq!(to_number("Teen"), Some(3));
        assert_eq!(to_number("paanch"), Some(5));
        assert_eq!(to_number("दहा"), Some(10));
    }

    #[test]
    fn unknown_token_is_none() {
        assert_eq!(to_number("xyz"), None);
        assert_eq!(to_number(""), None);
        assert_eq!(to_number("   "), None);
    }
}
