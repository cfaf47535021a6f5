//! Phonetic corrections for misheard brand/product names.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Exact-match corrections for recognizer mishearings observed in the field.
/// Keys and values are lowercase with single spaces; every value must be a
/// fixed point of `normalize_name` so the function stays idempotent.
static PHONETIC_CORRECTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("chawanprash", "chyawanprash"),
        ("chavanprash", "chyawanprash"),
        ("chawan prash", "chyawanprash"),
        ("col gate", "colgate"),
        ("coal gate", "colgate"),
        ("कोलगेट", "colgate"),
        ("close up", "closeup"),
        ("duv", "dove"),
        ("dov", "dove"),
        ("parle ji", "parle-g"),
        ("parle gee", "parle-g"),
        ("harpik", "harpic"),
        ("serf excel", "surf excel"),
        ("weel", "vim"),
        ("ponds powder", "ponds"),
    ])
});

/// Lowercases, collapses whitespace and trims, then applies the phonetic
/// correction table. A small prefix rule catches the "dabur red ..." family
/// of mishearings before the cleaned string is returned unchanged.
///
/// Idempotent: `normalize_name(normalize_name(s)) == normalize_name(s)`.
pub fn normalize_name(raw: &str) -> String {
    let cleaned = raw
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if let Some(fixed) = PHONETIC_CORRECTIONS.get(cleaned.as_str()) {
        return (*fixed).to_string();
    }

    if cleaned.starts_with("dabur red") {
        return "dabur red paste".to_string();
    }

    cleaned
}
