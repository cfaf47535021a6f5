//! Measurement-unit spellings mapped onto the canonical set `{g, kg, ml, l, pcs}`.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static UNIT_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("g", "g"),
        ("gm", "g"),
        ("gms", "g"),
        ("gram", "g"),
        ("grams", "g"),
        ("ग्राम", "g"),
        ("kg", "kg"),
        ("kgs", "kg"),
        ("kilo", "kg"),
        ("kilos", "kg"),
        ("kilogram", "kg"),
        ("kilograms", "kg"),
        ("किलो", "kg"),
        ("किग्रा", "kg"),
        ("ml", "ml"),
        ("millilitre", "ml"),
        ("millilitres", "ml"),
        ("milliliter", "ml"),
        ("milliliters", "ml"),
        ("एमएल", "ml"),
        ("l", "l"),
        ("ltr", "l"),
        ("litre", "l"),
        ("litres", "l"),
        ("liter", "l"),
        ("liters", "l"),
        ("लीटर", "l"),
        ("pc", "pcs"),
        ("pcs", "pcs"),
        ("piece", "pcs"),
        ("pieces", "pcs"),
        ("नग", "pcs"),
        ("पीस", "pcs"),
    ])
});

/// Strict lookup: `Some` only for spellings in the closed unit table. The
/// parser uses this to decide whether a size slot may be emitted at all.
pub fn canonical_unit(token: &str) -> Option<&'static str> {
    UNIT_MAP.get(token.trim().to_lowercase().as_str()).copied()
}

/// Total variant: unrecognized but non-empty input comes back lowercased
/// instead of being rejected; empty input yields `None`.
pub fn normalize_unit(token: &str) -> Option<String> {
    let lowered = token.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }
    match UNIT_MAP.get(lowered.as_str()) {
        Some(canon) => Some((*canon).to_string()),
        None => Some(lowered),
    }
}
