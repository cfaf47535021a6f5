//! Fixed substitution tables used during slot extraction.
//!
//! Everything in this crate is a pure, total function: unrecognized input
//! passes through (or yields `None`) rather than erroring. Lookups are
//! exact-match only; the tables are the behavioral baseline, not an attempt
//! at a complete vocabulary.

pub mod name;
pub mod number;
pub mod unit;

pub use name::normalize_name;
pub use number::to_number;
pub use unit::{canonical_unit, normalize_unit};
