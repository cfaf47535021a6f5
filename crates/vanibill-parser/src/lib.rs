//! Free-form multilingual transcript parser.
//!
//! One trimmed transcript segment in, exactly one [`ParsedCommand`] out —
//! never an error. Classification runs through an ordered rule list whose
//! precedence is a deliberate policy: structural keywords (bill lifecycle,
//! payment, discount, charges) must not be captured by the intentionally
//! permissive item-addition pattern.

pub mod action;
pub mod command;
pub mod rules;

pub use action::{normalize_action, NormalizedAction};
pub use command::{ChargeKind, DiscountMode, ParsedCommand, PaymentMode};
pub use rules::parse_segment;
