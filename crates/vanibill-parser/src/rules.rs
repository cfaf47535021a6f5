//! Ordered classification rules.
//!
//! First match wins. The ordering is a precedence policy: bill lifecycle,
//! payment, discount and charge keywords are structurally unambiguous and
//! must be classified before the permissive item-addition pattern gets a
//! chance to swallow them.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use vanibill_lexicon::{canonical_unit, normalize_name, number::number_word_alternation, to_number};

use crate::command::{ChargeKind, DiscountMode, ParsedCommand, PaymentMode};

/// Leading politeness fillers stripped before classification.
static FILLER_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:(?:please|pls|kripya|कृपया|bhaiya|भैया)\b\s*)+").unwrap());

/// "add product X" / "add item X" collapse to a plain "add X".
static ADD_NOUN_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^add\s+(?:product|item)\b\s*").unwrap());

static CREATE_BILL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:create|make|generate)\s+(?:bill|invoice)\b|\bfinali[sz]e\b|बिल\s*बना")
        .unwrap()
});

static CANCEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bcancel\b|रद्द").unwrap());

static UPI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bupi\b|यूपीआई").unwrap());
static CASH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bcash\b|नकद|रोकड़").unwrap());
static CARD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bcard\b|कार्ड").unwrap());

static DISCOUNT_PCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bdiscount\s+(\d+)\s*(?:%|percent\b|प्रतिशत)").unwrap());
static DISCOUNT_AMT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bdiscount\s+(\d+)\s*(?:rs\b|rupees?\b|रुपये|रु|₹)").unwrap());

static CHARGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(delivery|packing|other|insurance)\s+(?:charge\s+)?(\d+)\b").unwrap()
});

/// Optional leading verb for item addition.
static ADD_VERB: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:add|daalo|daal|डालो|डाल)\b\s*").unwrap());

/// The composite item pattern: optional quantity token (numeral or
/// multilingual word), a name span over Latin/Devanagari word characters
/// with internal spaces or hyphens, an optional numeric size with optional
/// unit token, and an optional trailing "at/@ <n> [currency]" price clause.
static ITEM_RE: Lazy<Regex> = Lazy::new(|| {
    // Lazy continuation so the name span never swallows a size or price
    // clause that can match to its right.
    let name = r"[a-z\p{Devanagari}]+(?:[\s\-][a-z\p{Devanagari}]+)*?";
    let unit = r"[a-z\p{Devanagari}]+";
    let pattern = format!(
        r"^(?:(\d+|{words})\s+)?({name})(?:\s+(\d+(?:\.\d+)?)(?:\s*({unit}))?)?(?:\s+(?:at|@)\s*(\d+)(?:\s*(?:rs\b|rupees?\b|रुपये|रु|₹))?)?$",
        words = number_word_alternation(),
    );
    Regex::new(&pattern).unwrap()
});

static ADJUST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-z\p{Devanagari}][a-z\p{Devanagari}\s\-]*?)\s*([+-])\s*(\d+)$").unwrap()
});

type RuleFn = fn(&str) -> Option<ParsedCommand>;

struct Rule {
    name: &'static str,
    apply: RuleFn,
}

/// Evaluated top to bottom; the order encodes the precedence policy above.
static RULES: &[Rule] = &[
    Rule {
        name: "bill_lifecycle",
        apply: match_bill_lifecycle,
    },
    Rule {
        name: "payment_mode",
        apply: match_payment,
    },
    Rule {
        name: "order_discount",
        apply: match_discount,
    },
    Rule {
        name: "named_charge",
        apply: match_charge,
    },
    Rule {
        name: "item_addition",
        apply: match_add_item,
    },
    Rule {
        name: "qty_adjustment",
        apply: match_adjust_qty,
    },
];

/// Classifies one transcript segment. Total: unmatched input yields
/// [`ParsedCommand::Unknown`], never an error.
pub fn parse_segment(text: &str) -> ParsedCommand {
    let cleaned = preprocess(text);
    if cleaned.is_empty() {
        return ParsedCommand::Unknown;
    }

    for rule in RULES {
        if let Some(cmd) = (rule.apply)(&cleaned) {
            debug!(target: "parser", rule = rule.name, input = %cleaned, "segment classified");
            return cmd;
        }
    }

    debug!(target: "parser", input = %cleaned, "segment did not match any rule");
    ParsedCommand::Unknown
}

fn preprocess(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let stripped = FILLER_PREFIX.replace(&lowered, "");
    let stripped = ADD_NOUN_PREFIX.replace(&stripped, "add ");
    stripped.trim().to_string()
}

fn match_bill_lifecycle(text: &str) -> Option<ParsedCommand> {
    if CREATE_BILL_RE.is_match(text) {
        return Some(ParsedCommand::CreateBill);
    }
    if CANCEL_RE.is_match(text) {
        return Some(ParsedCommand::CancelBill);
    }
    None
}

fn match_payment(text: &str) -> Option<ParsedCommand> {
    let mode = if UPI_RE.is_match(text) {
        PaymentMode::Upi
    } else if CASH_RE.is_match(text) {
        PaymentMode::Cash
    } else if CARD_RE.is_match(text) {
        PaymentMode::Card
    } else {
        return None;
    };
    Some(ParsedCommand::SetPayment { mode })
}

fn match_discount(text: &str) -> Option<ParsedCommand> {
    if let Some(caps) = DISCOUNT_PCT_RE.captures(text) {
        let value = caps[1].parse().ok()?;
        return Some(ParsedCommand::SetOrderDiscount {
            mode: DiscountMode::Pct,
            value,
        });
    }
    if let Some(caps) = DISCOUNT_AMT_RE.captures(text) {
        let value = caps[1].parse().ok()?;
        return Some(ParsedCommand::SetOrderDiscount {
            mode: DiscountMode::Amt,
            value,
        });
    }
    None
}

fn match_charge(text: &str) -> Option<ParsedCommand> {
    let caps = CHARGE_RE.captures(text)?;
    let charge_type = ChargeKind::from_keyword(&caps[1])?;
    let amount = caps[2].parse().ok()?;
    Some(ParsedCommand::AddCharge {
        charge_type,
        amount,
    })
}

fn match_add_item(text: &str) -> Option<ParsedCommand> {
    let rest = ADD_VERB.replace(text, "");
    let rest = rest.trim();
    if rest.is_empty() {
        return None;
    }

    let caps = ITEM_RE.captures(rest)?;

    // Quantity defaults to 1 when the token is absent or unintelligible.
    let qty = caps
        .get(1)
        .and_then(|m| to_number(m.as_str()))
        .unwrap_or(1);

    let raw_name = normalize_name(caps.get(2)?.as_str());
    if raw_name.is_empty() {
        return None;
    }

    // Size is emitted only when both a numeric value and a recognized unit
    // are present.
    let size = match (caps.get(3), caps.get(4)) {
        (Some(value), Some(unit)) => {
            canonical_unit(unit.as_str()).map(|canon| format!("{}{}", value.as_str(), canon))
        }
        _ => None,
    };

    let price = caps.get(5).and_then(|m| m.as_str().parse().ok());

    Some(ParsedCommand::AddItem {
        raw_name,
        qty,
        size,
        price,
    })
}

fn match_adjust_qty(text: &str) -> Option<ParsedCommand> {
    let caps = ADJUST_RE.captures(text)?;
    let raw_name = normalize_name(caps[1].trim());
    if raw_name.is_empty() {
        return None;
    }
    let magnitude: i64 = caps[3].parse().ok()?;
    let delta = if &caps[2] == "-" {
        -magnitude
    } else {
        magnitude
    };
    Some(ParsedCommand::AdjustQty { raw_name, delta })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preprocess_strips_fillers_and_noun_prefix() {
        assert_eq!(preprocess("Please add product Dove"), "add dove");
        assert_eq!(preprocess("kripya add item colgate"), "add colgate");
        assert_eq!(preprocess("   "), "");
        assert_eq!(preprocess("please"), "");
    }

    #[test]
    fn empty_after_stripping_is_unknown() {
        assert_eq!(parse_segment("please"), ParsedCommand::Unknown);
        assert_eq!(parse_segment("  "), ParsedCommand::Unknown);
        assert_eq!(parse_segment("add"), ParsedCommand::Unknown);
    }
}
