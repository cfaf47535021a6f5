//! Wire-level action shape handed across the core boundary.
//!
//! The internal [`ParsedCommand`] variants stay decoupled from the stable
//! wire names the billing engine consumes; this mapping is total and never
//! fails.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::command::ParsedCommand;

/// The only artifact exposed to downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedAction {
    pub action: &'static str,
    pub slots: Map<String, Value>,
}

impl NormalizedAction {
    fn new(action: &'static str) -> Self {
        Self {
            action,
            slots: Map::new(),
        }
    }

    fn slot(mut self, key: &str, value: Value) -> Self {
        self.slots.insert(key.to_string(), value);
        self
    }
}

/// Maps a command variant to its `{action, slots}` wire shape. Optional
/// slots (`size`, `price`) are omitted rather than sent as null.
pub fn normalize_action(cmd: &ParsedCommand) -> NormalizedAction {
    match cmd {
        ParsedCommand::AddItem {
            raw_name,
            qty,
            size,
            price,
        } => {
            let mut action = NormalizedAction::new("add_to_cart")
                .slot("name", json!(raw_name))
                .slot("qty", json!(qty));
            if let Some(size) = size {
                action = action.slot("size", json!(size));
            }
            if let Some(price) = price {
                action = action.slot("price", json!(price));
            }
            action
        }
        ParsedCommand::AdjustQty { raw_name, delta } => NormalizedAction::new("adjust_qty")
            .slot("name", json!(raw_name))
            .slot("delta", json!(delta)),
        ParsedCommand::SetPayment { mode } => {
            NormalizedAction::new("set_payment").slot("mode", json!(mode.as_str()))
        }
        ParsedCommand::AddCharge {
            charge_type,
            amount,
        } => NormalizedAction::new("apply_charge")
            .slot("type", json!(charge_type.as_str()))
            .slot("amount", json!(amount)),
        ParsedCommand::SetOrderDiscount { mode, value } => {
            NormalizedAction::new("set_order_discount")
                .slot("mode", json!(mode.as_str()))
                .slot("value", json!(value))
        }
        ParsedCommand::CreateBill => NormalizedAction::new("create_bill"),
        ParsedCommand::CancelBill => NormalizedAction::new("cancel_bill"),
        ParsedCommand::Unknown => NormalizedAction::new("unknown"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{DiscountMode, PaymentMode};

    #[test]
    fn add_item_omits_absent_optionals() {
        let action = normalize_action(&ParsedCommand::AddItem {
            raw_name: "dove".into(),
            qty: 2,
            size: None,
            price: None,
        });
        assert_eq!(action.action, "add_to_cart");
        assert_eq!(action.slots["name"], json!("dove"));
        assert_eq!(action.slots["qty"], json!(2));
        assert!(!action.slots.contains_key("size"));
        assert!(!action.slots.contains_key("price"));
    }

    #[test]
    fn add_item_carries_size_and_price() {
        let action = normalize_action(&ParsedCommand::AddItem {
            raw_name: "dove".into(),
            qty: 2,
            size: Some("200g".into()),
            price: Some(50),
        });
        assert_eq!(action.slots["size"], json!("200g"));
        assert_eq!(action.slots["price"], json!(50));
    }

    #[test]
    fn lifecycle_actions_have_empty_slots() {
        assert_eq!(normalize_action(&ParsedCommand::CreateBill).action, "create_bill");
        assert!(normalize_action(&ParsedCommand::CreateBill).slots.is_empty());
        assert_eq!(normalize_action(&ParsedCommand::CancelBill).action, "cancel_bill");
        assert_eq!(normalize_action(&ParsedCommand::Unknown).action, "unknown");
    }

    #[test]
    fn payment_and_discount_wire_values() {
        let payment = normalize_action(&ParsedCommand::SetPayment {
            mode: PaymentMode::Upi,
        });
        assert_eq!(payment.action, "set_payment");
        assert_eq!(payment.slots["mode"], json!("UPI"));

        let discount = normalize_action(&ParsedCommand::SetOrderDiscount {
            mode: DiscountMode::Pct,
            value: 5,
        });
        assert_eq!(discount.action, "set_order_discount");
        assert_eq!(discount.slots["mode"], json!("PCT"));
        assert_eq!(discount.slots["value"], json!(5));
    }
}
