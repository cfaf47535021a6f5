use serde::Serialize;

/// Payment modes the billing engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMode {
    Upi,
    Cash,
    Card,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Upi => "UPI",
            PaymentMode::Cash => "CASH",
            PaymentMode::Card => "CARD",
        }
    }
}

/// Order-level discount interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiscountMode {
    Pct,
    Amt,
}

impl DiscountMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountMode::Pct => "PCT",
            DiscountMode::Amt => "AMT",
        }
    }
}

/// Named charges that can be spoken onto an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeKind {
    Delivery,
    Packing,
    Insurance,
    Other,
}

impl ChargeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChargeKind::Delivery => "delivery",
            ChargeKind::Packing => "packing",
            ChargeKind::Insurance => "insurance",
            ChargeKind::Other => "other",
        }
    }

    pub(crate) fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "delivery" => Some(ChargeKind::Delivery),
            "packing" => Some(ChargeKind::Packing),
            "insurance" => Some(ChargeKind::Insurance),
            "other" => Some(ChargeKind::Other),
            _ => None,
        }
    }
}

/// One classified transcript segment. Produced fresh per segment; has no
/// identity beyond the segment that generated it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ParsedCommand {
    AddItem {
        raw_name: String,
        qty: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        size: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        price: Option<i64>,
    },
    AdjustQty {
        raw_name: String,
        delta: i64,
    },
    SetPayment {
        mode: PaymentMode,
    },
    AddCharge {
        charge_type: ChargeKind,
        amount: i64,
    },
    SetOrderDiscount {
        mode: DiscountMode,
        value: i64,
    },
    CreateBill,
    CancelBill,
    Unknown,
}
