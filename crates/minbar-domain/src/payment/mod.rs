mod amount;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub use amount::Amount;

/// Category a kiosk payment was made under.
///
/// The kiosk backend is free to grow new categories; anything this client
/// does not recognize falls into `Other` instead of failing the whole
/// payload (lenient-parse policy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    MemberFee,
    Rent,
    Mortuarium,
    Renovation,
    Sadaka,
    #[serde(other)]
    Other,
}

impl PaymentType {
    /// Wire key, as the backend spells it
    pub fn key(&self) -> &'static str {
        match self {
            PaymentType::MemberFee => "member_fee",
            PaymentType::Rent => "rent",
            PaymentType::Mortuarium => "mortuarium",
            PaymentType::Renovation => "renovation",
            PaymentType::Sadaka => "sadaka",
            PaymentType::Other => "other",
        }
    }

    /// Human-facing label, as shown in the back-office tables
    pub fn label(&self) -> &'static str {
        match self {
            PaymentType::MemberFee => "Member Fee",
            PaymentType::Rent => "Rental",
            PaymentType::Mortuarium => "Mortuarium",
            PaymentType::Renovation => "Renovation",
            PaymentType::Sadaka => "Sadaka",
            PaymentType::Other => "Other",
        }
    }

    fn default_other() -> Self {
        PaymentType::Other
    }
}

/// Payment terminal that produced the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cashmatic,
    Payworld,
    #[serde(other)]
    Unknown,
}

impl PaymentMethod {
    pub fn key(&self) -> &'static str {
        match self {
            PaymentMethod::Cashmatic => "cashmatic",
            PaymentMethod::Payworld => "payworld",
            PaymentMethod::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cashmatic => "Cashmatic",
            PaymentMethod::Payworld => "Payworld",
            PaymentMethod::Unknown => "Unknown",
        }
    }

    fn default_unknown() -> Self {
        PaymentMethod::Unknown
    }
}

/// A payment record as ingested from the kiosk backend.
///
/// Created by the server when a kiosk transaction completes; this client
/// only ever reads it. New snapshots replace old ones, nothing is mutated
/// in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: i64,
    #[serde(default)]
    pub amount: Amount,
    #[serde(default = "PaymentType::default_other")]
    pub payment_type: PaymentType,
    #[serde(default = "PaymentMethod::default_unknown")]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub member_id: Option<i64>,
    #[serde(default)]
    pub member_name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub rent_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub rent_end_date: Option<NaiveDate>,
}

impl PaymentRecord {
    /// Case-insensitive substring match against member name and
    /// transaction id, as the payments table search box does.
    pub fn matches_search(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();

        self.member_name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(&query))
            || self
                .transaction_id
                .as_deref()
                .is_some_and(|tx| tx.to_lowercase().contains(&query))
    }
}
