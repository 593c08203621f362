use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use minbar_domain::payment::PaymentRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentDto {
    pub id: i64,
    pub amount: f64,
    pub payment_type: String,
    pub payment_method: String,
    /// "Anonymous" when the kiosk transaction carried no member
    pub member_name: String,
    pub created_at: DateTime<Utc>,
    pub transaction_id: Option<String>,
}

impl From<&PaymentRecord> for PaymentDto {
    fn from(record: &PaymentRecord) -> Self {
        Self {
            id: record.id,
            amount: record.amount.or_zero(),
            payment_type: record.payment_type.label().to_string(),
            payment_method: record.payment_method.label().to_string(),
            member_name: record
                .member_name
                .clone()
                .unwrap_or_else(|| "Anonymous".to_string()),
            created_at: record.created_at,
            transaction_id: record.transaction_id.clone(),
        }
    }
}

/// One window of the payments table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentsPageDto {
    pub items: Vec<PaymentDto>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub start_index: usize,
    pub end_index: usize,
}
