use serde::{Deserialize, Serialize};

use minbar_domain::stats::StatBucket;

use super::PaymentDto;

/// One aggregated bucket, flattened for display: the raw key, its
/// human-facing label, and the `{count, total}` pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketDto {
    pub key: String,
    pub label: String,
    pub count: u64,
    pub total_amount: f64,
}

impl BucketDto {
    pub fn new(key: &str, label: &str, bucket: StatBucket) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            count: bucket.count,
            total_amount: bucket.total_amount,
        }
    }
}

/// The live dashboard: headline totals, breakdowns, recent activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSectionDto {
    pub total_payments: u64,
    pub today_payments: u64,
    pub total_amount: f64,
    pub today_amount: f64,
    pub by_type: Vec<BucketDto>,
    pub by_method: Vec<BucketDto>,
    pub recent_payments: Vec<PaymentDto>,
}
