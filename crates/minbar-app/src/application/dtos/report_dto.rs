use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use minbar_domain::stats::DailyPoint;

use super::BucketDto;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPointDto {
    pub date: NaiveDate,
    pub amount: f64,
    pub count: u64,
}

impl From<&DailyPoint> for DailyPointDto {
    fn from(point: &DailyPoint) -> Self {
        Self {
            date: point.date,
            amount: point.amount,
            count: point.count,
        }
    }
}

/// Report over the selected date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSectionDto {
    pub total_payments: u64,
    pub total_amount: f64,
    pub by_type: Vec<BucketDto>,
    pub by_method: Vec<BucketDto>,
    pub daily_series: Vec<DailyPointDto>,
}
