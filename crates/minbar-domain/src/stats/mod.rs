//! Aggregation engine: pure transformations from raw record lists to the
//! derived view models the back office displays.
//!
//! Nothing here does I/O or keeps state between calls; every function is
//! deterministic given its inputs. Malformed amounts and unknown category
//! keys have already been degraded by the record types, so aggregation
//! never fails: the worst input produces zeroed totals, not an error.

mod dashboard;
mod members;
mod report;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::member::MemberRecord;
use crate::payment::{PaymentMethod, PaymentRecord, PaymentType};

pub use dashboard::{dashboard_stats, recent_payments, sorted_newest_first};
pub use members::{group_payments_by_member, member_summaries};
pub use report::report_stats;

/// Aggregated `{count, total_amount}` pair keyed by a categorical field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatBucket {
    pub count: u64,
    pub total_amount: f64,
}

impl StatBucket {
    /// Fold one payment in. A missing amount still counts once.
    pub fn add(&mut self, amount: f64) {
        self.count += 1;
        self.total_amount += amount;
    }
}

/// Live dashboard summary over the full payment list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_payments: u64,
    pub today_payments: u64,
    pub total_amount: f64,
    pub today_amount: f64,
    pub by_type: BTreeMap<PaymentType, StatBucket>,
    pub by_method: BTreeMap<PaymentMethod, StatBucket>,
}

/// Report breakdown over a date-windowed payment list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportStats {
    pub total_payments: u64,
    pub total_amount: f64,
    pub by_type: BTreeMap<PaymentType, StatBucket>,
    pub by_method: BTreeMap<PaymentMethod, StatBucket>,
    /// One entry per calendar date present in the window, ascending.
    pub daily_series: Vec<DailyPoint>,
}

/// One day of the report's time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub amount: f64,
    pub count: u64,
}

/// A member joined with its payment history, fully recomputed on every
/// member-list refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberPaymentSummary {
    pub member: MemberRecord,
    pub payment_count: u64,
    pub total_paid: f64,
    pub last_payment: Option<PaymentRecord>,
}
