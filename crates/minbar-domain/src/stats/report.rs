use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::{DailyPoint, ReportStats};
use crate::filter::DateRange;
use crate::payment::PaymentRecord;

/// Compute the report breakdown for payments falling inside `range`.
///
/// The window is inclusive on both bounds and the end date covers its whole
/// calendar day. Calendar dates are taken in UTC, which is also how the
/// kiosk backend stamps `created_at`. An empty window is a valid report:
/// zero totals, empty buckets, empty series.
pub fn report_stats(payments: &[PaymentRecord], range: &DateRange) -> ReportStats {
    let mut stats = ReportStats::default();
    let mut daily: BTreeMap<NaiveDate, DailyPoint> = BTreeMap::new();

    for payment in payments {
        let date = payment.created_at.date_naive();
        if !range.contains(date) {
            continue;
        }

        let amount = payment.amount.or_zero();

        stats.total_payments += 1;
        stats.total_amount += amount;
        stats
            .by_type
            .entry(payment.payment_type)
            .or_default()
            .add(amount);
        stats
            .by_method
            .entry(payment.payment_method)
            .or_default()
            .add(amount);

        let point = daily.entry(date).or_insert_with(|| DailyPoint {
            date,
            amount: 0.0,
            count: 0,
        });
        point.amount += amount;
        point.count += 1;
    }

    // BTreeMap iteration is already date-ascending
    stats.daily_series = daily.into_values().collect();
    stats
}
