use chrono::{DateTime, Duration, FixedOffset};

use super::DashboardStats;
use crate::payment::PaymentRecord;

/// Compute the live dashboard summary over the full, unfiltered payment
/// list.
///
/// "Today" is the calendar day of `now` in `now`'s offset: inclusive of
/// midnight, exclusive of the next midnight. Callers pass
/// `Local::now().fixed_offset()` in production; tests pass a fixed instant.
pub fn dashboard_stats(payments: &[PaymentRecord], now: DateTime<FixedOffset>) -> DashboardStats {
    let offset = now.timezone();
    let midnight = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight always exists")
        .and_local_timezone(offset)
        .single()
        .unwrap_or(now);
    let next_midnight = midnight + Duration::days(1);

    let mut stats = DashboardStats::default();

    for payment in payments {
        let amount = payment.amount.or_zero();
        let local = payment.created_at.with_timezone(&offset);
        let is_today = local >= midnight && local < next_midnight;

        stats.total_payments += 1;
        stats.total_amount += amount;
        if is_today {
            stats.today_payments += 1;
            stats.today_amount += amount;
        }

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
    }

    stats
}

/// Full payment list sorted newest first. The sort is stable, so payments
/// sharing a timestamp keep their original relative order.
pub fn sorted_newest_first(payments: &[PaymentRecord]) -> Vec<PaymentRecord> {
    let mut sorted = payments.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

/// The `limit` most recent payments, for the dashboard's recent-activity
/// table. Does not mutate the input.
pub fn recent_payments(payments: &[PaymentRecord], limit: usize) -> Vec<PaymentRecord> {
    let mut sorted = sorted_newest_first(payments);
    sorted.truncate(limit);
    sorted
}
