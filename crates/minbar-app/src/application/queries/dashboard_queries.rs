use chrono::{DateTime, FixedOffset};

use minbar_domain::payment::PaymentRecord;
use minbar_domain::stats::{dashboard_stats, recent_payments};

use crate::application::dtos::{BucketDto, DashboardSectionDto, PaymentDto};

/// How many rows the recent-activity table shows.
pub const RECENT_PAYMENTS_LIMIT: usize = 10;

/// Fold the full payment list into the dashboard section. Pure; the
/// aggregation engine does the work and this only flattens for display.
pub fn build_dashboard_section(
    payments: &[PaymentRecord],
    now: DateTime<FixedOffset>,
) -> DashboardSectionDto {
    let stats = dashboard_stats(payments, now);
    let recent = recent_payments(payments, RECENT_PAYMENTS_LIMIT);

    DashboardSectionDto {
        total_payments: stats.total_payments,
        today_payments: stats.today_payments,
        total_amount: stats.total_amount,
        today_amount: stats.today_amount,
        by_type: stats
            .by_type
            .iter()
            .map(|(kind, bucket)| BucketDto::new(kind.key(), kind.label(), *bucket))
            .collect(),
        by_method: stats
            .by_method
            .iter()
            .map(|(method, bucket)| BucketDto::new(method.key(), method.label(), *bucket))
            .collect(),
        recent_payments: recent.iter().map(PaymentDto::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use minbar_domain::payment::{Amount, PaymentMethod, PaymentType};

    fn payment(id: i64, amount: f64, created_at: &str) -> PaymentRecord {
        PaymentRecord {
            id,
            amount: Amount::new(amount),
            payment_type: PaymentType::Rent,
            payment_method: PaymentMethod::Cashmatic,
            member_id: None,
            member_name: Some("Ahmed".to_string()),
            created_at: created_at.parse().unwrap(),
            transaction_id: None,
            rent_start_date: None,
            rent_end_date: None,
        }
    }

    #[test]
    fn test_section_mirrors_stats_and_limits_recent() {
        let payments: Vec<PaymentRecord> = (0..15)
            .map(|i| payment(i, 2.0, &format!("2026-08-{:02}T10:00:00Z", i % 7 + 1)))
            .collect();
        let now = Utc
            .with_ymd_and_hms(2026, 8, 7, 12, 0, 0)
            .unwrap()
            .fixed_offset();

        let section = build_dashboard_section(&payments, now);
        assert_eq!(section.total_payments, 15);
        assert_eq!(section.total_amount, 30.0);
        assert_eq!(section.recent_payments.len(), RECENT_PAYMENTS_LIMIT);

        let bucket_count: u64 = section.by_type.iter().map(|b| b.count).sum();
        assert_eq!(bucket_count, 15);
    }

    #[test]
    fn test_empty_list_builds_zero_section() {
        let now = Utc
            .with_ymd_and_hms(2026, 8, 7, 12, 0, 0)
            .unwrap()
            .fixed_offset();
        let section = build_dashboard_section(&[], now);
        assert_eq!(section.total_payments, 0);
        assert!(section.by_type.is_empty());
        assert!(section.recent_payments.is_empty());
    }
}
