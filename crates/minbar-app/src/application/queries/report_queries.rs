use minbar_domain::filter::DateRange;
use minbar_domain::gateway::{MethodStatRow, TypeStatRow};
use minbar_domain::payment::PaymentRecord;
use minbar_domain::stats::report_stats;

use crate::application::dtos::{BucketDto, DailyPointDto, ReportSectionDto};

/// Build the report section for the selected date range.
///
/// Totals and the daily series always come from the raw payment list. The
/// category buckets prefer the server-side aggregation rows; only when the
/// server returns no type rows does the client recompute both breakdowns
/// from the payments themselves. (The type list is the sentinel for "the
/// server did not aggregate", which is how the stats endpoints behave.)
pub fn build_report_section(
    payments: &[PaymentRecord],
    type_rows: &[TypeStatRow],
    method_rows: &[MethodStatRow],
    range: &DateRange,
) -> ReportSectionDto {
    let stats = report_stats(payments, range);

    let (by_type, by_method) = if type_rows.is_empty() {
        (
            stats
                .by_type
                .iter()
                .map(|(kind, bucket)| BucketDto::new(kind.key(), kind.label(), *bucket))
                .collect(),
            stats
                .by_method
                .iter()
                .map(|(method, bucket)| BucketDto::new(method.key(), method.label(), *bucket))
                .collect(),
        )
    } else {
        (
            type_rows
                .iter()
                .map(|row| BucketDto {
                    key: row.payment_type.key().to_string(),
                    label: row.payment_type.label().to_string(),
                    count: row.count,
                    total_amount: row.total_amount.or_zero(),
                })
                .collect(),
            method_rows
                .iter()
                .map(|row| BucketDto {
                    key: row.payment_method.key().to_string(),
                    label: row.payment_method.label().to_string(),
                    count: row.count,
                    total_amount: row.total_amount.or_zero(),
                })
                .collect(),
        )
    };

    ReportSectionDto {
        total_payments: stats.total_payments,
        total_amount: stats.total_amount,
        by_type,
        by_method,
        daily_series: stats.daily_series.iter().map(DailyPointDto::from).collect(),
    }
}
