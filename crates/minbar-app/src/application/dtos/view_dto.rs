use serde::{Deserialize, Serialize};

use minbar_domain::filter::FilterState;

use super::{DashboardSectionDto, PaymentsPageDto, ReportSectionDto};

/// The combined view model one refresh cycle produces: everything the
/// back-office screens render, derived from a single fetch generation so
/// no screen ever mixes data from two different filter states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackOfficeViewDto {
    pub filter: FilterState,
    pub dashboard: DashboardSectionDto,
    pub report: ReportSectionDto,
    pub payments_page: PaymentsPageDto,
    /// Set when the last fetch cycle failed; the zeroed sections above are
    /// a degraded view the user can retry out of
    pub recoverable_error: bool,
    /// Filter-state generation this view was computed from
    pub generation: u64,
}
