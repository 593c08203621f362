mod dashboard_queries;
mod member_summary_queries;
mod report_queries;

pub use dashboard_queries::{build_dashboard_section, RECENT_PAYMENTS_LIMIT};
pub use member_summary_queries::MemberSummaryQueryService;
pub use report_queries::build_report_section;
