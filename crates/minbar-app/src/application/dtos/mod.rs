mod dashboard_dto;
mod member_dto;
mod payment_dto;
mod report_dto;
mod view_dto;

pub use dashboard_dto::{BucketDto, DashboardSectionDto};
pub use member_dto::{MemberDetailDto, MemberSummaryDto, MemberSummaryPageDto};
pub use payment_dto::{PaymentDto, PaymentsPageDto};
pub use report_dto::{DailyPointDto, ReportSectionDto};
pub use view_dto::BackOfficeViewDto;
