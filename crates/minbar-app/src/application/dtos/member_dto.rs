use serde::{Deserialize, Serialize};

use minbar_domain::stats::MemberPaymentSummary;

use super::PaymentDto;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSummaryDto {
    pub id: i64,
    pub member_id: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub payment_count: u64,
    pub total_paid: f64,
    pub last_payment: Option<PaymentDto>,
}

impl From<&MemberPaymentSummary> for MemberSummaryDto {
    fn from(summary: &MemberPaymentSummary) -> Self {
        Self {
            id: summary.member.id,
            member_id: summary.member.member_id.clone(),
            full_name: summary.member.full_name.clone(),
            phone: summary.member.phone.clone(),
            payment_count: summary.payment_count,
            total_paid: summary.total_paid,
            last_payment: summary.last_payment.as_ref().map(PaymentDto::from),
        }
    }
}

/// One window of the members table, summaries joined in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSummaryPageDto {
    pub items: Vec<MemberSummaryDto>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    /// Set when the fetch behind this page failed and the empty page is a
    /// degraded view, not the truth
    pub recoverable_error: bool,
}

/// The member-detail modal: the member plus its full payment history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDetailDto {
    pub member: MemberSummaryDto,
    pub payments: Vec<PaymentDto>,
}
