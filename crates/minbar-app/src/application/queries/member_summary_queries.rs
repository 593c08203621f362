use std::sync::Arc;

use tracing::warn;

use minbar_domain::gateway::ApiGateway;
use minbar_domain::member::MemberRecord;
use minbar_domain::pagination::paginate;
use minbar_domain::shared::DomainError;
use minbar_domain::stats::{group_payments_by_member, member_summaries, MemberPaymentSummary};

use crate::application::dtos::{MemberDetailDto, MemberSummaryDto, MemberSummaryPageDto, PaymentDto};

/// Joined members-with-payments view, built from two bulk fetches.
///
/// All members and all payments are fetched once per refresh and joined
/// client-side by member id, so the whole summary list is a pure function
/// of the two snapshots. The old per-member request loop survives only in
/// `member_detail`, where a single member's history is actually wanted.
pub struct MemberSummaryQueryService {
    gateway: Arc<dyn ApiGateway>,
    page_size: usize,
}

impl MemberSummaryQueryService {
    pub fn new(gateway: Arc<dyn ApiGateway>) -> Self {
        Self {
            gateway,
            page_size: 10,
        }
    }

    pub fn with_page_size(gateway: Arc<dyn ApiGateway>, page_size: usize) -> Self {
        Self { gateway, page_size }
    }

    /// One page of member summaries matching `search_query`.
    ///
    /// A failed fetch degrades to an empty page with the recoverable-error
    /// flag set; the members screen shows an empty table the user can
    /// retry out of, same as the dashboard.
    pub async fn member_summaries_page(
        &self,
        search_query: &str,
        page: u32,
    ) -> Result<MemberSummaryPageDto, DomainError> {
        let summaries = match self.fetch_summaries(search_query).await {
            Ok(summaries) => summaries,
            Err(e) if e.is_recoverable() => {
                warn!("Member summary fetch failed, serving empty page: {}", e);
                return Ok(MemberSummaryPageDto {
                    items: Vec::new(),
                    current_page: 1,
                    total_pages: 1,
                    total_items: 0,
                    recoverable_error: true,
                });
            }
            Err(e) => return Err(e),
        };

        // out-of-range pages snap back to 1, same rule the coordinator
        // applies to the payments table
        let probe = paginate(&summaries, 1, self.page_size);
        let current_page = if page >= 1 && page <= probe.total_pages {
            page
        } else {
            1
        };

        let window = paginate(&summaries, current_page, self.page_size);

        Ok(MemberSummaryPageDto {
            items: window.page_items.iter().map(MemberSummaryDto::from).collect(),
            current_page,
            total_pages: window.total_pages,
            total_items: summaries.len() as u64,
            recoverable_error: false,
        })
    }

    /// A single member joined with its full payment history, via the
    /// per-member endpoint.
    pub async fn member_detail(&self, member_id: i64) -> Result<Option<MemberDetailDto>, DomainError> {
        let Some(member) = self.gateway.member_by_id(member_id).await? else {
            return Ok(None);
        };

        // the endpoint returns newest-first already; trust but keep the
        // aggregation engine's idea of the summary
        let payments = self.gateway.payments_for_member(member_id).await?;
        let grouped = group_payments_by_member(payments.clone());
        let summaries = member_summaries(std::slice::from_ref(&member), &grouped);
        let summary = summaries
            .first()
            .expect("member_summaries yields one summary per input member");

        Ok(Some(MemberDetailDto {
            member: MemberSummaryDto::from(summary),
            payments: payments.iter().map(PaymentDto::from).collect(),
        }))
    }

    async fn fetch_summaries(
        &self,
        search_query: &str,
    ) -> Result<Vec<MemberPaymentSummary>, DomainError> {
        let members_fut = async {
            if search_query.is_empty() {
                self.gateway.members().await
            } else {
                self.gateway.search_members(search_query).await
            }
        };

        // fan-out both bulk reads, wait for both before joining
        let (members, payments) = tokio::try_join!(members_fut, self.gateway.payments())?;

        // the server's search is trusted but re-filtered locally, so a
        // server that ignores ?q= still yields a filtered table
        let members: Vec<MemberRecord> = members
            .into_iter()
            .filter(|member| member.matches_search(search_query))
            .collect();

        let grouped = group_payments_by_member(payments);
        Ok(member_summaries(&members, &grouped))
    }
}
