use std::collections::HashMap;

use super::{sorted_newest_first, MemberPaymentSummary};
use crate::member::MemberRecord;
use crate::payment::PaymentRecord;

/// Group the full payment list by member, each member's list newest first.
///
/// One bulk fetch plus this grouping replaces the per-member request loop:
/// O(members + payments) instead of one round-trip per member. Payments
/// without a member are dropped here; they belong to the anonymous kiosk
/// flow and never appear in a member summary.
pub fn group_payments_by_member(
    payments: Vec<PaymentRecord>,
) -> HashMap<i64, Vec<PaymentRecord>> {
    let mut by_member: HashMap<i64, Vec<PaymentRecord>> = HashMap::new();

    for payment in payments {
        if let Some(member_id) = payment.member_id {
            by_member.entry(member_id).or_default().push(payment);
        }
    }

    for list in by_member.values_mut() {
        *list = sorted_newest_first(list);
    }

    by_member
}

/// Join members with their payment lists into display summaries.
///
/// One summary per input member, in input order; a member with no map entry
/// gets a zero summary. `last_payment` is the head of the member's list,
/// which `group_payments_by_member` keeps newest first. The result is a
/// pure function of the two snapshots: no partial updates are ever visible.
pub fn member_summaries(
    members: &[MemberRecord],
    payments_by_member: &HashMap<i64, Vec<PaymentRecord>>,
) -> Vec<MemberPaymentSummary> {
    members
        .iter()
        .map(|member| {
            let payments = payments_by_member
                .get(&member.id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            let total_paid = payments.iter().map(|p| p.amount.or_zero()).sum();

            MemberPaymentSummary {
                member: member.clone(),
                payment_count: payments.len() as u64,
                total_paid,
                last_payment: payments.first().cloned(),
            }
        })
        .collect()
}
