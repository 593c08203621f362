use std::sync::Arc;

use tracing::warn;

use minbar_domain::gateway::ApiGateway;
use minbar_domain::member::{MemberDraft, MemberRecord};
use minbar_domain::shared::DomainError;

/// Member CRUD, pass-through to the server.
///
/// The local member list is a cache: after any of these mutations the
/// caller re-queries the summaries rather than patching local state, so
/// what is on screen is always the server's answer.
pub struct MemberService {
    gateway: Arc<dyn ApiGateway>,
}

impl MemberService {
    pub fn new(gateway: Arc<dyn ApiGateway>) -> Self {
        Self { gateway }
    }

    /// `draft` has already passed `MemberDraft::new` validation, so
    /// nothing invalid ever reaches the wire.
    pub async fn create(&self, draft: &MemberDraft) -> Result<(), DomainError> {
        self.gateway.create_member(draft).await
    }

    pub async fn update(&self, id: i64, draft: &MemberDraft) -> Result<(), DomainError> {
        self.gateway.update_member(id, draft).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.gateway.delete_member(id).await
    }

    /// Next member code to prefill the add-member form with. Asks the
    /// server first; when that fails, derives one locally from the codes
    /// already on screen.
    pub async fn next_member_code(&self, existing: &[MemberRecord]) -> String {
        match self.gateway.next_member_code().await {
            Ok(code) => code,
            Err(e) => {
                warn!("next-id fetch failed, deriving code locally: {}", e);
                fallback_member_code(existing)
            }
        }
    }
}

/// Highest numeric part of the known codes, plus one, zero-padded: the
/// same shape the server hands out.
fn fallback_member_code(existing: &[MemberRecord]) -> String {
    let max_numeric = existing
        .iter()
        .map(|member| {
            member
                .member_id
                .chars()
                .filter(char::is_ascii_digit)
                .collect::<String>()
                .parse::<u64>()
                .unwrap_or(0)
        })
        .max()
        .unwrap_or(0);

    format!("{:04}", max_numeric + 1)
}
