use serde::{Deserialize, Serialize};

use crate::shared::DomainError;

/// A registered member, as served by the backend.
///
/// The dashboard's local list is a cache: every create/update/delete goes
/// through the server and is followed by a full re-fetch, never a local
/// patch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRecord {
    pub id: i64,
    /// Human-facing member code, server-generated sequential string
    pub member_id: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl MemberRecord {
    /// Case-insensitive substring match against code, name and phone,
    /// mirroring the members table search box.
    pub fn matches_search(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();

        self.member_id.to_lowercase().contains(&query)
            || self.full_name.to_lowercase().contains(&query)
            || self
                .phone
                .as_deref()
                .is_some_and(|phone| phone.to_lowercase().contains(&query))
    }
}

/// Payload for creating or updating a member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDraft {
    pub member_id: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl MemberDraft {
    /// Validate before any network call; an invalid draft is never sent.
    pub fn new(
        member_id: String,
        full_name: String,
        phone: Option<String>,
    ) -> Result<Self, DomainError> {
        if member_id.trim().is_empty() {
            return Err(DomainError::Validation(
                "Member ID is required".to_string(),
            ));
        }
        if full_name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Full name is required".to_string(),
            ));
        }

        Ok(Self {
            member_id: member_id.trim().to_string(),
            full_name: full_name.trim().to_string(),
            phone: phone
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
        })
    }
}

/// Authenticated back-office user, persisted alongside the auth token and
/// restored at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}
