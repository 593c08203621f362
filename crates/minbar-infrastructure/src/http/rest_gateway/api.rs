use async_trait::async_trait;

use minbar_domain::filter::DateRange;
use minbar_domain::gateway::{
    ApiGateway, AuthResponse, Credentials, MethodStatRow, PasswordChange, ProfileUpdate,
    Registration, TypeStatRow,
};
use minbar_domain::member::{MemberDraft, MemberRecord};
use minbar_domain::payment::PaymentRecord;
use minbar_domain::shared::DomainError;

use crate::http::envelope;

/// Query-parameter rendering for the stats endpoints: the start date is a
/// bare day, the end date is pushed to end-of-day so the whole last
/// calendar day is included server-side too.
fn range_query(range: &DateRange) -> Vec<(&'static str, String)> {
    vec![
        ("startDate", range.start.format("%Y-%m-%d").to_string()),
        ("endDate", format!("{}T23:59:59", range.end.format("%Y-%m-%d"))),
    ]
}

#[async_trait]
impl ApiGateway for super::RestApiGateway {
    fn set_auth_token(&self, token: Option<String>) {
        *self.auth_token.write().expect("auth token lock poisoned") = token;
    }

    async fn payments(&self) -> Result<Vec<PaymentRecord>, DomainError> {
        let value = self.get_value("/mosque/payments", &[]).await?;
        Ok(envelope::parse_list("/mosque/payments", value))
    }

    async fn payment_by_id(&self, id: i64) -> Result<Option<PaymentRecord>, DomainError> {
        let path = format!("/mosque/payments/{}", id);
        let Some(value) = self.get_value_optional(&path).await? else {
            return Ok(None);
        };
        Ok(envelope::parse_object(&path, value))
    }

    async fn payments_for_member(
        &self,
        member_id: i64,
    ) -> Result<Vec<PaymentRecord>, DomainError> {
        let path = format!("/mosque/payments/member/{}", member_id);
        let value = self.get_value(&path, &[]).await?;
        Ok(envelope::parse_list(&path, value))
    }

    async fn payment_stats_by_type(
        &self,
        range: &DateRange,
    ) -> Result<Vec<TypeStatRow>, DomainError> {
        let value = self
            .get_value("/mosque/payments/stats/by-type", &range_query(range))
            .await?;
        Ok(envelope::parse_list("/mosque/payments/stats/by-type", value))
    }

    async fn payment_stats_by_method(
        &self,
        range: &DateRange,
    ) -> Result<Vec<MethodStatRow>, DomainError> {
        let value = self
            .get_value("/mosque/payments/stats/by-method", &range_query(range))
            .await?;
        Ok(envelope::parse_list(
            "/mosque/payments/stats/by-method",
            value,
        ))
    }

    async fn members(&self) -> Result<Vec<MemberRecord>, DomainError> {
        let value = self.get_value("/members", &[]).await?;
        Ok(envelope::parse_list("/members", value))
    }

    async fn member_by_id(&self, id: i64) -> Result<Option<MemberRecord>, DomainError> {
        let path = format!("/members/{}", id);
        let Some(value) = self.get_value_optional(&path).await? else {
            return Ok(None);
        };
        Ok(envelope::parse_object(&path, value))
    }

    async fn search_members(&self, query: &str) -> Result<Vec<MemberRecord>, DomainError> {
        let value = self
            .get_value("/members/search", &[("q", query.to_string())])
            .await?;
        Ok(envelope::parse_list("/members/search", value))
    }

    async fn next_member_code(&self) -> Result<String, DomainError> {
        let value = self.get_value("/members/next-id", &[]).await?;

        envelope::unwrap_envelope(value)
            .get("nextMemberId")
            .and_then(|v| v.as_str())
            .map(|code| code.to_string())
            .ok_or_else(|| {
                DomainError::Serialization(
                    "next-id response missing nextMemberId".to_string(),
                )
            })
    }

    async fn create_member(&self, draft: &MemberDraft) -> Result<(), DomainError> {
        self.post_json("/members", draft).await?;
        Ok(())
    }

    async fn update_member(&self, id: i64, draft: &MemberDraft) -> Result<(), DomainError> {
        self.put_json(&format!("/members/{}", id), draft).await?;
        Ok(())
    }

    async fn delete_member(&self, id: i64) -> Result<(), DomainError> {
        self.delete(&format!("/members/{}", id)).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, DomainError> {
        let value = self.post_json("/auth/login", credentials).await?;
        Ok(
            envelope::parse_object("/auth/login", value).unwrap_or(AuthResponse {
                token: None,
                user: None,
            }),
        )
    }

    async fn register(&self, registration: &Registration) -> Result<AuthResponse, DomainError> {
        let value = self.post_json("/auth/register", registration).await?;
        Ok(
            envelope::parse_object("/auth/register", value).unwrap_or(AuthResponse {
                token: None,
                user: None,
            }),
        )
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<AuthResponse, DomainError> {
        let value = self.put_json("/auth/profile", update).await?;
        Ok(
            envelope::parse_object("/auth/profile", value).unwrap_or(AuthResponse {
                token: None,
                user: None,
            }),
        )
    }

    async fn change_password(&self, change: &PasswordChange) -> Result<(), DomainError> {
        self.put_json("/auth/password", change).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_range_query_covers_end_of_day() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
        )
        .unwrap();

        let query = range_query(&range);
        assert_eq!(query[0], ("startDate", "2026-08-01".to_string()));
        assert_eq!(query[1], ("endDate", "2026-08-07T23:59:59".to_string()));
    }
}
