//! Seam between the domain and whatever transports records into it.
//!
//! The aggregation engine never performs I/O; everything it consumes comes
//! through this trait. Infrastructure implements it over HTTP, tests
//! implement it with scripted in-memory fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::filter::DateRange;
use crate::member::{MemberDraft, MemberRecord, UserProfile};
use crate::payment::{Amount, PaymentMethod, PaymentRecord, PaymentType};
use crate::shared::DomainError;

/// Server-side type aggregation row, as returned by
/// `/mosque/payments/stats/by-type`. The client recomputes these buckets
/// from the raw payment list whenever the server returns nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeStatRow {
    pub payment_type: PaymentType,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub total_amount: Amount,
}

/// Server-side method aggregation row, `/mosque/payments/stats/by-method`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodStatRow {
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub total_amount: Amount,
}

/// Login form payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Result<Self, DomainError> {
        if username.trim().is_empty() {
            return Err(DomainError::Validation("Username is required".to_string()));
        }
        if password.is_empty() {
            return Err(DomainError::Validation("Password is required".to_string()));
        }
        Ok(Self {
            username: username.trim().to_string(),
            password: password.to_string(),
        })
    }
}

/// Registration payload; the confirm-password field never leaves the
/// client, it only gates construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub fn new(
        id: &str,
        name: &str,
        phone: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Self, DomainError> {
        if id.trim().is_empty() {
            return Err(DomainError::Validation("ID is required".to_string()));
        }
        if name.trim().is_empty() {
            return Err(DomainError::Validation("Name is required".to_string()));
        }
        if phone.trim().is_empty() {
            return Err(DomainError::Validation(
                "Phone number is required".to_string(),
            ));
        }
        if email.trim().is_empty() {
            return Err(DomainError::Validation("Email is required".to_string()));
        }
        if !is_plausible_email(email.trim()) {
            return Err(DomainError::Validation(
                "Please enter a valid email address".to_string(),
            ));
        }
        if password.trim().is_empty() {
            return Err(DomainError::Validation("Password is required".to_string()));
        }
        if password.len() < 6 {
            return Err(DomainError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }
        if password != confirm_password {
            return Err(DomainError::Validation(
                "Passwords do not match".to_string(),
            ));
        }

        Ok(Self {
            id: id.trim().to_string(),
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        })
    }
}

/// Profile-update payload (PUT /auth/profile).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Password-change payload (PUT /auth/password).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub id: String,
    pub current_password: String,
    pub new_password: String,
}

impl PasswordChange {
    pub fn new(
        id: &str,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<Self, DomainError> {
        if new_password != confirm_password {
            return Err(DomainError::Validation(
                "New passwords do not match".to_string(),
            ));
        }
        if new_password.len() < 6 {
            return Err(DomainError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }
        Ok(Self {
            id: id.to_string(),
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        })
    }
}

/// What the auth endpoints hand back on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

/// Outcome of the bounded server probe run before accepting a server URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectivityStatus {
    /// Server answered 2xx
    Connected,
    /// No answer within the probe timeout
    Timeout,
    /// Connection refused, DNS failure, or similar
    Unreachable,
    /// Server answered with an error status, which still proves the URL
    /// points at a live server
    ServerErrorButReachable,
}

impl ConnectivityStatus {
    /// A reachable server is good enough to save the URL and move on.
    pub fn is_reachable(&self) -> bool {
        matches!(
            self,
            ConnectivityStatus::Connected | ConnectivityStatus::ServerErrorButReachable
        )
    }
}

/// Every REST endpoint the back office consumes, one method each.
#[async_trait]
pub trait ApiGateway: Send + Sync {
    /// Swap the bearer token attached to subsequent requests; `None`
    /// clears it. Login flows through the same gateway that later carries
    /// the token, so this is part of the seam.
    fn set_auth_token(&self, token: Option<String>);

    // Kiosk payments (read-only)
    async fn payments(&self) -> Result<Vec<PaymentRecord>, DomainError>;
    async fn payment_by_id(&self, id: i64) -> Result<Option<PaymentRecord>, DomainError>;
    async fn payments_for_member(&self, member_id: i64)
        -> Result<Vec<PaymentRecord>, DomainError>;
    async fn payment_stats_by_type(
        &self,
        range: &DateRange,
    ) -> Result<Vec<TypeStatRow>, DomainError>;
    async fn payment_stats_by_method(
        &self,
        range: &DateRange,
    ) -> Result<Vec<MethodStatRow>, DomainError>;

    // Members
    async fn members(&self) -> Result<Vec<MemberRecord>, DomainError>;
    async fn member_by_id(&self, id: i64) -> Result<Option<MemberRecord>, DomainError>;
    async fn search_members(&self, query: &str) -> Result<Vec<MemberRecord>, DomainError>;
    async fn next_member_code(&self) -> Result<String, DomainError>;
    async fn create_member(&self, draft: &MemberDraft) -> Result<(), DomainError>;
    async fn update_member(&self, id: i64, draft: &MemberDraft) -> Result<(), DomainError>;
    async fn delete_member(&self, id: i64) -> Result<(), DomainError>;

    // Auth
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, DomainError>;
    async fn register(&self, registration: &Registration) -> Result<AuthResponse, DomainError>;
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<AuthResponse, DomainError>;
    async fn change_password(&self, change: &PasswordChange) -> Result<(), DomainError>;
}

/// Minimal shape check, the same level of strictness the login form
/// applies: something, an @, something, a dot, something.
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.contains(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => {
            !host.is_empty()
                && !tld.is_empty()
                && !domain.contains(char::is_whitespace)
                && !domain.contains('@')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_require_both_fields() {
        assert!(Credentials::new("", "secret").is_err());
        assert!(Credentials::new("admin", "").is_err());
        let creds = Credentials::new(" admin ", "secret").unwrap();
        assert_eq!(creds.username, "admin");
    }

    #[test]
    fn test_registration_validation_chain() {
        let ok = Registration::new("u1", "User", "0612", "u@example.org", "secret1", "secret1");
        assert!(ok.is_ok());

        assert!(Registration::new("u1", "User", "0612", "not-an-email", "secret1", "secret1")
            .is_err());
        assert!(Registration::new("u1", "User", "0612", "u@example.org", "short", "short").is_err());
        assert!(
            Registration::new("u1", "User", "0612", "u@example.org", "secret1", "secret2")
                .is_err()
        );
    }

    #[test]
    fn test_password_change_rules() {
        assert!(PasswordChange::new("u1", "old", "newpass", "different").is_err());
        assert!(PasswordChange::new("u1", "old", "tiny", "tiny").is_err());
        assert!(PasswordChange::new("u1", "old", "newpass", "newpass").is_ok());
    }

    #[test]
    fn test_email_plausibility() {
        assert!(is_plausible_email("a@b.org"));
        assert!(is_plausible_email("first.last@sub.example.org"));
        assert!(!is_plausible_email("a@b"));
        assert!(!is_plausible_email("@b.org"));
        assert!(!is_plausible_email("a b@c.org"));
        assert!(!is_plausible_email("plain"));
    }

    #[test]
    fn test_connectivity_reachability() {
        assert!(ConnectivityStatus::Connected.is_reachable());
        assert!(ConnectivityStatus::ServerErrorButReachable.is_reachable());
        assert!(!ConnectivityStatus::Timeout.is_reachable());
        assert!(!ConnectivityStatus::Unreachable.is_reachable());
    }
}
