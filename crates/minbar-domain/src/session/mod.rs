mod repository;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::member::UserProfile;
use crate::shared::DomainError;

pub use repository::SessionRepository;

/// Persisted client state: which server to talk to and who is signed in.
///
/// Read once at startup, written only on explicit user actions (connect,
/// login, logout, profile update). Last writer wins; writes are serialized
/// by the single coordinator that owns this value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    server_url: String,
    auth_token: Option<String>,
    user: Option<UserProfile>,
}

impl Session {
    /// Create a session for a freshly configured server, not yet signed in.
    pub fn new(server_url: &str) -> Result<Self, DomainError> {
        Ok(Self {
            server_url: normalize_server_url(server_url)?,
            auth_token: None,
            user: None,
        })
    }

    /// Restore session from persistence
    pub fn restore(
        server_url: String,
        auth_token: Option<String>,
        user: Option<UserProfile>,
    ) -> Self {
        Self {
            server_url,
            auth_token,
            user,
        }
    }

    /// Record a successful login.
    pub fn sign_in(&mut self, token: String, user: Option<UserProfile>) -> Result<(), DomainError> {
        if token.is_empty() {
            return Err(DomainError::Validation(
                "Auth token cannot be empty".to_string(),
            ));
        }
        self.auth_token = Some(token);
        self.user = user;
        Ok(())
    }

    /// Drop credentials but keep the configured server.
    pub fn sign_out(&mut self) {
        self.auth_token = None;
        self.user = None;
    }

    pub fn update_user(&mut self, user: UserProfile) {
        self.user = Some(user);
    }

    pub fn is_signed_in(&self) -> bool {
        self.auth_token.is_some()
    }

    // Getters
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Base URL every API path is joined onto.
    pub fn api_base_url(&self) -> String {
        if self.server_url.ends_with("/api") {
            self.server_url.clone()
        } else {
            format!("{}/api", self.server_url)
        }
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }
}

/// Normalize a user-entered server URL: default the scheme to plain http
/// (kiosk backends live on the LAN), strip trailing slashes, and reject
/// anything that still does not parse as a URL.
pub fn normalize_server_url(raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(
            "Server URL cannot be empty".to_string(),
        ));
    }

    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    let normalized = with_scheme.trim_end_matches('/').to_string();

    Url::parse(&normalized)
        .map_err(|e| DomainError::Validation(format!("Invalid server URL: {}", e)))?;

    Ok(normalized)
}
