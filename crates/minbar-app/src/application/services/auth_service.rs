use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use minbar_domain::gateway::{ApiGateway, Credentials, PasswordChange, ProfileUpdate, Registration};
use minbar_domain::session::{Session, SessionRepository};
use minbar_domain::shared::DomainError;

/// What registration ended in: some servers sign the new user straight
/// in, others expect a separate login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    SignedIn,
    AwaitingLogin,
}

/// Login, registration, profile and password flows.
///
/// Owns the live `Session` value: every successful auth action updates it
/// and writes it through the session repository in one step, so the
/// persisted state never diverges from what the gateway is sending.
/// Client-side validation failures short-circuit before any network call.
pub struct AuthService {
    gateway: Arc<dyn ApiGateway>,
    sessions: Arc<dyn SessionRepository>,
    session: Mutex<Session>,
}

impl AuthService {
    pub fn new(
        gateway: Arc<dyn ApiGateway>,
        sessions: Arc<dyn SessionRepository>,
        session: Session,
    ) -> Self {
        // a restored session may already carry a token
        gateway.set_auth_token(session.auth_token().map(String::from));

        Self {
            gateway,
            sessions,
            session: Mutex::new(session),
        }
    }

    pub async fn session(&self) -> Session {
        self.session.lock().await.clone()
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(), DomainError> {
        let credentials = Credentials::new(username, password)?;

        let response = self.gateway.login(&credentials).await?;
        let Some(token) = response.token else {
            return Err(DomainError::Server(
                "Invalid response from server".to_string(),
            ));
        };

        let mut session = self.session.lock().await;
        session.sign_in(token.clone(), response.user)?;
        self.gateway.set_auth_token(Some(token));
        self.sessions.save(&session).await?;

        info!(username = %credentials.username, "Signed in");
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn register(
        &self,
        id: &str,
        name: &str,
        phone: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<RegisterOutcome, DomainError> {
        let registration = Registration::new(id, name, phone, email, password, confirm_password)?;

        let response = self.gateway.register(&registration).await?;

        match response.token {
            Some(token) => {
                let mut session = self.session.lock().await;
                session.sign_in(token.clone(), response.user)?;
                self.gateway.set_auth_token(Some(token));
                self.sessions.save(&session).await?;
                info!(id = %registration.id, "Registered and signed in");
                Ok(RegisterOutcome::SignedIn)
            }
            None => {
                info!(id = %registration.id, "Registered, awaiting login");
                Ok(RegisterOutcome::AwaitingLogin)
            }
        }
    }

    /// Drop credentials; the configured server URL stays.
    pub async fn logout(&self) -> Result<(), DomainError> {
        let mut session = self.session.lock().await;
        session.sign_out();
        self.gateway.set_auth_token(None);
        self.sessions.save(&session).await?;

        info!("Signed out");
        Ok(())
    }

    pub async fn update_profile(
        &self,
        name: &str,
        phone: &str,
        email: &str,
    ) -> Result<(), DomainError> {
        let user_id = {
            let session = self.session.lock().await;
            let Some(user) = session.user() else {
                return Err(DomainError::Validation("Not signed in".to_string()));
            };
            user.id.clone()
        };

        let update = ProfileUpdate {
            id: user_id,
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
        };

        let response = self.gateway.update_profile(&update).await?;

        if let Some(user) = response.user {
            let mut session = self.session.lock().await;
            session.update_user(user);
            self.sessions.save(&session).await?;
        }

        Ok(())
    }

    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), DomainError> {
        let user_id = {
            let session = self.session.lock().await;
            let Some(user) = session.user() else {
                return Err(DomainError::Validation("Not signed in".to_string()));
            };
            user.id.clone()
        };

        let change =
            PasswordChange::new(&user_id, current_password, new_password, confirm_password)?;
        self.gateway.change_password(&change).await
    }

    /// The message the login screen shows for a failed attempt.
    pub fn login_error_message(error: &DomainError) -> String {
        match error {
            DomainError::InvalidCredentials(_) => "Invalid username or password".to_string(),
            DomainError::NotFound(_) => {
                "Login endpoint not found. Please check your server configuration.".to_string()
            }
            DomainError::Validation(msg) => msg.clone(),
            _ => "Login failed. Please try again.".to_string(),
        }
    }

    /// The message the registration screen shows for a failed attempt.
    pub fn register_error_message(error: &DomainError) -> String {
        match error {
            DomainError::Validation(msg) => msg.clone(),
            DomainError::NotFound(_) => {
                "Register endpoint not found. Please check your server configuration.".to_string()
            }
            _ => "Registration failed. Please try again.".to_string(),
        }
    }
}
