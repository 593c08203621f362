use std::sync::Arc;

use tracing::info;

use minbar_domain::gateway::ConnectivityStatus;
use minbar_domain::session::{Session, SessionRepository};
use minbar_domain::shared::DomainError;

use minbar_infrastructure::config::TimeoutConfig;
use minbar_infrastructure::http::connectivity::probe_server;

#[derive(Debug)]
pub struct ConnectOutcome {
    pub session: Session,
    pub status: ConnectivityStatus,
}

/// First-run server configuration: normalize what the user typed, probe
/// it within a bounded timeout, and persist the URL only once something
/// answered on it.
pub struct ConnectService {
    sessions: Arc<dyn SessionRepository>,
    timeouts: TimeoutConfig,
}

impl ConnectService {
    pub fn new(sessions: Arc<dyn SessionRepository>, timeouts: TimeoutConfig) -> Self {
        Self { sessions, timeouts }
    }

    pub async fn connect(&self, raw_url: &str) -> Result<ConnectOutcome, DomainError> {
        // validation (empty, unparseable) fails before any probe
        let session = Session::new(raw_url)?;

        let status = probe_server(&session.api_base_url(), self.timeouts.connectivity_probe)
            .await
            .map_err(|e| DomainError::Infrastructure(e.to_string()))?;

        if status.is_reachable() {
            self.sessions.save(&session).await?;
            info!(server = session.server_url(), "Server URL saved");
        }

        Ok(ConnectOutcome { session, status })
    }

    /// The message the connect dialog shows for a non-reachable outcome.
    pub fn status_message(status: ConnectivityStatus) -> &'static str {
        match status {
            ConnectivityStatus::Connected | ConnectivityStatus::ServerErrorButReachable => {
                "Connected"
            }
            ConnectivityStatus::Timeout => {
                "Connection timeout. Please check the URL and try again."
            }
            ConnectivityStatus::Unreachable => {
                "Cannot connect to server. Please check the URL and ensure the server is running."
            }
        }
    }
}
