//! Headless driver for the back-office core.
//!
//! Connects to the configured kiosk backend, runs one full refresh cycle,
//! and prints the combined view model plus the first page of member
//! summaries as JSON. The server URL comes from `MINBAR_SERVER_URL` or,
//! failing that, from the session persisted by a previous run.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Local;
use tracing::info;

use minbar_app::application::queries::MemberSummaryQueryService;
use minbar_app::application::services::{ConnectService, RefreshCoordinator};
use minbar_domain::filter::DateRange;
use minbar_domain::gateway::ApiGateway;
use minbar_domain::session::{Session, SessionRepository};
use minbar_infrastructure::config::TimeoutConfig;
use minbar_infrastructure::http::RestApiGateway;
use minbar_infrastructure::logging;
use minbar_infrastructure::persistence::{Database, SqliteSessionRepository};

#[tokio::main]
async fn main() -> Result<()> {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("minbar");

    logging::init_logger(Some(data_dir.join("logs")))?;

    let db_path = data_dir.join("minbar.db");
    let db = Database::new(db_path.to_str().context("non-UTF-8 data dir")?).await?;
    let sessions: Arc<dyn SessionRepository> =
        Arc::new(SqliteSessionRepository::new(Arc::new(db.pool().clone())));

    let timeouts = TimeoutConfig::default();
    let session = resolve_session(&sessions, &timeouts).await?;

    info!(server = session.server_url(), "Using server");

    let gateway: Arc<dyn ApiGateway> =
        Arc::new(RestApiGateway::new(&session.api_base_url(), &timeouts)?);

    // a persisted token rides along on every request
    gateway.set_auth_token(session.auth_token().map(String::from));

    let today = Local::now().date_naive();
    let coordinator = RefreshCoordinator::new(gateway.clone(), DateRange::on(today));

    coordinator.refresh().await;
    let view = coordinator.view().await;

    let members = MemberSummaryQueryService::new(gateway);
    let member_page = members.member_summaries_page("", 1).await?;

    println!("{}", serde_json::to_string_pretty(&view)?);
    println!("{}", serde_json::to_string_pretty(&member_page)?);

    if view.recoverable_error {
        bail!("fetch cycle failed; showing empty view");
    }

    Ok(())
}

/// The persisted session, unless `MINBAR_SERVER_URL` overrides it, in
/// which case the new URL is probed and saved like a first-run connect.
async fn resolve_session(
    sessions: &Arc<dyn SessionRepository>,
    timeouts: &TimeoutConfig,
) -> Result<Session> {
    if let Ok(url) = std::env::var("MINBAR_SERVER_URL") {
        let connect = ConnectService::new(sessions.clone(), timeouts.clone());
        let outcome = connect.connect(&url).await?;
        if !outcome.status.is_reachable() {
            bail!("{}", ConnectService::status_message(outcome.status));
        }
        return Ok(outcome.session);
    }

    match sessions.load().await? {
        Some(session) => Ok(session),
        None => bail!(
            "No server configured. Set MINBAR_SERVER_URL to the kiosk backend, e.g. \
             MINBAR_SERVER_URL=http://192.168.1.10:5000"
        ),
    }
}
