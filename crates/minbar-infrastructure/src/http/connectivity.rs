//! Bounded server probe, run before a server URL is accepted and saved.

use std::time::Duration;

use anyhow::{Context, Result};
use log::info;
use reqwest::Client;

use minbar_domain::gateway::ConnectivityStatus;

/// Probe `{api_base_url}/members` with a hard timeout and classify the
/// outcome. An error status still proves something is listening there, so
/// it counts as reachable; only silence and refused connections fail the
/// check.
pub async fn probe_server(api_base_url: &str, timeout: Duration) -> Result<ConnectivityStatus> {
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to create probe client")?;

    let url = format!("{}/members", api_base_url.trim_end_matches('/'));

    let status = match client.get(&url).send().await {
        Ok(response) if response.status().is_success() => ConnectivityStatus::Connected,
        Ok(response) => {
            info!(
                "Probe of {} answered {} - reachable but unhealthy",
                url,
                response.status()
            );
            ConnectivityStatus::ServerErrorButReachable
        }
        Err(e) if e.is_timeout() => ConnectivityStatus::Timeout,
        Err(e) => {
            info!("Probe of {} failed: {}", url, e);
            ConnectivityStatus::Unreachable
        }
    };

    Ok(status)
}
