use log::debug;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;

use minbar_domain::shared::DomainError;

impl super::RestApiGateway {
    /// GET a JSON payload with retry. Returns the raw body; envelope
    /// unwrapping happens at the call site through the envelope adapter.
    pub(super) async fn get_value(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, DomainError> {
        let url = self.url(path);

        self.execute_with_retry(path, || {
            // fresh clone per attempt; the builder is consumed on send
            let url = url.clone();
            let request = self.attach_token(
                self.client
                    .get(&url)
                    .query(query)
                    .header(reqwest::header::ACCEPT, "application/json"),
            );

            async move { Self::send_for_json(request, &url).await }
        })
        .await
    }

    /// GET where a 404 is a domain answer ("no such record"), not an
    /// error.
    pub(super) async fn get_value_optional(
        &self,
        path: &str,
    ) -> Result<Option<Value>, DomainError> {
        match self.get_value(path, &[]).await {
            Ok(value) => Ok(Some(value)),
            Err(DomainError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// POST a JSON body, exactly once (no retry on mutations).
    pub(super) async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, DomainError> {
        let url = self.url(path);
        let request = self.client.post(&url).json(body);
        Self::send_for_json(self.attach_token(request), &url).await
    }

    /// PUT a JSON body, exactly once.
    pub(super) async fn put_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, DomainError> {
        let url = self.url(path);
        let request = self.client.put(&url).json(body);
        Self::send_for_json(self.attach_token(request), &url).await
    }

    /// DELETE, exactly once.
    pub(super) async fn delete(&self, path: &str) -> Result<(), DomainError> {
        let url = self.url(path);
        let request = self.client.delete(&url);
        Self::send_for_json(self.attach_token(request), &url).await?;
        Ok(())
    }

    fn attach_token(&self, request: RequestBuilder) -> RequestBuilder {
        match self.current_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_for_json(request: RequestBuilder, url: &str) -> Result<Value, DomainError> {
        let response = request
            .send()
            .await
            .map_err(|e| map_transport_error(&e, url))?;

        let status = response.status();
        debug!("{} -> {}", url, status);

        if !status.is_success() {
            return Err(map_status_error(status, response).await);
        }

        // Empty bodies (e.g. DELETE 204) read as null
        let text = response
            .text()
            .await
            .map_err(|e| DomainError::Network(format!("Failed to read response body: {}", e)))?;

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| {
            DomainError::Serialization(format!(
                "Invalid JSON from {}: {} ({})",
                url,
                e,
                &text[..text.len().min(200)]
            ))
        })
    }
}

/// Classify a reqwest transport failure into the domain taxonomy.
fn map_transport_error(error: &reqwest::Error, url: &str) -> DomainError {
    if error.is_timeout() {
        DomainError::Timeout(format!("Request to {} timed out", url))
    } else if error.is_connect() {
        DomainError::Network(format!("Cannot connect to {}: {}", url, error))
    } else {
        DomainError::Network(format!("Request to {} failed: {}", url, error))
    }
}

/// Classify a non-2xx response. 5xx and 429 are recoverable server
/// trouble; 401 and 404 carry distinct meanings the services surface
/// differently.
async fn map_status_error(status: StatusCode, response: Response) -> DomainError {
    let body = response.text().await.unwrap_or_default();
    let message = error_message_from_body(&body)
        .unwrap_or_else(|| format!("Server returned {}", status));

    match status {
        StatusCode::UNAUTHORIZED => DomainError::InvalidCredentials(message),
        StatusCode::NOT_FOUND => DomainError::NotFound(message),
        StatusCode::CONFLICT => DomainError::Validation(message),
        s if s.is_server_error() || s == StatusCode::TOO_MANY_REQUESTS => {
            DomainError::Server(message)
        }
        _ => DomainError::Validation(message),
    }
}

/// Servers in the wild answer errors as `{"message": ...}` or
/// `{"error": ...}`; pull out whichever is there.
fn error_message_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let message = value
        .get("message")
        .or_else(|| value.get("error"))?
        .as_str()?;
    Some(message.to_string())
}
