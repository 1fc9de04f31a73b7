pub mod catalog_client;
pub mod recommendation_client;

use crate::domain::error::DomainError;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

const USER_AGENT: &str = concat!("sakebrowse/", env!("CARGO_PKG_VERSION"));

/// Shared client setup. The timeout surfaces as an ordinary transport error.
pub(crate) fn build_client(timeout: Duration) -> Result<Client, DomainError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| DomainError::Config(format!("HTTP client setup failed: {e}")))
}

/// Turns a non-success status into a `Transport` error carrying the body.
pub(crate) async fn ensure_success(resp: Response, service: &str) -> Result<Response, DomainError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    Err(DomainError::Transport(format!("{service} {status}: {body}")))
}

pub(crate) fn is_not_found(resp: &Response) -> bool {
    resp.status() == StatusCode::NOT_FOUND
}

pub(crate) fn trim_base_url(base_url: impl Into<String>) -> String {
    base_url.into().trim_end_matches('/').to_string()
}
