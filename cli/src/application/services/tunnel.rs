//! Application service: scraping the ngrok endpoint from the page text.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::NotebookPage;
use crate::domain::tunnel::{TunnelEndpoint, find_tunnel_token, parse_endpoint};
use crate::domain::TunnelError;

/// Read the page text up to `attempts` times, `interval` apart, until a
/// tunnel address shows up, and parse it.
///
/// # Errors
///
/// - [`TunnelError::NoPageText`] if the page has no body text.
/// - [`TunnelError::NotFound`] when every attempt came up empty.
/// - [`TunnelError::InvalidPort`] / [`TunnelError::InvalidEndpoint`] if the
///   address found is malformed.
pub async fn scrape_endpoint(
    page: &impl NotebookPage,
    attempts: u32,
    interval: Duration,
) -> Result<TunnelEndpoint> {
    for attempt in 1..=attempts {
        let text = page.body_text().await?.ok_or(TunnelError::NoPageText)?;
        if let Some(token) = find_tunnel_token(&text) {
            let endpoint = parse_endpoint(token)?;
            tracing::info!(%endpoint, attempt, "found tunnel address");
            return Ok(endpoint);
        }
        if attempt < attempts {
            tokio::time::sleep(interval).await;
        }
    }
    Err(TunnelError::NotFound { attempts }.into())
}
