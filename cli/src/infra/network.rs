//! Network infrastructure: implements `HttpProbe` using `spawn_blocking`.

use std::time::Duration;

use crate::application::ports::HttpProbe;

const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Production implementation that performs real HTTP requests with `ureq`.
pub struct UreqProbe;

impl HttpProbe for UreqProbe {
    async fn is_reachable(&self, url: &str) -> bool {
        let url = url.to_string();
        tokio::task::spawn_blocking(move || {
            match ureq::get(&url).timeout(PROBE_TIMEOUT).call() {
                // Any HTTP answer, even an error status, means the server is up.
                Ok(_) | Err(ureq::Error::Status(..)) => true,
                Err(e) => {
                    tracing::debug!(url = %url, error = %e, "probe failed");
                    false
                }
            }
        })
        .await
        .unwrap_or(false)
    }
}
