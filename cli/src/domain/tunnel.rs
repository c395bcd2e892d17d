//! ngrok TCP tunnel address parsing.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::error::TunnelError;

/// Substring every EU ngrok TCP address contains.
pub const TUNNEL_DOMAIN_MARKER: &str = ".tcp.eu.ngrok.";

#[allow(clippy::expect_used)] // compile-time constant pattern
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Host and port of the SSH tunnel into the notebook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TunnelEndpoint {
    pub host: String,
    pub port: u16,
}

impl std::fmt::Display for TunnelEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Find the tunnel address token in rendered page text.
///
/// When the console shows several addresses the most recent one (last on the
/// page) wins.
#[must_use]
pub fn find_tunnel_token(text: &str) -> Option<&str> {
    text.split_whitespace()
        .rfind(|word| word.contains(TUNNEL_DOMAIN_MARKER))
}

/// Parse a `[scheme://]host:port` token.
///
/// # Errors
///
/// Returns [`TunnelError::InvalidEndpoint`] when there is no `host:` part and
/// [`TunnelError::InvalidPort`] when the port holds no digits or overflows.
pub fn parse_endpoint(token: &str) -> Result<TunnelEndpoint, TunnelError> {
    let address = token.split_once("://").map_or(token, |(_, rest)| rest);
    let (host, port_part) = address
        .rsplit_once(':')
        .ok_or_else(|| TunnelError::InvalidEndpoint(token.to_string()))?;
    if host.is_empty() {
        return Err(TunnelError::InvalidEndpoint(token.to_string()));
    }
    let port = DIGITS
        .find(port_part)
        .and_then(|m| m.as_str().parse::<u16>().ok())
        .ok_or_else(|| TunnelError::InvalidPort(port_part.to_string()))?;
    Ok(TunnelEndpoint {
        host: host.to_string(),
        port,
    })
}
