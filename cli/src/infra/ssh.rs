//! Infrastructure SSH: implements `RemoteShell` with libssh2.
//!
//! The notebook is an ephemeral host behind a fresh tunnel on every run, so
//! its host key is never checked.

use std::io::Read as _;
use std::net::{TcpStream, ToSocketAddrs as _};
use std::time::Duration;

use anyhow::{Context, Result};
use ssh2::Session;

use crate::application::ports::RemoteShell;
use crate::domain::{RemoteOutput, SshCredentials, TunnelEndpoint};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Production `RemoteShell` over `ssh2`, run on the blocking pool.
pub struct Ssh2Shell;

impl RemoteShell for Ssh2Shell {
    async fn exec(
        &self,
        endpoint: &TunnelEndpoint,
        credentials: &SshCredentials,
        command: &str,
    ) -> Result<RemoteOutput> {
        let endpoint = endpoint.clone();
        let credentials = credentials.clone();
        let command = command.to_string();
        tokio::task::spawn_blocking(move || exec_blocking(&endpoint, &credentials, &command))
            .await
            .context("spawn_blocking for ssh exec")?
    }
}

fn exec_blocking(
    endpoint: &TunnelEndpoint,
    credentials: &SshCredentials,
    command: &str,
) -> Result<RemoteOutput> {
    tracing::debug!(%endpoint, user = %credentials.user, bytes = command.len(), "ssh exec");
    let addr = (endpoint.host.as_str(), endpoint.port)
        .to_socket_addrs()
        .with_context(|| format!("resolving {endpoint}"))?
        .next()
        .ok_or_else(|| anyhow::anyhow!("no address for {endpoint}"))?;
    let tcp = TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT)
        .with_context(|| format!("connecting to {endpoint}"))?;

    let mut session = Session::new().context("creating ssh session")?;
    session.set_tcp_stream(tcp);
    session
        .handshake()
        .with_context(|| format!("ssh handshake with {endpoint}"))?;
    session
        .userauth_password(&credentials.user, &credentials.password)
        .with_context(|| format!("authenticating as {}", credentials.user))?;

    let mut channel = session.channel_session().context("opening ssh channel")?;
    channel.exec(command).context("starting remote command")?;

    let mut stdout = String::new();
    channel
        .read_to_string(&mut stdout)
        .context("reading remote stdout")?;
    let mut stderr = String::new();
    channel
        .stderr()
        .read_to_string(&mut stderr)
        .context("reading remote stderr")?;
    channel.wait_close().context("closing ssh channel")?;
    let exit_code = channel.exit_status().context("reading remote exit status")?;

    tracing::debug!(exit_code, "ssh exec finished");
    Ok(RemoteOutput {
        exit_code,
        stdout,
        stderr,
    })
}
