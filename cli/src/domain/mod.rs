//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod hardware;
pub mod notebook;
pub mod remote;
pub mod secret;
pub mod status;
pub mod syncthing;
pub mod tunnel;
pub mod ui;

pub use config::{Settings, Tunables};
pub use error::{ConfigError, MenuError, NotebookError, RemoteError, SyncError, TunnelError};
pub use hardware::{Accelerator, Intent};
pub use remote::{RemoteOutput, SshCredentials};
pub use status::RunStatus;
pub use tunnel::TunnelEndpoint;
pub use ui::UiTarget;
