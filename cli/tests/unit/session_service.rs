//! Tests for the start and shutdown flows, end to end over fakes.

#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::time::Duration;

use kaggle_ssh::application::services::local::SyncPlan;
use kaggle_ssh::application::services::session::{
    Polling, ShutdownOutcome, StartPlan, shut_down, start_session,
};
use kaggle_ssh::domain::remote::decode_batch;
use kaggle_ssh::domain::{Accelerator, NotebookError};

use crate::helpers::{DEVICE_ID, LOADING, OFF, PUBKEY, REMOTE_DEVICE_ID, RUNNING, credentials};
use crate::mocks::{FakeHttp, FakePage, FakeRunner, FakeShell, MemoryFs, RecordingReporter};

const TUNNEL_BODY: &str = "Console\n>>> connect(22, 'tcp')\n0.tcp.eu.ngrok.io:12345\n";

fn polling() -> Polling {
    Polling {
        status_timeout_secs: 5,
        interval: Duration::ZERO,
        tunnel_attempts: 3,
        settle: Duration::ZERO,
    }
}

fn plan(sync: Option<SyncPlan>) -> StartPlan {
    StartPlan {
        accelerator: Accelerator::GpuP100,
        polling: polling(),
        credentials: credentials(),
        tunnel_script: "start_tunnel()\n".to_string(),
        install_script: "apt-get install -y syncthing\n".to_string(),
        public_key: PathBuf::from("id_rsa.pub"),
        editor: PathBuf::from("/usr/bin/code"),
        remote_folder: "/root".to_string(),
        local_sync_id: DEVICE_ID.to_string(),
        sync,
    }
}

fn sync_plan() -> SyncPlan {
    SyncPlan {
        synctrayzor: PathBuf::from("/opt/SyncTrayzor.exe"),
        syncthing: PathBuf::from("/opt/syncthing.exe"),
        config_path: PathBuf::from("/cfg/config.xml"),
        device_name: "kaggle_TMP".to_string(),
        folder_id: "abcd-1234".to_string(),
        gui_url: "http://127.0.0.1:8384".to_string(),
        startup_timeout: Duration::from_millis(5),
        poll_step: Duration::from_millis(1),
    }
}

fn off_notebook() -> FakePage {
    FakePage::new()
        .with_colors(&[OFF, LOADING, RUNNING])
        .with_accelerator("None")
        .with_bodies(&[Some("Console"), Some(TUNNEL_BODY)])
}

// ── Start ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn start_runs_every_step_in_order() {
    let page = off_notebook();
    let shell = FakeShell::new(REMOTE_DEVICE_ID);
    let runner = FakeRunner::new();
    let fs = MemoryFs::new()
        .with_file("id_rsa.pub", PUBKEY)
        .with_file("/usr/bin/code", "")
        .with_file("/cfg/config.xml", "<configuration/>");
    let reporter = RecordingReporter::new();

    let outcome = start_session(
        &page,
        &shell,
        &runner,
        &fs,
        &FakeHttp::up(),
        &reporter,
        &plan(Some(sync_plan())),
    )
    .await
    .expect("started");

    assert_eq!(outcome.endpoint.to_string(), "0.tcp.eu.ngrok.io:12345");
    assert_eq!(outcome.previous_hardware, Accelerator::None);
    assert_eq!(outcome.hardware, Accelerator::GpuP100);
    assert!(outcome.editor_opened);
    assert_eq!(outcome.remote_sync_id.as_deref(), Some(REMOTE_DEVICE_ID));

    let actions = page.actions();
    let turn_on = actions
        .iter()
        .position(|a| a == "click Turn on GPU P100")
        .expect("turned on");
    let tunnel = actions
        .iter()
        .position(|a| a.ends_with("=start_tunnel()\n"))
        .expect("tunnel typed");
    let clear = actions
        .iter()
        .position(|a| a == "click Clear")
        .expect("console cleared");
    assert!(turn_on < tunnel && tunnel < clear);

    let commands = shell.commands();
    assert_eq!(commands.len(), 4, "batch, key, add device, read id");
    assert_eq!(
        decode_batch(&commands[0]).as_deref(),
        Some("apt-get install -y syncthing\n".as_bytes())
    );
    assert!(commands[1].contains("authorized_keys"));

    let calls = runner.calls();
    assert!(calls[0].starts_with("/usr/bin/code --folder-uri"));
    assert!(calls.iter().any(|c| c == "/opt/SyncTrayzor.exe --shutdown"));
    assert!(reporter.saw("success", "tunnel at 0.tcp.eu.ngrok.io:12345"));
}

#[tokio::test]
async fn start_without_sync_stops_after_editor() {
    let page = off_notebook();
    let shell = FakeShell::new(REMOTE_DEVICE_ID);
    let runner = FakeRunner::new();
    let fs = MemoryFs::new().with_file("id_rsa.pub", PUBKEY);

    let outcome = start_session(
        &page,
        &shell,
        &runner,
        &fs,
        &FakeHttp::never(),
        &RecordingReporter::new(),
        &plan(None),
    )
    .await
    .expect("started");

    assert!(!outcome.editor_opened, "editor binary is missing");
    assert_eq!(outcome.remote_sync_id, None);
    assert_eq!(shell.commands().len(), 2);
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn install_batch_keeps_hash_characters() {
    let script = "#!/bin/sh\necho \"build #42\"\nn=${#HOME}\n";
    let page = off_notebook();
    let shell = FakeShell::new(REMOTE_DEVICE_ID);
    let fs = MemoryFs::new().with_file("id_rsa.pub", PUBKEY);
    let plan = StartPlan {
        install_script: script.to_string(),
        ..plan(None)
    };

    start_session(
        &page,
        &shell,
        &FakeRunner::new(),
        &fs,
        &FakeHttp::never(),
        &RecordingReporter::new(),
        &plan,
    )
    .await
    .expect("started");

    assert_eq!(
        decode_batch(&shell.commands()[0]).as_deref(),
        Some(script.as_bytes())
    );
}

#[tokio::test]
async fn start_refuses_a_running_notebook() {
    let page = FakePage::new().with_colors(&[RUNNING]);
    let shell = FakeShell::new(REMOTE_DEVICE_ID);

    let err = start_session(
        &page,
        &shell,
        &FakeRunner::new(),
        &MemoryFs::new(),
        &FakeHttp::up(),
        &RecordingReporter::new(),
        &plan(None),
    )
    .await
    .expect_err("already running");

    assert!(matches!(
        err.downcast_ref::<NotebookError>(),
        Some(NotebookError::AlreadyRunning)
    ));
    assert!(page.actions().is_empty(), "nothing clicked");
    assert!(shell.commands().is_empty());
}

#[tokio::test]
async fn start_reports_notebook_that_stays_off() {
    let page = FakePage::new()
        .with_colors(&[OFF])
        .with_accelerator("None");

    let err = start_session(
        &page,
        &FakeShell::new(REMOTE_DEVICE_ID),
        &FakeRunner::new(),
        &MemoryFs::new(),
        &FakeHttp::up(),
        &RecordingReporter::new(),
        &plan(None),
    )
    .await
    .expect_err("did not start");

    assert!(matches!(
        err.downcast_ref::<NotebookError>(),
        Some(NotebookError::DidNotStart)
    ));
    assert!(page.clicked("Run current cell"));
}

#[tokio::test]
async fn start_fails_when_tunnel_never_prints() {
    let page = FakePage::new()
        .with_colors(&[OFF, RUNNING])
        .with_accelerator("None")
        .with_bodies(&[Some("Console")]);
    let shell = FakeShell::new(REMOTE_DEVICE_ID);

    let err = start_session(
        &page,
        &shell,
        &FakeRunner::new(),
        &MemoryFs::new(),
        &FakeHttp::up(),
        &RecordingReporter::new(),
        &plan(None),
    )
    .await
    .expect_err("no tunnel");

    assert!(err.to_string().contains("after 3 attempts"));
    assert!(shell.commands().is_empty());
}

// ── Shutdown ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn shutdown_of_off_notebook_does_nothing() {
    let page = FakePage::new().with_colors(&[OFF]);
    let reporter = RecordingReporter::new();

    let outcome = shut_down(&page, polling(), &reporter)
        .await
        .expect("checked");

    assert_eq!(outcome, ShutdownOutcome::AlreadyOff);
    assert!(page.actions().is_empty());
    assert!(reporter.saw("success", "already off"));
}

#[tokio::test]
async fn shutdown_stops_running_session() {
    let page = FakePage::new().with_colors(&[RUNNING, LOADING, OFF]);
    let reporter = RecordingReporter::new();

    let outcome = shut_down(&page, polling(), &reporter)
        .await
        .expect("stopped");

    assert_eq!(outcome, ShutdownOutcome::TurnedOff);
    let actions = page.actions();
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0], "click More settings");
    assert!(actions[1].contains("Stop session"));
    assert!(reporter.saw("success", "Turned off"));
}

#[tokio::test]
async fn shutdown_that_does_not_take_warns() {
    let page = FakePage::new().with_colors(&[RUNNING]);
    let reporter = RecordingReporter::new();

    let outcome = shut_down(&page, polling(), &reporter)
        .await
        .expect("attempted");

    assert_eq!(outcome, ShutdownOutcome::StillRunning);
    assert!(reporter.saw("warn", "Unable to turn off"));
}
