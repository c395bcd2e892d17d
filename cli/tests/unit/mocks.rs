//! Shared fakes for the application ports.
//!
//! Each fake records what the service asked of it so tests can assert on the
//! exact sequence of UI actions, remote commands and local tool calls.

#![allow(clippy::expect_used, dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use kaggle_ssh::application::ports::{
    CommandRunner, HttpProbe, LocalFs, NotebookPage, ProgressReporter, RemoteShell,
};
use kaggle_ssh::domain::status::indicator_target;
use kaggle_ssh::domain::{RemoteOutput, SshCredentials, TunnelEndpoint, UiTarget};

use crate::helpers::{exit_status, ok_output};

/// Pop the front of a script, keeping the last entry for every later call.
fn next_of<T: Clone>(queue: &Mutex<VecDeque<T>>) -> Option<T> {
    let mut queue = queue.lock().expect("lock");
    if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    }
}

// ── Fake: notebook page ──────────────────────────────────────────────────────

/// Scripted notebook page.
///
/// Visibility is keyed on the Playwright selector of a target. The "Running"
/// status indicator is visible by default; its color follows `colors`.
pub struct FakePage {
    visible: Mutex<HashSet<String>>,
    colors: Mutex<VecDeque<String>>,
    urls: Mutex<VecDeque<String>>,
    bodies: Mutex<VecDeque<Option<String>>>,
    inner_texts: HashMap<String, String>,
    quota: Vec<String>,
    actions: Mutex<Vec<String>>,
    color_reads: Mutex<Vec<String>>,
}

impl FakePage {
    pub fn new() -> Self {
        let mut visible = HashSet::new();
        visible.insert(indicator_target("Running").selector());
        Self {
            visible: Mutex::new(visible),
            colors: Mutex::new(VecDeque::new()),
            urls: Mutex::new(VecDeque::new()),
            bodies: Mutex::new(VecDeque::new()),
            inner_texts: HashMap::new(),
            quota: Vec::new(),
            actions: Mutex::new(Vec::new()),
            color_reads: Mutex::new(Vec::new()),
        }
    }

    /// Indicator colors returned by successive status reads.
    pub fn with_colors(self, colors: &[&str]) -> Self {
        *self.colors.lock().expect("lock") = colors.iter().map(ToString::to_string).collect();
        self
    }

    pub fn with_visible(self, target: &UiTarget) -> Self {
        self.visible.lock().expect("lock").insert(target.selector());
        self
    }

    pub fn without_visible(self, target: &UiTarget) -> Self {
        self.visible.lock().expect("lock").remove(&target.selector());
        self
    }

    pub fn with_urls(self, urls: &[&str]) -> Self {
        *self.urls.lock().expect("lock") = urls.iter().map(ToString::to_string).collect();
        self
    }

    pub fn with_bodies(self, bodies: &[Option<&str>]) -> Self {
        *self.bodies.lock().expect("lock") =
            bodies.iter().map(|b| b.map(ToString::to_string)).collect();
        self
    }

    pub fn with_inner_text(mut self, target: &UiTarget, text: &str) -> Self {
        self.inner_texts.insert(target.selector(), text.to_string());
        self
    }

    pub fn with_quota(mut self, quota: &[&str]) -> Self {
        self.quota = quota.iter().map(ToString::to_string).collect();
        self
    }

    /// Show the current accelerator in the session options panel.
    pub fn with_accelerator(self, label: &str) -> Self {
        let target = UiTarget::text(label);
        self.with_visible(&target)
            .with_inner_text(&target, &format!("{label}\n30 hrs"))
    }

    pub fn actions(&self) -> Vec<String> {
        self.actions.lock().expect("lock").clone()
    }

    /// Selectors whose computed color was read, in order.
    pub fn color_reads(&self) -> Vec<String> {
        self.color_reads.lock().expect("lock").clone()
    }

    pub fn clicked(&self, what: &str) -> bool {
        self.actions().contains(&format!("click {what}"))
    }

    fn record(&self, action: String) {
        self.actions.lock().expect("lock").push(action);
    }
}

impl NotebookPage for FakePage {
    async fn goto(&self, url: &str, _: Duration) -> Result<()> {
        self.record(format!("goto {url}"));
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(next_of(&self.urls).unwrap_or_default())
    }

    async fn is_visible(&self, target: &UiTarget) -> Result<bool> {
        Ok(self.visible.lock().expect("lock").contains(&target.selector()))
    }

    async fn click(&self, target: &UiTarget) -> Result<()> {
        self.record(format!("click {target}"));
        Ok(())
    }

    async fn fill(&self, target: &UiTarget, text: &str) -> Result<()> {
        self.record(format!("fill {target}={text}"));
        Ok(())
    }

    async fn press(&self, target: &UiTarget, key: &str) -> Result<()> {
        self.record(format!("press {target}:{key}"));
        Ok(())
    }

    async fn inner_text(&self, target: &UiTarget) -> Result<String> {
        self.inner_texts
            .get(&target.selector())
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no text for {target}"))
    }

    async fn text_contents(&self, _: &UiTarget) -> Result<Vec<String>> {
        Ok(self.quota.clone())
    }

    async fn computed_color(&self, target: &UiTarget) -> Result<String> {
        self.color_reads.lock().expect("lock").push(target.selector());
        next_of(&self.colors).ok_or_else(|| anyhow::anyhow!("no indicator color scripted"))
    }

    async fn body_text(&self) -> Result<Option<String>> {
        Ok(next_of(&self.bodies).flatten())
    }
}

// ── Fake: remote shell ───────────────────────────────────────────────────────

/// Records remote commands; answers `syncthing --device-id` with a fixed id.
pub struct FakeShell {
    commands: Mutex<Vec<String>>,
    device_id: String,
    fail_containing: Option<String>,
}

impl FakeShell {
    pub fn new(device_id: &str) -> Self {
        Self {
            commands: Mutex::new(Vec::new()),
            device_id: device_id.to_string(),
            fail_containing: None,
        }
    }

    /// Make every command containing `needle` exit with code 1.
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.fail_containing = Some(needle.to_string());
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().expect("lock").clone()
    }
}

impl RemoteShell for FakeShell {
    async fn exec(
        &self,
        _: &TunnelEndpoint,
        _: &SshCredentials,
        command: &str,
    ) -> Result<RemoteOutput> {
        self.commands.lock().expect("lock").push(command.to_string());
        if self
            .fail_containing
            .as_deref()
            .is_some_and(|needle| command.contains(needle))
        {
            return Ok(RemoteOutput {
                exit_code: 1,
                stdout: String::new(),
                stderr: "command failed".to_string(),
            });
        }
        let stdout = if command == "syncthing --device-id" {
            format!("{}\n", self.device_id)
        } else {
            String::new()
        };
        Ok(RemoteOutput {
            exit_code: 0,
            stdout,
            stderr: String::new(),
        })
    }
}

// ── Fake: local command runner ───────────────────────────────────────────────

/// Records local tool invocations as `"<program> <args…>"`.
pub struct FakeRunner {
    calls: Mutex<Vec<String>>,
    outputs: Mutex<VecDeque<Output>>,
    status: i32,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outputs: Mutex::new(VecDeque::new()),
            status: 0,
        }
    }

    /// Outputs returned by successive `run` calls; success when exhausted.
    pub fn with_outputs(self, outputs: Vec<Output>) -> Self {
        *self.outputs.lock().expect("lock") = outputs.into();
        self
    }

    pub fn with_status(mut self, code: i32) -> Self {
        self.status = code;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock").clone()
    }

    fn record(&self, prefix: &str, program: &Path, args: &[&str]) {
        let mut call = format!("{prefix}{}", program.display());
        for arg in args {
            call.push(' ');
            call.push_str(arg);
        }
        self.calls.lock().expect("lock").push(call);
    }
}

impl CommandRunner for FakeRunner {
    async fn run(&self, program: &Path, args: &[&str]) -> Result<Output> {
        self.record("", program, args);
        Ok(self
            .outputs
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| ok_output(b"")))
    }

    async fn run_with_timeout(&self, program: &Path, args: &[&str], _: Duration) -> Result<Output> {
        self.run(program, args).await
    }

    fn spawn_detached(&self, program: &Path, args: &[&str]) -> Result<()> {
        self.record("spawn ", program, args);
        Ok(())
    }

    async fn run_status(&self, program: &Path, args: &[&str]) -> Result<ExitStatus> {
        self.record("", program, args);
        Ok(exit_status(self.status))
    }
}

// ── Fake: filesystem ─────────────────────────────────────────────────────────

/// In-memory files keyed by path.
pub struct MemoryFs {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.files
            .lock()
            .expect("lock")
            .insert(PathBuf::from(path), content.to_string());
        self
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.files.lock().expect("lock").get(Path::new(path)).cloned()
    }
}

impl LocalFs for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        self.files.lock().expect("lock").contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .lock()
            .expect("lock")
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no such file: {}", path.display()))
    }

    fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        self.files
            .lock()
            .expect("lock")
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

// ── Fake: HTTP probe ─────────────────────────────────────────────────────────

/// Unreachable for the first `down_for` probes, reachable afterwards.
pub struct FakeHttp {
    down_for: u32,
    probes: Mutex<u32>,
}

impl FakeHttp {
    pub fn up() -> Self {
        Self::down_for(0)
    }

    pub fn down_for(probes: u32) -> Self {
        Self {
            down_for: probes,
            probes: Mutex::new(0),
        }
    }

    pub fn never() -> Self {
        Self::down_for(u32::MAX)
    }

    pub fn probes(&self) -> u32 {
        *self.probes.lock().expect("lock")
    }
}

impl HttpProbe for FakeHttp {
    async fn is_reachable(&self, _: &str) -> bool {
        let mut probes = self.probes.lock().expect("lock");
        *probes += 1;
        *probes > self.down_for
    }
}

// ── Fake: progress reporter ──────────────────────────────────────────────────

/// Collects reported messages as `"<kind>: <message>"`.
pub struct RecordingReporter {
    events: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().expect("lock").clone()
    }

    pub fn saw(&self, kind: &str, fragment: &str) -> bool {
        let prefix = format!("{kind}: ");
        self.events()
            .iter()
            .any(|e| e.starts_with(&prefix) && e.contains(fragment))
    }

    fn push(&self, kind: &str, message: &str) {
        self.events
            .lock()
            .expect("lock")
            .push(format!("{kind}: {message}"));
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.push("step", message);
    }
    fn success(&self, message: &str) {
        self.push("success", message);
    }
    fn warn(&self, message: &str) {
        self.push("warn", message);
    }
    fn info(&self, message: &str) {
        self.push("info", message);
    }
}
