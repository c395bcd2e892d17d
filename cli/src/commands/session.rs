//! Start or close the Kaggle session chosen in the menu.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::app::AppContext;
use crate::application::ports::EnvSource as _;
use crate::application::services::local::{LocalSetup, check_local_setup};
use crate::application::services::session::{
    self as service, Login, Polling, SessionOutcome, ShutdownOutcome, StartPlan,
};
use crate::domain::notebook::{NotebookContent, render_tunnel_script};
use crate::domain::secret::generate_secret;
use crate::domain::{Accelerator, Intent, Settings, SshCredentials};
use crate::infra::assets::{INSTALL_SCRIPT, TUNNEL_NOTEBOOK, load_asset};
use crate::infra::browser::PlaywrightNotebook;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::default_syncthing_config;
use crate::infra::fs::OsFs;
use crate::infra::network::UreqProbe;
use crate::infra::ssh::Ssh2Shell;
use crate::output::human::HumanRenderer;
use crate::output::json::format_outcome;
use crate::output::progress;

/// Run the chosen action against the notebook.
///
/// Settings and local files are checked before the browser starts. The
/// browser is closed whether or not the action succeeds.
///
/// # Errors
///
/// Returns the first failure of configuration, login, or the action itself.
pub async fn run(app: &AppContext, intent: Intent) -> Result<()> {
    let settings = Settings::from_lookup(|name| app.env.var(name))?;
    let setup = check_local_setup(
        &OsFs,
        &settings,
        &app.tunables,
        std::env::consts::OS,
        default_syncthing_config(),
    )?;
    tracing::debug!(?settings, "settings loaded");

    let polling = Polling::from(&app.tunables.polling);
    let plan = match intent {
        Intent::Start(accelerator) => {
            Some(start_plan(app, &settings, setup, accelerator, polling)?)
        }
        Intent::Shutdown => None,
    };

    let notebook = PlaywrightNotebook::launch(app.headless).await?;
    let result = drive(app, &notebook, &settings, polling, plan.as_ref()).await;
    if let Err(e) = notebook.close().await {
        tracing::warn!(error = %e, "browser did not close cleanly");
    }
    result
}

async fn drive(
    app: &AppContext,
    page: &PlaywrightNotebook,
    settings: &Settings,
    polling: Polling,
    plan: Option<&StartPlan>,
) -> Result<()> {
    let tunables = &app.tunables;
    let login = Login {
        notebook_url: &settings.notebook_url,
        account: &settings.account,
        password: &settings.account_password,
        timeout: Duration::from_secs(tunables.browser.login_timeout_secs),
        interval: polling.interval,
    };

    let pb = app
        .output
        .show_progress()
        .then(|| progress::spinner("signing in to Kaggle..."));
    match service::open_notebook(page, &login).await {
        Ok(()) => {
            if let Some(pb) = &pb {
                progress::finish_ok(pb, "notebook opened");
            }
        }
        Err(e) => {
            if let Some(pb) = &pb {
                progress::finish_error(pb, "could not open the notebook");
            }
            return Err(e);
        }
    }

    let reporter = app.terminal_reporter();
    match plan {
        None => {
            let outcome = service::shut_down(page, polling, &reporter).await?;
            report_shutdown(app, outcome)
        }
        Some(plan) => {
            let outcome = service::start_session(
                page,
                &Ssh2Shell,
                &TokioCommandRunner::default(),
                &OsFs,
                &UreqProbe,
                &reporter,
                plan,
            )
            .await?;
            report_session(app, &outcome)
        }
    }
}

fn start_plan(
    app: &AppContext,
    settings: &Settings,
    setup: LocalSetup,
    accelerator: Accelerator,
    polling: Polling,
) -> Result<StartPlan> {
    let assets_dir = app.tunables.paths.assets_dir.as_deref();
    let notebook = load_asset(TUNNEL_NOTEBOOK, assets_dir)?;
    let content = NotebookContent::from_ipynb(&notebook)
        .with_context(|| format!("reading {TUNNEL_NOTEBOOK}"))?;
    // Sent byte for byte; `#` may be part of a string, URL or `${#var}`.
    let install_script = load_asset(INSTALL_SCRIPT, assets_dir)?;

    let password = generate_secret();
    let tunnel_script = render_tunnel_script(&content.code, &password, &settings.ngrok_token);

    Ok(StartPlan {
        accelerator,
        polling,
        credentials: SshCredentials {
            user: app.tunables.remote.user.clone(),
            password,
        },
        tunnel_script,
        install_script,
        public_key: setup.public_key,
        editor: settings.editor_path.clone(),
        remote_folder: app.tunables.remote.folder.clone(),
        local_sync_id: settings.sync_device_id.clone(),
        sync: setup.sync,
    })
}

fn report_session(app: &AppContext, outcome: &SessionOutcome) -> Result<()> {
    if app.is_json() {
        let report = serde_json::json!({ "action": "start", "session": outcome });
        println!("{}", format_outcome(&report)?);
    } else {
        HumanRenderer::new(&app.output).render_session(outcome);
    }
    Ok(())
}

fn report_shutdown(app: &AppContext, outcome: ShutdownOutcome) -> Result<()> {
    if app.is_json() {
        let report = serde_json::json!({ "action": "shutdown", "result": outcome });
        println!("{}", format_outcome(&report)?);
    } else {
        HumanRenderer::new(&app.output).render_shutdown(outcome);
    }
    Ok(())
}
