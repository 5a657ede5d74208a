//! `glance` command line: config, logging, one dashboard run, output.

mod cli;

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use glance_adapter_http::HttpApiAdapter;
use glance_application::DashboardRuntime;
use glance_domain::{Dashboard, GlanceConfig};
use glance_ui_presentation::{RenderOptions, render, render_notice};

pub use cli::{Cli, config_path};

/// Parses the command line (after loading `.env`) and runs once.
pub async fn run() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run_with(&cli).await
}

pub async fn run_with(cli: &Cli) -> Result<()> {
    let path = cli.config_path();
    let config = GlanceConfig::load_or_default(&path)?;
    info!(path = %path.display(), "loaded config");

    let token = cli.token.clone().or_else(|| config.api.token.clone());
    if token.is_none() {
        warn!("no API token configured; requests are unauthenticated");
    }
    let api = HttpApiAdapter::new(&config.api, token)?;

    let mut runtime = DashboardRuntime::new(Arc::new(api), config.metrics.clone());
    let dashboard = runtime
        .run()
        .await
        .context("failed to load dashboard")?;

    if let Some(notice) = notice(cli, &dashboard) {
        eprintln!("{notice}");
    }
    print!("{}", output(cli, &dashboard)?);
    Ok(())
}

/// JSON or rendered text for stdout, as selected on the command line.
pub fn output(cli: &Cli, dashboard: &Dashboard) -> Result<String> {
    if cli.json {
        let mut json =
            serde_json::to_string_pretty(dashboard).context("failed to serialize dashboard")?;
        json.push('\n');
        return Ok(json);
    }
    let color = !cli.no_color && std::io::stdout().is_terminal();
    Ok(render(dashboard, &render_options(color)))
}

/// Warning for stderr. Never emitted alongside JSON.
pub fn notice(cli: &Cli, dashboard: &Dashboard) -> Option<String> {
    if cli.json {
        return None;
    }
    let color = !cli.no_color && std::io::stderr().is_terminal();
    render_notice(dashboard, &render_options(color))
}

fn render_options(color: bool) -> RenderOptions {
    RenderOptions::new(Utc::now()).with_color(color)
}

/// Logs go to stderr. `-v` forces debug, otherwise `RUST_LOG` or `warn`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
