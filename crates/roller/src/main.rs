//! Knucklebones Roller - Main entry point.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;

use cli::Cli;
use config::{OutputFormat, RollerConfig};
use knucklebones_domain::ThreadRandom;

fn main() -> anyhow::Result<()> {
    // Load environment from repo root so `cargo run -p knucklebones-roller` picks up .env
    load_dotenv_from_repo_root();

    let cli = Cli::parse();
    let config = RollerConfig::from_env().context("loading roller configuration")?;

    // Logs go to stderr; stdout carries only results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(?config, "Loaded configuration");

    let output = if cli.json {
        OutputFormat::Json
    } else {
        config.output
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(&cli.command, &config, output, ThreadRandom, &mut out)
}

/// Load `.env.local` then `.env` from the workspace this binary was built in.
///
/// The path is fixed at compile time, so this only finds files under `cargo run`;
/// an installed binary reads its configuration from the process environment.
fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
