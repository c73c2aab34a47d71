//! Courier - Command-line entry point
//!
//! Loads configuration, installs logging, builds a session against the
//! configured backend and dispatches the subcommand.

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use courier_domain::UserId;
use courier_infrastructure::{ReqwestBackend, Settings};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings::load(cli.config.as_deref()).context("failed to load configuration")?;
    debug!(api = %settings.api_base_url, "configuration loaded");

    let backend = ReqwestBackend::from_settings(&settings)?;
    let mut session = commands::session(backend, settings.registry()?);
    let user = cli.user.map(UserId::new).unwrap_or_else(|| settings.user());
    session.set_user(Some(user));

    match cli.command {
        Command::Send { request, env } => {
            commands::send(&mut session, &request, env.as_deref()).await
        }
        Command::History { history_cmd } => commands::history(&mut session, history_cmd).await,
        Command::Collections { collections_cmd } => {
            commands::collections(&mut session, collections_cmd).await
        }
        Command::Env { env_cmd } => commands::environments(&session, &env_cmd),
    }
}
