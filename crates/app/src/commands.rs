//! Subcommand handlers.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use courier_application::Session;
use courier_application::ports::Clock;
use courier_domain::EnvironmentRegistry;
use courier_infrastructure::{HistoryFile, ReqwestBackend, SystemClock};

use crate::cli::{CollectionsCommand, EnvCommand, HistoryCommand, RequestArgs};

/// The session type the CLI works with.
pub type CliSession = Session<ReqwestBackend, ReqwestBackend, ReqwestBackend>;

/// Creates a session where one backend serves every port.
pub fn session(backend: ReqwestBackend, environments: EnvironmentRegistry) -> CliSession {
    let backend = Arc::new(backend);
    Session::new(
        Arc::clone(&backend),
        Arc::clone(&backend),
        backend,
        environments,
    )
}

pub async fn send(
    session: &mut CliSession,
    request: &RequestArgs,
    env: Option<&str>,
) -> Result<ExitCode> {
    if let Some(env) = env {
        session.select_environment(env)?;
    }
    *session.draft_mut() = request.to_draft();

    let failed = session.send().await.is_error();
    if let Some(view) = session.response_view() {
        for line in view.to_lines() {
            println!("{line}");
        }
    }
    // Let the history append finish before the process exits.
    session.flush_history().await;

    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

pub async fn history(session: &mut CliSession, command: HistoryCommand) -> Result<ExitCode> {
    let clock = SystemClock::new();
    match command {
        HistoryCommand::List => {
            let items = session
                .refresh_history()
                .await
                .context("failed to load history")?;
            if items.is_empty() {
                println!("No history yet");
            }
            let now = clock.now();
            for item in items {
                println!(
                    "{:>6}  {:<6} {}  ({})",
                    item.id,
                    item.request.method,
                    item.request.url,
                    item.time_ago(now)
                );
            }
        }
        HistoryCommand::Clear => {
            session
                .clear_history()
                .await
                .context("failed to clear history")?;
            println!("History cleared");
        }
        HistoryCommand::Export { dir } => {
            session
                .refresh_history()
                .await
                .context("failed to load history")?;
            let path = HistoryFile::export_path(&dir, clock.now());
            HistoryFile::new().write(&path, session.history()).await?;
            println!("Exported {} items to {}", session.history().len(), path.display());
        }
        HistoryCommand::Import { file } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            let count = session
                .import_history(&text)
                .with_context(|| format!("Error importing {}", file.display()))?;
            for item in session.history() {
                println!("{:>6}  {:<6} {}", item.id, item.request.method, item.request.url);
            }
            println!("Imported {count} history items");
        }
    }
    Ok(ExitCode::SUCCESS)
}

pub async fn collections(
    session: &mut CliSession,
    command: CollectionsCommand,
) -> Result<ExitCode> {
    match command {
        CollectionsCommand::List => {
            let collections = session
                .refresh_collections()
                .await
                .context("failed to load collections")?;
            if collections.is_empty() {
                println!("No collections yet");
            }
            for collection in collections {
                println!(
                    "{:>6}  {} ({} requests)",
                    collection.id,
                    collection.name,
                    collection.requests.len()
                );
                for request in &collection.requests {
                    println!("          {}", request.name);
                }
            }
        }
        CollectionsCommand::Create { name } => {
            session.create_collection(&name).await?;
            println!("Created collection {:?}", name.trim());
        }
        CollectionsCommand::Save {
            collection_id,
            request,
        } => {
            *session.draft_mut() = request.to_draft();
            let saved = session.save_to_collection(&collection_id).await?;
            println!("Saved {} to collection {collection_id}", saved.name);
        }
    }
    Ok(ExitCode::SUCCESS)
}

pub fn environments(session: &CliSession, command: &EnvCommand) -> Result<ExitCode> {
    let registry = session.environments();
    match command {
        EnvCommand::List => {
            for (id, environment) in registry.iter() {
                let marker = if id == registry.active_id() { "*" } else { " " };
                println!("{marker} {id:<10} {}", environment.name);
            }
        }
        EnvCommand::Show { id } => {
            let id = id.as_deref().unwrap_or_else(|| registry.active_id());
            let Some(environment) = registry.get(id) else {
                bail!("unknown environment: {id}");
            };
            println!("{} ({id})", environment.name);
            for (key, value) in &environment.variables {
                println!("  {key} = {value:?}");
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
