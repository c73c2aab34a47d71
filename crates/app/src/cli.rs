//! Command-line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use courier_domain::{HttpMethod, RequestDraft};

/// Compose, send and replay HTTP requests through the Courier backend.
#[derive(Debug, Parser)]
#[command(name = "courier", version, about)]
pub struct Cli {
    /// Config file (defaults to <config dir>/courier/config.toml)
    #[arg(long, global = true, env = "COURIER_CONFIG")]
    pub config: Option<PathBuf>,

    /// User id to act as (overrides the config file)
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Log request lifecycle to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send a request through the proxy
    Send {
        #[command(flatten)]
        request: RequestArgs,

        /// Environment to resolve {{variables}} from
        #[arg(short, long)]
        env: Option<String>,
    },
    /// Request history commands
    History {
        #[command(subcommand)]
        history_cmd: HistoryCommand,
    },
    /// Collection commands
    Collections {
        #[command(subcommand)]
        collections_cmd: CollectionsCommand,
    },
    /// Environment commands
    Env {
        #[command(subcommand)]
        env_cmd: EnvCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// List recorded requests
    List,
    /// Delete all history
    Clear,
    /// Write history to api-history-YYYY-MM-DD.json
    Export {
        /// Directory to write into
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Read and validate an exported history file
    Import {
        /// File to import
        file: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum CollectionsCommand {
    /// List collections
    List,
    /// Create an empty collection
    Create {
        /// Collection name
        name: String,
    },
    /// Save a request (templates unresolved) into a collection
    Save {
        /// Collection ID
        collection_id: String,

        #[command(flatten)]
        request: RequestArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum EnvCommand {
    /// List environments
    List,
    /// Show the variables of an environment (the active one by default)
    Show {
        /// Environment ID
        id: Option<String>,
    },
}

/// Request fields shared by `send` and `collections save`.
#[derive(Debug, Args)]
pub struct RequestArgs {
    /// URL, may contain {{variables}}
    pub url: String,

    /// HTTP method
    #[arg(short = 'X', long, default_value = "GET")]
    pub method: HttpMethod,

    /// Header as "Name: value" (repeatable)
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Query parameter as "key=value" (repeatable)
    #[arg(short = 'q', long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// JSON body
    #[arg(short = 'd', long = "data")]
    pub body: Option<String>,
}

impl RequestArgs {
    /// Builds the draft these arguments describe.
    pub fn to_draft(&self) -> RequestDraft {
        let mut draft = RequestDraft::new(self.method, self.url.clone());
        for (key, value) in &self.headers {
            draft.headers.add_with(key.clone(), value.clone());
        }
        for (key, value) in &self.params {
            draft.params.add_with(key.clone(), value.clone());
        }
        draft.body = self.body.clone().unwrap_or_default();
        draft
    }
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected \"Name: value\", got {raw:?}"))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected \"key=value\", got {raw:?}"))?;
    Ok((key.to_string(), value.to_string()))
}
