//! Command-line interface for scopes
//!
//! Every mutating command persists its change and then plays the part of the
//! host's "configuration changed" event by refreshing the exclusion map.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{load_config, merge_cli_with_config, CliOverrides, JsonSettingsFile};
use crate::scan::LocalFs;
use crate::store::ScopeStore;

mod info;
mod refresh;
mod scope;
mod utils;

/// Named include/exclude scopes for your editor's file explorer
#[derive(Parser)]
#[command(name = "scopes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    session: SessionArgs,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct SessionArgs {
    /// Host settings file holding files.exclude [default: <ROOT>/.vscode/settings.json]
    #[arg(long, global = true, env = "SCOPES_SETTINGS", value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Workspace folder (repeat for multi-root workspaces) [default: current directory]
    #[arg(long = "root", global = true, value_name = "DIR")]
    roots: Vec<PathBuf>,

    /// Display name of the open workspace
    #[arg(long, global = true, env = "SCOPES_WORKSPACE_NAME", value_name = "NAME")]
    workspace_name: Option<String>,

    /// Config file (default: auto-discover scopes.toml / scopes.yml)
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all scopes and mark the active one
    List,

    /// Show the included and excluded paths of a scope
    Show(info::ShowArgs),

    /// Make a scope active, creating it if needed
    Use(scope::NameArgs),

    /// Delete a scope
    Delete(scope::NameArgs),

    /// Turn scope-driven exclusions on or off
    Toggle,

    /// Toggle a path in the active scope's inclusions
    Include(scope::PathArgs),

    /// Toggle a path in the active scope's exclusions
    Exclude(scope::PathArgs),

    /// Recompute and write the host's files.exclude
    Refresh(refresh::RefreshArgs),

    /// Report whether paths are hidden by the current files.exclude
    Check(info::CheckArgs),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub(crate) type Store = ScopeStore<JsonSettingsFile, LocalFs>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "scopes", &mut std::io::stdout());
        return Ok(());
    }

    let mut store = open_store(cli.session)?;
    match cli.command {
        Commands::List => info::list(&store),
        Commands::Show(args) => info::show(&store, args),
        Commands::Use(args) => scope::use_scope(&mut store, args),
        Commands::Delete(args) => scope::delete(&mut store, args),
        Commands::Toggle => scope::toggle(&mut store),
        Commands::Include(args) => scope::include(&mut store, args),
        Commands::Exclude(args) => scope::exclude(&mut store, args),
        Commands::Refresh(args) => refresh::run(&mut store, args),
        Commands::Check(args) => info::check(&store, args),
        Commands::Completions { .. } => Ok(()),
    }
}

fn open_store(args: SessionArgs) -> Result<Store> {
    let cwd = std::env::current_dir()?;
    let file_config = load_config(&cwd, args.config.as_deref())?;
    let overrides = CliOverrides {
        settings: args.settings,
        roots: args.roots,
        workspace_name: args.workspace_name,
    };
    let session = merge_cli_with_config(overrides, file_config, &cwd);
    tracing::debug!(
        "Settings file {}, workspace '{}'",
        session.settings_path.display(),
        session.workspace.name()
    );

    ScopeStore::open(JsonSettingsFile::new(session.settings_path), session.workspace, LocalFs)
}
