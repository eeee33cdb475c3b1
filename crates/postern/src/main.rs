//! Postern - admin session gate for a content site.
//!
//! Main entry point for the Postern CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{grant, list, revoke, status, sweep};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Postern - inspect and manage admin sessions
#[derive(Parser)]
#[command(name = "postern")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the session state file (default: ~/.postern)
    #[arg(long, global = true, env = "POSTERN_STATE_DIR")]
    pub state_dir: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show store location and session counts
    Status(status::StatusArgs),

    /// List sessions
    List(list::ListArgs),

    /// Remove sessions older than the TTL
    Sweep(sweep::SweepArgs),

    /// Revoke one session, or all of them
    Revoke(revoke::RevokeArgs),

    /// Issue a new admin session and print its token
    Grant(grant::GrantArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing. Logs go to stderr so --json output stays scriptable.
    let filter = if cli.verbose {
        "postern=debug,postern_session=debug,info"
    } else {
        "postern=info,postern_session=info,warn"
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();

    // Build the store config from global flags
    let mut config = postern_session::StoreConfig::new();
    if let Some(dir) = &cli.state_dir {
        config = config.with_state_dir(dir);
    }
    tracing::debug!(state_file = %config.sessions_path().display(), "Using session store");

    // Create context for commands
    let ctx = commands::Context {
        config,
        json_output: cli.json,
        verbose: cli.verbose,
    };

    // Dispatch to command handlers
    match cli.command {
        Commands::Status(args) => status::run(args, &ctx).await,
        Commands::List(args) => list::run(args, &ctx).await,
        Commands::Sweep(args) => sweep::run(args, &ctx).await,
        Commands::Revoke(args) => revoke::run(args, &ctx).await,
        Commands::Grant(args) => grant::run(args, &ctx).await,
    }
}
