//! Sweep command - removes sessions older than the TTL.

use anyhow::Result;
use clap::Args;
use console::Style;
use serde::Serialize;

use postern_session::now_millis;

use super::Context;

/// Arguments for the sweep command.
#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Report what would be removed without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Sweep response for JSON output.
#[derive(Debug, Serialize)]
struct SweepOutput {
    removed: usize,
    remaining: usize,
    dry_run: bool,
}

/// Run the sweep command.
pub async fn run(args: SweepArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store();

    let mut doomed: Vec<String> = Vec::new();
    let (removed, remaining) = if args.dry_run {
        let policy = store.policy();
        let now = now_millis();
        let entries = store.list().await;
        doomed = entries
            .iter()
            .filter(|(_, record)| policy.is_expired_at(record, now))
            .map(|(token, _)| super::mask_token(token))
            .collect();
        (doomed.len(), entries.len() - doomed.len())
    } else {
        let removed = store.sweep().await?;
        (removed, store.count().await)
    };

    if ctx.json_output {
        let output = SweepOutput {
            removed,
            remaining,
            dry_run: args.dry_run,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let dim = Style::new().dim();
        if args.dry_run {
            println!(
                "Would remove {} expired session(s), {} would remain.",
                removed, remaining
            );
            if ctx.verbose {
                for token in &doomed {
                    println!("  {}", dim.apply_to(token));
                }
            }
            println!("  {}", dim.apply_to("(dry run, nothing changed)"));
        } else if removed > 0 {
            println!("Removed {} expired session(s), {} remain.", removed, remaining);
        } else {
            println!("Nothing to sweep, {} session(s) within TTL.", remaining);
        }
    }

    Ok(())
}
