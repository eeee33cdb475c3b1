//! Status command - shows store location and session counts.

use anyhow::Result;
use clap::Args;
use console::{Style, style};
use serde::Serialize;

use postern_session::now_millis;

use super::Context;

/// Arguments for the status command.
#[derive(Args, Debug)]
pub struct StatusArgs {}

/// Status response for JSON output.
#[derive(Debug, Serialize)]
struct StatusOutput {
    state_file: String,
    sessions: usize,
    live: usize,
    expired: usize,
    ttl_secs: u64,
}

/// Run the status command.
pub async fn run(_args: StatusArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store();
    let policy = store.policy();

    let entries = store.list().await;
    let now = now_millis();
    let expired = entries
        .iter()
        .filter(|(_, record)| policy.is_expired_at(record, now))
        .count();
    let sessions = entries.len();
    let live = sessions - expired;

    let state_file = store.config().sessions_path();

    if ctx.json_output {
        let output = StatusOutput {
            state_file: state_file.display().to_string(),
            sessions,
            live,
            expired,
            ttl_secs: policy.ttl().as_secs(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let dim = Style::new().dim();
        let green = Style::new().green();
        let yellow = Style::new().yellow();

        println!();
        println!("{}", style("Postern Session Store").bold());
        println!("{}", dim.apply_to("─".repeat(40)));
        println!();
        println!("  {} {}", dim.apply_to("State file:"), state_file.display());
        println!(
            "  {} {}",
            dim.apply_to("TTL:"),
            super::fmt_duration_ms(policy.ttl().as_millis() as i64)
        );
        println!("  {} {}", dim.apply_to("Sessions:"), sessions);
        println!("  {} {}", dim.apply_to("Live:"), green.apply_to(live));
        if expired > 0 {
            println!(
                "  {} {} {}",
                dim.apply_to("Expired:"),
                yellow.apply_to(expired),
                dim.apply_to("(run 'postern sweep' to remove)")
            );
        }
        println!();
    }

    Ok(())
}
