//! List command - shows sessions, newest first.

use anyhow::Result;
use clap::Args;
use console::Style;
use serde::Serialize;

use postern_session::now_millis;

use super::Context;

/// Arguments for the list command.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show full tokens instead of masked ones
    #[arg(long)]
    pub full: bool,
}

/// One session for JSON output. Tokens are always full here; scripts
/// need them to feed back into `postern revoke`.
#[derive(Debug, Serialize)]
struct SessionOutput {
    token: String,
    ip: String,
    created: i64,
    last_activity: i64,
    expires_at: i64,
    expired: bool,
}

/// Run the list command.
pub async fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store();
    let policy = store.policy();

    let entries = store.list().await;
    let now = now_millis();

    if ctx.json_output {
        let output: Vec<SessionOutput> = entries
            .iter()
            .map(|(token, record)| SessionOutput {
                token: token.clone(),
                ip: record.ip.clone(),
                created: record.created,
                last_activity: record.last_activity,
                expires_at: policy.expires_at(record),
                expired: policy.is_expired_at(record, now),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let dim = Style::new().dim();
    let green = Style::new().green();
    let yellow = Style::new().yellow();

    if entries.is_empty() {
        println!();
        println!("  {}", dim.apply_to("No sessions."));
        println!();
        return Ok(());
    }

    println!();
    println!(
        "  {}",
        dim.apply_to(format!(
            "{:<16}  {:<15}  {:<23}  {:<23}  {:<9}  STATE",
            "TOKEN", "IP", "CREATED", "LAST ACTIVITY", "AGE"
        ))
    );

    for (token, record) in &entries {
        let shown = if args.full {
            token.clone()
        } else {
            super::mask_token(token)
        };
        let state = if policy.is_expired_at(record, now) {
            yellow.apply_to("expired")
        } else {
            green.apply_to("live")
        };
        println!(
            "  {:<16}  {:<15}  {:<23}  {:<23}  {:<9}  {}",
            shown,
            record.ip,
            super::fmt_timestamp(record.created),
            super::fmt_timestamp(record.last_activity),
            super::fmt_duration_ms(record.age_at(now)),
            state
        );
    }

    println!();
    println!(
        "  {}",
        dim.apply_to(format!("{} session(s)", entries.len()))
    );
    println!();

    Ok(())
}
