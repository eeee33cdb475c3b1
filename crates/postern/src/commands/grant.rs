//! Grant command - issues a new admin session.

use anyhow::Result;
use clap::Args;
use console::{Style, style};
use serde::Serialize;

use super::Context;

/// Arguments for the grant command.
#[derive(Args, Debug)]
pub struct GrantArgs {
    /// Address to record on the session
    #[arg(long, default_value = "127.0.0.1")]
    pub ip: String,
}

/// Grant response for JSON output.
#[derive(Debug, Serialize)]
struct GrantOutput {
    token: String,
    ip: String,
    created: i64,
    expires_at: i64,
}

/// Run the grant command.
pub async fn run(args: GrantArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store();
    let policy = store.policy();

    let token = uuid::Uuid::new_v4().to_string();
    let record = store.create(&token, &args.ip).await?;
    let expires_at = policy.expires_at(&record);

    if ctx.json_output {
        let output = GrantOutput {
            token,
            ip: record.ip,
            created: record.created,
            expires_at,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let dim = Style::new().dim();

        println!();
        println!("{}", style("Granted admin session").bold());
        println!();
        println!("  {} {}", dim.apply_to("Token:"), token);
        println!("  {} {}", dim.apply_to("IP:"), record.ip);
        println!(
            "  {} {} {}",
            dim.apply_to("Expires:"),
            super::fmt_timestamp(expires_at),
            dim.apply_to(format!(
                "(in {})",
                super::fmt_duration_ms(policy.ttl().as_millis() as i64)
            ))
        );
        println!();
        println!(
            "  {}",
            dim.apply_to("The token is shown once; store it somewhere safe.")
        );
        println!();
    }

    Ok(())
}
