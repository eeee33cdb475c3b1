//! Revoke command - ends one session, or all of them.

use anyhow::Result;
use clap::Args;
use console::Style;
use serde::Serialize;

use super::Context;

/// Arguments for the revoke command.
#[derive(Args, Debug)]
pub struct RevokeArgs {
    /// The session token to revoke
    #[arg(required_unless_present = "all")]
    pub token: Option<String>,

    /// Revoke every session
    #[arg(long, conflicts_with = "token")]
    pub all: bool,
}

/// Revoke response for JSON output.
#[derive(Debug, Serialize)]
struct RevokeOutput {
    revoked: usize,
    all: bool,
}

/// Run the revoke command.
pub async fn run(args: RevokeArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store();
    let dim = Style::new().dim();

    if args.all {
        let revoked = store.clear().await?;

        if ctx.json_output {
            let output = RevokeOutput { revoked, all: true };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else if revoked > 0 {
            println!("Revoked {} session(s).", revoked);
        } else {
            println!("{}", dim.apply_to("No sessions to revoke."));
        }
        return Ok(());
    }

    // Presence is checked first so the operator learns whether the token
    // actually matched anything; delete itself never complains.
    let token = args.token.as_deref().unwrap_or_default();
    let existed = store.fetch(token).await.is_some();
    store.delete(token).await?;

    if ctx.json_output {
        let output = RevokeOutput {
            revoked: usize::from(existed),
            all: false,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if existed {
        println!("Session {} revoked.", super::mask_token(token));
    } else {
        println!("{}", dim.apply_to("No session found for that token."));
    }

    Ok(())
}
