//! Whoami command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use hrdesk_core::SessionStore;

use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Pretty-print stored profile fields
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(ctx: &Context, args: WhoamiArgs) -> Result<()> {
    let store = ctx.store()?;
    let session = store
        .read()
        .await
        .context("No active session. Run 'hrdesk login' first.")?;

    output::field("API", &ctx.api_url);
    output::field("Session", &store.path().display().to_string());

    if !session.extra().is_empty() {
        output::json(&serde_json::Value::Object(session.extra().clone()), args.pretty)?;
    }

    Ok(())
}
