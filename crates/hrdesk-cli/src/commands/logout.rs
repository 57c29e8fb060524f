//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use hrdesk_core::SessionStore;

use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(ctx: &Context, _args: LogoutArgs) -> Result<()> {
    ctx.store()?.clear().await;
    output::success("Logged out");
    Ok(())
}
