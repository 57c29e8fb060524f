//! Get command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use hrdesk_core::Resource;

use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Resource name
    pub resource: Resource,

    /// Record id
    pub id: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(ctx: &Context, args: GetArgs) -> Result<()> {
    let client = ctx.client()?;

    let record = client
        .resource(args.resource)
        .get(&args.id)
        .await
        .with_context(|| format!("Failed to fetch {} {}", args.resource, args.id))?;

    output::json(&record, args.pretty)
}
