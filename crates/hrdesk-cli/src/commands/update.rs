//! Update command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use hrdesk_core::Resource;

use super::read_json;
use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Resource name
    pub resource: Resource,

    /// Record id
    pub id: String,

    /// JSON body: inline, @file, or - for stdin
    #[arg(long)]
    pub data: String,
}

pub async fn run(ctx: &Context, args: UpdateArgs) -> Result<()> {
    let client = ctx.client()?;
    let body = read_json(&args.data)?;

    let updated = client
        .resource(args.resource)
        .update(&args.id, &body)
        .await
        .with_context(|| format!("Failed to update {} {}", args.resource, args.id))?;

    output::success(&format!("Updated {} {}", args.resource, args.id));
    output::json(&updated, false)
}
