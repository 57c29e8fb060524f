//! Create command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use hrdesk_core::Resource;

use super::read_json;
use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Resource name
    pub resource: Resource,

    /// JSON body: inline, @file, or - for stdin
    #[arg(long)]
    pub data: String,
}

pub async fn run(ctx: &Context, args: CreateArgs) -> Result<()> {
    let client = ctx.client()?;
    let body = read_json(&args.data)?;

    let created = client
        .resource(args.resource)
        .create(&body)
        .await
        .with_context(|| format!("Failed to create {}", args.resource))?;

    output::success(&format!("Created {}", args.resource));
    output::json(&created, false)
}
