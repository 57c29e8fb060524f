//! List command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use hrdesk_core::{ListParams, Resource};

use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Resource name (staff, departments, goals, ...)
    pub resource: Resource,

    /// Page number
    #[arg(long)]
    pub page: Option<u32>,

    /// Page size
    #[arg(long)]
    pub limit: Option<u32>,

    /// Search filter
    #[arg(long)]
    pub search: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(ctx: &Context, args: ListArgs) -> Result<()> {
    let client = ctx.client()?;

    let params = ListParams {
        page: args.page,
        limit: args.limit,
        search: args.search,
    };

    let result = client
        .resource(args.resource)
        .list(&params)
        .await
        .with_context(|| format!("Failed to list {}", args.resource))?;

    output::json(&result, args.pretty)
}
