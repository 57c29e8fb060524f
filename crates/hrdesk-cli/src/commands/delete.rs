//! Delete command implementation.

use anyhow::{Context as _, Result};
use clap::Args;

use hrdesk_core::Resource;

use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Resource name
    pub resource: Resource,

    /// Record id
    pub id: String,
}

pub async fn run(ctx: &Context, args: DeleteArgs) -> Result<()> {
    let client = ctx.client()?;

    client
        .resource(args.resource)
        .delete(&args.id)
        .await
        .with_context(|| format!("Failed to delete {} {}", args.resource, args.id))?;

    output::success(&format!("Deleted {} {}", args.resource, args.id));
    Ok(())
}
