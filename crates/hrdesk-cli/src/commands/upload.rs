//! Bulk upload command implementation.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use colored::Colorize;

use hrdesk_core::{Resource, Upload};

use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Resource name
    pub resource: Resource,

    /// Spreadsheet or CSV file to upload
    pub file: PathBuf,

    /// Content type of the file
    #[arg(long, default_value = "application/octet-stream")]
    pub content_type: String,

    /// Pretty-print the upload report
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(ctx: &Context, args: UploadArgs) -> Result<()> {
    let client = ctx.client()?;

    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let file_name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .context("Upload path has no file name")?;

    eprintln!("{}", format!("Uploading {file_name}...").dimmed());

    let report = client
        .resource(args.resource)
        .bulk_upload(Upload::new(file_name, bytes).content_type(&args.content_type))
        .await
        .with_context(|| format!("Failed to upload {}", args.resource))?;

    output::json(&report, args.pretty)
}
