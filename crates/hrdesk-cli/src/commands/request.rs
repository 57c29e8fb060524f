//! Raw request command implementation.

use anyhow::{Context as _, Result, bail};
use clap::Args;
use colored::Colorize;
use serde_json::Value;

use hrdesk_core::{ApiRequest, Method};

use super::read_json;
use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, PUT, PATCH, DELETE)
    pub method: Method,

    /// API path, e.g. /goals
    pub path: String,

    /// Query parameter as key=value (repeatable)
    #[arg(long = "query", short = 'q')]
    pub query: Vec<String>,

    /// JSON body: inline, @file, or - for stdin
    #[arg(long)]
    pub data: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(ctx: &Context, args: RequestArgs) -> Result<()> {
    let client = ctx.client()?;

    let mut request = ApiRequest::new(args.method, args.path.as_str());
    for pair in &args.query {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("Invalid query parameter '{pair}', expected key=value");
        };
        request = request.query(key, value);
    }
    if let Some(data) = &args.data {
        request = request.json(&read_json(data)?)?;
    }

    let response = client
        .request(request)
        .await
        .with_context(|| format!("{} {} failed", args.method, args.path))?;

    eprintln!("{}", format!("HTTP {}", response.status).dimmed());

    if response.body.is_empty() {
        return Ok(());
    }

    match response.json::<Value>() {
        Ok(value) => output::json(&value, args.pretty)?,
        Err(_) => println!("{}", response.text()),
    }

    Ok(())
}
