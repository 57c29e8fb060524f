//! Subcommand implementations.

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod login;
pub mod logout;
pub mod request;
pub mod update;
pub mod upload;
pub mod whoami;

use std::io::{self, Read};

use anyhow::{Context as _, Result};
use serde_json::Value;

use crate::cli::{Cli, Commands};
use crate::context::Context;

pub async fn handle(cli: Cli) -> Result<()> {
    let ctx = Context::from_cli(&cli);

    match cli.command {
        Commands::Login(args) => login::run(&ctx, args).await,
        Commands::Logout(args) => logout::run(&ctx, args).await,
        Commands::Whoami(args) => whoami::run(&ctx, args).await,
        Commands::Request(args) => request::run(&ctx, args).await,
        Commands::List(args) => list::run(&ctx, args).await,
        Commands::Get(args) => get::run(&ctx, args).await,
        Commands::Create(args) => create::run(&ctx, args).await,
        Commands::Update(args) => update::run(&ctx, args).await,
        Commands::Delete(args) => delete::run(&ctx, args).await,
        Commands::Upload(args) => upload::run(&ctx, args).await,
    }
}

/// Read a JSON body given inline, as `@path`, or as `-` for stdin.
pub(crate) fn read_json(arg: &str) -> Result<Value> {
    if arg == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        serde_json::from_str(&buf).context("Invalid JSON from stdin")
    } else if let Some(path) = arg.strip_prefix('@') {
        let content = std::fs::read_to_string(path).context("Failed to read JSON file")?;
        serde_json::from_str(&content).context("Invalid JSON in file")
    } else {
        serde_json::from_str(arg).context("Invalid JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_json_is_parsed() {
        let value = read_json(r#"{"name":"HR"}"#).unwrap();
        assert_eq!(value["name"], "HR");
    }

    #[test]
    fn json_file_is_read() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("body.json");
        std::fs::write(&path, r#"{"title":"Q3"}"#).unwrap();

        let value = read_json(&format!("@{}", path.display())).unwrap();
        assert_eq!(value["title"], "Q3");
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(read_json("{nope").is_err());
    }
}
