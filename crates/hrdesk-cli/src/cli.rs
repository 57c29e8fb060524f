//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{
    create::CreateArgs, delete::DeleteArgs, get::GetArgs, list::ListArgs, login::LoginArgs,
    logout::LogoutArgs, request::RequestArgs, update::UpdateArgs, upload::UploadArgs,
    whoami::WhoamiArgs,
};

/// Command-line client for the hrdesk API.
#[derive(Parser, Debug)]
#[command(name = "hrdesk")]
#[command(author, version = env!("HRDESK_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// API base URL
    #[arg(
        long,
        env = "HRDESK_API_URL",
        default_value = "http://localhost:8080",
        global = true
    )]
    pub api_url: String,

    /// Session file (defaults to the platform data directory)
    #[arg(long, env = "HRDESK_SESSION_FILE", global = true)]
    pub session_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new session
    Login(LoginArgs),

    /// Discard the stored session
    Logout(LogoutArgs),

    /// Display the stored session
    Whoami(WhoamiArgs),

    /// Send a raw request to an API path
    Request(RequestArgs),

    /// List records of a resource
    List(ListArgs),

    /// Fetch a single record
    Get(GetArgs),

    /// Create a record
    Create(CreateArgs),

    /// Update a record
    Update(UpdateArgs),

    /// Delete a record
    Delete(DeleteArgs),

    /// Bulk-upload records from a file
    Upload(UploadArgs),
}
