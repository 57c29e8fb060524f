//! Client construction from global CLI options.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use tracing::debug;

use hrdesk_core::{ApiUrl, AuthClient, Navigator};
use hrdesk_file::FileSessionStore;
use hrdesk_http::{HttpConfig, HttpTransport};

use crate::cli::Cli;
use crate::output;

/// Tells the user to log in again once the session is gone.
#[derive(Debug, Clone, Copy)]
pub struct LoginPrompt;

impl Navigator for LoginPrompt {
    fn navigate_to_login(&self) {
        output::error("Session expired. Run 'hrdesk login' to sign in again.");
    }
}

pub type CliClient = AuthClient<FileSessionStore, HttpTransport, LoginPrompt>;

/// Options shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub api_url: String,
    pub session_file: Option<PathBuf>,
    pub timeout: Duration,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            api_url: cli.api_url.clone(),
            session_file: cli.session_file.clone(),
            timeout: Duration::from_secs(cli.timeout_secs),
        }
    }

    /// Build the authenticated client.
    pub fn client(&self) -> Result<CliClient> {
        let api_url = ApiUrl::new(&self.api_url).context("Invalid API URL")?;
        let transport = HttpTransport::new(HttpConfig::new(api_url).timeout(self.timeout))
            .context("Failed to build HTTP client")?;

        Ok(AuthClient::new(self.store()?, transport, LoginPrompt))
    }

    /// The session store, without any network setup.
    pub fn store(&self) -> Result<FileSessionStore> {
        let path = self.session_path()?;
        debug!(path = %path.display(), "Using session file");
        Ok(FileSessionStore::new(path))
    }

    fn session_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.session_file {
            return Ok(path.clone());
        }

        let dirs =
            ProjectDirs::from("", "", "hrdesk").context("Could not determine data directory")?;
        Ok(dirs.data_dir().join("session.json"))
    }
}
