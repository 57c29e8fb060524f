//! Session persistence in a single JSON file.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use hrdesk_core::{Session, SessionStore};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// A [`SessionStore`] backed by one JSON file.
///
/// Writes go to a temporary file in the same directory which is then
/// renamed over the session file, so readers see either the old or the new
/// session. Concurrent writers from other processes are serialized with an
/// advisory lock on a sibling `.lock` file. On Unix the file is created
/// with mode `0600`.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store for the session file at `path`. Nothing is touched on
    /// disk until the first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the session file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "session".to_string())
    }

    /// Sibling lock file; always differs from the session file itself.
    fn lock_path(&self) -> PathBuf {
        self.path.with_file_name(format!("{}.lock", self.file_name()))
    }

    fn temp_path(&self) -> PathBuf {
        self.path
            .with_file_name(format!(".{}.{}.tmp", self.file_name(), Uuid::new_v4()))
    }

    fn write_file(&self, contents: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())?;
        lock.lock_exclusive()?;

        let temp = self.temp_path();
        let result = write_private(&temp, contents).and_then(|()| fs::rename(&temp, &self.path));
        if result.is_err() {
            let _ = fs::remove_file(&temp);
        }

        let _ = lock.unlock();
        result
    }
}

fn write_private(path: &Path, contents: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create_new(true).write(true).open(path)?;

    #[cfg(unix)]
    {
        let mut perms = file.metadata()?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }

    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn read(&self) -> Option<Session> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read session file");
                return None;
            }
        };

        let session = Session::decode(&raw);
        if session.is_none() {
            debug!(path = %self.path.display(), "Ignoring malformed session file");
        }
        session
    }

    #[instrument(skip(self, session), fields(path = %self.path.display()))]
    async fn write(&self, session: &Session) {
        match self.write_file(&session.encode()) {
            Ok(()) => debug!("Session saved"),
            Err(e) => warn!(error = %e, "Failed to save session, continuing without persistence"),
        }
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Session removed"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(error = %e, "Failed to remove session file"),
        }
    }
}
