//! In-memory session store.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::session::Session;
use crate::traits::SessionStore;

/// A process-local [`SessionStore`].
///
/// The session is held in its serialized form, the same way a key/value
/// medium would hold it, so a corrupted value can be planted with
/// [`MemorySessionStore::with_raw`]. Clones share the same slot.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    slot: Arc<RwLock<Option<String>>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `session`.
    pub fn with_session(session: &Session) -> Self {
        Self::with_raw(session.encode())
    }

    /// Create a store holding an arbitrary raw value.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(raw.into()))),
        }
    }

    /// Returns the raw stored value.
    pub async fn raw(&self) -> Option<String> {
        self.slot.read().await.clone()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn read(&self) -> Option<Session> {
        let slot = self.slot.read().await;
        slot.as_deref().and_then(Session::decode)
    }

    async fn write(&self, session: &Session) {
        *self.slot.write().await = Some(session.encode());
    }

    async fn clear(&self) {
        *self.slot.write().await = None;
    }
}

impl std::fmt::Debug for MemorySessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySessionStore")
            .field("slot", &"[REDACTED]")
            .finish()
    }
}
