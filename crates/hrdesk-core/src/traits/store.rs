//! Session store trait.

use async_trait::async_trait;

use crate::session::Session;

/// Durable holder of the current session.
///
/// Implementations never surface storage errors: a value that cannot be
/// read is no session, and a write that cannot land is dropped with a
/// warning. Losing persisted credentials only means logging in again.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the stored session, or `None` if there is none or it is
    /// malformed.
    async fn read(&self) -> Option<Session>;

    /// Replaces the stored session. Subsequent reads observe either the old
    /// or the new value, never a mix.
    async fn write(&self, session: &Session);

    /// Removes the stored session. Idempotent.
    async fn clear(&self);
}
