//! hrdesk-file - File-backed session store.

mod store;

pub use store::FileSessionStore;
