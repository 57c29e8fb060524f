//! Seams between the client and its host environment.

mod navigator;
mod store;
mod transport;

pub use navigator::Navigator;
pub use store::SessionStore;
pub use transport::Transport;
