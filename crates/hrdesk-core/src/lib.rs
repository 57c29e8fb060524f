//! hrdesk-core - authenticated access to the hrdesk API.
//!
//! All requests flow through an [`AuthClient`], which reads the current
//! credentials from a [`SessionStore`], attaches them, and transparently
//! refreshes an expired access token once per failed request.
//!
//! # Example
//!
//! ```no_run
//! use hrdesk_core::{ApiRequest, AuthClient, MemorySessionStore, Transport};
//!
//! # async fn example<T: Transport>(transport: T) -> hrdesk_core::Result<()> {
//! let client = AuthClient::new(MemorySessionStore::new(), transport, || {
//!     eprintln!("session expired");
//! });
//!
//! let goals = client.request(ApiRequest::get("/goals")).await?;
//! println!("{}", goals.text());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod credentials;
pub mod error;
pub mod memory;
pub mod request;
pub mod resources;
pub mod session;
pub mod tokens;
pub mod traits;
pub mod types;

pub use client::{AuthClient, ClientConfig};
pub use credentials::Credentials;
pub use error::Error;
pub use memory::MemorySessionStore;
pub use request::{ApiRequest, ApiResponse, Attempt, Method, RequestBody, Upload};
pub use resources::{ListParams, Resource, ResourceClient};
pub use session::Session;
pub use tokens::{AccessToken, RefreshToken, TokenPair};
pub use traits::{Navigator, SessionStore, Transport};
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
