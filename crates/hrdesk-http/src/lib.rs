//! hrdesk-http - HTTP transport for the hrdesk client.
//!
//! # Example
//!
//! ```no_run
//! use hrdesk_core::{ApiRequest, ApiUrl, AuthClient, MemorySessionStore};
//! use hrdesk_http::HttpTransport;
//!
//! # async fn example() -> hrdesk_core::Result<()> {
//! let transport = HttpTransport::for_url(ApiUrl::new("https://hr.example.com/api")?)?;
//! let client = AuthClient::new(MemorySessionStore::new(), transport, || {});
//! let staff = client.request(ApiRequest::get("/staff").query("page", 1)).await?;
//! # Ok(())
//! # }
//! ```

mod transport;

pub use transport::{DEFAULT_TIMEOUT, HttpConfig, HttpTransport};
