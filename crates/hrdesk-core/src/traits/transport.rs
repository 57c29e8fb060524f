//! HTTP transport trait.

use async_trait::async_trait;

use crate::Result;
use crate::request::{ApiRequest, ApiResponse};

/// Sends one request to the backend.
///
/// Every HTTP response, whatever its status, is `Ok`. `Err` is reserved
/// for failures to reach the backend at all.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}
