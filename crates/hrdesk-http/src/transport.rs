//! reqwest-backed transport.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, instrument, trace};

use hrdesk_core::error::TransportError;
use hrdesk_core::{ApiRequest, ApiResponse, ApiUrl, Method, RequestBody, Result, Transport, Upload};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Base URL every request path is resolved against.
    pub base_url: ApiUrl,
    /// Per-request timeout.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl HttpConfig {
    pub fn new(base_url: ApiUrl) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("hrdesk/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Sends [`ApiRequest`]s over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: HttpConfig,
}

impl HttpTransport {
    /// Create a transport for the given settings.
    pub fn new(config: HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Http {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { client, config })
    }

    /// Create a transport with default settings for `base_url`.
    pub fn for_url(base_url: ApiUrl) -> Result<Self> {
        Self::new(HttpConfig::new(base_url))
    }

    fn build(&self, request: &ApiRequest) -> Result<reqwest::RequestBuilder> {
        let url = self.config.base_url.endpoint(&request.path);
        let mut builder = self.client.request(reqwest_method(request.method), &url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        match &request.body {
            None => {}
            Some(RequestBody::Json(value)) => builder = builder.json(value),
            Some(RequestBody::Upload(upload)) => builder = builder.multipart(multipart(upload)?),
        }

        Ok(builder)
    }

    fn map_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: self.config.timeout.as_millis() as u64,
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(base = %self.config.base_url, method = %request.method, path = %request.path))]
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        debug!("HTTP request");
        trace!(query = ?request.query, "query parameters");

        let response = self
            .build(request)?
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status().as_u16();
        trace!(status, "HTTP response");

        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response.bytes().await.map_err(|e| self.map_error(e))?;

        Ok(ApiResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn multipart(upload: &Upload) -> Result<Form> {
    let part = Part::bytes(upload.bytes.clone())
        .file_name(upload.file_name.clone())
        .mime_str(&upload.content_type)
        .map_err(|e| TransportError::Http {
            message: format!("invalid content type '{}': {e}", upload.content_type),
        })?;

    Ok(Form::new().part(upload.field.clone(), part))
}
