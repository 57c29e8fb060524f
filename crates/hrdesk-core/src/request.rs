//! Request and response types shared by the client and its transports.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, Error, InvalidInputError};
use crate::tokens::AccessToken;
use crate::Result;

/// Header carrying the bearer credential.
pub const AUTHORIZATION: &str = "authorization";

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            _ => Err(InvalidInputError::Method {
                value: s.to_string(),
            }
            .into()),
        }
    }
}

/// A file sent as a multipart form field (bulk uploads).
#[derive(Clone, PartialEq, Eq)]
pub struct Upload {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field: "file".to_string(),
            file_name: file_name.into(),
            content_type: "application/octet-stream".to_string(),
            bytes,
        }
    }

    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upload")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Request payload. Bodies are owned so a request can be replayed after a
/// token refresh.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Upload(Upload),
}

/// One logical API request.
#[derive(Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<RequestBody>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Set a header. Names are case-insensitive and stored lower-cased.
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Set a JSON body.
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| InvalidInputError::Other {
            message: format!("body is not valid JSON: {e}"),
        })?;
        self.body = Some(RequestBody::Json(value));
        Ok(self)
    }

    /// Set a multipart file body.
    pub fn upload(mut self, upload: Upload) -> Self {
        self.body = Some(RequestBody::Upload(upload));
        self
    }

    /// Attach (or replace) the bearer credential.
    pub fn set_bearer(&mut self, token: &AccessToken) {
        self.headers.insert(AUTHORIZATION.to_string(), token.bearer());
    }

    /// Returns the current `authorization` header value.
    pub fn authorization(&self) -> Option<&str> {
        self.headers.get(AUTHORIZATION).map(String::as_str)
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: BTreeMap<&str, &str> = self
            .headers
            .iter()
            .map(|(k, v)| {
                let v = if k == AUTHORIZATION { "[REDACTED]" } else { v.as_str() };
                (k.as_str(), v)
            })
            .collect();
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("headers", &headers)
            .field("body", &self.body)
            .finish()
    }
}

/// Whether a request has already been replayed after a token refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Fresh,
    Retried,
}

/// A response from the backend, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// A response with a JSON body.
    pub fn json_body(status: u16, body: &Value) -> Self {
        let mut response = Self::new(status, body.to_string());
        response
            .headers
            .insert("content-type".to_string(), "application/json".to_string());
        response
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Decode the body as JSON. An empty body decodes as `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let body: &[u8] = if self.body.is_empty() { b"null" } else { &self.body };
        serde_json::from_slice(body).map_err(|e| Error::Decode(e.to_string()))
    }

    /// The body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Turn a non-success response into an [`ApiError`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::from_body(self.status, &self.body).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!("patch".parse::<Method>().unwrap(), Method::Patch);
        assert_eq!("GET".parse::<Method>().unwrap(), Method::Get);
        assert!("TRACE".parse::<Method>().is_err());
    }

    #[test]
    fn builder_collects_parts() {
        let request = ApiRequest::get("/staff")
            .query("page", 2)
            .query("search", "ada")
            .header("X-Trace", "abc");
        assert_eq!(request.method, Method::Get);
        assert_eq!(
            request.query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("search".to_string(), "ada".to_string())
            ]
        );
        assert_eq!(request.headers.get("x-trace").map(String::as_str), Some("abc"));
    }

    #[test]
    fn set_bearer_replaces_previous_token() {
        let mut request = ApiRequest::get("/goals");
        request.set_bearer(&AccessToken::new("T1"));
        request.set_bearer(&AccessToken::new("T2"));
        assert_eq!(request.authorization(), Some("Bearer T2"));
        assert_eq!(request.headers.len(), 1);
    }

    #[test]
    fn debug_redacts_authorization() {
        let mut request = ApiRequest::get("/goals");
        request.set_bearer(&AccessToken::new("secret"));
        assert!(!format!("{:?}", request).contains("secret"));
    }

    #[test]
    fn error_for_status_maps_failures() {
        let ok = ApiResponse::json_body(200, &json!({"id": 1}));
        assert!(ok.error_for_status().is_ok());

        let err = ApiResponse::json_body(404, &json!({"message": "not found"}))
            .error_for_status()
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn empty_body_decodes_as_unit() {
        let response = ApiResponse::new(204, Vec::new());
        let value: Option<Value> = response.json().unwrap();
        assert!(value.is_none());
    }
}
