//! CRUD access to the backend collections.
//!
//! Every collection goes through the same [`AuthClient`]; there is no
//! per-resource auth behavior.

use std::fmt;
use std::str::FromStr;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;

use crate::client::AuthClient;
use crate::error::{Error, InvalidInputError};
use crate::request::{ApiRequest, Upload};
use crate::traits::{Navigator, SessionStore, Transport};
use crate::Result;

/// Characters left as-is in a record id; everything else is escaped so the
/// id stays a single path segment.
const ID_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A backend collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Associations,
    Departments,
    Designations,
    Goals,
    Milestones,
    Roles,
    Staff,
    Calendar,
    Kpis,
    Kmis,
    Kais,
    Tickets,
}

impl Resource {
    pub const ALL: [Resource; 12] = [
        Resource::Associations,
        Resource::Departments,
        Resource::Designations,
        Resource::Goals,
        Resource::Milestones,
        Resource::Roles,
        Resource::Staff,
        Resource::Calendar,
        Resource::Kpis,
        Resource::Kmis,
        Resource::Kais,
        Resource::Tickets,
    ];

    /// Path segment of the collection.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Associations => "associations",
            Resource::Departments => "departments",
            Resource::Designations => "designations",
            Resource::Goals => "goals",
            Resource::Milestones => "milestones",
            Resource::Roles => "roles",
            Resource::Staff => "staff",
            Resource::Calendar => "calendar",
            Resource::Kpis => "kpis",
            Resource::Kmis => "kmis",
            Resource::Kais => "kais",
            Resource::Tickets => "tickets",
        }
    }

    /// Collection path, e.g. `/goals`.
    pub fn path(&self) -> String {
        format!("/{}", self.as_str())
    }

    /// Item path, e.g. `/goals/42`.
    ///
    /// The id is percent-encoded, so `/`, `?` and `#` cannot leave the
    /// collection. Empty ids and dot segments are rejected.
    pub fn item_path(&self, id: &str) -> Result<String> {
        if matches!(id, "" | "." | "..") {
            return Err(InvalidInputError::RecordId {
                value: id.to_string(),
            }
            .into());
        }
        Ok(format!(
            "/{}/{}",
            self.as_str(),
            utf8_percent_encode(id, ID_SEGMENT)
        ))
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim_matches('/').to_ascii_lowercase();
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == lower)
            .ok_or_else(|| {
                InvalidInputError::Resource {
                    value: s.to_string(),
                }
                .into()
            })
    }
}

/// Pagination and search filters for list calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

impl ListParams {
    fn apply(&self, mut request: ApiRequest) -> ApiRequest {
        if let Some(page) = self.page {
            request = request.query("page", page);
        }
        if let Some(limit) = self.limit {
            request = request.query("limit", limit);
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            request = request.query("search", search);
        }
        request
    }
}

/// CRUD calls for one collection.
pub struct ResourceClient<'a, S, T, N> {
    client: &'a AuthClient<S, T, N>,
    resource: Resource,
}

impl<S, T, N> AuthClient<S, T, N>
where
    S: SessionStore,
    T: Transport,
    N: Navigator,
{
    /// CRUD calls for `resource`.
    pub fn resource(&self, resource: Resource) -> ResourceClient<'_, S, T, N> {
        ResourceClient {
            client: self,
            resource,
        }
    }
}

impl<S, T, N> ResourceClient<'_, S, T, N>
where
    S: SessionStore,
    T: Transport,
    N: Navigator,
{
    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub async fn list(&self, params: &ListParams) -> Result<Value> {
        let request = params.apply(ApiRequest::get(self.resource.path()));
        self.client.request_json(request).await
    }

    pub async fn get(&self, id: &str) -> Result<Value> {
        self.client
            .request_json(ApiRequest::get(self.resource.item_path(id)?))
            .await
    }

    pub async fn create(&self, body: &Value) -> Result<Value> {
        self.client
            .request_json(ApiRequest::post(self.resource.path()).json(body)?)
            .await
    }

    pub async fn update(&self, id: &str, body: &Value) -> Result<Value> {
        self.client
            .request_json(ApiRequest::put(self.resource.item_path(id)?).json(body)?)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.client
            .request_json(ApiRequest::delete(self.resource.item_path(id)?))
            .await
    }

    /// Upload a spreadsheet of records to `/{resource}/bulk-upload`.
    pub async fn bulk_upload(&self, upload: Upload) -> Result<Value> {
        let path = format!("{}/bulk-upload", self.resource.path());
        self.client
            .request_json(ApiRequest::post(path).upload(upload))
            .await
    }
}
