use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::repository::{
    ApiFieldInfo, DynamicFieldValuesRequest, Entry, EntryId, EntryKind, TemplateId,
    TemplateIdentifier, TemplateInfo,
};

/// Error code the repository API reports when the caller may not see an entry.
pub const ACCESS_DENIED_ERROR_CODE: i32 = 9013;

/// Error type for repository client operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The entry (or other object) does not exist.
    #[error("not found")]
    NotFound,
    /// The API rejected the request.
    #[error("API error {status}: {message}")]
    Api {
        status: u16,
        error_code: Option<i32>,
        message: String,
    },
    /// The request did not complete.
    #[error("transport error: {0}")]
    Transport(String),
    /// A custom error message.
    #[error("{0}")]
    Other(String),
}

impl ClientError {
    /// The error the API returns when access to an entry is denied.
    pub fn access_denied() -> Self {
        ClientError::Api {
            status: 403,
            error_code: Some(ACCESS_DENIED_ERROR_CODE),
            message: format!("Access denied. [{}]", ACCESS_DENIED_ERROR_CODE),
        }
    }

    /// Whether this error reports that the caller lacks access.
    pub fn is_access_denied(&self) -> bool {
        matches!(
            self,
            ClientError::Api {
                error_code: Some(ACCESS_DENIED_ERROR_CODE),
                ..
            }
        )
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

// =============================================================================
// Requests and Responses
// =============================================================================

/// Parameters for the first page of a children listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntriesRequest {
    pub repo_id: String,
    /// The container whose children are listed.
    pub entry_id: EntryId,
    /// Comma-separated list of properties to return for each entry.
    pub select: String,
    /// OData-style ordering, e.g. `name asc`.
    pub order_by: String,
    /// List all containers before all leaves.
    pub group_by_entry_type: bool,
    pub max_page_size: u32,
}

/// One page of a children listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntryListing {
    #[serde(rename = "value", default)]
    pub entries: Vec<Entry>,
    /// Opaque link to the next page, absent on the last page.
    #[serde(rename = "@odata.nextLink", default, skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
}

/// Result of a path lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FindEntryResult {
    /// The entry at the requested path, if it exists.
    pub entry: Option<Entry>,
    /// The closest existing ancestor, when fallback was requested and the
    /// path itself does not exist.
    pub ancestor_entry: Option<Entry>,
}

/// Request to create a child entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    pub name: String,
    pub entry_type: EntryKind,
    pub auto_rename: bool,
}

impl CreateEntryRequest {
    /// Request a new folder with the given name.
    pub fn folder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry_type: EntryKind::Folder,
            auto_rename: false,
        }
    }
}

// =============================================================================
// RepositoryClient
// =============================================================================

/// The repository API as consumed by the tree and fields services.
///
/// All operations are asynchronous request/response calls. Implementations
/// own transport concerns (authentication, retries, timeouts); the services
/// above never retry.
#[async_trait]
pub trait RepositoryClient: Send + Sync {
    /// The id of the repository this client talks to.
    async fn current_repo_id(&self) -> Result<String>;

    /// The display name of the repository this client talks to.
    async fn current_repo_name(&self) -> Result<String>;

    /// Fetch one entry. `select` restricts the returned properties.
    async fn get_entry(
        &self,
        repo_id: &str,
        entry_id: EntryId,
        select: Option<&str>,
    ) -> Result<Entry>;

    /// Fetch the entry at a full path.
    ///
    /// With `fallback_to_closest_ancestor`, a missing path yields the closest
    /// existing ancestor in [`FindEntryResult::ancestor_entry`] instead of an
    /// error.
    async fn get_entry_by_path(
        &self,
        repo_id: &str,
        full_path: &str,
        fallback_to_closest_ancestor: bool,
    ) -> Result<FindEntryResult>;

    /// Fetch the first page of a container's children.
    async fn list_entries(&self, request: &ListEntriesRequest) -> Result<EntryListing>;

    /// Continue a listing from a link returned by a previous page.
    async fn list_entries_next(&self, next_link: &str, max_page_size: u32)
    -> Result<EntryListing>;

    /// Create a child entry under `parent_id`.
    async fn create_entry(
        &self,
        repo_id: &str,
        parent_id: EntryId,
        request: &CreateEntryRequest,
    ) -> Result<Entry>;

    /// Fetch all field definitions of the repository.
    async fn get_field_definitions(&self, repo_id: &str) -> Result<Vec<ApiFieldInfo>>;

    /// Fetch the field definitions assigned to a template.
    async fn get_template_field_definitions(
        &self,
        repo_id: &str,
        template: &TemplateIdentifier,
    ) -> Result<Vec<ApiFieldInfo>>;

    /// Fetch template definitions, optionally only those with a given name.
    async fn get_template_definitions(
        &self,
        repo_id: &str,
        template_name: Option<&str>,
    ) -> Result<Vec<TemplateInfo>>;

    /// Fetch one template definition by id.
    async fn get_template_definition_by_id(
        &self,
        repo_id: &str,
        template_id: TemplateId,
    ) -> Result<TemplateInfo>;

    /// Compute the allowed values of dynamic fields given the current values
    /// of the fields they depend on. Options are keyed by field name.
    async fn get_dynamic_field_values(
        &self,
        repo_id: &str,
        entry_id: EntryId,
        request: &DynamicFieldValuesRequest,
    ) -> Result<HashMap<String, Vec<String>>>;
}
