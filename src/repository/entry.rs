//! Repository entry types.
//!
//! These mirror the entry objects returned by the repository API. The API
//! reports every kind (folder, document, shortcut, record series) through a
//! single flat object with an `entryType` discriminator, so [`Entry`] carries
//! the union of the kind-specific properties as optional fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Numeric identifier of a repository entry.
pub type EntryId = i64;

/// The well-known id of the repository root folder.
pub const ROOT_ENTRY_ID: EntryId = 1;

// =============================================================================
// EntryKind
// =============================================================================

/// The kind of a repository entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Folder,
    Document,
    Shortcut,
    RecordSeries,
}

impl EntryKind {
    /// Every entry kind, in declaration order.
    pub const ALL: [EntryKind; 4] = [
        EntryKind::Folder,
        EntryKind::Document,
        EntryKind::Shortcut,
        EntryKind::RecordSeries,
    ];

    /// The name the repository API uses for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Folder => "Folder",
            EntryKind::Document => "Document",
            EntryKind::Shortcut => "Shortcut",
            EntryKind::RecordSeries => "RecordSeries",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known entry kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entry kind: {0}")]
pub struct UnknownEntryKind(pub String);

impl FromStr for EntryKind {
    type Err = UnknownEntryKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntryKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownEntryKind(s.to_string()))
    }
}

/// Deserialize an optional entry kind, mapping unrecognised names to `None`.
///
/// Newer servers may report kinds this crate does not know about. Those
/// entries must still deserialize so the projector can reject them with a
/// proper error instead of failing the whole listing response.
fn lenient_entry_kind<'de, D>(deserializer: D) -> Result<Option<EntryKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

// =============================================================================
// ColumnValue
// =============================================================================

/// The raw value of an entry property surfaced as a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ColumnValue {
    Text(String),
    Integer(i64),
    Bool(bool),
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Text(s) => f.write_str(s),
            ColumnValue::Integer(n) => write!(f, "{}", n),
            ColumnValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

// =============================================================================
// Entry
// =============================================================================

/// A repository entry as returned by the repository API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Entry {
    pub id: EntryId,
    pub name: String,
    /// `None` when the server omitted the kind or reported one we don't know.
    #[serde(deserialize_with = "lenient_entry_kind", skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<EntryKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<EntryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<String>,

    // Document (and document-shortcut) properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elec_document_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_electronic_document: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_record: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_checked_out: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_under_version_control: Option<bool>,

    // Shortcut properties
    #[serde(deserialize_with = "lenient_entry_kind", skip_serializing_if = "Option::is_none")]
    pub target_type: Option<EntryKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<EntryId>,
}

impl Entry {
    /// Create a folder entry.
    pub fn folder(id: EntryId, name: impl Into<String>) -> Self {
        Self::with_kind(id, name, EntryKind::Folder)
    }

    /// Create a document entry.
    pub fn document(id: EntryId, name: impl Into<String>) -> Self {
        Self::with_kind(id, name, EntryKind::Document)
    }

    /// Create a record series entry.
    pub fn record_series(id: EntryId, name: impl Into<String>) -> Self {
        Self::with_kind(id, name, EntryKind::RecordSeries)
    }

    /// Create a shortcut entry pointing at `target_id` of kind `target_type`.
    pub fn shortcut(
        id: EntryId,
        name: impl Into<String>,
        target_type: EntryKind,
        target_id: EntryId,
    ) -> Self {
        Self {
            target_type: Some(target_type),
            target_id: Some(target_id),
            ..Self::with_kind(id, name, EntryKind::Shortcut)
        }
    }

    fn with_kind(id: EntryId, name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            id,
            name: name.into(),
            entry_type: Some(kind),
            ..Self::default()
        }
    }

    /// Set the full path.
    pub fn with_full_path(mut self, full_path: impl Into<String>) -> Self {
        self.full_path = Some(full_path.into());
        self
    }

    /// Set the file extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Whether this is the repository root folder.
    pub fn is_root(&self) -> bool {
        self.id == ROOT_ENTRY_ID
    }

    /// Look up the value of the property named by a column id.
    ///
    /// Returns `None` for unsupported column ids and for properties the
    /// entry does not carry.
    pub fn column_value(&self, column_id: &str) -> Option<ColumnValue> {
        let text = |v: &Option<String>| v.clone().map(ColumnValue::Text);
        match column_id {
            "name" => Some(ColumnValue::Text(self.name.clone())),
            "id" => Some(ColumnValue::Integer(self.id)),
            "elecDocumentSize" => self.elec_document_size.map(ColumnValue::Integer),
            "extension" => text(&self.extension),
            "isElectronicDocument" => self.is_electronic_document.map(ColumnValue::Bool),
            "isRecord" => self.is_record.map(ColumnValue::Bool),
            "mimeType" => text(&self.mime_type),
            "pageCount" => self.page_count.map(ColumnValue::Integer),
            "isCheckedOut" => self.is_checked_out.map(ColumnValue::Bool),
            "isUnderVersionControl" => self.is_under_version_control.map(ColumnValue::Bool),
            "creator" => text(&self.creator),
            "creationTime" => text(&self.creation_time),
            "lastModifiedTime" => text(&self.last_modified_time),
            "templateName" => text(&self.template_name),
            _ => None,
        }
    }
}
