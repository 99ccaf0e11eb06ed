//! Field and template definition types as returned by the repository API.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::entry::EntryId;

/// Numeric identifier of a field definition.
pub type FieldId = i64;

/// Numeric identifier of a template definition.
pub type TemplateId = i64;

// =============================================================================
// Field Definitions
// =============================================================================

/// The data type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Blob,
    Date,
    DateTime,
    List,
    LongInteger,
    Number,
    ShortInteger,
    String,
    Time,
}

/// The display format of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldFormat {
    None,
    ShortDate,
    LongDate,
    ShortDateTime,
    LongDateTime,
    ShortTime,
    LongTime,
    GeneralNumber,
    Currency,
    Percent,
    Scientific,
    Custom,
}

/// A field definition (repository-wide or template-scoped) as returned by
/// the API. Every property is optional on the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiFieldInfo {
    pub id: Option<FieldId>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub field_type: Option<FieldType>,
    pub length: Option<i32>,
    pub default_value: Option<String>,
    pub is_multi_value: Option<bool>,
    pub is_required: Option<bool>,
    pub constraint: Option<String>,
    pub constraint_error: Option<String>,
    pub list_values: Option<Vec<String>>,
    pub format: Option<FieldFormat>,
    pub currency: Option<String>,
    pub format_pattern: Option<String>,
}

impl ApiFieldInfo {
    /// Create a minimal field definition.
    pub fn new(id: FieldId, name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        Self {
            id: Some(id),
            display_name: Some(name.clone()),
            name: Some(name),
            field_type: Some(field_type),
            ..Self::default()
        }
    }
}

// =============================================================================
// Template Definitions
// =============================================================================

/// A template definition as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateInfo {
    pub id: Option<TemplateId>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub field_count: Option<i32>,
}

/// Identifies a template either by id or by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TemplateIdentifier {
    Id(TemplateId),
    Name(String),
}

impl From<TemplateId> for TemplateIdentifier {
    fn from(id: TemplateId) -> Self {
        TemplateIdentifier::Id(id)
    }
}

impl From<&str> for TemplateIdentifier {
    fn from(name: &str) -> Self {
        TemplateIdentifier::Name(name.to_string())
    }
}

impl From<String> for TemplateIdentifier {
    fn from(name: String) -> Self {
        TemplateIdentifier::Name(name)
    }
}

impl fmt::Display for TemplateIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateIdentifier::Id(id) => write!(f, "{}", id),
            TemplateIdentifier::Name(name) => write!(f, "'{}'", name),
        }
    }
}

// =============================================================================
// Field Values
// =============================================================================

/// One value of a (possibly multi-valued) field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueAtPosition {
    pub value: String,
    pub position: String,
}

/// The current values of one field, as held by a field editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValue {
    pub field_id: FieldId,
    pub field_name: Option<String>,
    pub values: Vec<ValueAtPosition>,
}

impl FieldValue {
    /// Create a single-valued field value.
    pub fn single(
        field_id: FieldId,
        field_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field_id,
            field_name: Some(field_name.into()),
            values: vec![ValueAtPosition {
                value: value.into(),
                position: "1".to_string(),
            }],
        }
    }
}

/// Current field values keyed by field id.
pub type FieldValues = BTreeMap<FieldId, FieldValue>;

/// Request body for the dynamic field values lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicFieldValuesRequest {
    pub template_id: TemplateId,
    /// First value of each field, keyed by field name.
    pub field_values: BTreeMap<String, String>,
}

/// The entry dynamic field lookups are issued against when the caller has
/// no entry of its own yet.
pub const DYNAMIC_FIELD_PLACEHOLDER_ENTRY_ID: EntryId = 1;
