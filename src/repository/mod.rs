//! Repository object types exchanged with the repository API.
//!
//! - [`Entry`] - folders, documents, shortcuts and record series
//! - [`ApiFieldInfo`] / [`TemplateInfo`] - field and template definitions
//! - [`FieldValues`] - field editor state used for dynamic field lookups

mod entry;
mod fields;

pub use entry::{ColumnValue, Entry, EntryId, EntryKind, ROOT_ENTRY_ID, UnknownEntryKind};
pub use fields::{
    ApiFieldInfo, DYNAMIC_FIELD_PLACEHOLDER_ENTRY_ID, DynamicFieldValuesRequest, FieldFormat,
    FieldId, FieldType, FieldValue, FieldValues, TemplateId, TemplateIdentifier, TemplateInfo,
    ValueAtPosition,
};
