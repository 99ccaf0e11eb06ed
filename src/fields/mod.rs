//! Field and template definitions.
//!
//! [`FieldsService`] caches repository field definitions and the template
//! list for its lifetime, remembers the fields of the last template asked
//! for, and resolves dynamic field options by field id.

mod error;
mod info;
mod service;

pub use error::{FieldsError, Result};
pub use info::FieldInfo;
pub use service::{DefaultFieldValue, DefaultFieldsProvider, FieldsService};
