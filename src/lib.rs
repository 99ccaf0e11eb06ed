//! repo-tree-rs - Tree-view browsing and field metadata over a document
//! repository API.
//!
//! - [`tree`] - project repository entries into tree nodes; resolve the
//!   root, nodes by id, parents and paged children
//! - [`fields`] - field and template definitions, dynamic field options
//! - [`client`] - the repository API seam, plus an in-memory repository
//! - [`config`] - INI configuration with layered overrides

pub mod caches;
pub mod client;
pub mod config;
pub mod display;
pub mod fields;
pub mod repository;
pub mod tree;

pub use client::{ClientError, MemoryRepositoryClient, RepositoryClient};
pub use config::{Config, read_config};
pub use fields::{FieldInfo, FieldsError, FieldsService};
pub use repository::{Entry, EntryId, EntryKind};
pub use tree::{ColumnOrderBy, TreeError, TreeNode, TreeNodePage, TreeNodeService};
