//! Tree-node projection and orchestration.
//!
//! ## Architecture
//!
//! 1. **Projection** - [`TreeNodeProjector`] turns one repository entry into
//!    a [`TreeNode`]: name, path, container/leaf, icon, attributes. Pure.
//! 2. **Orchestration** - [`TreeNodeService`] resolves the root, nodes by id,
//!    parents (by path) and paged children through a
//!    [`RepositoryClient`](crate::client::RepositoryClient), caching nodes
//!    and pages per service instance.
//!
//! Paths use `\` as separator; see [`path`].

pub mod columns;
mod error;
mod node;
pub mod path;
mod projector;
mod service;

pub use error::{Result, TreeError};
pub use node::{ColumnOrderBy, NodeIcon, PropertyValue, ROOT_NODE_ID, TreeNode, TreeNodePage};
pub use projector::TreeNodeProjector;
pub use service::{TreeNodeService, TreeNotifier};
