//! The tree-node model handed to tree/browser components.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::repository::{ColumnValue, EntryId, EntryKind};

/// The id of the repository root node.
pub const ROOT_NODE_ID: &str = "1";

/// A node icon: one URL, or for shortcuts the target icon plus the shortcut
/// overlay drawn over it.
///
/// Serializes as a string or a two-element array respectively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeIcon {
    Single(String),
    Shortcut { target: String, overlay: String },
}

impl NodeIcon {
    /// The icon URLs, bottom layer first.
    pub fn urls(&self) -> Vec<&str> {
        match self {
            NodeIcon::Single(url) => vec![url.as_str()],
            NodeIcon::Shortcut { target, overlay } => vec![target.as_str(), overlay.as_str()],
        }
    }
}

impl Serialize for NodeIcon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NodeIcon::Single(url) => serializer.serialize_str(url),
            NodeIcon::Shortcut { target, overlay } => [target, overlay].serialize(serializer),
        }
    }
}

/// A column value together with its display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyValue {
    pub value: ColumnValue,
    pub display_value: String,
}

/// A repository entry projected into a uniform tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub name: String,
    pub path: String,
    pub id: String,
    /// The entry's own kind; a shortcut stays `Shortcut`.
    pub entry_type: EntryKind,
    pub is_container: bool,
    pub is_leaf: bool,
    /// Whether the user may pick this node, per the selectable entry kinds.
    pub is_selectable: bool,
    pub icon: NodeIcon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_type: Option<EntryKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<EntryId>,
    pub attributes: BTreeMap<String, PropertyValue>,
}

impl TreeNode {
    pub fn is_root(&self) -> bool {
        self.id == ROOT_NODE_ID
    }

    pub fn is_shortcut(&self) -> bool {
        self.entry_type == EntryKind::Shortcut
    }

    /// Whether this node is a record series or a shortcut to one.
    pub fn is_record_series(&self) -> bool {
        self.entry_type == EntryKind::RecordSeries
            || (self.is_shortcut() && self.target_type == Some(EntryKind::RecordSeries))
    }

    /// The entry whose children this node shows: the target for shortcuts,
    /// the node's own entry otherwise.
    pub fn listing_entry_id(&self) -> Option<EntryId> {
        match self.target_id {
            Some(target_id) if self.is_shortcut() => Some(target_id),
            _ => self.id.parse().ok(),
        }
    }
}

/// One page of children, plus the cursor of the next page if there is one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNodePage {
    pub page: Vec<TreeNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// A requested sort order for children listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOrderBy {
    pub column_id: String,
    pub is_desc: bool,
}

impl ColumnOrderBy {
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            is_desc: false,
        }
    }

    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            is_desc: true,
        }
    }

    /// The order clause sent to the repository API, e.g. `name desc`.
    pub fn to_order_clause(&self) -> String {
        let direction = if self.is_desc { "desc" } else { "asc" };
        format!("{} {}", self.column_id, direction)
    }
}
