//! Projection of repository entries into tree nodes.
//!
//! The projector is a pure function of its inputs: no I/O, no caching. The
//! service feeds it entries together with the node they were listed under.

use std::collections::BTreeMap;

use log::warn;

use crate::config::EntryKindFilter;
use crate::display::format::{bytes_to_string, format_date_time};
use crate::display::icons::{
    self, DOCUMENT_ICON, FOLDER_ICON, IconSet, RECORD_FOLDER_ICON, RECORD_SERIES_ICON,
    SHORTCUT_OVERLAY_ICON,
};
use crate::repository::{ColumnValue, Entry, EntryKind, ROOT_ENTRY_ID};

use super::columns::is_supported_column;
use super::error::{Result, TreeError};
use super::node::{NodeIcon, PropertyValue, TreeNode};
use super::path::{self, ROOT_PATH};

/// Fractional digits of formatted document sizes.
const SIZE_FRACTIONAL_DIGITS: usize = 2;

/// What an entry behaves as in the tree. Shortcuts behave as their target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetKind {
    Folder,
    Document,
    RecordSeries,
}

impl TargetKind {
    fn is_container(self) -> bool {
        match self {
            TargetKind::Folder | TargetKind::RecordSeries => true,
            TargetKind::Document => false,
        }
    }
}

/// Turns entries into [`TreeNode`]s.
#[derive(Debug, Clone)]
pub struct TreeNodeProjector {
    icons: IconSet,
    column_ids: Vec<String>,
    selectable: EntryKindFilter,
}

impl TreeNodeProjector {
    /// Create a projector that fills in the given attribute columns.
    ///
    /// Column ids outside the supported set are dropped with a warning.
    pub fn new<I, S>(icons: IconSet, column_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut kept: Vec<String> = Vec::new();
        for column_id in column_ids {
            let column_id = column_id.into();
            if !is_supported_column(&column_id) {
                warn!("Ignoring unsupported column: {}", column_id);
            } else if !kept.contains(&column_id) {
                kept.push(column_id);
            }
        }
        Self {
            icons,
            column_ids: kept,
            selectable: EntryKindFilter::All,
        }
    }

    /// Mark only entries of the given kinds as selectable.
    pub fn with_selectable(mut self, selectable: EntryKindFilter) -> Self {
        self.selectable = selectable;
        self
    }

    /// The attribute columns this projector fills in.
    pub fn column_ids(&self) -> &[String] {
        &self.column_ids
    }

    /// Project one entry.
    ///
    /// `parent` is the node the entry was listed under, if any; it supplies
    /// the path when the entry carries no full path of its own. `repo_name`
    /// names the root when the root entry has no name.
    pub fn project(
        &self,
        entry: &Entry,
        parent: Option<&TreeNode>,
        repo_name: &str,
    ) -> Result<TreeNode> {
        let (entry_type, target) = classify(entry)?;
        let name = resolve_name(entry, repo_name);
        let path = resolve_path(entry, parent, &name)?;

        let target_icon = self.icons.url(target_icon_id(entry, target, parent));
        let (icon, target_type, target_id) = match entry_type {
            EntryKind::Shortcut => (
                NodeIcon::Shortcut {
                    target: target_icon,
                    overlay: self.icons.url(SHORTCUT_OVERLAY_ICON),
                },
                entry.target_type,
                entry.target_id,
            ),
            _ => (NodeIcon::Single(target_icon), None, None),
        };

        Ok(TreeNode {
            name,
            path,
            id: entry.id.to_string(),
            entry_type,
            is_container: target.is_container(),
            is_leaf: !target.is_container(),
            is_selectable: self.selectable.admits(entry),
            icon,
            target_type,
            target_id,
            attributes: self.attributes(entry),
        })
    }

    /// Project the repository root. The node always has id `"1"` and path
    /// `\`, whatever the fetched entry carries.
    pub fn project_root(&self, entry: &Entry, repo_name: &str) -> Result<TreeNode> {
        let mut root = entry.clone();
        root.id = ROOT_ENTRY_ID;
        root.full_path = Some(ROOT_PATH.to_string());
        self.project(&root, None, repo_name)
    }

    fn attributes(&self, entry: &Entry) -> BTreeMap<String, PropertyValue> {
        self.column_ids
            .iter()
            .filter_map(|column_id| {
                let value = entry.column_value(column_id)?;
                let display_value = display_value(column_id, &value);
                Some((
                    column_id.clone(),
                    PropertyValue {
                        value,
                        display_value,
                    },
                ))
            })
            .collect()
    }
}

fn classify(entry: &Entry) -> Result<(EntryKind, TargetKind)> {
    let entry_type = entry
        .entry_type
        .ok_or_else(|| TreeError::invalid_entry(entry.id, "missing or unsupported entry type"))?;

    let target = match entry_type {
        EntryKind::Folder => TargetKind::Folder,
        EntryKind::Document => TargetKind::Document,
        EntryKind::RecordSeries => TargetKind::RecordSeries,
        EntryKind::Shortcut => match entry.target_type {
            Some(EntryKind::Folder) => TargetKind::Folder,
            Some(EntryKind::Document) => TargetKind::Document,
            Some(EntryKind::RecordSeries) => TargetKind::RecordSeries,
            Some(EntryKind::Shortcut) | None => {
                return Err(TreeError::invalid_entry(
                    entry.id,
                    "missing or unsupported shortcut target type",
                ));
            }
        },
    };
    Ok((entry_type, target))
}

fn resolve_name(entry: &Entry, repo_name: &str) -> String {
    if !entry.name.is_empty() {
        entry.name.clone()
    } else if entry.is_root() {
        repo_name.to_string()
    } else {
        entry.id.to_string()
    }
}

fn resolve_path(entry: &Entry, parent: Option<&TreeNode>, name: &str) -> Result<String> {
    if entry.is_root() {
        return Ok(ROOT_PATH.to_string());
    }
    let path = match (entry.full_path.as_deref(), parent) {
        (Some(full_path), _) if !full_path.is_empty() => full_path.to_string(),
        (_, Some(parent)) => path::combine(&parent.path, name),
        _ => return Err(TreeError::PathResolution { id: entry.id }),
    };
    Ok(path::trim_trailing_separator(&path).to_string())
}

fn target_icon_id(entry: &Entry, target: TargetKind, parent: Option<&TreeNode>) -> &'static str {
    match target {
        TargetKind::Document => entry
            .extension
            .as_deref()
            .filter(|ext| !ext.is_empty())
            .map(icons::icon_id_for_extension)
            .unwrap_or(DOCUMENT_ICON),
        TargetKind::Folder
            if entry.entry_type == Some(EntryKind::Folder)
                && parent.is_some_and(TreeNode::is_record_series) =>
        {
            RECORD_FOLDER_ICON
        }
        TargetKind::Folder => FOLDER_ICON,
        TargetKind::RecordSeries => RECORD_SERIES_ICON,
    }
}

fn display_value(column_id: &str, value: &ColumnValue) -> String {
    match (column_id, value) {
        ("creationTime" | "lastModifiedTime", ColumnValue::Text(raw)) => format_date_time(raw),
        ("elecDocumentSize", ColumnValue::Integer(bytes)) => {
            bytes_to_string(*bytes, SIZE_FRACTIONAL_DIGITS)
        }
        _ => value.to_string(),
    }
}
