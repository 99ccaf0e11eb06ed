//! Configuration types for repo-tree-rs.
//!
//! This module defines the structures used to represent service configuration
//! as parsed from an INI-format config file.

use std::collections::BTreeSet;
use std::num::NonZeroUsize;

use crate::display::icons::DEFAULT_ICON_BASE_URL;
use crate::repository::{Entry, EntryKind};
use crate::tree::columns::DEFAULT_PAGE_SIZE;

// =============================================================================
// Entry Kind Filter
// =============================================================================

/// Which entry kinds a children listing shows.
///
/// - `All`: every known kind
/// - `Only(kinds)`: only the listed kinds. A shortcut is shown only when both
///   `Shortcut` and the shortcut's target kind are listed.
///
/// Entries of an unrecognised kind are never shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EntryKindFilter {
    #[default]
    All,
    Only(BTreeSet<EntryKind>),
}

impl EntryKindFilter {
    pub fn only(kinds: impl IntoIterator<Item = EntryKind>) -> Self {
        EntryKindFilter::Only(kinds.into_iter().collect())
    }

    fn includes(&self, kind: EntryKind) -> bool {
        match self {
            EntryKindFilter::All => true,
            EntryKindFilter::Only(kinds) => kinds.contains(&kind),
        }
    }

    /// Whether a listing should show `entry`.
    pub fn admits(&self, entry: &Entry) -> bool {
        match entry.entry_type {
            Some(EntryKind::Shortcut) => {
                self.includes(EntryKind::Shortcut)
                    && entry
                        .target_type
                        .is_some_and(|target| {
                            target != EntryKind::Shortcut && self.includes(target)
                        })
            }
            Some(kind) => self.includes(kind),
            None => false,
        }
    }
}

// =============================================================================
// Config Sections
// =============================================================================

/// [tree] section - what tree listings show and how they are requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeConfig {
    pub viewable_entry_kinds: EntryKindFilter,
    /// Kinds the user may pick; other shown nodes are browse-only.
    pub selectable_entry_kinds: EntryKindFilter,
    /// Attribute columns filled in on every node.
    pub column_ids: Vec<String>,
    /// Maximum number of entries requested per children page.
    pub page_size: u32,
    /// List containers before leaves.
    pub group_containers_first: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            viewable_entry_kinds: EntryKindFilter::All,
            selectable_entry_kinds: EntryKindFilter::All,
            column_ids: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            group_containers_first: true,
        }
    }
}

/// [icons] section - where icon URLs point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconsConfig {
    pub base_url: String,
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ICON_BASE_URL.to_string(),
        }
    }
}

/// [cache] section - in-memory cache sizing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CacheConfig {
    /// Maximum number of cached nodes; `None` means unbounded.
    pub max_nodes: Option<NonZeroUsize>,
}

// =============================================================================
// Top-Level Config
// =============================================================================

/// Complete service configuration as parsed from config file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub tree: TreeConfig,
    pub icons: IconsConfig,
    pub cache: CacheConfig,
}
