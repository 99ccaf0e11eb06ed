use std::collections::HashMap;

use log::debug;
use tokio::sync::Mutex;

use crate::tree::TreeNodePage;

/// In-memory cache of children pages: parent node id -> page cursor -> page.
pub struct PageCache {
    pages: Mutex<HashMap<String, HashMap<String, TreeNodePage>>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self {
            pages: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get(&self, parent_id: &str, cursor: &str) -> Option<TreeNodePage> {
        let pages = self.pages.lock().await;
        let page = pages.get(parent_id)?.get(cursor).cloned();
        if page.is_some() {
            debug!("Page cache hit: parent {} cursor {}", parent_id, cursor);
        }
        page
    }

    pub async fn insert(&self, parent_id: &str, cursor: &str, page: TreeNodePage) {
        let mut pages = self.pages.lock().await;
        pages
            .entry(parent_id.to_string())
            .or_default()
            .insert(cursor.to_string(), page);
    }

    /// Drop every cached page of one parent.
    pub async fn evict_parent(&self, parent_id: &str) {
        let mut pages = self.pages.lock().await;
        if pages.remove(parent_id).is_some() {
            debug!("Evicted cached pages of parent {}", parent_id);
        }
    }

    pub async fn clear(&self) {
        self.pages.lock().await.clear();
    }
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(next: Option<&str>) -> TreeNodePage {
        TreeNodePage {
            page: Vec::new(),
            next_cursor: next.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_pages_keyed_by_parent_and_cursor() {
        let cache = PageCache::new();
        cache.insert("1", "0", page(Some("next-1"))).await;
        cache.insert("1", "next-1", page(None)).await;
        cache.insert("7", "0", page(None)).await;

        assert_eq!(cache.get("1", "0").await, Some(page(Some("next-1"))));
        assert_eq!(cache.get("1", "next-1").await, Some(page(None)));
        assert_eq!(cache.get("1", "next-2").await, None);
        assert_eq!(cache.get("2", "0").await, None);
    }

    #[tokio::test]
    async fn test_evict_parent_keeps_others() {
        let cache = PageCache::new();
        cache.insert("1", "0", page(None)).await;
        cache.insert("1", "next-1", page(None)).await;
        cache.insert("7", "0", page(None)).await;

        cache.evict_parent("1").await;
        assert_eq!(cache.get("1", "0").await, None);
        assert_eq!(cache.get("1", "next-1").await, None);
        assert!(cache.get("7", "0").await.is_some());

        cache.clear().await;
        assert_eq!(cache.get("7", "0").await, None);
    }
}
