use std::num::NonZeroUsize;

use log::debug;
use lru::LruCache;
use tokio::sync::Mutex;

use crate::tree::TreeNode;

/// In-memory cache of projected nodes, keyed by node id.
///
/// Unbounded unless created with a capacity, in which case the least
/// recently used node is evicted first.
pub struct NodeCache {
    nodes: Mutex<LruCache<String, TreeNode>>,
}

impl NodeCache {
    pub fn new(capacity: Option<NonZeroUsize>) -> Self {
        let nodes = match capacity {
            Some(capacity) => LruCache::new(capacity),
            None => LruCache::unbounded(),
        };
        Self {
            nodes: Mutex::new(nodes),
        }
    }

    pub async fn get(&self, id: &str) -> Option<TreeNode> {
        let mut nodes = self.nodes.lock().await;
        let node = nodes.get(id).cloned();
        if node.is_some() {
            debug!("Node cache hit: {}", id);
        }
        node
    }

    pub async fn insert(&self, node: TreeNode) {
        let mut nodes = self.nodes.lock().await;
        nodes.put(node.id.clone(), node);
    }

    pub async fn clear(&self) {
        self.nodes.lock().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::repository::EntryKind;
    use crate::tree::NodeIcon;

    fn node(id: &str) -> TreeNode {
        TreeNode {
            name: format!("node {}", id),
            path: format!("\\{}", id),
            id: id.to_string(),
            entry_type: EntryKind::Folder,
            is_container: true,
            is_leaf: false,
            is_selectable: true,
            icon: NodeIcon::Single("folder-20".to_string()),
            target_type: None,
            target_id: None,
            attributes: BTreeMap::new(),
        }
    }

    #[tokio::test]
    async fn test_insert_get_clear() {
        let cache = NodeCache::new(None);
        assert_eq!(cache.get("1").await, None);

        cache.insert(node("1")).await;
        cache.insert(node("2")).await;
        assert_eq!(cache.get("1").await.map(|n| n.name), Some("node 1".to_string()));
        assert!(cache.get("2").await.is_some());

        cache.clear().await;
        assert_eq!(cache.get("1").await, None);
        assert_eq!(cache.get("2").await, None);
    }

    #[tokio::test]
    async fn test_capacity_evicts_least_recently_used() {
        let cache = NodeCache::new(NonZeroUsize::new(2));
        cache.insert(node("1")).await;
        cache.insert(node("2")).await;
        // Touch "1" so that "2" is the eviction candidate
        assert!(cache.get("1").await.is_some());
        cache.insert(node("3")).await;

        assert!(cache.get("1").await.is_some());
        assert!(cache.get("2").await.is_none());
        assert!(cache.get("3").await.is_some());
    }
}
