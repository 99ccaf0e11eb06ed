//! Tree-node orchestration over a [`RepositoryClient`].

use std::sync::Arc;

use log::{debug, warn};

use crate::caches::{NodeCache, PageCache};
use crate::client::{ClientError, CreateEntryRequest, RepositoryClient};
use crate::config::{Config, TreeConfig};
use crate::display::IconSet;
use crate::repository::{EntryId, ROOT_ENTRY_ID};

use super::columns::{
    FIRST_PAGE_CURSOR, SUPPORTED_COLUMN_IDS, build_children_request, entry_select,
    is_supported_column,
};
use super::error::{Result, TreeError};
use super::node::{ColumnOrderBy, ROOT_NODE_ID, TreeNode, TreeNodePage};
use super::path;
use super::projector::TreeNodeProjector;

/// Receives user-facing error messages, such as a folder failing to open.
pub trait TreeNotifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Serves tree nodes for a repository: the root, nodes by id, parents, and
/// paged children.
///
/// Resolved nodes and pages are cached for the lifetime of the service (or
/// until [`clear_cache`](Self::clear_cache)). Cache locks are never held
/// across a repository call; concurrent misses on the same key both fetch
/// and the later result is kept.
pub struct TreeNodeService {
    client: Arc<dyn RepositoryClient>,
    projector: TreeNodeProjector,
    config: TreeConfig,
    nodes: NodeCache,
    pages: PageCache,
    notifier: Option<Arc<dyn TreeNotifier>>,
}

impl TreeNodeService {
    /// Create a service over the given client.
    pub fn new<C>(client: C, config: &Config) -> Self
    where
        C: RepositoryClient + 'static,
    {
        Self::from_dyn(Arc::new(client), config)
    }

    /// Create a service over a shared client.
    pub fn from_dyn(client: Arc<dyn RepositoryClient>, config: &Config) -> Self {
        let icons = IconSet::new(config.icons.base_url.clone());
        Self {
            client,
            projector: TreeNodeProjector::new(icons, config.tree.column_ids.iter().cloned())
                .with_selectable(config.tree.selectable_entry_kinds.clone()),
            config: config.tree.clone(),
            nodes: NodeCache::new(config.cache.max_nodes),
            pages: PageCache::new(),
            notifier: None,
        }
    }

    /// Report children-page failures to `notifier` before returning them.
    pub fn with_notifier(mut self, notifier: Arc<dyn TreeNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// The column ids that may be requested as attributes or sort columns.
    pub fn get_supported_column_ids(&self) -> &'static [&'static str] {
        &SUPPORTED_COLUMN_IDS
    }

    // =========================================================================
    // Node Lookup
    // =========================================================================

    /// The repository root node (id `"1"`, path `\`).
    pub async fn get_root_node(&self) -> Result<TreeNode> {
        if let Some(node) = self.nodes.get(ROOT_NODE_ID).await {
            return Ok(node);
        }

        let repo_id = self.client.current_repo_id().await?;
        let repo_name = self.client.current_repo_name().await?;
        let select = entry_select(self.projector.column_ids());
        let entry = self
            .client
            .get_entry(&repo_id, ROOT_ENTRY_ID, Some(&select))
            .await?;

        let node = self.projector.project_root(&entry, &repo_name)?;
        self.nodes.insert(node.clone()).await;
        Ok(node)
    }

    /// Look up a node by id. Returns `None` if no such entry exists.
    ///
    /// The entry is projected without a parent, so its path comes from the
    /// entry's own full path.
    pub async fn get_node_by_id(&self, id: &str) -> Result<Option<TreeNode>> {
        let entry_id = parse_node_id(id)?;
        let key = entry_id.to_string();
        if let Some(node) = self.nodes.get(&key).await {
            return Ok(Some(node));
        }

        let repo_id = self.client.current_repo_id().await?;
        let repo_name = self.client.current_repo_name().await?;
        let select = entry_select(self.projector.column_ids());
        let entry = match self.client.get_entry(&repo_id, entry_id, Some(&select)).await {
            Ok(entry) => entry,
            Err(ClientError::NotFound) => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let node = self.projector.project(&entry, None, &repo_name)?;
        self.nodes.insert(node.clone()).await;
        Ok(Some(node))
    }

    /// The parent of `node`, or `None` for the root.
    ///
    /// The parent is found by path. If the caller may not see the parent,
    /// the root is returned instead.
    pub async fn get_parent_node(&self, node: &TreeNode) -> Result<Option<TreeNode>> {
        if node.is_root() {
            return Ok(None);
        }
        let Some(parent_path) = path::parent_path(&node.path) else {
            return self.get_root_node().await.map(Some);
        };

        match self.find_node_by_path(parent_path).await {
            Err(TreeError::Client(err)) if err.is_access_denied() => {
                debug!("Access denied to parent {}, using root", parent_path);
                self.get_root_node().await.map(Some)
            }
            result => result.map(Some),
        }
    }

    async fn find_node_by_path(&self, full_path: &str) -> Result<TreeNode> {
        let repo_id = self.client.current_repo_id().await?;
        let repo_name = self.client.current_repo_name().await?;
        let found = match self
            .client
            .get_entry_by_path(&repo_id, full_path, false)
            .await
        {
            Ok(found) => found,
            Err(ClientError::NotFound) => return Err(TreeError::NotFound(full_path.to_string())),
            Err(err) => return Err(err.into()),
        };

        let mut entry = found
            .entry
            .ok_or_else(|| TreeError::NotFound(full_path.to_string()))?;
        if entry.is_root() {
            return self.get_root_node().await;
        }
        entry.full_path = Some(full_path.to_string());
        self.projector.project(&entry, None, &repo_name)
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// One page of `folder`'s viewable children.
    ///
    /// Without a cursor the first page is fetched; otherwise the page the
    /// cursor points at. `order_by` applies to first pages only and must name
    /// a supported column, otherwise it is ignored with a warning.
    ///
    /// Pages are cached per folder and cursor. A failed fetch drops every
    /// cached page of the folder.
    pub async fn get_children(
        &self,
        folder: &TreeNode,
        cursor: Option<&str>,
        order_by: Option<&ColumnOrderBy>,
    ) -> Result<TreeNodePage> {
        let cursor_key = cursor.unwrap_or(FIRST_PAGE_CURSOR);
        if let Some(page) = self.pages.get(&folder.id, cursor_key).await {
            return Ok(page);
        }

        match self.fetch_children(folder, cursor, order_by).await {
            Ok(page) => {
                self.pages.insert(&folder.id, cursor_key, page.clone()).await;
                Ok(page)
            }
            Err(err) => {
                if let Some(notifier) = &self.notifier {
                    notifier.error(&format!("Failed to open folder: {}", err));
                }
                self.pages.evict_parent(&folder.id).await;
                Err(err)
            }
        }
    }

    async fn fetch_children(
        &self,
        folder: &TreeNode,
        cursor: Option<&str>,
        order_by: Option<&ColumnOrderBy>,
    ) -> Result<TreeNodePage> {
        let repo_id = self.client.current_repo_id().await?;
        let repo_name = self.client.current_repo_name().await?;

        let listing = match cursor {
            None => {
                let entry_id = listing_entry_id(folder)?;
                let order_by = order_by.filter(|order| {
                    let supported = is_supported_column(&order.column_id);
                    if !supported {
                        warn!("Cannot order by unsupported column: {}", order.column_id);
                    }
                    supported
                });
                let request = build_children_request(
                    &repo_id,
                    entry_id,
                    self.projector.column_ids(),
                    order_by,
                    self.config.page_size,
                    self.config.group_containers_first,
                );
                self.client.list_entries(&request).await?
            }
            Some(cursor) => {
                self.client
                    .list_entries_next(cursor, self.config.page_size)
                    .await?
            }
        };

        let page = listing
            .entries
            .iter()
            .filter(|entry| self.config.viewable_entry_kinds.admits(entry))
            .map(|entry| self.projector.project(entry, Some(folder), &repo_name))
            .collect::<Result<Vec<_>>>()?;

        Ok(TreeNodePage {
            page,
            next_cursor: listing.next_link,
        })
    }

    // =========================================================================
    // Cache Control and Mutation
    // =========================================================================

    /// Drop every cached node and page.
    pub async fn clear_cache(&self) {
        debug!("Clearing tree node caches");
        self.nodes.clear().await;
        self.pages.clear().await;
    }

    /// Drop all caches and fetch the first page of `folder` again.
    pub async fn refresh(&self, folder: &TreeNode) -> Result<TreeNodePage> {
        self.clear_cache().await;
        self.get_children(folder, None, None).await
    }

    /// Create a folder named `name` under `parent` and return its node.
    ///
    /// The parent's cached pages are dropped so the next listing shows the
    /// new folder.
    pub async fn add_new_folder(&self, parent: &TreeNode, name: &str) -> Result<TreeNode> {
        let parent_id = listing_entry_id(parent)?;
        let repo_id = self.client.current_repo_id().await?;
        let repo_name = self.client.current_repo_name().await?;

        let created = self
            .client
            .create_entry(&repo_id, parent_id, &CreateEntryRequest::folder(name))
            .await?;
        self.pages.evict_parent(&parent.id).await;

        self.projector.project(&created, Some(parent), &repo_name)
    }
}

fn parse_node_id(id: &str) -> Result<EntryId> {
    match id.trim().parse::<EntryId>() {
        Ok(entry_id) if entry_id > 0 => Ok(entry_id),
        _ => Err(TreeError::InvalidId(id.to_string())),
    }
}

fn listing_entry_id(node: &TreeNode) -> Result<EntryId> {
    node.listing_entry_id()
        .ok_or_else(|| TreeError::InvalidId(node.id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientOperation, MemoryRepositoryClient};
    use crate::config::EntryKindFilter;
    use crate::repository::{Entry, EntryKind};
    use crate::tree::NodeIcon;

    struct Fixture {
        client: Arc<MemoryRepositoryClient>,
        folder: EntryId,
        doc: EntryId,
    }

    /// \Folder\Doc.docx, \Folder\Sub, \Readme.txt
    fn fixture() -> Fixture {
        let _ = env_logger::try_init();
        let client = Arc::new(MemoryRepositoryClient::new("r1", "Repo"));
        let folder = client.add_folder(ROOT_ENTRY_ID, "Folder");
        let doc = client.add_document(folder, "Doc", "docx");
        client.add_folder(folder, "Sub");
        client.add_document(ROOT_ENTRY_ID, "Readme", "txt");
        Fixture {
            client,
            folder,
            doc,
        }
    }

    fn service_with(client: &Arc<MemoryRepositoryClient>, config: Config) -> TreeNodeService {
        TreeNodeService::from_dyn(client.clone(), &config)
    }

    fn service(client: &Arc<MemoryRepositoryClient>) -> TreeNodeService {
        service_with(client, Config::default())
    }

    fn names(page: &TreeNodePage) -> Vec<&str> {
        page.page.iter().map(|node| node.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_root_node_is_cached() {
        let f = fixture();
        let service = service(&f.client);

        let root = service.get_root_node().await.unwrap();
        assert_eq!(root.name, "Repo");
        assert_eq!(root.path, "\\");
        assert_eq!(root.id, "1");
        assert_eq!(root.entry_type, EntryKind::Folder);

        let again = service.get_root_node().await.unwrap();
        assert_eq!(again, root);
        assert_eq!(f.client.call_count(ClientOperation::GetEntry), 1);
    }

    #[tokio::test]
    async fn test_get_node_by_id() {
        let f = fixture();
        let service = service(&f.client);

        let doc = service
            .get_node_by_id(&f.doc.to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc.path, "\\Folder\\Doc");
        assert!(doc.is_leaf);

        service.get_node_by_id(&f.doc.to_string()).await.unwrap();
        assert_eq!(f.client.call_count(ClientOperation::GetEntry), 1);

        assert_eq!(service.get_node_by_id("999").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_node_by_invalid_id() {
        let f = fixture();
        let service = service(&f.client);
        for id in ["abc", "0", "-3", ""] {
            let err = service.get_node_by_id(id).await.unwrap_err();
            assert!(matches!(err, TreeError::InvalidId(_)), "id {:?}", id);
        }
        assert_eq!(f.client.call_count(ClientOperation::GetEntry), 0);
    }

    #[tokio::test]
    async fn test_get_node_by_id_propagates_access_denied() {
        let f = fixture();
        f.client.deny_access(f.folder);
        let service = service(&f.client);

        let err = service
            .get_node_by_id(&f.folder.to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, TreeError::Client(ref e) if e.is_access_denied()));
    }

    #[tokio::test]
    async fn test_children_paths_and_grouping() {
        let f = fixture();
        let service = service(&f.client);
        let root = service.get_root_node().await.unwrap();

        let page = service.get_children(&root, None, None).await.unwrap();
        assert_eq!(names(&page), vec!["Folder", "Readme"]);
        assert_eq!(page.next_cursor, None);
        assert_eq!(page.page[0].path, "\\Folder");

        let folder = page.page[0].clone();
        let page = service.get_children(&folder, None, None).await.unwrap();
        assert_eq!(names(&page), vec!["Sub", "Doc"]);
        assert_eq!(page.page[1].path, "\\Folder\\Doc");
        assert_eq!(
            page.page[1].icon,
            NodeIcon::Single(IconSet::default().url("edoc-wordprocessing-20"))
        );
    }

    #[tokio::test]
    async fn test_children_pagination_and_cache() {
        let client = Arc::new(MemoryRepositoryClient::new("r1", "Repo"));
        for name in ["a", "b", "c", "d", "e"] {
            client.add_folder(ROOT_ENTRY_ID, name);
        }
        let mut config = Config::default();
        config.tree.page_size = 2;
        let service = service_with(&client, config);
        let root = service.get_root_node().await.unwrap();

        let first = service.get_children(&root, None, None).await.unwrap();
        assert_eq!(names(&first), vec!["a", "b"]);
        let cursor = first.next_cursor.clone().unwrap();

        let second = service
            .get_children(&root, Some(&cursor), None)
            .await
            .unwrap();
        assert_eq!(names(&second), vec!["c", "d"]);

        let third = service
            .get_children(&root, second.next_cursor.as_deref(), None)
            .await
            .unwrap();
        assert_eq!(names(&third), vec!["e"]);
        assert_eq!(third.next_cursor, None);

        // Served from the page cache
        let again = service.get_children(&root, None, None).await.unwrap();
        assert_eq!(again, first);
        let again = service
            .get_children(&root, Some(&cursor), None)
            .await
            .unwrap();
        assert_eq!(again, second);
        assert_eq!(client.call_count(ClientOperation::ListEntries), 1);
        assert_eq!(client.call_count(ClientOperation::ListEntriesNext), 2);
    }

    #[tokio::test]
    async fn test_children_request_parameters() {
        let f = fixture();
        let mut config = Config::default();
        config.tree.column_ids = vec!["creationTime".to_string(), "serialNumber".to_string()];
        let service = service_with(&f.client, config);
        let root = service.get_root_node().await.unwrap();

        service
            .get_children(&root, None, Some(&ColumnOrderBy::desc("creator")))
            .await
            .unwrap();
        let request = f.client.last_list_request().unwrap();
        assert_eq!(request.entry_id, ROOT_ENTRY_ID);
        assert_eq!(
            request.select,
            "targetType,targetId,extension,parentId,creationTime,creator"
        );
        assert_eq!(request.order_by, "creator desc");
        assert_eq!(request.max_page_size, 100);
        assert!(request.group_by_entry_type);
    }

    #[tokio::test]
    async fn test_unsupported_order_by_falls_back_to_name() {
        let f = fixture();
        let service = service(&f.client);
        let root = service.get_root_node().await.unwrap();

        service
            .get_children(&root, None, Some(&ColumnOrderBy::desc("fullPath")))
            .await
            .unwrap();
        let request = f.client.last_list_request().unwrap();
        assert_eq!(request.order_by, "name asc");
        assert_eq!(request.select, "targetType,targetId,extension,parentId");
    }

    #[tokio::test]
    async fn test_shortcut_children_list_target() {
        let f = fixture();
        f.client.insert(
            ROOT_ENTRY_ID,
            Entry::shortcut(0, "Link", EntryKind::Folder, f.folder),
        );
        let service = service(&f.client);
        let root = service.get_root_node().await.unwrap();

        let page = service.get_children(&root, None, None).await.unwrap();
        let link = page
            .page
            .iter()
            .find(|node| node.name == "Link")
            .unwrap()
            .clone();
        assert!(link.is_container);
        assert_eq!(link.entry_type, EntryKind::Shortcut);

        let page = service.get_children(&link, None, None).await.unwrap();
        assert_eq!(f.client.last_list_request().unwrap().entry_id, f.folder);
        assert_eq!(names(&page), vec!["Sub", "Doc"]);
        assert_eq!(page.page[1].path, "\\Link\\Doc");
    }

    #[tokio::test]
    async fn test_viewable_entry_kinds() {
        let f = fixture();
        f.client.insert(
            ROOT_ENTRY_ID,
            Entry::shortcut(0, "DocLink", EntryKind::Document, f.doc),
        );
        f.client.insert(
            ROOT_ENTRY_ID,
            Entry::shortcut(0, "FolderLink", EntryKind::Folder, f.folder),
        );
        let mut config = Config::default();
        config.tree.viewable_entry_kinds =
            EntryKindFilter::only([EntryKind::Folder, EntryKind::Shortcut]);
        let service = service_with(&f.client, config);
        let root = service.get_root_node().await.unwrap();

        let page = service.get_children(&root, None, None).await.unwrap();
        assert_eq!(names(&page), vec!["Folder", "FolderLink"]);
    }

    #[tokio::test]
    async fn test_failed_fetch_evicts_folder_pages() {
        let client = Arc::new(MemoryRepositoryClient::new("r1", "Repo"));
        for name in ["a", "b", "c"] {
            client.add_folder(ROOT_ENTRY_ID, name);
        }
        let mut config = Config::default();
        config.tree.page_size = 2;
        let service = service_with(&client, config);
        let root = service.get_root_node().await.unwrap();

        let first = service.get_children(&root, None, None).await.unwrap();
        client.fail_next(
            ClientOperation::ListEntriesNext,
            ClientError::Transport("connection reset".to_string()),
        );
        let err = service
            .get_children(&root, first.next_cursor.as_deref(), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TreeError::Client(ClientError::Transport(_))
        ));

        // The cached first page went with the failure
        service.get_children(&root, None, None).await.unwrap();
        assert_eq!(client.call_count(ClientOperation::ListEntries), 2);
    }

    #[derive(Default)]
    struct RecordingNotifier {
        errors: std::sync::Mutex<Vec<String>>,
    }

    impl TreeNotifier for RecordingNotifier {
        fn error(&self, message: &str) {
            self.errors.lock().unwrap().push(message.to_string());
        }
    }

    #[tokio::test]
    async fn test_failed_folder_open_is_notified() {
        let f = fixture();
        let notifier = Arc::new(RecordingNotifier::default());
        let service = service(&f.client).with_notifier(notifier.clone());
        let root = service.get_root_node().await.unwrap();

        service.get_children(&root, None, None).await.unwrap();
        assert!(notifier.errors.lock().unwrap().is_empty());

        service.clear_cache().await;
        f.client.fail_next(
            ClientOperation::ListEntries,
            ClientError::Transport("connection reset".to_string()),
        );
        assert!(service.get_children(&root, None, None).await.is_err());

        let errors = notifier.errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Failed to open folder: "));
        assert!(errors[0].contains("connection reset"));
    }

    #[tokio::test]
    async fn test_selectable_entry_kinds() {
        let f = fixture();
        f.client.insert(
            ROOT_ENTRY_ID,
            Entry::shortcut(0, "FolderLink", EntryKind::Folder, f.folder),
        );
        let mut config = Config::default();
        config.tree.selectable_entry_kinds = EntryKindFilter::only([EntryKind::Document]);
        let service = service_with(&f.client, config);
        let root = service.get_root_node().await.unwrap();
        assert!(!root.is_selectable);

        let page = service.get_children(&root, None, None).await.unwrap();
        let selectable: Vec<_> = page
            .page
            .iter()
            .map(|node| (node.name.as_str(), node.is_selectable))
            .collect();
        assert_eq!(
            selectable,
            vec![("Folder", false), ("FolderLink", false), ("Readme", true)]
        );
    }

    #[tokio::test]
    async fn test_unrecognised_kinds_are_skipped() {
        let f = fixture();
        let mut broken = Entry::folder(0, "Broken");
        broken.entry_type = None;
        f.client.insert(f.folder, broken);
        let mut dangling = Entry::shortcut(0, "Dangling", EntryKind::Folder, f.doc);
        dangling.target_type = Some(EntryKind::Shortcut);
        f.client.insert(f.folder, dangling);
        let service = service(&f.client);
        let folder = service
            .get_node_by_id(&f.folder.to_string())
            .await
            .unwrap()
            .unwrap();

        // Unknown kinds are filtered out before projection
        let page = service.get_children(&folder, None, None).await.unwrap();
        assert_eq!(names(&page), vec!["Sub", "Doc"]);
    }

    #[tokio::test]
    async fn test_get_parent_node() {
        let f = fixture();
        let service = service(&f.client);

        let root = service.get_root_node().await.unwrap();
        assert_eq!(service.get_parent_node(&root).await.unwrap(), None);

        let doc = service
            .get_node_by_id(&f.doc.to_string())
            .await
            .unwrap()
            .unwrap();
        let parent = service.get_parent_node(&doc).await.unwrap().unwrap();
        assert_eq!(parent.id, f.folder.to_string());
        assert_eq!(parent.path, "\\Folder");
        assert_eq!(parent.name, "Folder");

        let grandparent = service.get_parent_node(&parent).await.unwrap().unwrap();
        assert_eq!(grandparent, root);
    }

    #[tokio::test]
    async fn test_get_parent_node_trailing_separator() {
        let f = fixture();
        let service = service(&f.client);

        let mut doc = service
            .get_node_by_id(&f.doc.to_string())
            .await
            .unwrap()
            .unwrap();
        doc.path.push('\\');
        let parent = service.get_parent_node(&doc).await.unwrap().unwrap();
        assert_eq!(parent.path, "\\Folder");
    }

    #[tokio::test]
    async fn test_get_parent_node_access_denied_returns_root() {
        let f = fixture();
        let service = service(&f.client);
        let doc = service
            .get_node_by_id(&f.doc.to_string())
            .await
            .unwrap()
            .unwrap();
        f.client.deny_access(f.folder);

        let parent = service.get_parent_node(&doc).await.unwrap().unwrap();
        assert!(parent.is_root());
    }

    #[tokio::test]
    async fn test_get_parent_node_missing_or_failing() {
        let f = fixture();
        let service = service(&f.client);
        let mut doc = service
            .get_node_by_id(&f.doc.to_string())
            .await
            .unwrap()
            .unwrap();

        doc.path = "\\Gone\\Doc".to_string();
        let err = service.get_parent_node(&doc).await.unwrap_err();
        assert!(matches!(err, TreeError::NotFound(ref p) if p == "\\Gone"));

        f.client.fail_next(
            ClientOperation::GetEntryByPath,
            ClientError::Transport("timeout".to_string()),
        );
        doc.path = "\\Folder\\Doc".to_string();
        let err = service.get_parent_node(&doc).await.unwrap_err();
        assert!(matches!(err, TreeError::Client(ClientError::Transport(_))));
    }

    #[tokio::test]
    async fn test_clear_cache_and_refresh() {
        let f = fixture();
        let service = service(&f.client);
        let root = service.get_root_node().await.unwrap();
        service.get_children(&root, None, None).await.unwrap();

        f.client.add_folder(ROOT_ENTRY_ID, "Late");
        let cached = service.get_children(&root, None, None).await.unwrap();
        assert_eq!(names(&cached), vec!["Folder", "Readme"]);

        let refreshed = service.refresh(&root).await.unwrap();
        assert_eq!(names(&refreshed), vec!["Folder", "Late", "Readme"]);
        assert_eq!(f.client.call_count(ClientOperation::ListEntries), 2);

        service.clear_cache().await;
        service.get_root_node().await.unwrap();
        assert_eq!(f.client.call_count(ClientOperation::GetEntry), 2);
    }

    #[tokio::test]
    async fn test_add_new_folder() {
        let f = fixture();
        let service = service(&f.client);
        let root = service.get_root_node().await.unwrap();
        service.get_children(&root, None, None).await.unwrap();

        let created = service.add_new_folder(&root, "New").await.unwrap();
        assert_eq!(created.path, "\\New");
        assert!(created.is_container);

        let page = service.get_children(&root, None, None).await.unwrap();
        assert_eq!(names(&page), vec!["Folder", "New", "Readme"]);

        let err = service.add_new_folder(&root, "New").await.unwrap_err();
        assert!(matches!(
            err,
            TreeError::Client(ClientError::Api { status: 409, .. })
        ));
    }

    #[test]
    fn test_supported_column_ids() {
        let client = MemoryRepositoryClient::new("r1", "Repo");
        let service = TreeNodeService::new(client, &Config::default());
        let columns = service.get_supported_column_ids();
        assert_eq!(columns.len(), 14);
        assert!(columns.contains(&"elecDocumentSize"));
    }
}
