use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::sync::RwLock;

use async_trait::async_trait;

use super::repository_client::{
    ClientError, CreateEntryRequest, EntryListing, FindEntryResult, ListEntriesRequest,
    RepositoryClient, Result,
};
use crate::repository::{
    ApiFieldInfo, DynamicFieldValuesRequest, Entry, EntryId, EntryKind, ROOT_ENTRY_ID, TemplateId,
    TemplateIdentifier, TemplateInfo,
};

const NEXT_LINK_PREFIX: &str = "memory://listing/";

/// Identifies a `RepositoryClient` operation, for call counting and failure
/// injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientOperation {
    GetEntry,
    GetEntryByPath,
    ListEntries,
    ListEntriesNext,
    CreateEntry,
    GetFieldDefinitions,
    GetTemplateFieldDefinitions,
    GetTemplateDefinitions,
    GetTemplateDefinitionById,
    GetDynamicFieldValues,
}

struct State {
    entries: BTreeMap<EntryId, Entry>,
    children: HashMap<EntryId, Vec<EntryId>>,
    denied: HashSet<EntryId>,
    next_entry_id: EntryId,

    // Sorted listings kept alive for their continuation links
    listings: HashMap<u64, Vec<Entry>>,
    next_listing_token: u64,

    field_definitions: Vec<ApiFieldInfo>,
    template_fields: HashMap<TemplateIdentifier, Vec<ApiFieldInfo>>,
    templates: Vec<TemplateInfo>,
    dynamic_values: HashMap<String, Vec<String>>,

    failures: HashMap<ClientOperation, VecDeque<ClientError>>,
    calls: HashMap<ClientOperation, usize>,
    last_list_request: Option<ListEntriesRequest>,
    last_dynamic_request: Option<DynamicFieldValuesRequest>,
}

impl State {
    /// Count a call and pop an injected failure, if any.
    fn enter(&mut self, op: ClientOperation) -> Result<()> {
        *self.calls.entry(op).or_insert(0) += 1;
        match self.failures.get_mut(&op).and_then(|queue| queue.pop_front()) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn visible_entry(&self, entry_id: EntryId) -> Result<&Entry> {
        if self.denied.contains(&entry_id) {
            return Err(ClientError::access_denied());
        }
        self.entries.get(&entry_id).ok_or(ClientError::NotFound)
    }

    fn page(&mut self, token: u64, offset: usize, max_page_size: u32) -> Result<EntryListing> {
        let listing = self
            .listings
            .get(&token)
            .ok_or_else(|| ClientError::Other(format!("listing {} has expired", token)))?;
        let page_size = (max_page_size as usize).max(1);
        let end = (offset + page_size).min(listing.len());
        let entries = listing.get(offset..end).unwrap_or_default().to_vec();
        let next_link = if end < listing.len() {
            Some(format!("{}{}/{}", NEXT_LINK_PREFIX, token, end))
        } else {
            self.listings.remove(&token);
            None
        };
        Ok(EntryListing { entries, next_link })
    }
}

/// An in-memory implementation of `RepositoryClient`, intended primarily for
/// testing.
///
/// Starts with an empty-named root folder (id 1, path `\`). Entries added
/// through [`add_folder`](Self::add_folder) and friends get their full path
/// computed from the parent. Listings omit `fullPath` unless it is selected,
/// as the real API does.
pub struct MemoryRepositoryClient {
    repo_id: String,
    repo_name: String,
    state: RwLock<State>,
}

impl MemoryRepositoryClient {
    /// Create a repository containing only the root folder.
    pub fn new(repo_id: impl Into<String>, repo_name: impl Into<String>) -> Self {
        let root = Entry::folder(ROOT_ENTRY_ID, "").with_full_path("\\");
        let mut entries = BTreeMap::new();
        entries.insert(ROOT_ENTRY_ID, root);

        Self {
            repo_id: repo_id.into(),
            repo_name: repo_name.into(),
            state: RwLock::new(State {
                entries,
                children: HashMap::new(),
                denied: HashSet::new(),
                next_entry_id: ROOT_ENTRY_ID + 1,
                listings: HashMap::new(),
                next_listing_token: 1,
                field_definitions: Vec::new(),
                template_fields: HashMap::new(),
                templates: Vec::new(),
                dynamic_values: HashMap::new(),
                failures: HashMap::new(),
                calls: HashMap::new(),
                last_list_request: None,
                last_dynamic_request: None,
            }),
        }
    }

    // =========================================================================
    // Repository Contents
    // =========================================================================

    /// Insert `entry` as a child of `parent_id`.
    ///
    /// An id of 0 is replaced by a fresh one. The parent id is set, and the
    /// full path is computed unless the entry already has one.
    pub fn insert(&self, parent_id: EntryId, mut entry: Entry) -> EntryId {
        let mut state = self.state.write().unwrap();
        if entry.id == 0 {
            entry.id = state.next_entry_id;
        }
        state.next_entry_id = state.next_entry_id.max(entry.id + 1);

        if entry.full_path.is_none() {
            let parent_path = state
                .entries
                .get(&parent_id)
                .and_then(|parent| parent.full_path.clone())
                .unwrap_or_default();
            let parent_path = parent_path.trim_end_matches('\\');
            entry.full_path = Some(format!("{}\\{}", parent_path, entry.name));
        }
        entry.parent_id = Some(parent_id);

        let id = entry.id;
        state.entries.insert(id, entry);
        state.children.entry(parent_id).or_default().push(id);
        id
    }

    /// Add a folder under `parent_id` and return its id.
    pub fn add_folder(&self, parent_id: EntryId, name: &str) -> EntryId {
        self.insert(parent_id, Entry::folder(0, name))
    }

    /// Add a document under `parent_id` and return its id.
    pub fn add_document(&self, parent_id: EntryId, name: &str, extension: &str) -> EntryId {
        self.insert(parent_id, Entry::document(0, name).with_extension(extension))
    }

    /// Make every lookup of `entry_id` fail with the access-denied error.
    pub fn deny_access(&self, entry_id: EntryId) {
        self.state.write().unwrap().denied.insert(entry_id);
    }

    pub fn set_field_definitions(&self, fields: Vec<ApiFieldInfo>) {
        self.state.write().unwrap().field_definitions = fields;
    }

    pub fn set_template_fields(&self, template: TemplateIdentifier, fields: Vec<ApiFieldInfo>) {
        self.state
            .write()
            .unwrap()
            .template_fields
            .insert(template, fields);
    }

    pub fn set_templates(&self, templates: Vec<TemplateInfo>) {
        self.state.write().unwrap().templates = templates;
    }

    /// Set the options returned by every dynamic field lookup.
    pub fn set_dynamic_values(&self, values: HashMap<String, Vec<String>>) {
        self.state.write().unwrap().dynamic_values = values;
    }

    // =========================================================================
    // Instrumentation
    // =========================================================================

    /// Make the next call of `op` fail with `err`. Failures queue up.
    pub fn fail_next(&self, op: ClientOperation, err: ClientError) {
        self.state
            .write()
            .unwrap()
            .failures
            .entry(op)
            .or_default()
            .push_back(err);
    }

    /// Number of times `op` has been called, including failed calls.
    pub fn call_count(&self, op: ClientOperation) -> usize {
        let state = self.state.read().unwrap();
        state.calls.get(&op).copied().unwrap_or(0)
    }

    pub fn last_list_request(&self) -> Option<ListEntriesRequest> {
        self.state.read().unwrap().last_list_request.clone()
    }

    pub fn last_dynamic_request(&self) -> Option<DynamicFieldValuesRequest> {
        self.state.read().unwrap().last_dynamic_request.clone()
    }
}

fn is_container(entry: &Entry) -> bool {
    let kind = match entry.entry_type {
        Some(EntryKind::Shortcut) => entry.target_type,
        other => other,
    };
    matches!(kind, Some(EntryKind::Folder) | Some(EntryKind::RecordSeries))
}

fn sort_listing(entries: &mut [Entry], order_by: &str, group_by_entry_type: bool) {
    let mut parts = order_by.split_whitespace();
    let column = parts.next().unwrap_or("name");
    let descending = parts
        .next()
        .is_some_and(|dir| dir.eq_ignore_ascii_case("desc"));

    let key = |entry: &Entry| {
        entry
            .column_value(column)
            .map(|v| v.to_string().to_lowercase())
            .unwrap_or_default()
    };
    entries.sort_by(|a, b| {
        let ordering = key(a).cmp(&key(b));
        if descending { ordering.reverse() } else { ordering }
    });
    if group_by_entry_type {
        entries.sort_by_key(|entry| !is_container(entry));
    }
}

#[async_trait]
impl RepositoryClient for MemoryRepositoryClient {
    async fn current_repo_id(&self) -> Result<String> {
        Ok(self.repo_id.clone())
    }

    async fn current_repo_name(&self) -> Result<String> {
        Ok(self.repo_name.clone())
    }

    async fn get_entry(
        &self,
        _repo_id: &str,
        entry_id: EntryId,
        _select: Option<&str>,
    ) -> Result<Entry> {
        let mut state = self.state.write().unwrap();
        state.enter(ClientOperation::GetEntry)?;
        state.visible_entry(entry_id).cloned()
    }

    async fn get_entry_by_path(
        &self,
        _repo_id: &str,
        full_path: &str,
        fallback_to_closest_ancestor: bool,
    ) -> Result<FindEntryResult> {
        let mut state = self.state.write().unwrap();
        state.enter(ClientOperation::GetEntryByPath)?;

        let find = |path: &str| {
            state
                .entries
                .values()
                .find(|entry| entry.full_path.as_deref() == Some(path))
                .map(|entry| entry.id)
        };

        if let Some(id) = find(full_path) {
            let entry = state.visible_entry(id)?.clone();
            return Ok(FindEntryResult {
                entry: Some(entry),
                ancestor_entry: None,
            });
        }
        if !fallback_to_closest_ancestor {
            return Err(ClientError::NotFound);
        }

        let mut path = full_path.trim_end_matches('\\');
        loop {
            path = match path.rfind('\\') {
                Some(0) | None => "\\",
                Some(pos) => &path[..pos],
            };
            if let Some(id) = find(path) {
                let ancestor = state.visible_entry(id)?.clone();
                return Ok(FindEntryResult {
                    entry: None,
                    ancestor_entry: Some(ancestor),
                });
            }
            if path == "\\" {
                return Err(ClientError::NotFound);
            }
        }
    }

    async fn list_entries(&self, request: &ListEntriesRequest) -> Result<EntryListing> {
        let mut state = self.state.write().unwrap();
        state.last_list_request = Some(request.clone());
        state.enter(ClientOperation::ListEntries)?;
        state.visible_entry(request.entry_id)?;

        let with_full_path = request.select.split(',').any(|s| s.trim() == "fullPath");
        let mut listing: Vec<Entry> = state
            .children
            .get(&request.entry_id)
            .into_iter()
            .flatten()
            .filter_map(|id| state.entries.get(id))
            .map(|entry| {
                let mut entry = entry.clone();
                if !with_full_path {
                    entry.full_path = None;
                }
                entry
            })
            .collect();
        sort_listing(&mut listing, &request.order_by, request.group_by_entry_type);

        let token = state.next_listing_token;
        state.next_listing_token += 1;
        state.listings.insert(token, listing);
        state.page(token, 0, request.max_page_size)
    }

    async fn list_entries_next(
        &self,
        next_link: &str,
        max_page_size: u32,
    ) -> Result<EntryListing> {
        let mut state = self.state.write().unwrap();
        state.enter(ClientOperation::ListEntriesNext)?;

        let invalid = || ClientError::Other(format!("invalid next link: {}", next_link));
        let (token, offset) = next_link
            .strip_prefix(NEXT_LINK_PREFIX)
            .and_then(|rest| rest.split_once('/'))
            .ok_or_else(invalid)?;
        let token: u64 = token.parse().map_err(|_| invalid())?;
        let offset: usize = offset.parse().map_err(|_| invalid())?;
        state.page(token, offset, max_page_size)
    }

    async fn create_entry(
        &self,
        _repo_id: &str,
        parent_id: EntryId,
        request: &CreateEntryRequest,
    ) -> Result<Entry> {
        {
            let mut state = self.state.write().unwrap();
            state.enter(ClientOperation::CreateEntry)?;
            state.visible_entry(parent_id)?;
            let taken = state
                .children
                .get(&parent_id)
                .into_iter()
                .flatten()
                .filter_map(|id| state.entries.get(id))
                .any(|entry| entry.name.eq_ignore_ascii_case(&request.name));
            if taken && !request.auto_rename {
                return Err(ClientError::Api {
                    status: 409,
                    error_code: None,
                    message: format!("An entry named '{}' already exists.", request.name),
                });
            }
        }

        let entry = Entry {
            entry_type: Some(request.entry_type),
            name: request.name.clone(),
            ..Entry::default()
        };
        let id = self.insert(parent_id, entry);
        let state = self.state.read().unwrap();
        state.entries.get(&id).cloned().ok_or(ClientError::NotFound)
    }

    async fn get_field_definitions(&self, _repo_id: &str) -> Result<Vec<ApiFieldInfo>> {
        let mut state = self.state.write().unwrap();
        state.enter(ClientOperation::GetFieldDefinitions)?;
        Ok(state.field_definitions.clone())
    }

    async fn get_template_field_definitions(
        &self,
        _repo_id: &str,
        template: &TemplateIdentifier,
    ) -> Result<Vec<ApiFieldInfo>> {
        let mut state = self.state.write().unwrap();
        state.enter(ClientOperation::GetTemplateFieldDefinitions)?;
        state
            .template_fields
            .get(template)
            .cloned()
            .ok_or(ClientError::NotFound)
    }

    async fn get_template_definitions(
        &self,
        _repo_id: &str,
        template_name: Option<&str>,
    ) -> Result<Vec<TemplateInfo>> {
        let mut state = self.state.write().unwrap();
        state.enter(ClientOperation::GetTemplateDefinitions)?;
        Ok(state
            .templates
            .iter()
            .filter(|t| template_name.is_none() || t.name.as_deref() == template_name)
            .cloned()
            .collect())
    }

    async fn get_template_definition_by_id(
        &self,
        _repo_id: &str,
        template_id: TemplateId,
    ) -> Result<TemplateInfo> {
        let mut state = self.state.write().unwrap();
        state.enter(ClientOperation::GetTemplateDefinitionById)?;
        state
            .templates
            .iter()
            .find(|t| t.id == Some(template_id))
            .cloned()
            .ok_or(ClientError::NotFound)
    }

    async fn get_dynamic_field_values(
        &self,
        _repo_id: &str,
        entry_id: EntryId,
        request: &DynamicFieldValuesRequest,
    ) -> Result<HashMap<String, Vec<String>>> {
        let mut state = self.state.write().unwrap();
        state.last_dynamic_request = Some(request.clone());
        state.enter(ClientOperation::GetDynamicFieldValues)?;
        state.visible_entry(entry_id)?;
        Ok(state.dynamic_values.clone())
    }
}
