//! Column allow-list and listing request construction.

use crate::client::ListEntriesRequest;
use crate::repository::EntryId;

use super::node::ColumnOrderBy;

/// Entry properties that may be surfaced as node attributes or used for
/// sorting. Anything else is dropped.
pub const SUPPORTED_COLUMN_IDS: [&str; 14] = [
    "name",
    "id",
    "elecDocumentSize",
    "extension",
    "isElectronicDocument",
    "isRecord",
    "mimeType",
    "pageCount",
    "isCheckedOut",
    "isUnderVersionControl",
    "creator",
    "creationTime",
    "lastModifiedTime",
    "templateName",
];

/// Properties every children listing selects, on top of the requested
/// columns.
pub const BASE_SELECT: [&str; 4] = ["targetType", "targetId", "extension", "parentId"];

/// Properties selected when fetching a single entry.
const ENTRY_SELECT: [&str; 9] = [
    "id",
    "name",
    "entryType",
    "fullPath",
    "parentId",
    "targetType",
    "targetId",
    "extension",
    "templateName",
];

pub const DEFAULT_ORDER_BY: &str = "name asc";

/// Cache key of the first page of a listing.
pub const FIRST_PAGE_CURSOR: &str = "0";

pub const DEFAULT_PAGE_SIZE: u32 = 100;

pub fn is_supported_column(column_id: &str) -> bool {
    SUPPORTED_COLUMN_IDS.contains(&column_id)
}

fn join_unique<'a>(columns: impl IntoIterator<Item = &'a str>) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for column in columns {
        if !seen.contains(&column) {
            seen.push(column);
        }
    }
    seen.join(",")
}

/// The select list for fetching one entry with the given columns.
pub fn entry_select(column_ids: &[String]) -> String {
    join_unique(
        ENTRY_SELECT
            .into_iter()
            .chain(column_ids.iter().map(String::as_str)),
    )
}

/// Build the request for the first page of `entry_id`'s children.
///
/// `order_by` must already be validated against the allow-list; `None`
/// sorts by name ascending.
pub fn build_children_request(
    repo_id: &str,
    entry_id: EntryId,
    column_ids: &[String],
    order_by: Option<&ColumnOrderBy>,
    page_size: u32,
    group_containers_first: bool,
) -> ListEntriesRequest {
    let sort_column = order_by.map(|o| o.column_id.as_str());
    let select = join_unique(
        BASE_SELECT
            .into_iter()
            .chain(column_ids.iter().map(String::as_str))
            .chain(sort_column),
    );

    ListEntriesRequest {
        repo_id: repo_id.to_string(),
        entry_id,
        select,
        order_by: order_by
            .map(ColumnOrderBy::to_order_clause)
            .unwrap_or_else(|| DEFAULT_ORDER_BY.to_string()),
        group_by_entry_type: group_containers_first,
        max_page_size: page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_supported_columns() {
        assert!(is_supported_column("creationTime"));
        assert!(is_supported_column("templateName"));
        assert!(!is_supported_column("fullPath"));
        assert!(!is_supported_column("CreationTime"));
    }

    #[test]
    fn test_default_children_request() {
        let request = build_children_request("r1", 1, &[], None, DEFAULT_PAGE_SIZE, true);
        assert_eq!(request.select, "targetType,targetId,extension,parentId");
        assert_eq!(request.order_by, "name asc");
        assert_eq!(request.max_page_size, 100);
        assert!(request.group_by_entry_type);
    }

    #[test]
    fn test_children_request_with_columns_and_sort() {
        let order = ColumnOrderBy::desc("creator");
        let request = build_children_request(
            "r1",
            5,
            &columns(&["creationTime", "extension"]),
            Some(&order),
            20,
            false,
        );
        assert_eq!(request.entry_id, 5);
        assert_eq!(
            request.select,
            "targetType,targetId,extension,parentId,creationTime,creator"
        );
        assert_eq!(request.order_by, "creator desc");
        assert_eq!(request.max_page_size, 20);
    }

    #[test]
    fn test_entry_select() {
        let select = entry_select(&columns(&["name", "creator"]));
        assert!(select.starts_with("id,name,entryType,fullPath"));
        assert!(select.ends_with(",creator"));
        let items: Vec<&str> = select.split(',').collect();
        assert_eq!(items.iter().filter(|c| **c == "name").count(), 1);
        assert!(items.contains(&"templateName"));
    }
}
