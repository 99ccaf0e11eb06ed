//! Backslash-separated repository paths.
//!
//! The root is the bare separator `\`. Every other path is the parent path,
//! a separator and the entry name, with no trailing separator.

pub const PATH_SEPARATOR: char = '\\';
pub const ROOT_PATH: &str = "\\";

/// Join a parent path and a child name.
pub fn combine(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches(PATH_SEPARATOR);
    format!("{}{}{}", parent, PATH_SEPARATOR, name)
}

/// Strip one trailing separator, leaving the root path alone.
pub fn trim_trailing_separator(path: &str) -> &str {
    if path == ROOT_PATH {
        return path;
    }
    path.strip_suffix(PATH_SEPARATOR).unwrap_or(path)
}

/// The path of the parent of `path`, or `None` when the parent is the root.
pub fn parent_path(path: &str) -> Option<&str> {
    let path = trim_trailing_separator(path);
    let (parent, _) = path.rsplit_once(PATH_SEPARATOR)?;
    if parent.is_empty() { None } else { Some(parent) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine() {
        assert_eq!(combine(ROOT_PATH, "Folder"), "\\Folder");
        assert_eq!(combine("\\Folder", "Doc"), "\\Folder\\Doc");
        assert_eq!(combine("\\Folder\\", "Doc"), "\\Folder\\Doc");
    }

    #[test]
    fn test_trim_trailing_separator() {
        assert_eq!(trim_trailing_separator("\\"), "\\");
        assert_eq!(trim_trailing_separator("\\Folder\\"), "\\Folder");
        assert_eq!(trim_trailing_separator("\\Folder"), "\\Folder");
    }

    #[test]
    fn test_parent_path() {
        assert_eq!(parent_path("\\Folder\\Sub\\Doc"), Some("\\Folder\\Sub"));
        assert_eq!(parent_path("\\Folder\\Sub\\"), Some("\\Folder"));
        assert_eq!(parent_path("\\Folder"), None);
        assert_eq!(parent_path("\\"), None);
    }

    #[test]
    fn test_parent_path_inverts_combine() {
        for parent in ["\\A", "\\A\\B", "\\A\\B\\C D"] {
            let child = combine(parent, "leaf");
            assert_eq!(parent_path(&child), Some(parent));
        }
        assert_eq!(parent_path(&combine(ROOT_PATH, "top")), None);
    }
}
