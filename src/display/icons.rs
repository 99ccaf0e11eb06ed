//! Icon ids and icon URLs from the document icon sprite sheet.

/// Sprite sheet the icon ids refer to.
pub const DEFAULT_ICON_BASE_URL: &str =
    "https://lfxstatic.com/npm/@laserfiche/lf-resource-library@4/resources/icons/document-icons.svg";

pub const FOLDER_ICON: &str = "folder-20";
pub const RECORD_FOLDER_ICON: &str = "recordfolder-20";
pub const RECORD_SERIES_ICON: &str = "recordseries-20";
pub const DOCUMENT_ICON: &str = "document-20";
pub const SHORTCUT_OVERLAY_ICON: &str = "shortcut-overlay";

/// Map a file extension (with or without the leading dot, any case) to a
/// document icon id. Unknown extensions get the generic document icon.
pub fn icon_id_for_extension(extension: &str) -> &'static str {
    let extension = extension.trim().trim_start_matches('.').to_ascii_lowercase();
    match extension.as_str() {
        "doc" | "docx" | "docm" | "dot" | "dotx" | "odt" | "rtf" | "wpd" => {
            "edoc-wordprocessing-20"
        }
        "xls" | "xlsx" | "xlsm" | "xlt" | "xltx" | "ods" | "csv" => "edoc-spreadsheet-20",
        "ppt" | "pptx" | "pptm" | "pps" | "ppsx" | "odp" => "edoc-presentation-20",
        "pdf" => "edoc-pdf-20",
        "txt" | "log" | "md" => "edoc-text-20",
        "htm" | "html" | "mht" | "mhtml" => "edoc-html-20",
        "xml" | "json" | "js" | "ts" | "css" => "edoc-code-20",
        "msg" | "eml" => "edoc-email-20",
        "jpg" | "jpeg" | "png" | "gif" | "bmp" | "tif" | "tiff" | "svg" | "heic" => {
            "edoc-image-20"
        }
        "mp3" | "wav" | "wma" | "m4a" | "ogg" => "edoc-audio-20",
        "mp4" | "mov" | "avi" | "wmv" | "mkv" | "webm" => "edoc-video-20",
        "zip" | "rar" | "7z" | "gz" | "tar" => "edoc-zip-20",
        _ => DOCUMENT_ICON,
    }
}

/// Builds icon URLs of the form `<base_url>#<icon_id>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSet {
    base_url: String,
}

impl IconSet {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// The URL of one icon in the sprite sheet.
    pub fn url(&self, icon_id: &str) -> String {
        format!("{}#{}", self.base_url, icon_id)
    }
}

impl Default for IconSet {
    fn default() -> Self {
        Self::new(DEFAULT_ICON_BASE_URL)
    }
}
