//! Configuration file reading and parsing.
//!
//! This module handles locating, reading, and parsing INI-format configuration files,
//! with support for layered overrides.

use std::env;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use configparser::ini::Ini;
use thiserror::Error;

use super::{Config, EntryKindFilter};
use crate::repository::UnknownEntryKind;

const ENV_CONFIG_FILE: &str = "REPO_TREE_CONFIG_FILE";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid integer '{value}' for key '{key}': {source}")]
    InvalidInteger {
        key: String,
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("value for key '{key}' must be greater than zero")]
    ZeroValue { key: String },

    #[error("invalid boolean '{value}' for key '{key}'")]
    InvalidBoolean { key: String, value: String },

    #[error("invalid entry kind list: {0}")]
    InvalidEntryKind(#[from] UnknownEntryKind),

    #[error("invalid override key '{key}': {message}")]
    InvalidOverrideKey { key: String, message: String },
}

/// Result type for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// =============================================================================
// ConfigSource
// =============================================================================

/// Specifies how to locate and layer configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigSource {
    /// Explicit config file path. If specified and doesn't exist, error.
    /// If None, fall back to the REPO_TREE_CONFIG_FILE env var.
    pub config_file: Option<PathBuf>,

    /// Additional override config file (layered on top of base config).
    pub override_file: Option<PathBuf>,

    /// Individual key=value overrides (applied last).
    /// Keys use dot-notation: "tree.page_size", "icons.base_url"
    pub overrides: Vec<(String, String)>,
}

// =============================================================================
// Value Parsing
// =============================================================================

fn parse_bool_value(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidBoolean {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_positive(key: &str, value: &str) -> Result<NonZeroUsize> {
    let n: usize = value
        .trim()
        .parse()
        .map_err(|e| ConfigError::InvalidInteger {
            key: key.to_string(),
            value: value.to_string(),
            source: e,
        })?;
    NonZeroUsize::new(n).ok_or_else(|| ConfigError::ZeroValue {
        key: key.to_string(),
    })
}

fn parse_page_size(key: &str, value: &str) -> Result<u32> {
    let n: u32 = value
        .trim()
        .parse()
        .map_err(|e| ConfigError::InvalidInteger {
            key: key.to_string(),
            value: value.to_string(),
            source: e,
        })?;
    if n == 0 {
        return Err(ConfigError::ZeroValue {
            key: key.to_string(),
        });
    }
    Ok(n)
}

/// Parse an optional limit: "none" disables it.
fn parse_optional_limit(key: &str, value: &str) -> Result<Option<NonZeroUsize>> {
    if value.trim().eq_ignore_ascii_case("none") {
        Ok(None)
    } else {
        parse_positive(key, value).map(Some)
    }
}

/// Parse a comma-separated string into a Vec of trimmed strings.
fn parse_comma_separated(s: &str) -> Vec<String> {
    s.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse a viewable-kinds list: "all", "*", or comma-separated kind names.
fn parse_entry_kind_filter(value: &str) -> Result<EntryKindFilter> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("all") || value == "*" {
        return Ok(EntryKindFilter::All);
    }
    let kinds = parse_comma_separated(value)
        .iter()
        .map(|name| name.parse())
        .collect::<std::result::Result<_, UnknownEntryKind>>()?;
    Ok(EntryKindFilter::Only(kinds))
}

// =============================================================================
// Config File Resolution
// =============================================================================

/// Information about how the config file was resolved.
#[derive(Debug)]
struct ResolvedConfigFile {
    /// The path to the config file, if one was found.
    path: Option<PathBuf>,
    /// Warning message if env var pointed to nonexistent file.
    warning: Option<String>,
}

/// Resolve which config file to use based on the ConfigSource and environment.
fn resolve_config_file(source: &ConfigSource) -> Result<ResolvedConfigFile> {
    if let Some(ref path) = source.config_file {
        if path.exists() {
            return Ok(ResolvedConfigFile {
                path: Some(path.clone()),
                warning: None,
            });
        } else {
            return Err(ConfigError::FileNotFound(path.clone()));
        }
    }

    if let Ok(env_path) = env::var(ENV_CONFIG_FILE) {
        let path = PathBuf::from(&env_path);
        if path.exists() {
            return Ok(ResolvedConfigFile {
                path: Some(path),
                warning: None,
            });
        } else {
            // Warn but continue with defaults
            return Ok(ResolvedConfigFile {
                path: None,
                warning: Some(format!(
                    "config file specified by {} does not exist: {}",
                    ENV_CONFIG_FILE, env_path
                )),
            });
        }
    }

    Ok(ResolvedConfigFile {
        path: None,
        warning: None,
    })
}

// =============================================================================
// INI Parsing
// =============================================================================

/// Apply an INI file's contents to a Config, layering on top of existing values.
///
/// Keys are routed through the same setters as `key=value` overrides, so a
/// file and an override accept exactly the same keys and values.
fn apply_ini_to_config(config: &mut Config, ini: &Ini) -> Result<()> {
    for section in ["tree", "icons", "cache"] {
        for param in ini_keys(ini, section) {
            if let Some(value) = ini.get(section, &param) {
                apply_section_value(config, section, &param, &value)?;
            }
        }
    }
    Ok(())
}

fn ini_keys(ini: &Ini, section: &str) -> Vec<String> {
    let map = ini.get_map_ref();
    let mut keys: Vec<String> = map
        .get(section)
        .map(|entries| entries.keys().cloned().collect())
        .unwrap_or_default();
    keys.sort();
    keys
}

/// Load and parse an INI file.
fn load_ini(path: &Path) -> Result<Ini> {
    let mut ini = Ini::new();
    ini.load(path).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e,
    })?;
    Ok(ini)
}

// =============================================================================
// Override Application
// =============================================================================

/// Apply a single key=value override to the config.
fn apply_override(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key.split_once('.') {
        Some((section, param)) => apply_section_value(config, section, param, value),
        None => Err(ConfigError::InvalidOverrideKey {
            key: key.to_string(),
            message: "unrecognized key format".to_string(),
        }),
    }
}

fn apply_section_value(config: &mut Config, section: &str, param: &str, value: &str) -> Result<()> {
    match section {
        "tree" => apply_tree_value(config, param, value),
        "icons" => apply_icons_value(config, param, value),
        "cache" => apply_cache_value(config, param, value),
        _ => Err(ConfigError::InvalidOverrideKey {
            key: format!("{}.{}", section, param),
            message: "unknown section".to_string(),
        }),
    }
}

fn unknown_parameter(section: &str, param: &str) -> ConfigError {
    ConfigError::InvalidOverrideKey {
        key: format!("{}.{}", section, param),
        message: "unknown parameter".to_string(),
    }
}

fn apply_tree_value(config: &mut Config, param: &str, value: &str) -> Result<()> {
    let tree = &mut config.tree;
    match param {
        "viewable_entry_kinds" => tree.viewable_entry_kinds = parse_entry_kind_filter(value)?,
        "selectable_entry_kinds" => {
            tree.selectable_entry_kinds = parse_entry_kind_filter(value)?
        }
        "columns" => tree.column_ids = parse_comma_separated(value),
        "page_size" => tree.page_size = parse_page_size("tree.page_size", value)?,
        "group_containers_first" => {
            tree.group_containers_first = parse_bool_value("tree.group_containers_first", value)?
        }
        _ => return Err(unknown_parameter("tree", param)),
    }
    Ok(())
}

fn apply_icons_value(config: &mut Config, param: &str, value: &str) -> Result<()> {
    match param {
        "base_url" => {
            config.icons.base_url = value.trim().to_string();
            Ok(())
        }
        _ => Err(unknown_parameter("icons", param)),
    }
}

fn apply_cache_value(config: &mut Config, param: &str, value: &str) -> Result<()> {
    match param {
        "max_nodes" => {
            config.cache.max_nodes = parse_optional_limit("cache.max_nodes", value)?;
            Ok(())
        }
        _ => Err(unknown_parameter("cache", param)),
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

/// Result of reading configuration, including any warnings.
#[derive(Debug)]
pub struct ConfigResult {
    /// The parsed configuration.
    pub config: Config,
    /// Any warnings generated during config loading.
    pub warnings: Vec<String>,
}

/// Read and parse configuration from the specified sources.
///
/// Configuration is layered in this order:
/// 1. Built-in defaults
/// 2. Base config file (explicit path, or REPO_TREE_CONFIG_FILE)
/// 3. Override config file (if specified)
/// 4. Individual overrides (applied last)
pub fn read_config(source: &ConfigSource) -> Result<ConfigResult> {
    let mut warnings = Vec::new();

    let mut config = Config::default();

    let resolved = resolve_config_file(source)?;
    if let Some(warning) = resolved.warning {
        warnings.push(warning);
    }
    if let Some(ref path) = resolved.path {
        let ini = load_ini(path)?;
        apply_ini_to_config(&mut config, &ini)?;
    }

    if let Some(ref override_path) = source.override_file {
        if !override_path.exists() {
            return Err(ConfigError::FileNotFound(override_path.clone()));
        }
        let ini = load_ini(override_path)?;
        apply_ini_to_config(&mut config, &ini)?;
    }

    for (key, value) in &source.overrides {
        apply_override(&mut config, key, value)?;
    }

    Ok(ConfigResult { config, warnings })
}

// =============================================================================
// Tests
// =============================================================================
