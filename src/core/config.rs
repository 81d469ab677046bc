//! Replacer configuration — file loading, discovery and resolution.
//!
//! A config file is JSON (`relabel.json`) or TOML (`relabel.toml`). Command
//! line values override it; anything still unset falls back to defaults.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::defaults::{CONFIG_FILE_NAMES, DEFAULT_EXTENSION};
use crate::error::{Error, FileOperation, Result};
use crate::local_files::WriteMode;
use crate::replace::{FileSelector, ReplacementPair, ReplacementTable, WriteOptions};

/// Contents of a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReplacerConfig {
    /// Directory to scan. Relative paths resolve against the config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    /// Globs matched against root-relative paths.
    pub exclude: Vec<String>,
    pub write_mode: WriteMode,
    pub backup: bool,
    /// Ordered table; the built-in table applies when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacements: Option<Vec<ReplacementPair>>,
}

/// A config together with the file it came from, if any.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: ReplacerConfig,
    pub source: Option<PathBuf>,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub root: Option<String>,
    pub extension: Option<String>,
    /// Added to the config's exclude list.
    pub exclude: Vec<String>,
    pub atomic: bool,
    pub backup: bool,
    pub dry_run: bool,
}

/// Everything a run needs.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub selector: FileSelector,
    pub table: ReplacementTable,
    pub options: WriteOptions,
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a config file's text. TOML when the path ends in `.toml`, JSON otherwise.
pub fn parse<T: DeserializeOwned>(content: &str, path: &Path) -> Result<T> {
    let display = path.display().to_string();
    let is_toml = path.extension().is_some_and(|ext| ext == "toml");

    if is_toml {
        toml::from_str(content).map_err(|e| Error::config_invalid_toml(display, e))
    } else {
        serde_json::from_str(content).map_err(|e| Error::config_invalid_json(display, e))
    }
}

/// Load a config file from an explicit path.
pub fn load(path: &Path) -> Result<ReplacerConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::file_access(path, FileOperation::Read, e))?;
    parse(&content, path)
}

/// Find the config to use.
///
/// An explicit path must exist. Otherwise the first of `relabel.json` /
/// `relabel.toml` found in `dir` is used, and no file at all means defaults.
pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let config = load(path)?;
        log_status!("config", "Loaded {}", path.display());
        return Ok(LoadedConfig {
            config,
            source: Some(path.to_path_buf()),
        });
    }

    for name in CONFIG_FILE_NAMES {
        let candidate = dir.join(name);
        if candidate.is_file() {
            let config = load(&candidate)?;
            log_status!("config", "Loaded {}", candidate.display());
            return Ok(LoadedConfig {
                config,
                source: Some(candidate),
            });
        }
    }

    Ok(LoadedConfig::default())
}

// ============================================================================
// Resolution
// ============================================================================

/// Merge config and overrides into run settings.
pub fn resolve(loaded: &LoadedConfig, overrides: &Overrides) -> Result<RunSettings> {
    let config = &loaded.config;

    let root = match (&overrides.root, &config.root) {
        (Some(root), _) => expand_path(root, None),
        (None, Some(root)) => expand_path(root, loaded.source.as_deref().and_then(Path::parent)),
        (None, None) => {
            return Err(Error::config_missing_key(
                "root",
                loaded.source.as_ref().map(|p| p.display().to_string()),
            )
            .with_hint("Pass --root <DIR> or set \"root\" in relabel.json"))
        }
    };

    let extension = overrides
        .extension
        .as_deref()
        .or(config.extension.as_deref())
        .unwrap_or(DEFAULT_EXTENSION);

    let mut exclude = config.exclude.clone();
    exclude.extend(overrides.exclude.iter().cloned());

    let selector = FileSelector::new(root, extension, exclude)?;
    let table = table_for(config)?;

    let mode = if overrides.atomic {
        WriteMode::Atomic
    } else {
        config.write_mode
    };

    Ok(RunSettings {
        selector,
        table,
        options: WriteOptions {
            mode,
            backup: overrides.backup || config.backup,
            dry_run: overrides.dry_run,
        },
    })
}

/// The table a config selects: its own `replacements`, or the built-in one.
pub fn table_for(config: &ReplacerConfig) -> Result<ReplacementTable> {
    match &config.replacements {
        Some(pairs) => ReplacementTable::new(pairs.clone()),
        None => Ok(ReplacementTable::builtin()),
    }
}

/// Tilde-expand, then anchor relative paths at `base` when one is given.
fn expand_path(raw: &str, base: Option<&Path>) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(raw).as_ref());
    match base {
        Some(base) if expanded.is_relative() => base.join(expanded),
        _ => expanded,
    }
}
