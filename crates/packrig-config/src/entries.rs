//! Entry point discovery.
//!
//! Every file under `source_path/source_entry_path` whose name ends in one of
//! the configured extensions becomes an entry. The entry name is the file's
//! path relative to that directory with the extension dropped, so
//! `packs/admin/settings.js` is published as `admin/settings`. Hidden files
//! and directories below the entry root are skipped.

use std::path::{Component, Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use indexmap::IndexMap;
use path_clean::PathClean;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::context::BuildContext;
use crate::error::{ConfigError, Result};

/// Logical entry name to absolute file path, in discovery order.
pub type EntryMap = IndexMap<String, PathBuf>;

/// Glob matching any file ending in one of `extensions`.
///
/// # Example
///
/// ```
/// use packrig_config::entries::extensions_glob;
///
/// assert_eq!(extensions_glob(&[".js".into()]).unwrap(), "**/*.js");
/// assert_eq!(
///     extensions_glob(&[".js".into(), ".jsx".into()]).unwrap(),
///     "**/*{.js,.jsx}"
/// );
/// ```
pub fn extensions_glob(extensions: &[String]) -> Result<String> {
    match extensions {
        [] => Err(ConfigError::NoExtensions),
        [single] => Ok(format!("**/*{single}")),
        many => Ok(format!("**/*{{{}}}", many.join(","))),
    }
}

/// Discover entries for the context's settings.
pub fn discover_entries(ctx: &BuildContext) -> Result<EntryMap> {
    let settings = ctx.settings();
    discover_in(&ctx.resolve(settings.entry_root()), &settings.extensions)
}

/// Discover entries below an absolute `entry_root`.
///
/// A missing directory yields no entries.
pub fn discover_in(entry_root: &Path, extensions: &[String]) -> Result<EntryMap> {
    let pattern = extensions_glob(extensions)?;
    let matcher = compile(&pattern)?;

    let mut entries = EntryMap::new();
    if !entry_root.is_dir() {
        warn!(root = %entry_root.display(), "entry directory does not exist; no entries discovered");
        return Ok(entries);
    }

    let walker = WalkDir::new(entry_root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|item| item.depth() == 0 || !is_hidden(item));

    for item in walker {
        let item = item.map_err(|err| ConfigError::walk(entry_root, err))?;
        if !item.file_type().is_file() {
            continue;
        }

        let Ok(relative) = item.path().strip_prefix(entry_root) else {
            continue;
        };
        if !matcher.is_match(relative) {
            continue;
        }

        let name = entry_name(relative);
        let path = item.path().clean();
        debug!(entry = %name, path = %path.display(), "discovered entry");
        if let Some(previous) = entries.insert(name.clone(), path) {
            debug!(entry = %name, replaced = %previous.display(), "entry name collision");
        }
    }

    Ok(entries)
}

fn is_hidden(item: &DirEntry) -> bool {
    item.file_name().to_string_lossy().starts_with('.')
}

fn compile(pattern: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|err| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        })
}

/// `admin/settings.js` -> `admin/settings`, always `/`-separated.
fn entry_name(relative: &Path) -> String {
    let mut segments: Vec<String> = relative
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let file_name = relative
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    segments.push(strip_complete_extension(&file_name).to_string());
    segments.join("/")
}

/// Drop everything from the first dot that is not part of a leading run of
/// dots: `app.js.erb` -> `app`, `.eslintrc.js` -> `.eslintrc`.
pub(crate) fn strip_complete_extension(file_name: &str) -> &str {
    let leading = file_name.len() - file_name.trim_start_matches('.').len();
    match file_name[leading..].find('.') {
        Some(dot) => &file_name[..leading + dot],
        None => file_name,
    }
}
