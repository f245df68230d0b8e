use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::errors::AlloyError;

/// Immediate child directories of `parent`, sorted by name, filtered by `keep`.
///
/// Entries that cannot be read are logged and skipped. A missing `parent`
/// yields an empty list.
pub fn child_dirs<F>(parent: &Path, follow_links: bool, mut keep: F) -> Vec<PathBuf>
where
    F: FnMut(&str) -> bool,
{
    let walker = WalkDir::new(parent)
        .min_depth(1)
        .max_depth(1)
        .follow_links(follow_links)
        .sort_by_file_name();
    let mut dirs = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(path = %parent.display(), error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if keep(name) {
            dirs.push(entry.into_path());
        }
    }
    dirs
}

/// Group directories under the owner folder whose name starts with `prefix`.
pub fn group_dirs(owner: &Path, prefix: &str, follow_links: bool) -> Vec<PathBuf> {
    child_dirs(owner, follow_links, |name| name.starts_with(prefix))
}

/// Sample directories (all-digit names) inside a group directory.
pub fn sample_dirs(group: &Path, follow_links: bool) -> Vec<PathBuf> {
    child_dirs(group, follow_links, is_sample_dir_name)
}

/// True for a non-empty, all-ASCII-digit directory name.
pub fn is_sample_dir_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}

/// Final path component as UTF-8, or an empty string.
pub fn dir_name(path: &Path) -> &str {
    path.file_name().and_then(|name| name.to_str()).unwrap_or("")
}

/// Whether an expected note exists. An `Err` means the directory itself could
/// not be probed.
pub fn note_exists(path: &Path) -> Result<bool, AlloyError> {
    Ok(path.try_exists()?)
}

/// Read a note as UTF-8 text.
pub fn read_note(path: &Path) -> Result<String, AlloyError> {
    let bytes = fs::read(path).map_err(|err| AlloyError::NoteUnreadable {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|err| AlloyError::NoteUnreadable {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}
