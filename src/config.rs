use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::constants::corpus::{
    DATABASE_ROOT_ENV, DEFAULT_DATABASE_ROOT, DEFAULT_GROUP_PREFIX, DEFAULT_OWNER_DIR,
};
use crate::errors::AlloyError;

/// Location and naming conventions of a notes database.
///
/// The expected layout is
/// `<root>/<owner_dir>/<group_prefix>*/<NUMBER>/<NUMBER><Suffix>.md`.
#[derive(Clone, Debug)]
pub struct CorpusConfig {
    /// Database root directory.
    pub root: PathBuf,
    /// Directory under `root` that holds the sample groups.
    pub owner_dir: String,
    /// Prefix a directory name must start with to count as a sample group.
    pub group_prefix: String,
    /// Whether symlinked group or sample directories are followed.
    pub follow_links: bool,
}

impl CorpusConfig {
    /// Create a config for a database root using the default layout.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            owner_dir: DEFAULT_OWNER_DIR.to_string(),
            group_prefix: DEFAULT_GROUP_PREFIX.to_string(),
            follow_links: true,
        }
    }

    /// Override the owner directory name.
    pub fn with_owner_dir(mut self, owner_dir: impl Into<String>) -> Self {
        self.owner_dir = owner_dir.into();
        self
    }

    /// Override the group directory prefix.
    pub fn with_group_prefix(mut self, group_prefix: impl Into<String>) -> Self {
        self.group_prefix = group_prefix.into();
        self
    }

    /// Control whether symlinks are followed while walking groups and samples.
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// Directory holding the sample groups.
    pub fn owner_path(&self) -> PathBuf {
        self.root.join(&self.owner_dir)
    }

    /// Database root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reject layouts that cannot match any directory.
    pub fn validate(&self) -> Result<(), AlloyError> {
        if self.owner_dir.is_empty() || self.owner_dir.contains(['/', '\\']) {
            return Err(AlloyError::Configuration(format!(
                "owner_dir must be a single directory name, got '{}'",
                self.owner_dir
            )));
        }
        if self.group_prefix.contains(['/', '\\']) {
            return Err(AlloyError::Configuration(format!(
                "group_prefix must not contain path separators, got '{}'",
                self.group_prefix
            )));
        }
        Ok(())
    }
}

/// Database root from an explicit path, then `ALLOY_NOTES_ROOT`, then
/// `./material_database`.
pub fn resolve_database_root(explicit: Option<PathBuf>) -> PathBuf {
    resolve_root_with(explicit, env::var_os(DATABASE_ROOT_ENV))
}

fn resolve_root_with(explicit: Option<PathBuf>, from_env: Option<OsString>) -> PathBuf {
    explicit
        .or_else(|| from_env.filter(|value| !value.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_ROOT))
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_ROOT)
    }
}
