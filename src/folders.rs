//! Monitored folders and classification of changed paths into them.

use std::collections::HashSet;
use std::path::{Component, Path};

use crate::error::ConfigError;
use crate::git::ChangeRecord;

/// Folders monitored by default when none are configured.
pub const DEFAULT_FOLDERS: [&str; 3] = ["src", "lib", "components"];

/// Validated, ordered set of top-level folders whose changes are committed.
///
/// Non-empty, free of duplicates, and each a single top-level path
/// component, so no folder contains another. Names are stored without
/// trailing `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitoredFolders {
    folders: Vec<String>,
}

impl MonitoredFolders {
    pub fn new<I, S>(folders: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut normalized = Vec::new();

        for raw in folders {
            let name = normalize_folder(raw.as_ref())?;
            if !seen.insert(name.clone()) {
                return Err(ConfigError::DuplicateFolder(name));
            }
            normalized.push(name);
        }

        if normalized.is_empty() {
            return Err(ConfigError::NoFolders);
        }

        Ok(Self {
            folders: normalized,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.folders.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}

impl Default for MonitoredFolders {
    fn default() -> Self {
        Self {
            folders: DEFAULT_FOLDERS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

fn normalize_folder(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = || ConfigError::InvalidFolder(raw.to_string());

    if trimmed.is_empty() {
        return Err(invalid());
    }

    let components: Vec<_> = Path::new(trimmed).components().collect();
    if !components.iter().all(|c| matches!(c, Component::Normal(_))) {
        return Err(invalid());
    }
    if components.len() > 1 {
        return Err(ConfigError::NestedFolder(trimmed.to_string()));
    }

    Ok(trimmed.to_string())
}

/// Whether `path` is `folder` itself or lies beneath it.
pub fn is_under(path: &str, folder: &str) -> bool {
    path.strip_prefix(folder)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Monitored folders containing at least one changed path.
///
/// Output follows the declaration order of `monitored`, each folder at most
/// once. Paths outside every monitored folder are ignored.
pub fn classify(records: &[ChangeRecord], monitored: &MonitoredFolders) -> Vec<String> {
    monitored
        .iter()
        .filter(|folder| records.iter().any(|r| is_under(&r.path, folder)))
        .map(str::to_string)
        .collect()
}

/// The subset of `records` that lie under `folder`.
pub fn records_under(records: Vec<ChangeRecord>, folder: &str) -> Vec<ChangeRecord> {
    records
        .into_iter()
        .filter(|r| is_under(&r.path, folder))
        .collect()
}
