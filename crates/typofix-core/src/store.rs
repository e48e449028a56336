//! Durable repository store
//!
//! Two collections, each a JSON object keyed by repository name, live in the
//! data directory. Every `set` rewrites a whole collection atomically;
//! read-modify-write sequences are not isolated from other writers, which is
//! acceptable for a single interactive operator.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use typofix_fs::ConfigStore;

use crate::Result;
use crate::model::{PendingChange, RepositoryRecord};

/// The logical collections kept by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// Repository name → local path
    KnownRepositories,
    /// Repository name → [`PendingChange`]
    PendingChanges,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Self::KnownRepositories, Self::PendingChanges];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::KnownRepositories => "repository_map.json",
            Self::PendingChanges => "repository_saves.json",
        }
    }
}

/// JSON-file backed store for repositories and pending changes.
#[derive(Debug, Clone)]
pub struct RepositoryStore {
    root: PathBuf,
    documents: ConfigStore,
}

impl RepositoryStore {
    /// Open a store rooted at `root`. Nothing is created until the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            documents: ConfigStore::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document backing `collection`.
    pub fn path(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.file_name())
    }

    /// Read a whole collection. A collection never written is empty.
    pub fn get<T: DeserializeOwned>(&self, collection: Collection) -> Result<BTreeMap<String, T>> {
        Ok(self
            .documents
            .load_if_exists(&self.path(collection))?
            .unwrap_or_default())
    }

    /// Overwrite a whole collection.
    pub fn set<T: Serialize>(&self, collection: Collection, map: &BTreeMap<String, T>) -> Result<()> {
        tracing::debug!(collection = ?collection, entries = map.len(), "writing collection");
        self.documents.save(&self.path(collection), map)?;
        Ok(())
    }

    /// Known repositories, ordered by name.
    pub fn repositories(&self) -> Result<Vec<RepositoryRecord>> {
        let map: BTreeMap<String, PathBuf> = self.get(Collection::KnownRepositories)?;
        Ok(map
            .into_iter()
            .map(|(name, path)| RepositoryRecord::new(name, path))
            .collect())
    }

    pub fn repository(&self, name: &str) -> Result<Option<RepositoryRecord>> {
        let mut map: BTreeMap<String, PathBuf> = self.get(Collection::KnownRepositories)?;
        Ok(map
            .remove(name)
            .map(|path| RepositoryRecord::new(name, path)))
    }

    /// Add or replace a known repository.
    pub fn register(&self, record: &RepositoryRecord) -> Result<()> {
        let mut map: BTreeMap<String, PathBuf> = self.get(Collection::KnownRepositories)?;
        map.insert(record.name.clone(), record.local_path.clone());
        self.set(Collection::KnownRepositories, &map)?;
        tracing::info!(name = %record.name, path = %record.local_path.display(), "registered repository");
        Ok(())
    }

    /// Saved changes, ordered by repository name.
    pub fn pending_changes(&self) -> Result<Vec<PendingChange>> {
        let map: BTreeMap<String, PendingChange> = self.get(Collection::PendingChanges)?;
        Ok(map
            .into_iter()
            .map(|(name, mut change)| {
                change.repository_name = name;
                change
            })
            .collect())
    }

    pub fn pending_change(&self, name: &str) -> Result<Option<PendingChange>> {
        let mut map: BTreeMap<String, PendingChange> = self.get(Collection::PendingChanges)?;
        Ok(map.remove(name).map(|mut change| {
            change.repository_name = name.to_string();
            change
        }))
    }

    /// Save a change, replacing any earlier one for the same repository.
    pub fn save_pending(&self, change: &PendingChange) -> Result<()> {
        let mut map: BTreeMap<String, PendingChange> = self.get(Collection::PendingChanges)?;
        map.insert(change.repository_name.clone(), change.clone());
        self.set(Collection::PendingChanges, &map)?;
        tracing::info!(name = %change.repository_name, "saved pending change");
        Ok(())
    }

    /// Delete `name` from every collection.
    ///
    /// Returns whether any entry existed. Unknown names are a no-op and the
    /// collections are left untouched.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let mut removed = false;
        for collection in Collection::ALL {
            let mut map: BTreeMap<String, serde_json::Value> = self.get(collection)?;
            if map.remove(name).is_some() {
                self.set(collection, &map)?;
                removed = true;
            }
        }
        if removed {
            tracing::info!(name, "removed repository from store");
        }
        Ok(removed)
    }
}
