//! Records kept in the repository store

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::extract::StagedTypo;

/// A repository the operator can work on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRecord {
    /// Unique key, normally the directory name
    pub name: String,
    /// Working directory of the local checkout
    pub local_path: PathBuf,
}

impl RepositoryRecord {
    pub fn new(name: impl Into<String>, local_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            local_path: local_path.into(),
        }
    }
}

/// A saved one-word correction awaiting submission.
///
/// Serialized with the field names `add_word`, `del_word`, `file_paths` and
/// `repodir`; the repository name is the collection key, not a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingChange {
    #[serde(skip)]
    pub repository_name: String,

    pub add_word: String,

    #[serde(rename = "del_word")]
    pub delete_word: String,

    pub file_paths: Vec<String>,

    #[serde(rename = "repodir")]
    pub local_path: PathBuf,
}

impl PendingChange {
    /// Bind an extracted typo to the repository it was found in.
    pub fn new(repository: &RepositoryRecord, typo: StagedTypo) -> Self {
        Self {
            repository_name: repository.name.clone(),
            add_word: typo.add_word,
            delete_word: typo.delete_word,
            file_paths: typo.file_paths,
            local_path: repository.local_path.clone(),
        }
    }

    /// Touched files, comma separated.
    pub fn files(&self) -> String {
        self.file_paths.join(", ")
    }

    /// Title shared by the issue, the commit and the pull request.
    pub fn title(&self) -> String {
        format!("Fix simple typo: {} -> {}", self.delete_word, self.add_word)
    }

    /// Remote branch the fix is pushed to.
    pub fn fix_branch(&self) -> String {
        format!("bugfix/typo_{}", self.add_word)
    }
}
