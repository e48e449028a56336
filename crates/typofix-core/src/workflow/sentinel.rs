//! Marker files that record workflow progress

use std::path::{Path, PathBuf};

/// Files the workflow writes into a repository working directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentinel {
    /// Drafted issue awaiting submission
    IssueDraft,
    /// Commit message ready for committing
    CommitDraft,
    /// Pull request created for the fix
    PullRequestRecord,
    /// The fork does not accept issues
    IssuesDisabled,
}

impl Sentinel {
    pub const ALL: [Sentinel; 4] = [
        Self::PullRequestRecord,
        Self::IssueDraft,
        Self::CommitDraft,
        Self::IssuesDisabled,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::IssueDraft => "__issue__.txt",
            Self::CommitDraft => "__commit__.txt",
            Self::PullRequestRecord => "__pr__.txt",
            Self::IssuesDisabled => "__no_issues__.txt",
        }
    }

    pub fn path_in(self, repo_dir: &Path) -> PathBuf {
        repo_dir.join(self.file_name())
    }

    pub fn is_present(self, repo_dir: &Path) -> bool {
        self.path_in(repo_dir).exists()
    }
}

impl std::fmt::Display for Sentinel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Contribution documents worth reading before submitting.
pub const REFERENCE_FILES: [&str; 3] = [
    ".github/ISSUE_TEMPLATE",
    ".github/pull_request_template.md",
    "CONTRIBUTING.md",
];

/// Which sentinels exist, sampled at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentinelPresence {
    pub issue_draft: bool,
    pub commit_draft: bool,
    pub pull_request_record: bool,
    pub issues_disabled: bool,
}

impl SentinelPresence {
    /// Probe `repo_dir` for every sentinel.
    pub fn probe(repo_dir: &Path) -> Self {
        Self {
            issue_draft: Sentinel::IssueDraft.is_present(repo_dir),
            commit_draft: Sentinel::CommitDraft.is_present(repo_dir),
            pull_request_record: Sentinel::PullRequestRecord.is_present(repo_dir),
            issues_disabled: Sentinel::IssuesDisabled.is_present(repo_dir),
        }
    }

    pub fn contains(&self, sentinel: Sentinel) -> bool {
        match sentinel {
            Sentinel::IssueDraft => self.issue_draft,
            Sentinel::CommitDraft => self.commit_draft,
            Sentinel::PullRequestRecord => self.pull_request_record,
            Sentinel::IssuesDisabled => self.issues_disabled,
        }
    }
}

/// Reference documents and sentinels present in `repo_dir`, as paths
/// relative to it. Reference documents come first.
pub fn viewable_files(repo_dir: &Path) -> Vec<PathBuf> {
    let references = REFERENCE_FILES.iter().map(PathBuf::from);
    let sentinels = Sentinel::ALL.iter().map(|s| PathBuf::from(s.file_name()));
    references
        .chain(sentinels)
        .filter(|relative| repo_dir.join(relative).exists())
        .collect()
}

/// Every file [`viewable_files`] considers, with whether it exists.
pub fn file_report(repo_dir: &Path) -> Vec<(PathBuf, bool)> {
    REFERENCE_FILES
        .iter()
        .map(PathBuf::from)
        .chain(Sentinel::ALL.iter().map(|s| PathBuf::from(s.file_name())))
        .map(|relative| {
            let present = repo_dir.join(&relative).exists();
            (relative, present)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn probe_empty_directory() {
        let temp = TempDir::new().unwrap();
        assert_eq!(SentinelPresence::probe(temp.path()), SentinelPresence::default());
    }

    #[test]
    fn probe_detects_files_by_name_only() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("__no_issues__.txt"), "").unwrap();
        fs::write(temp.path().join("__commit__.txt"), "anything").unwrap();

        let presence = SentinelPresence::probe(temp.path());

        assert!(presence.issues_disabled);
        assert!(presence.commit_draft);
        assert!(!presence.issue_draft);
        assert!(!presence.pull_request_record);
        assert!(presence.contains(Sentinel::CommitDraft));
    }

    #[test]
    fn viewable_files_lists_existing_only() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".github/ISSUE_TEMPLATE")).unwrap();
        fs::write(temp.path().join("CONTRIBUTING.md"), "be nice").unwrap();
        fs::write(temp.path().join("__issue__.txt"), "t\n\nb").unwrap();

        let files = viewable_files(temp.path());

        assert_eq!(
            files,
            vec![
                PathBuf::from(".github/ISSUE_TEMPLATE"),
                PathBuf::from("CONTRIBUTING.md"),
                PathBuf::from("__issue__.txt"),
            ]
        );
    }

    #[test]
    fn file_report_covers_every_candidate() {
        let temp = TempDir::new().unwrap();
        let report = file_report(temp.path());
        assert_eq!(report.len(), REFERENCE_FILES.len() + Sentinel::ALL.len());
        assert!(report.iter().all(|(_, present)| !present));
    }
}
