//! Issue / commit / pull request submission workflow
//!
//! There is no stored state enum. The valid next steps are recomputed from
//! the [`Sentinel`] files in the repository working directory every time
//! they are needed, so the filesystem is the single source of truth.

mod draft;
mod runner;
mod sentinel;

pub use draft::{Draft, IssueStyle};
pub use runner::{Outcome, WorkflowRunner};
pub use sentinel::{REFERENCE_FILES, Sentinel, SentinelPresence, file_report, viewable_files};

use std::fmt;

/// A step the operator can take on a pending change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Write an issue draft
    DraftIssue(IssueStyle),
    /// Write a commit message draft (repositories without issues)
    DraftCommit,
    /// Open the drafted issue upstream and prepare the closing commit
    SubmitIssue,
    /// Commit, push the fix branch and open the pull request
    SubmitCommit,
}

impl Transition {
    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            Self::DraftIssue(IssueStyle::Full) => "make a full issue",
            Self::DraftIssue(IssueStyle::Short) => "make a short issue",
            Self::DraftCommit => "make a commit",
            Self::SubmitIssue => "submit issue",
            Self::SubmitCommit => "submit commit",
        }
    }

    /// Whether the step talks to the code host.
    pub fn needs_hosting(self) -> bool {
        matches!(self, Self::SubmitIssue | Self::SubmitCommit)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Transitions unlocked by the sentinels in `presence`.
///
/// | present | unlocks |
/// |---|---|
/// | issues-disabled flag | draft commit (instead of drafting issues) |
/// | no issues-disabled flag | draft full issue, draft short issue |
/// | issue draft | submit issue |
/// | commit draft | submit commit |
pub fn derive_transitions(presence: &SentinelPresence) -> Vec<Transition> {
    let mut transitions = Vec::new();
    if presence.issues_disabled {
        transitions.push(Transition::DraftCommit);
    } else {
        transitions.push(Transition::DraftIssue(IssueStyle::Full));
        transitions.push(Transition::DraftIssue(IssueStyle::Short));
    }
    if presence.issue_draft {
        transitions.push(Transition::SubmitIssue);
    }
    if presence.commit_draft {
        transitions.push(Transition::SubmitCommit);
    }
    transitions
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn presence(issue: bool, commit: bool, disabled: bool) -> SentinelPresence {
        SentinelPresence {
            issue_draft: issue,
            commit_draft: commit,
            pull_request_record: false,
            issues_disabled: disabled,
        }
    }

    #[test]
    fn fresh_repository_offers_issue_drafts() {
        assert_eq!(
            derive_transitions(&SentinelPresence::default()),
            vec![
                Transition::DraftIssue(IssueStyle::Full),
                Transition::DraftIssue(IssueStyle::Short),
            ]
        );
    }

    #[test]
    fn issues_disabled_offers_only_commit_draft() {
        let transitions = derive_transitions(&presence(false, false, true));
        assert_eq!(transitions, vec![Transition::DraftCommit]);
        assert!(
            !transitions
                .iter()
                .any(|t| matches!(t, Transition::DraftIssue(_)))
        );
    }

    #[rstest]
    #[case(presence(true, false, false), Transition::SubmitIssue, true)]
    #[case(presence(false, false, false), Transition::SubmitIssue, false)]
    #[case(presence(false, true, false), Transition::SubmitCommit, true)]
    #[case(presence(false, true, true), Transition::SubmitCommit, true)]
    #[case(presence(true, false, false), Transition::SubmitCommit, false)]
    fn submissions_follow_drafts(
        #[case] presence: SentinelPresence,
        #[case] transition: Transition,
        #[case] offered: bool,
    ) {
        assert_eq!(derive_transitions(&presence).contains(&transition), offered);
    }

    #[test]
    fn pull_request_record_does_not_lock_anything() {
        let mut with_pr = presence(true, true, false);
        with_pr.pull_request_record = true;
        assert_eq!(
            derive_transitions(&with_pr),
            derive_transitions(&presence(true, true, false))
        );
    }

    #[test]
    fn only_submissions_need_hosting() {
        assert!(Transition::SubmitIssue.needs_hosting());
        assert!(Transition::SubmitCommit.needs_hosting());
        assert!(!Transition::DraftCommit.needs_hosting());
        assert!(!Transition::DraftIssue(IssueStyle::Full).needs_hosting());
    }

    #[test]
    fn labels_are_unique() {
        let all = [
            Transition::DraftIssue(IssueStyle::Full),
            Transition::DraftIssue(IssueStyle::Short),
            Transition::DraftCommit,
            Transition::SubmitIssue,
            Transition::SubmitCommit,
        ];
        let mut labels: Vec<&str> = all.iter().map(|t| t.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), all.len());
    }
}
