//! Executes workflow transitions against the collaborators

use std::path::PathBuf;

use typofix_git::VersionControl;
use typofix_hosting::{HostingApi, NewPullRequest, PullRequest, RepoSlug};

use super::draft::{Draft, IssueStyle};
use super::sentinel::{Sentinel, SentinelPresence};
use super::{Transition, derive_transitions};
use crate::{Error, Result};
use crate::model::PendingChange;

/// Remote the fix branch is pushed to.
const PUSH_REMOTE: &str = "origin";

/// Result of one executed transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A draft sentinel was (re)written
    Drafted { path: PathBuf },
    /// Issue opened upstream; the closing commit message was drafted
    IssueCreated {
        repo: RepoSlug,
        number: u64,
        commit_draft: PathBuf,
    },
    /// Fix committed, pushed and proposed
    PullRequestCreated {
        repo: RepoSlug,
        pull: PullRequest,
        branch: String,
        commit: String,
    },
}

/// Runs transitions for pending changes.
///
/// Collaborator failures are returned unchanged and nothing is retried; a
/// failed step can simply be chosen again once the cause is fixed.
pub struct WorkflowRunner<'a> {
    vcs: &'a dyn VersionControl,
    hosting: Option<&'a dyn HostingApi>,
}

impl<'a> WorkflowRunner<'a> {
    pub fn new(vcs: &'a dyn VersionControl, hosting: &'a dyn HostingApi) -> Self {
        Self {
            vcs,
            hosting: Some(hosting),
        }
    }

    /// Runner without a code host. Drafting works; submitting fails with
    /// [`Error::HostingUnavailable`].
    pub fn offline(vcs: &'a dyn VersionControl) -> Self {
        Self { vcs, hosting: None }
    }

    fn hosting(&self, transition: Transition) -> Result<&'a dyn HostingApi> {
        self.hosting.ok_or(Error::HostingUnavailable {
            step: transition.label(),
        })
    }

    /// Transitions currently valid for `change`, read from its directory.
    pub fn available(&self, change: &PendingChange) -> Vec<Transition> {
        derive_transitions(&SentinelPresence::probe(&change.local_path))
    }

    pub fn execute(&self, change: &PendingChange, transition: Transition) -> Result<Outcome> {
        tracing::debug!(repo = %change.repository_name, %transition, "executing transition");
        match transition {
            Transition::DraftIssue(style) => self.draft_issue(change, style),
            Transition::DraftCommit => self.draft_commit(change),
            Transition::SubmitIssue => self.submit_issue(change),
            Transition::SubmitCommit => self.submit_commit(change),
        }
    }

    fn draft_issue(&self, change: &PendingChange, style: IssueStyle) -> Result<Outcome> {
        let path = Sentinel::IssueDraft.path_in(&change.local_path);
        Draft::issue(change, style).save(&path)?;
        Ok(Outcome::Drafted { path })
    }

    fn draft_commit(&self, change: &PendingChange) -> Result<Outcome> {
        let path = Sentinel::CommitDraft.path_in(&change.local_path);
        Draft::commit(change).save(&path)?;
        Ok(Outcome::Drafted { path })
    }

    fn submit_issue(&self, change: &PendingChange) -> Result<Outcome> {
        let hosting = self.hosting(Transition::SubmitIssue)?;
        let issue = Draft::load(&Sentinel::IssueDraft.path_in(&change.local_path))?;

        let repo = hosting.upstream_root(&change.repository_name)?;
        let number = hosting.create_issue(&repo, &issue.title, &issue.body)?;
        tracing::info!(%repo, number, "issue submitted");

        let commit_draft = Sentinel::CommitDraft.path_in(&change.local_path);
        Draft::closing_commit(change, number).save(&commit_draft)?;

        Ok(Outcome::IssueCreated {
            repo,
            number,
            commit_draft,
        })
    }

    fn submit_commit(&self, change: &PendingChange) -> Result<Outcome> {
        let hosting = self.hosting(Transition::SubmitCommit)?;
        let repo_dir = &change.local_path;
        let message = Draft::load(&Sentinel::CommitDraft.path_in(repo_dir))?;

        let base = self.vcs.current_branch(repo_dir)?;
        let branch = change.fix_branch();
        let commit = self
            .vcs
            .commit_with_message_file(repo_dir, Sentinel::CommitDraft.file_name().as_ref())?;
        self.vcs.push(repo_dir, PUSH_REMOTE, &base, &branch)?;
        tracing::info!(%commit, %base, %branch, "pushed fix branch");

        let repo = hosting.upstream_root(&change.repository_name)?;
        let login = hosting.login()?;
        let pull = hosting.create_pull_request(
            &repo,
            &NewPullRequest {
                title: message.title,
                body: message.body,
                base,
                head: format!("{login}:{branch}"),
            },
        )?;

        let record = Sentinel::PullRequestRecord.path_in(repo_dir);
        typofix_fs::io::write_text(&record, &format!("#{} {}\n", pull.number, pull.url))?;

        Ok(Outcome::PullRequestCreated {
            repo,
            pull,
            branch,
            commit,
        })
    }
}
