//! Whole flow against local repositories and an in-memory code host:
//! acquire → stage a fix → save the change → issue → commit → pull request.

use std::fs;
use std::io::Write;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use typofix_core::{
    Acquisition, IssueStyle, Outcome, PendingChange, RepositoryStore, Sentinel, SpellChecker,
    Transition, WorkflowRunner, extract_typo, remove_repository,
};
use typofix_git::GitVcs;
use typofix_hosting::RepoSlug;
use typofix_test_utils::git::{git, has_branch, head_message, repo_with_files, stage_change};
use typofix_test_utils::hosting::FakeHosting;

/// Flags "teh" wherever it appears in README.md.
struct ReadmeChecker;

impl SpellChecker for ReadmeChecker {
    fn check(&self, dir: &Path, out: &mut dyn Write) -> typofix_core::Result<()> {
        let readme = fs::read_to_string(dir.join("README.md"))?;
        for (number, line) in readme.lines().enumerate() {
            if line.split_whitespace().any(|w| w.eq_ignore_ascii_case("teh")) {
                writeln!(out, "./README.md:{}: teh ==> the", number + 1)?;
            }
        }
        Ok(())
    }
}

#[test]
fn test_acquire_fix_and_submit() {
    let seed = TempDir::new().unwrap();
    repo_with_files(
        seed.path(),
        &[("README.md", "# Widget\n\nTeh widget does things.\n")],
    );
    // The fork on the code host is bare, so the fix branch can be pushed to it.
    let remote = TempDir::new().unwrap();
    git(
        remote.path(),
        &["clone", "--bare", &seed.path().to_string_lossy(), "widget.git"],
    );
    let fork = remote.path().join("widget.git");
    let target = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    let store = RepositoryStore::new(data.path());
    let vcs = GitVcs::new();
    let host = FakeHosting::new("me")
        .with_clone_url("widget", &fork.to_string_lossy())
        .with_root("widget", RepoSlug::new("octo", "widget"));

    // Acquire
    let record = Acquisition::new(&host, &vcs, &ReadmeChecker, &store, target.path())
        .acquire_next(&[RepoSlug::new("octo", "widget")])
        .unwrap()
        .expect("candidate should be acquired");
    let checkout = record.local_path.clone();
    assert_eq!(
        fs::read_to_string(checkout.join("spelling.txt")).unwrap(),
        "./README.md:3: teh ==> the\n"
    );
    git(&checkout, &["config", "user.email", "test@test.com"]);
    git(&checkout, &["config", "user.name", "Test User"]);
    git(&checkout, &["config", "commit.gpgsign", "false"]);

    // Stage the fix and save it
    stage_change(&checkout, "README.md", "# Widget\n\nThe widget does things.\n");
    let typo = extract_typo(&vcs, &checkout).unwrap();
    store
        .save_pending(&PendingChange::new(&record, typo))
        .unwrap();

    let change = store.pending_change("widget").unwrap().unwrap();
    assert_eq!(change.title(), "Fix simple typo: Teh -> The");
    assert_eq!(change.file_paths, vec!["README.md"]);

    // Submit
    let runner = WorkflowRunner::new(&vcs, &host);
    runner
        .execute(&change, Transition::DraftIssue(IssueStyle::Full))
        .unwrap();
    let issue = runner.execute(&change, Transition::SubmitIssue).unwrap();
    assert!(matches!(issue, Outcome::IssueCreated { number: 1, .. }));

    let pull = runner.execute(&change, Transition::SubmitCommit).unwrap();
    assert!(matches!(pull, Outcome::PullRequestCreated { .. }));

    assert!(has_branch(&fork, "bugfix/typo_The"));
    assert_eq!(
        head_message(&checkout).trim_end(),
        "Fix simple typo: Teh -> The\n\nCloses #1"
    );
    let issues = host.issues();
    assert_eq!(issues[0].repo, RepoSlug::new("octo", "widget"));
    assert!(issues[0].body.contains("1. Examine README.md."));
    let pulls = host.pull_requests();
    assert_eq!(pulls[0].1.head, "me:bugfix/typo_The");
    assert_eq!(
        fs::read_to_string(Sentinel::PullRequestRecord.path_in(&checkout)).unwrap(),
        "#2 https://example.test/octo/widget/pull/2\n"
    );

    // Every sentinel survives the flow
    for sentinel in [
        Sentinel::IssueDraft,
        Sentinel::CommitDraft,
        Sentinel::PullRequestRecord,
    ] {
        assert!(sentinel.is_present(&checkout), "{sentinel} missing");
    }

    // Clean up
    remove_repository(&store, "widget", true).unwrap();
    assert!(!checkout.exists());
    assert!(store.repositories().unwrap().is_empty());
    assert!(store.pending_changes().unwrap().is_empty());
}

#[test]
fn test_store_keeps_record_field_names() {
    let data = TempDir::new().unwrap();
    fs::write(
        data.path().join("repository_saves.json"),
        r#"{"widget": {"add_word": "The", "del_word": "Teh", "file_paths": ["a.md", "b.md"], "repodir": "/data/widget"}}"#,
    )
    .unwrap();
    let store = RepositoryStore::new(data.path());

    let change = store.pending_change("widget").unwrap().unwrap();

    assert_eq!(change.repository_name, "widget");
    assert_eq!(change.files(), "a.md, b.md");
    assert_eq!(change.fix_branch(), "bugfix/typo_The");

    store.save_pending(&change).unwrap();
    let raw: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(data.path().join("repository_saves.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(raw["widget"]["del_word"], "Teh");
    assert_eq!(raw["widget"]["repodir"], "/data/widget");
    assert!(raw["widget"].get("repository_name").is_none());
}
