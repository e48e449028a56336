//! Submission workflow talking to a mock GitHub API.
//!
//! The workflow is blocking, so it runs inside `spawn_blocking` while the
//! mock server lives on the async runtime.

use std::fs;

use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use typofix_core::{Outcome, PendingChange, RepositoryRecord, Sentinel, Transition, WorkflowRunner, extract_typo};
use typofix_git::GitVcs;
use typofix_hosting::{GitHubClient, RepoSlug};
use typofix_test_utils::git::{bare_origin, has_branch, repo_with_files, stage_change};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_github() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "login": "me" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/me/widget"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "full_name": "me/widget",
            "parent": { "full_name": "octo/widget" },
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/octo/widget"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "full_name": "octo/widget" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/octo/widget/issues"))
        .and(body_partial_json(json!({ "title": "Fix simple typo: Teh -> The" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "number": 12 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/octo/widget/pulls"))
        .and(body_partial_json(json!({
            "title": "Fix simple typo: Teh -> The",
            "body": "Closes #12\n",
            "head": "me:bugfix/typo_The",
            "base": "main",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "number": 13,
            "html_url": "https://github.com/octo/widget/pull/13",
        })))
        .expect(1)
        .mount(&server)
        .await;
    server
}

#[tokio::test(flavor = "multi_thread")]
async fn test_issue_and_pull_request_against_api() {
    let server = mock_github().await;
    let uri = server.uri();

    let (outcome, record, branch_pushed) = tokio::task::spawn_blocking(move || {
        let checkout = TempDir::new().unwrap();
        let remote = TempDir::new().unwrap();
        repo_with_files(checkout.path(), &[("foo.txt", "Teh cat\n")]);
        let bare = bare_origin(checkout.path(), remote.path());
        stage_change(checkout.path(), "foo.txt", "The cat\n");

        let vcs = GitVcs::new();
        let github = GitHubClient::new(uri, "test-token").unwrap();
        let record = RepositoryRecord::new("widget", checkout.path());
        let change = PendingChange::new(&record, extract_typo(&vcs, checkout.path()).unwrap());
        let runner = WorkflowRunner::new(&vcs, &github);

        runner.execute(&change, Transition::DraftIssue(typofix_core::IssueStyle::Short)).unwrap();
        runner.execute(&change, Transition::SubmitIssue).unwrap();
        let outcome = runner.execute(&change, Transition::SubmitCommit).unwrap();

        let record_text =
            fs::read_to_string(Sentinel::PullRequestRecord.path_in(checkout.path())).unwrap();
        (outcome, record_text, has_branch(&bare, "bugfix/typo_The"))
    })
    .await
    .unwrap();

    match outcome {
        Outcome::PullRequestCreated { repo, pull, branch, .. } => {
            assert_eq!(repo, RepoSlug::new("octo", "widget"));
            assert_eq!(pull.number, 13);
            assert_eq!(branch, "bugfix/typo_The");
        }
        other => panic!("expected a pull request, got {other:?}"),
    }
    assert_eq!(record, "#13 https://github.com/octo/widget/pull/13\n");
    assert!(branch_pushed);
}
