//! Git repository fixtures driven through the `git` CLI.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run `git <args>` in `path`, panicking with stderr on failure.
pub fn git(path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "`git {args:?}` failed in {}:\n{}",
            path.display(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Initialise a repository on branch `main` with one commit containing
/// `files` (`(relative path, content)` pairs).
///
/// Configures `user.email`, `user.name` and `commit.gpgsign = false` so
/// commits made by the code under test succeed.
pub fn repo_with_files(path: &Path, files: &[(&str, &str)]) {
    git(path, &["init"]);
    git(path, &["config", "user.email", "test@test.com"]);
    git(path, &["config", "user.name", "Test User"]);
    git(path, &["config", "commit.gpgsign", "false"]);
    // Pin the branch name regardless of init.defaultBranch
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    for (name, content) in files {
        write_file(path, name, content);
    }
    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);
}

/// Overwrite `name` with `content` and stage it.
pub fn stage_change(path: &Path, name: &str, content: &str) {
    write_file(path, name, content);
    git(path, &["add", name]);
}

/// Create a bare repository in `dir` and register it as `origin` of `repo`.
///
/// Returns the bare repository path.
pub fn bare_origin(repo: &Path, dir: &Path) -> PathBuf {
    let bare = dir.join("origin.git");
    fs::create_dir_all(&bare).unwrap();
    git(&bare, &["init", "--bare"]);
    let url = bare.to_string_lossy().into_owned();
    git(repo, &["remote", "add", "origin", &url]);
    bare
}

/// Whether `branch` exists in the (bare) repository at `path`.
pub fn has_branch(path: &Path, branch: &str) -> bool {
    git2::Repository::open(path)
        .and_then(|repo| repo.find_reference(&format!("refs/heads/{branch}")).map(|_| ()))
        .is_ok()
}

/// Full message of the HEAD commit.
pub fn head_message(path: &Path) -> String {
    git(path, &["log", "-1", "--format=%B"])
}

fn write_file(root: &Path, name: &str, content: &str) {
    let full = root.join(name);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&full, content)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", full.display()));
}
