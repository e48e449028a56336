//! Version-control collaborator for typofix
//!
//! The workflow only needs a handful of git operations: the staged diff,
//! committing the index with a message file, pushing a branch under another
//! name, the current branch, and cloning a fork. [`VersionControl`] is the
//! seam; [`GitVcs`] implements it with `git2`.

pub mod error;
pub mod helpers;
pub mod vcs;

pub use error::{Error, Result};
pub use vcs::{GitVcs, VersionControl};
