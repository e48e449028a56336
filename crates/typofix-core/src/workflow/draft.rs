//! Issue and commit drafts
//!
//! A draft file is a title line, a blank line, then the body. The blank
//! second line is the only structural requirement and is checked on every
//! read; drafts are never repaired automatically.

use std::path::Path;

use crate::model::PendingChange;
use crate::{Error, Result};

/// Level of detail for a drafted issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueStyle {
    /// Issue-type / steps-to-replicate / expected-behaviour template
    Full,
    /// Two-sentence description
    Short,
}

/// Title and body of an issue or commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub body: String,
}

impl Draft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Issue describing `change`.
    pub fn issue(change: &PendingChange, style: IssueStyle) -> Self {
        let body = match style {
            IssueStyle::Full => format!(
                "# Issue Type\n\
                 \n\
                 [x] Bug (Typo)\n\
                 \n\
                 # Steps to Replicate\n\
                 \n\
                 1. Examine {files}.\n\
                 2. Search for `{delete}`.\n\
                 \n\
                 # Expected Behaviour\n\
                 \n\
                 1. Should read `{add}`.\n",
                files = change.files(),
                delete = change.delete_word,
                add = change.add_word,
            ),
            IssueStyle::Short => short_description(change),
        };
        Self::new(change.title(), body)
    }

    /// Commit message for a repository that does not take issues.
    pub fn commit(change: &PendingChange) -> Self {
        Self::new(change.title(), short_description(change))
    }

    /// Commit message closing the issue `number`.
    pub fn closing_commit(change: &PendingChange, number: u64) -> Self {
        Self::new(change.title(), format!("Closes #{number}\n"))
    }

    /// File form: title, blank line, body, ending in a newline.
    pub fn render(&self) -> String {
        let mut text = format!("{}\n\n{}", self.title, self.body);
        if !text.ends_with('\n') {
            text.push('\n');
        }
        text
    }

    /// Parse the file form. `path` is only used in the error.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let mut parts = text.splitn(3, '\n');
        let title = parts.next().unwrap_or_default().trim();
        let separator = parts.next().unwrap_or_default();
        if !separator.trim().is_empty() {
            return Err(Error::MalformedDraft {
                path: path.to_path_buf(),
            });
        }
        let body = parts.next().unwrap_or_default();
        Ok(Self::new(title, body))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = typofix_fs::io::read_text(path)?;
        Self::parse(&text, path)
    }

    /// Write the draft, replacing whatever was there.
    pub fn save(&self, path: &Path) -> Result<()> {
        typofix_fs::io::write_text(path, &self.render())?;
        Ok(())
    }
}

fn short_description(change: &PendingChange) -> String {
    format!(
        "There is a small typo in {}.\nShould read `{}` rather than `{}`.\n",
        change.files(),
        change.add_word,
        change.delete_word
    )
}
