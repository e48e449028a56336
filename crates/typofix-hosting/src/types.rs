//! Value types shared by hosting implementations

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// An `owner/name` repository identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl RepoSlug {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoSlug {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(owner, name))
            }
            _ => Err(Error::InvalidSlug {
                input: s.to_string(),
            }),
        }
    }
}

/// A created pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub url: String,
}

/// Parameters for opening a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPullRequest {
    pub title: String,
    pub body: String,
    /// Branch on the target repository the change should land on
    pub base: String,
    /// Source branch, `owner:branch` for cross-fork requests
    pub head: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_slug() {
        let slug: RepoSlug = "rust-lang/book".parse().unwrap();
        assert_eq!(slug, RepoSlug::new("rust-lang", "book"));
        assert_eq!(slug.to_string(), "rust-lang/book");
    }

    #[test]
    fn test_parse_slug_trims_whitespace() {
        let slug: RepoSlug = "  octo/hello \n".parse().unwrap();
        assert_eq!(slug.name, "hello");
    }

    #[rstest]
    #[case("")]
    #[case("no-slash")]
    #[case("/name")]
    #[case("owner/")]
    #[case("a/b/c")]
    fn test_parse_slug_rejects(#[case] input: &str) {
        assert!(matches!(
            input.parse::<RepoSlug>(),
            Err(Error::InvalidSlug { .. })
        ));
    }
}
