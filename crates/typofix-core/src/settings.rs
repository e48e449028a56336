//! Operator settings
//!
//! Loaded from a TOML file (by default `<config dir>/typofix/config.toml`).
//! Every key is optional:
//!
//! ```toml
//! target = "/home/me/data"          # where repositories are checked out
//! data_dir = "/home/me/.local/share/typofix"
//! editor = "vim"
//!
//! [github]
//! api_url = "https://api.github.com"
//! token_env = "GITHUB_TOKEN"
//!
//! [spelling]
//! program = "codespell"
//! args = []
//! output = "spelling.txt"
//!
//! [acquire]
//! candidates = ["owner/repo"]
//! candidates_file = "/home/me/candidates.txt"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use typofix_fs::ConfigStore;
use typofix_hosting::RepoSlug;

use crate::Result;

const APP_DIR: &str = "typofix";

/// Hosting API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubSettings {
    pub api_url: String,
    /// Environment variable holding the API token
    pub token_env: String,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            token_env: "GITHUB_TOKEN".to_string(),
        }
    }
}

/// Spelling checker invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellingSettings {
    pub program: String,
    pub args: Vec<String>,
    /// Report file written inside each acquired repository
    pub output: String,
}

impl Default for SpellingSettings {
    fn default() -> Self {
        Self {
            program: "codespell".to_string(),
            args: Vec::new(),
            output: "spelling.txt".to_string(),
        }
    }
}

/// Where candidate upstream repositories come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquireSettings {
    /// Inline `owner/name` identifiers
    pub candidates: Vec<String>,
    /// File with one `owner/name` per line; blank lines and `#` comments skipped
    pub candidates_file: Option<PathBuf>,
}

/// All operator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding repository checkouts
    pub target: PathBuf,
    /// Directory holding the store collections
    pub data_dir: PathBuf,
    /// Program used to show files
    pub editor: String,
    pub github: GitHubSettings,
    pub spelling: SpellingSettings,
    pub acquire: AcquireSettings,
}

impl Default for Settings {
    /// `target` is `$HOME/data`, `data_dir` the platform data directory,
    /// `editor` is `$VISUAL`, then `$EDITOR`, then `vim`.
    fn default() -> Self {
        let editor = ["VISUAL", "EDITOR"]
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| "vim".to_string());
        Self {
            target: dirs::home_dir().unwrap_or_default().join("data"),
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR),
            editor,
            github: GitHubSettings::default(),
            spelling: SpellingSettings::default(),
            acquire: AcquireSettings::default(),
        }
    }
}

impl Settings {
    /// Default settings file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// Load settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match ConfigStore::new().load_if_exists(path)? {
            Some(settings) => {
                tracing::debug!(path = %path.display(), "loaded settings");
                Ok(settings)
            }
            None => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Candidate upstreams: inline entries first, then the candidates file.
    pub fn candidates(&self) -> Result<Vec<RepoSlug>> {
        let mut lines: Vec<String> = self.acquire.candidates.clone();
        if let Some(path) = &self.acquire.candidates_file {
            let content = typofix_fs::io::read_text(path)?;
            lines.extend(content.lines().map(str::to_string));
        }

        let mut slugs: Vec<RepoSlug> = Vec::new();
        for line in &lines {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            slugs.push(line.parse::<RepoSlug>()?);
        }
        Ok(slugs)
    }
}
