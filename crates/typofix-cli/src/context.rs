//! Resolved settings and collaborators for one invocation

use std::path::{Path, PathBuf};
use std::process::Command;

use typofix_core::{CommandSpellChecker, RepositoryStore, Settings};
use typofix_hosting::GitHubClient;

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Everything a command needs, built once from the settings file and the
/// command line.
#[derive(Debug)]
pub struct Context {
    pub settings: Settings,
    pub store: RepositoryStore,
}

impl Context {
    /// Load the settings file and apply command-line / environment overrides.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let path = cli.config.clone().or_else(Settings::default_path);
        let settings = match path {
            Some(path) => Settings::load(&path)?,
            None => Settings::default(),
        };
        Ok(Self::with_overrides(
            settings,
            cli.target.as_deref(),
            cli.data_dir.as_deref(),
        ))
    }

    pub fn with_overrides(
        mut settings: Settings,
        target: Option<&Path>,
        data_dir: Option<&Path>,
    ) -> Self {
        if let Some(target) = target {
            settings.target = target.to_path_buf();
        }
        if let Some(data_dir) = data_dir {
            settings.data_dir = data_dir.to_path_buf();
        }
        tracing::debug!(
            target = %settings.target.display(),
            data_dir = %settings.data_dir.display(),
            "resolved settings"
        );
        let store = RepositoryStore::new(settings.data_dir.clone());
        Self { settings, store }
    }

    pub fn target(&self) -> &Path {
        &self.settings.target
    }

    /// Hosting client; the token is only required once it is needed.
    pub fn hosting(&self) -> Result<GitHubClient> {
        let github = &self.settings.github;
        Ok(GitHubClient::from_env(
            github.api_url.clone(),
            &github.token_env,
        )?)
    }

    pub fn spell_checker(&self) -> CommandSpellChecker {
        CommandSpellChecker::from_settings(&self.settings.spelling)
    }

    /// Path of the spelling report inside `repo_dir`.
    pub fn report_path(&self, repo_dir: &Path) -> PathBuf {
        repo_dir.join(&self.settings.spelling.output)
    }

    /// Open `file` in the configured editor from inside `dir`, waiting for
    /// it to exit.
    pub fn open_in_editor(&self, dir: &Path, file: &Path) -> Result<()> {
        let editor = &self.settings.editor;
        let (program, args) = split_editor(editor)?;
        println!("Opening {} in {editor}", file.display());
        let status = Command::new(program)
            .args(args)
            .arg(file)
            .current_dir(dir)
            .status()
            .map_err(|e| CliError::user(format!("Failed to launch {editor}: {e}")))?;
        if !status.success() {
            tracing::warn!(%editor, %status, "editor exited unsuccessfully");
        }
        Ok(())
    }
}

/// Split an editor setting such as `code --wait` into the program and its
/// leading arguments.
fn split_editor(editor: &str) -> Result<(&str, Vec<&str>)> {
    let mut words = editor.split_whitespace();
    let program = words
        .next()
        .ok_or_else(|| CliError::user("No editor configured"))?;
    Ok((program, words.collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn overrides_replace_settings() {
        let context = Context::with_overrides(
            Settings::default(),
            Some(Path::new("/srv/checkouts")),
            Some(Path::new("/srv/store")),
        );
        assert_eq!(context.target(), Path::new("/srv/checkouts"));
        assert_eq!(context.store.root(), Path::new("/srv/store"));
    }

    #[test]
    fn no_overrides_keep_file_values() {
        let settings = Settings {
            target: PathBuf::from("/from/file"),
            ..Settings::default()
        };
        let context = Context::with_overrides(settings, None, None);
        assert_eq!(context.target(), Path::new("/from/file"));
    }

    #[test]
    fn from_cli_reads_config_file() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("config.toml");
        std::fs::write(&config, "target = \"/srv/repos\"\n\n[spelling]\noutput = \"typos.txt\"\n")
            .unwrap();
        let cli = Cli {
            verbose: false,
            config: Some(config),
            target: None,
            data_dir: Some(temp.path().join("store")),
            command: None,
        };

        let context = Context::from_cli(&cli).unwrap();

        assert_eq!(context.target(), Path::new("/srv/repos"));
        assert_eq!(
            context.report_path(Path::new("/srv/repos/widget")),
            PathBuf::from("/srv/repos/widget/typos.txt")
        );
        assert_eq!(context.store.root(), temp.path().join("store"));
    }

    #[cfg(unix)]
    #[test]
    fn editor_runs_in_repository_directory() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("spelling.txt"), "").unwrap();
        let settings = Settings {
            editor: "true".to_string(),
            ..Settings::default()
        };
        let context = Context::with_overrides(settings, None, None);

        context
            .open_in_editor(temp.path(), Path::new("spelling.txt"))
            .unwrap();
    }

    #[test]
    fn editor_setting_splits_into_program_and_args() {
        assert_eq!(split_editor("code --wait").unwrap(), ("code", vec!["--wait"]));
        assert_eq!(split_editor("  vim ").unwrap(), ("vim", vec![]));
        assert!(split_editor("   ").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn editor_with_arguments_is_launched() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("__issue__.txt"), "").unwrap();
        let settings = Settings {
            editor: "true --wait".to_string(),
            ..Settings::default()
        };
        let context = Context::with_overrides(settings, None, None);

        context
            .open_in_editor(temp.path(), Path::new("__issue__.txt"))
            .unwrap();
    }
}
