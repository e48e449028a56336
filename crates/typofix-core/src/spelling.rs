//! Spelling-check collaborator

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::settings::SpellingSettings;
use crate::{Error, Result};

/// Runs a spelling check over a directory tree.
pub trait SpellChecker {
    /// Check everything under `dir`, writing the findings to `out`.
    fn check(&self, dir: &Path, out: &mut dyn Write) -> Result<()>;
}

/// [`SpellChecker`] that shells out to an external program run inside the
/// directory being checked.
///
/// Checkers conventionally exit non-zero when they find typos, so a failing
/// status only counts as an error when the program printed nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpellChecker {
    program: String,
    args: Vec<String>,
}

impl CommandSpellChecker {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_settings(settings: &SpellingSettings) -> Self {
        Self::new(settings.program.clone(), settings.args.clone())
    }
}

impl SpellChecker for CommandSpellChecker {
    fn check(&self, dir: &Path, out: &mut dyn Write) -> Result<()> {
        tracing::debug!(program = %self.program, dir = %dir.display(), "running spelling check");
        let output = Command::new(&self.program)
            .args(&self.args)
            .current_dir(dir)
            .output()
            .map_err(|e| Error::Spelling {
                message: format!("failed to run {}: {e}", self.program),
            })?;

        out.write_all(&output.stdout)?;

        if !output.status.success() && output.stdout.is_empty() {
            return Err(Error::Spelling {
                message: format!(
                    "{} exited with {}: {}",
                    self.program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }
        Ok(())
    }
}

/// Run `checker` over `dir` and store its findings in `dir/<report_name>`.
pub fn write_report(checker: &dyn SpellChecker, dir: &Path, report_name: &str) -> Result<PathBuf> {
    let report = dir.join(report_name);
    let file = File::create(&report).map_err(|e| typofix_fs::Error::io(&report, e))?;
    let mut writer = BufWriter::new(file);
    checker.check(dir, &mut writer)?;
    writer.flush()?;
    tracing::info!(report = %report.display(), "wrote spelling report");
    Ok(report)
}
