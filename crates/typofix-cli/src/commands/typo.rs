//! Typo command: read the staged correction of a checkout

use std::path::Path;

use colored::Colorize;
use typofix_core::{PendingChange, RepositoryRecord, RepositoryStore, extract_typo};
use typofix_git::GitVcs;

use crate::error::{CliError, Result};

/// Record for the checkout at `path`: the registered one if any, otherwise
/// one named after the directory.
pub fn record_for_path(store: &RepositoryStore, path: &Path) -> Result<RepositoryRecord> {
    if let Some(known) = store
        .repositories()?
        .into_iter()
        .find(|r| r.local_path == path)
    {
        return Ok(known);
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::user(format!("Cannot name repository at {}", path.display())))?;
    Ok(RepositoryRecord::new(name, path))
}

/// Read the staged typo of `record` and print it.
pub fn describe(record: &RepositoryRecord) -> Result<PendingChange> {
    let typo = extract_typo(&GitVcs::new(), &record.local_path)?;
    let change = PendingChange::new(record, typo);
    println!(
        "Changing {} to {} in {}",
        change.delete_word.red(),
        change.add_word.green(),
        change.files()
    );
    Ok(change)
}

pub fn save(store: &RepositoryStore, change: &PendingChange) -> Result<()> {
    store.save_pending(change)?;
    println!("{} pending change for {}", "Saved".green(), change.repository_name.cyan());
    Ok(())
}

/// Run the typo command
pub fn run_typo(store: &RepositoryStore, path: &Path, save_change: bool) -> Result<()> {
    let path = std::path::absolute(path).map_err(|e| typofix_fs::Error::io(path, e))?;
    let record = record_for_path(store, &path)?;
    let change = describe(&record)?;
    if save_change {
        save(store, &change)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use typofix_test_utils::git::{repo_with_files, stage_change};

    #[test]
    fn unregistered_checkout_named_after_directory() {
        let temp = TempDir::new().unwrap();
        let store = RepositoryStore::new(temp.path().join("store"));

        let record = record_for_path(&store, Path::new("/data/widget")).unwrap();

        assert_eq!(record, RepositoryRecord::new("widget", "/data/widget"));
    }

    #[test]
    fn registered_checkout_keeps_its_name() {
        let temp = TempDir::new().unwrap();
        let store = RepositoryStore::new(temp.path());
        store
            .register(&RepositoryRecord::new("gadget", "/data/widget"))
            .unwrap();

        let record = record_for_path(&store, Path::new("/data/widget")).unwrap();

        assert_eq!(record.name, "gadget");
    }

    #[test]
    fn save_stores_pending_change() {
        let checkout = TempDir::new().unwrap();
        repo_with_files(checkout.path(), &[("foo.txt", "Teh cat\n")]);
        stage_change(checkout.path(), "foo.txt", "The cat\n");
        let data = TempDir::new().unwrap();
        let store = RepositoryStore::new(data.path());

        run_typo(&store, checkout.path(), true).unwrap();

        let saved = store.pending_changes().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].delete_word, "Teh");
        assert_eq!(saved[0].add_word, "The");
        assert_eq!(saved[0].local_path, checkout.path());
    }
}
