//! List command: known repositories and pending changes

use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;
use typofix_core::RepositoryStore;

use crate::error::Result;

#[derive(Debug, Serialize)]
struct RepositoryEntry {
    name: String,
    path: PathBuf,
}

#[derive(Debug, Serialize)]
struct PendingEntry {
    name: String,
    delete_word: String,
    add_word: String,
    file_paths: Vec<String>,
    path: PathBuf,
}

#[derive(Debug, Serialize)]
struct Listing {
    repositories: Vec<RepositoryEntry>,
    pending: Vec<PendingEntry>,
}

fn collect(store: &RepositoryStore) -> Result<Listing> {
    let repositories = store
        .repositories()?
        .into_iter()
        .map(|r| RepositoryEntry {
            name: r.name,
            path: r.local_path,
        })
        .collect();
    let pending = store
        .pending_changes()?
        .into_iter()
        .map(|c| PendingEntry {
            name: c.repository_name,
            delete_word: c.delete_word,
            add_word: c.add_word,
            file_paths: c.file_paths,
            path: c.local_path,
        })
        .collect();
    Ok(Listing {
        repositories,
        pending,
    })
}

/// Run the list command
pub fn run_list(store: &RepositoryStore, json: bool) -> Result<()> {
    let listing = collect(store)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("{}", "Known Repositories".bold());
    if listing.repositories.is_empty() {
        println!("  {}", "None".dimmed());
    }
    for repo in &listing.repositories {
        println!("  {:<24} {}", repo.name.green(), repo.path.display().to_string().dimmed());
    }
    println!();

    println!("{}", "Pending Changes".bold());
    if listing.pending.is_empty() {
        println!("  {} (use {} to add one)", "None".dimmed(), "typofix typo <path> --save".cyan());
    }
    for change in &listing.pending {
        println!(
            "  {:<24} {} -> {} in {}",
            change.name.green(),
            change.delete_word.red(),
            change.add_word.green(),
            change.file_paths.join(", ")
        );
    }
    Ok(())
}
