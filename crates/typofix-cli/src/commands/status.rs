//! Status command: workflow progress of one repository

use colored::Colorize;
use typofix_core::workflow::file_report;
use typofix_core::{Error, RepositoryStore, SentinelPresence, derive_transitions};

use crate::error::Result;

/// Run the status command
pub fn run_status(store: &RepositoryStore, name: &str) -> Result<()> {
    let record = store.repository(name)?;
    let pending = store.pending_change(name)?;
    let dir = match (&record, &pending) {
        (Some(record), _) => record.local_path.clone(),
        (None, Some(change)) => change.local_path.clone(),
        (None, None) => {
            return Err(Error::UnknownRepository {
                name: name.to_string(),
            }
            .into());
        }
    };

    println!("{}", name.bold());
    println!("{}:   {}", "Path".dimmed(), dir.display());
    match &pending {
        Some(change) => println!(
            "{}: {} -> {} in {}",
            "Change".dimmed(),
            change.delete_word.red(),
            change.add_word.green(),
            change.files()
        ),
        None => println!("{}: {}", "Change".dimmed(), "none saved".dimmed()),
    }
    println!();

    for (file, present) in file_report(&dir) {
        let marker = if present {
            "HAS".green()
        } else {
            "does not have".dimmed()
        };
        println!("  {marker} {}", file.display());
    }

    if pending.is_some() {
        println!();
        println!("{}:", "Next steps".bold());
        for transition in derive_transitions(&SentinelPresence::probe(&dir)) {
            println!("  {} {}", "-".cyan(), transition.label());
        }
    }
    Ok(())
}
