//! Interactive menu
//!
//! Uses dialoguer for terminal-based selection. Every menu lists its
//! entries sorted by label followed by an exit entry; escaping a menu is the
//! same as choosing the exit entry.

use std::path::{Path, PathBuf};

use colored::Colorize;
use dialoguer::{Confirm, Select};
use typofix_core::workflow::{file_report, viewable_files};
use typofix_core::{
    Acquisition, Error, Outcome, PendingChange, RepositoryRecord, Transition, WorkflowRunner,
    list_target_directories, register_existing, remove_repository,
};
use typofix_git::GitVcs;

use crate::commands::typo;
use crate::context::Context;
use crate::error::{CliError, Result};

const QUIT: &str = "- quit -";
const BACK: &str = "- back -";

/// Top-level menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopAction {
    Examine,
    RegisterExisting,
    Remove,
    Acquire,
    PrepareChange,
    PrepareSubmission,
}

impl TopAction {
    pub const ALL: [TopAction; 6] = [
        Self::Examine,
        Self::RegisterExisting,
        Self::Remove,
        Self::Acquire,
        Self::PrepareChange,
        Self::PrepareSubmission,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Examine => "examine a repository",
            Self::RegisterExisting => "manually add a new repository",
            Self::Remove => "remove a repository",
            Self::Acquire => "add a new repository",
            Self::PrepareChange => "prepare a change",
            Self::PrepareSubmission => "prepare a pr/issue",
        }
    }
}

/// Entries of the per-repository submission menu.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SubmissionItem {
    Step(Transition),
    Show(PathBuf),
}

/// Sort `choices` by label; the order the operator sees.
fn sorted<T>(mut choices: Vec<(String, T)>) -> Vec<(String, T)> {
    choices.sort_by(|a, b| a.0.cmp(&b.0));
    choices
}

/// Prompt for one of `choices`. `None` when the operator picks `exit` or
/// escapes.
fn choose<T>(prompt: &str, choices: Vec<(String, T)>, exit: &str) -> Result<Option<T>> {
    let choices = sorted(choices);
    let mut labels: Vec<&str> = choices.iter().map(|(label, _)| label.as_str()).collect();
    labels.push(exit);

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()?;

    Ok(selection.and_then(|index| choices.into_iter().nth(index).map(|(_, value)| value)))
}

/// Run the menu until the operator quits.
///
/// Failures of a chosen action are reported and the menu is shown again;
/// only a broken terminal ends the session early.
pub fn run(ctx: &Context) -> Result<()> {
    if !ctx.target().is_dir() {
        return Err(CliError::user(format!(
            "Target {} is not a directory.",
            ctx.target().display()
        )));
    }

    loop {
        let choices = TopAction::ALL
            .iter()
            .map(|action| (action.label().to_string(), *action))
            .collect();
        let Some(action) = choose("What do you want to do?", choices, QUIT)? else {
            println!("Goodbye.");
            return Ok(());
        };

        tracing::debug!(?action, "menu selection");
        if let Err(e) = dispatch(ctx, action) {
            if e.is_fatal() {
                return Err(e);
            }
            report(&e);
        }
    }
}

fn report(error: &CliError) {
    if error.is_notice() {
        eprintln!("{}", error.to_string().yellow());
    } else {
        eprintln!("{}: {}", "error".red().bold(), error);
    }
}

fn dispatch(ctx: &Context, action: TopAction) -> Result<()> {
    match action {
        TopAction::Examine => examine(ctx),
        TopAction::RegisterExisting => register(ctx),
        TopAction::Remove => remove(ctx),
        TopAction::Acquire => acquire(ctx),
        TopAction::PrepareChange => prepare_change(ctx),
        TopAction::PrepareSubmission => prepare_submission(ctx),
    }
}

fn pick_repository(ctx: &Context) -> Result<RepositoryRecord> {
    let choices = ctx
        .store
        .repositories()?
        .into_iter()
        .map(|record| (record.name.clone(), record))
        .collect::<Vec<_>>();
    if choices.is_empty() {
        return Err(Error::NoRepositoriesAvailable.into());
    }
    choose("Which repository?", choices, BACK)?.ok_or_else(|| Error::NoRepositoriesAvailable.into())
}

fn pick_pending(ctx: &Context) -> Result<PendingChange> {
    let choices = ctx
        .store
        .pending_changes()?
        .into_iter()
        .map(|change| (change.repository_name.clone(), change))
        .collect::<Vec<_>>();
    if choices.is_empty() {
        return Err(Error::NoRepositoriesAvailable.into());
    }
    choose("Which repository?", choices, BACK)?.ok_or_else(|| Error::NoRepositoriesAvailable.into())
}

fn examine(ctx: &Context) -> Result<()> {
    let record = pick_repository(ctx)?;
    let report = PathBuf::from(&ctx.settings.spelling.output);
    ctx.open_in_editor(&record.local_path, &report)
}

fn register(ctx: &Context) -> Result<()> {
    let choices = list_target_directories(ctx.target())?
        .into_iter()
        .map(|name| (name.clone(), name))
        .collect();
    let Some(name) = choose("Which Directory?", choices, BACK)? else {
        return Ok(());
    };
    let record = register_existing(&ctx.store, ctx.target(), &name)?;
    println!("{} {} at {}", "Added".green(), record.name.cyan(), record.local_path.display());
    Ok(())
}

fn remove(ctx: &Context) -> Result<()> {
    let record = pick_repository(ctx)?;
    let delete_dir = Confirm::new()
        .with_prompt("Delete the directory?")
        .default(false)
        .interact()?;
    remove_repository(&ctx.store, &record.name, delete_dir)?;
    println!("{} {}", "Removed".green(), record.name.cyan());
    Ok(())
}

fn acquire(ctx: &Context) -> Result<()> {
    let candidates = ctx.settings.candidates()?;
    if candidates.is_empty() {
        return Err(CliError::user(
            "No candidate repositories configured (set [acquire] candidates or candidates_file)",
        ));
    }
    let hosting = ctx.hosting()?;
    let vcs = GitVcs::new();
    let checker = ctx.spell_checker();
    let acquisition = Acquisition::new(&hosting, &vcs, &checker, &ctx.store, ctx.target())
        .with_report_name(ctx.settings.spelling.output.clone());

    match acquisition.acquire_next(&candidates)? {
        Some(record) => println!(
            "{} {}, spelling report at {}",
            "Acquired".green(),
            record.name.cyan(),
            ctx.report_path(&record.local_path).display()
        ),
        None => println!("{}", "No new repository to acquire.".yellow()),
    }
    Ok(())
}

fn prepare_change(ctx: &Context) -> Result<()> {
    let record = pick_repository(ctx)?;
    let change = typo::describe(&record)?;
    let save = Confirm::new()
        .with_prompt("Do you want to save?")
        .default(true)
        .interact()?;
    if save {
        typo::save(&ctx.store, &change)?;
    }
    Ok(())
}

fn submission_choices(dir: &Path, transitions: &[Transition]) -> Vec<(String, SubmissionItem)> {
    let steps = transitions
        .iter()
        .map(|t| (t.label().to_string(), SubmissionItem::Step(*t)));
    let shows = viewable_files(dir)
        .into_iter()
        .map(|path| (format!("show {}", path.display()), SubmissionItem::Show(path)));
    steps.chain(shows).collect()
}

fn prepare_submission(ctx: &Context) -> Result<()> {
    let change = pick_pending(ctx)?;
    let vcs = GitVcs::new();
    let dir = change.local_path.clone();

    loop {
        for (file, present) in file_report(&dir) {
            let has = if present { "HAS" } else { "does not have" };
            println!("{} {has} {}", change.repository_name, file.display());
        }

        let available = WorkflowRunner::offline(&vcs).available(&change);
        match choose("What do you want to do?", submission_choices(&dir, &available), BACK)? {
            None => return Ok(()),
            Some(SubmissionItem::Show(path)) => ctx.open_in_editor(&dir, &path)?,
            Some(SubmissionItem::Step(transition)) => {
                let outcome = run_step(ctx, &vcs, &change, transition)?;
                println!("{}", describe_outcome(&outcome).green());
            }
        }
    }
}

/// Execute one transition, connecting to the code host only for the steps
/// that submit something.
fn run_step(
    ctx: &Context,
    vcs: &GitVcs,
    change: &PendingChange,
    transition: Transition,
) -> Result<Outcome> {
    if transition.needs_hosting() {
        let hosting = ctx.hosting()?;
        Ok(WorkflowRunner::new(vcs, &hosting).execute(change, transition)?)
    } else {
        Ok(WorkflowRunner::offline(vcs).execute(change, transition)?)
    }
}

fn describe_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Drafted { path } => format!("Wrote {}", path.display()),
        Outcome::IssueCreated { repo, number, .. } => {
            format!("Created issue #{number} on {repo}")
        }
        Outcome::PullRequestCreated { pull, .. } => {
            format!("Created PR #{} view at {}", pull.number, pull.url)
        }
    }
}
