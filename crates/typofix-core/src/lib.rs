//! Core of typofix
//!
//! Turns a staged one-word correction into an issue, a commit and a pull
//! request against the upstream of a fork:
//!
//! - **Repository Store** ([`store`]): two JSON collections, known
//!   repositories and pending changes, keyed by repository name
//! - **Typo extraction** ([`extract`]): staged unified diff → one
//!   `(deleted word, added word)` pair plus the touched files
//! - **Workflow** ([`workflow`]): which submission steps are valid, derived
//!   from marker files in the working directory, and the steps themselves
//! - **Acquisition** ([`acquire`]): forking, cloning, spell-checking and
//!   registering candidate repositories; removal
//!
//! # Architecture
//!
//! ```text
//!                 typofix-cli
//!                      |
//!                 typofix-core
//!                      |
//!     +----------------+----------------+
//!     |                |                |
//! typofix-fs      typofix-git     typofix-hosting
//! ```

pub mod acquire;
pub mod error;
pub mod extract;
pub mod model;
pub mod settings;
pub mod spelling;
pub mod store;
pub mod workflow;

pub use acquire::{Acquisition, list_target_directories, register_existing, remove_repository};
pub use error::{Error, Result};
pub use extract::{StagedTypo, extract_typo, parse_staged_diff};
pub use model::{PendingChange, RepositoryRecord};
pub use settings::Settings;
pub use spelling::{CommandSpellChecker, SpellChecker};
pub use store::{Collection, RepositoryStore};
pub use workflow::{
    Draft, IssueStyle, Outcome, Sentinel, SentinelPresence, Transition, WorkflowRunner,
    derive_transitions,
};
