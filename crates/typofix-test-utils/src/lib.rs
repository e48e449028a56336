//! Shared test utilities for the typofix workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: git repositories with history, staged typos and bare remotes
//! - [`hosting`]: [`hosting::FakeHosting`], an in-memory code host

pub mod git;
pub mod hosting;
