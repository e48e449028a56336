//! Filesystem helpers for typofix
//!
//! Atomic, locked writes for the durable store and format-agnostic loading
//! of TOML/JSON documents.

pub mod config;
pub mod error;
pub mod io;

pub use config::ConfigStore;
pub use error::{Error, Result};
