//! Command implementations for typofix-cli

pub mod list;
pub mod status;
pub mod typo;

pub use list::run_list;
pub use status::run_status;
pub use typo::run_typo;
