//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// typofix - Batch-fix one-word typos in forked repositories
///
/// Without a command, runs the interactive menu.
#[derive(Parser, Debug)]
#[command(name = "typofix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file (default: <config dir>/typofix/config.toml)
    #[arg(long, global = true, env = "TYPOFIX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding repository checkouts
    #[arg(long, global = true, env = "TYPOFIX_TARGET")]
    pub target: Option<PathBuf>,

    /// Directory holding the repository store
    #[arg(long, global = true, env = "TYPOFIX_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List known repositories and pending changes
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show the typo staged in a repository checkout
    ///
    /// Examples:
    ///   typofix typo ~/data/widget          # Print the correction
    ///   typofix typo ~/data/widget --save   # Save it as a pending change
    Typo {
        /// Repository working directory
        path: PathBuf,

        /// Save the correction as the repository's pending change
        #[arg(long)]
        save: bool,
    },

    /// Show workflow progress for a repository
    Status {
        /// Repository name
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_no_args() {
        let cli = Cli::parse_from(["typofix"]);
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_short_verbose_flag() {
        let cli = Cli::parse_from(["typofix", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_list_json() {
        let cli = Cli::parse_from(["typofix", "list", "--json"]);
        assert_eq!(cli.command, Some(Commands::List { json: true }));
    }

    #[test]
    fn parse_typo_with_save() {
        let cli = Cli::parse_from(["typofix", "typo", "/data/widget", "--save"]);
        assert_eq!(
            cli.command,
            Some(Commands::Typo {
                path: PathBuf::from("/data/widget"),
                save: true,
            })
        );
    }

    #[test]
    fn parse_status() {
        let cli = Cli::parse_from(["typofix", "status", "widget"]);
        assert_eq!(
            cli.command,
            Some(Commands::Status {
                name: "widget".to_string()
            })
        );
    }

    #[test]
    fn global_paths_after_subcommand() {
        let cli = Cli::parse_from([
            "typofix",
            "list",
            "--data-dir",
            "/tmp/store",
            "--target",
            "/tmp/checkouts",
        ]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/store")));
        assert_eq!(cli.target, Some(PathBuf::from("/tmp/checkouts")));
    }
}
