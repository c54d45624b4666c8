//! CLI module - Command-line interface for anitrack
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;
pub mod console;
mod interactive;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;
pub use console::{BufferedConsole, Console, Style, TerminalConsole};
pub use interactive::run_interactive;

/// anitrack - Anime watchlist tracker
/// Track your favorite anime and get notifications for new episodes!
#[derive(Parser)]
#[command(name = "anitrack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start interactive mode with guided prompts
    #[command(alias = "i")]
    Interactive,

    /// Initialize the SQLite database
    InitDb {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Add a new anime by MAL ID
    AddAnime {
        /// MAL ID for the anime
        #[arg(long, alias = "mal_id")]
        mal_id: Option<i32>,
    },

    /// Create a new user
    AddUser {
        /// MAL user identifier
        #[arg(long, alias = "mal_user_id")]
        mal_user_id: Option<String>,
    },

    /// Add an anime to a user's watchlist
    AddToWatchlist {
        /// User ID
        #[arg(long, alias = "user_id")]
        user_id: Option<i32>,
        /// Anime ID
        #[arg(long, alias = "anime_id")]
        anime_id: Option<i32>,
        /// Last watched episode
        #[arg(long, alias = "last_watched_episode")]
        last_watched_episode: Option<i32>,
    },

    /// Show a user's watchlist
    #[command(alias = "ls")]
    Watchlist {
        /// User ID
        #[arg(long, alias = "user_id")]
        user_id: Option<i32>,
    },

    /// Send notifications for episodes releasing today
    NotifyDue {
        /// User ID
        #[arg(long, alias = "user_id")]
        user_id: Option<i32>,
        /// Release date to check (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Create default config file
    InitConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_to_watchlist_flags() {
        let cli = Cli::parse_from([
            "anitrack",
            "add-to-watchlist",
            "--user-id",
            "1",
            "--anime_id",
            "2",
        ]);

        match cli.command {
            Some(Commands::AddToWatchlist {
                user_id,
                anime_id,
                last_watched_episode,
            }) => {
                assert_eq!(user_id, Some(1));
                assert_eq!(anime_id, Some(2));
                assert_eq!(last_watched_episode, None);
            }
            _ => panic!("expected add-to-watchlist"),
        }
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::parse_from(["anitrack", "--config", "custom.toml"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
