use clap::{Args, Subcommand};

use crate::cli::subcommands::{AuthCommands, SavedCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Search for movies matching a vibe.
    Search(SearchArgs),
    /// List the context filter options.
    Contexts,
    /// Authentication.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Hearts and watchlist.
    Saved {
        #[command(subcommand)]
        action: SavedCommands,
    },
    /// Contribute a vibe tag for a movie.
    Tag(TagArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    /// Free-text description of what you want to watch.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
    /// Who you are watching with (parents, date, group, solo).
    #[arg(long)]
    pub social: Option<String>,
    /// The mood you are after (hype, chill, deep).
    #[arg(long)]
    pub mood: Option<String>,
    /// Show the full detail of the Nth result (1-based).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub select: Option<u32>,
}

impl SearchArgs {
    #[must_use]
    pub fn query(&self) -> String {
        self.text.join(" ")
    }
}

#[derive(Clone, Debug, Args)]
pub struct TagArgs {
    /// Movie identifier.
    pub movie_id: i64,
    /// Tag text.
    pub tag: String,
}
