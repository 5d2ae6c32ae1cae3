use clap::{Args, Subcommand, ValueEnum};
use motif_core::enums::SavedList;

/// Saved collection commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SavedCommands {
    /// List saved movies.
    List(SavedListArgs),
    /// Save a movie to a list.
    Add(SavedAddArgs),
    /// Remove a movie from a list.
    Remove(SavedRemoveArgs),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ListArg {
    Hearts,
    Watchlist,
}

impl From<ListArg> for SavedList {
    fn from(value: ListArg) -> Self {
        match value {
            ListArg::Hearts => Self::Hearts,
            ListArg::Watchlist => Self::Watchlist,
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct SavedListArgs {
    /// Only show this list.
    #[arg(long)]
    pub list: Option<ListArg>,
}

#[derive(Clone, Debug, Args)]
pub struct SavedAddArgs {
    pub list: ListArg,
    /// Movie identifier.
    pub id: i64,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub year: Option<String>,
    /// Poster URL.
    #[arg(long)]
    pub poster: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SavedRemoveArgs {
    pub list: ListArg,
    /// Movie identifier.
    pub id: i64,
}
