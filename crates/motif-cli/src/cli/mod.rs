use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `motif` binary.
#[derive(Debug, Parser)]
#[command(name = "motif", version, about = "Motif - find a movie by vibe")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to request from search
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (suppress notifications and non-error logs)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use motif_core::enums::SavedList;
    use pretty_assertions::assert_eq;

    use super::subcommands::{AuthCommands, SavedCommands};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "motif", "--format", "table", "--limit", "5", "--verbose", "contexts",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(5));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Contexts));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["motif", "contexts", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        let flags = cli.global_flags();
        assert!(flags.quiet);
        assert_eq!(flags.limit, None);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["motif", "--format", "xml", "contexts"]).is_err());
    }

    #[test]
    fn search_joins_words_and_takes_filters() {
        let cli = Cli::try_parse_from([
            "motif", "search", "cozy", "rainy", "evening", "--social", "date", "--mood", "chill",
            "--select", "2",
        ])
        .expect("cli should parse");

        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.query(), "cozy rainy evening");
        assert_eq!(args.social.as_deref(), Some("date"));
        assert_eq!(args.mood.as_deref(), Some("chill"));
        assert_eq!(args.select, Some(2));
    }

    #[test]
    fn search_select_is_one_based() {
        assert!(Cli::try_parse_from(["motif", "search", "x", "--select", "0"]).is_err());
    }

    #[test]
    fn saved_add_requires_title() {
        assert!(Cli::try_parse_from(["motif", "saved", "add", "hearts", "27205"]).is_err());

        let cli = Cli::try_parse_from([
            "motif", "saved", "add", "watchlist", "27205", "--title", "Inception", "--year",
            "2010",
        ])
        .expect("cli should parse");
        let Commands::Saved {
            action: SavedCommands::Add(args),
        } = cli.command
        else {
            panic!("expected saved add");
        };
        assert_eq!(SavedList::from(args.list), SavedList::Watchlist);
        assert_eq!(args.id, 27205);
        assert_eq!(args.year.as_deref(), Some("2010"));
    }

    #[test]
    fn saved_remove_needs_only_list_and_id() {
        let cli = Cli::try_parse_from(["motif", "saved", "remove", "hearts", "9"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Saved {
                action: SavedCommands::Remove(_)
            }
        ));
    }

    #[test]
    fn saved_rejects_unknown_list() {
        assert!(Cli::try_parse_from(["motif", "saved", "remove", "favorites", "9"]).is_err());
    }

    #[test]
    fn auth_and_tag_parse() {
        let cli = Cli::try_parse_from(["motif", "auth", "status"]).expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Auth {
                action: AuthCommands::Status
            }
        ));

        let cli = Cli::try_parse_from(["motif", "tag", "42", "rainy day"]).expect("cli should parse");
        let Commands::Tag(args) = cli.command else {
            panic!("expected tag");
        };
        assert_eq!((args.movie_id, args.tag.as_str()), (42, "rainy day"));
    }
}
