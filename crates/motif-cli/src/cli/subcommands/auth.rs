use clap::Subcommand;

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Sign in via browser.
    Login,
    /// Sign out and clear stored credentials.
    Logout,
    /// Show current auth status.
    Status,
}
