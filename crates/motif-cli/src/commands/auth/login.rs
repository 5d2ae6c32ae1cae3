use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::session::require_hydrated_user;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    uid: String,
    name: String,
    email: Option<String>,
    hearts: usize,
    watchlist: usize,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !ctx.config.auth.is_configured() {
        anyhow::bail!("auth login: MOTIF_AUTH__SIGN_IN_URL is not configured");
    }

    if !flags.quiet {
        eprintln!("Opening browser to sign in...");
    }
    ctx.session.login().await?;

    // Signing in creates the profile on first use; finish that before exiting.
    let user = require_hydrated_user(ctx).await?;

    output(
        &AuthLoginResponse {
            authenticated: true,
            uid: user.id,
            name: user.name,
            email: user.email,
            hearts: user.hearts.len(),
            watchlist: user.watchlist.len(),
        },
        flags.format,
    )
}
