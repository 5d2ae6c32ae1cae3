use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    logged_out: bool,
    uid: Option<String>,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let uid = ctx.session.snapshot().uid().map(str::to_string);
    ctx.session.logout().await?;

    output(
        &AuthLogoutResponse {
            logged_out: true,
            uid,
        },
        flags.format,
    )
}
