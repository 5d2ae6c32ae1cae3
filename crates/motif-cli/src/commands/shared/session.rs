use anyhow::Context;
use motif_core::entities::SessionUser;
use motif_profile::session::HYDRATION_FAILED_TOAST;

use crate::context::AppContext;

/// Wait until the signed-in user's saved collections are loaded.
///
/// Hydration runs in the background once the session sees a user; a failed
/// hydration only surfaces as a toast, so both channels are watched.
pub async fn require_hydrated_user(ctx: &AppContext) -> anyhow::Result<SessionUser> {
    if ctx.session.snapshot().user.is_none() {
        anyhow::bail!("not signed in; run `motif auth login` first");
    }

    let mut session = ctx.session.subscribe();
    let mut toasts = ctx.toasts.subscribe();
    let wait = async {
        tokio::select! {
            changed = session.wait_for(|s| s.hydrated || s.user.is_none()) => {
                changed.map(|_| ()).context("session store closed")
            }
            failed = toasts.wait_for(|t| t.as_ref().is_some_and(|t| t.message == HYDRATION_FAILED_TOAST)) => {
                match failed {
                    Ok(_) => Err(anyhow::anyhow!(HYDRATION_FAILED_TOAST)),
                    Err(_) => Err(anyhow::anyhow!("toast store closed")),
                }
            }
        }
    };

    tokio::time::timeout(ctx.config.search.timeout(), wait)
        .await
        .context("timed out loading your profile")??;

    ctx.session
        .snapshot()
        .user
        .context("signed out while loading your profile")
}
