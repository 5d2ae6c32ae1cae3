use motif_auth::IdTokenClaims;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Default, Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    uid: Option<String>,
    name: Option<String>,
    email: Option<String>,
    expires_at: Option<String>,
    token_source: Option<&'static str>,
    note: Option<String>,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.session.snapshot();

    let status = match (session.user, motif_auth::resolve_token()) {
        (Some(user), Some((token, source))) => AuthStatusResponse {
            authenticated: true,
            uid: Some(user.id),
            name: Some(user.name),
            email: user.email,
            expires_at: IdTokenClaims::decode(&token)
                .ok()
                .map(|claims| claims.expires_at.to_rfc3339()),
            token_source: Some(source.as_str()),
            note: None,
        },
        (None, Some((token, source))) => AuthStatusResponse {
            token_source: Some(source.as_str()),
            note: Some(match IdTokenClaims::decode(&token) {
                Ok(claims) => format!(
                    "stored session expired at {}; run `motif auth login`",
                    claims.expires_at.to_rfc3339()
                ),
                Err(error) => error.to_string(),
            }),
            ..AuthStatusResponse::default()
        },
        (_, None) => AuthStatusResponse {
            note: Some(if ctx.config.auth.is_configured() {
                "no stored session found".into()
            } else {
                "MOTIF_AUTH__SIGN_IN_URL not configured".into()
            }),
            ..AuthStatusResponse::default()
        },
    };

    output(&status, flags.format)
}
