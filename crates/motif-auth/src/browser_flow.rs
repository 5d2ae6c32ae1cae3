use std::time::{Duration, Instant};

use crate::error::AuthError;

/// Query parameter names that may carry the ID token on the callback.
const TOKEN_PARAMS: [&str; 2] = ["id_token", "token"];

/// Run the browser sign-in flow and return the raw ID token.
///
/// 1. Start `tiny_http` on `127.0.0.1:0` (random port)
/// 2. Open the browser at `sign_in_url` with a loopback `redirect_url` and a
///    random `state` nonce
/// 3. Wait for the callback carrying `id_token` and the same `state`
///    (in `spawn_blocking`, `tiny_http::recv` blocks)
///
/// # Errors
///
/// Returns `AuthError::BrowserFlowFailed` if the server cannot bind, the
/// callback state does not match, or the callback times out.
pub async fn login(sign_in_url: &str, timeout: Duration) -> Result<String, AuthError> {
    let server = tiny_http::Server::http("127.0.0.1:0")
        .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to bind: {e}")))?;
    let port = server
        .server_addr()
        .to_ip()
        .map(|a| a.port())
        .ok_or_else(|| AuthError::BrowserFlowFailed("no port".into()))?;

    let state = state_nonce()?;
    let redirect_url = format!("http://127.0.0.1:{port}/callback");
    let url = authorize_url(sign_in_url, &redirect_url, &state);

    eprintln!("Opening browser to: {url}");
    if let Err(error) = open::that(&url) {
        tracing::warn!(%error, "failed to open browser");
        eprintln!("Open the URL above manually, then return here.");
    }

    tokio::task::spawn_blocking(move || wait_for_callback(&server, timeout, &state))
        .await
        .map_err(|e| AuthError::BrowserFlowFailed(format!("spawn_blocking join: {e}")))?
}

/// 16 random bytes, hex encoded.
fn state_nonce() -> Result<String, AuthError> {
    let mut bytes = [0u8; 16];
    getrandom::fill(&mut bytes)
        .map_err(|e| AuthError::BrowserFlowFailed(format!("failed to generate CSRF nonce: {e}")))?;
    Ok(bytes.iter().map(|b| format!("{b:02x}")).collect())
}

fn authorize_url(sign_in_url: &str, redirect_url: &str, state: &str) -> String {
    let separator = if sign_in_url.contains('?') { '&' } else { '?' };
    format!(
        "{sign_in_url}{separator}redirect_url={}&state={}",
        urlencoding::encode(redirect_url),
        urlencoding::encode(state)
    )
}

#[derive(Debug, PartialEq, Eq)]
enum Callback {
    /// Not the callback we are waiting for (favicon, intermediate redirect).
    Ignore,
    Token(String),
    Failed(String),
}

fn parse_callback(url: &str, expected_state: &str) -> Callback {
    let Some(query) = url.strip_prefix("/callback?") else {
        return Callback::Ignore;
    };

    let mut token = None;
    let mut state = None;
    let mut error = None;
    for (key, value) in query.split('&').filter_map(|pair| pair.split_once('=')) {
        let Ok(value) = urlencoding::decode(value) else {
            return Callback::Failed(format!("undecodable `{key}` parameter"));
        };
        match key {
            k if TOKEN_PARAMS.contains(&k) => token = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Callback::Failed(format!("provider returned error: {error}"));
    }
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return Callback::Ignore;
    };
    if state.as_deref() != Some(expected_state) {
        return Callback::Failed("state mismatch, possible CSRF".into());
    }
    Callback::Token(token)
}

fn html(body: &str) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let response = tiny_http::Response::from_string(format!("<html><body>{body}</body></html>"));
    match tiny_http::Header::from_bytes("Content-Type", "text/html") {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

/// Block until the callback server receives the token, ignoring unrelated
/// requests.
fn wait_for_callback(
    server: &tiny_http::Server,
    timeout: Duration,
    expected_state: &str,
) -> Result<String, AuthError> {
    let deadline = Instant::now() + timeout;
    let timed_out = || {
        AuthError::BrowserFlowFailed(format!(
            "browser callback timed out after {}s",
            timeout.as_secs()
        ))
    };

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(timed_out());
        }
        let request = match server.recv_timeout(remaining) {
            Ok(Some(req)) => req,
            Ok(None) => return Err(timed_out()),
            Err(e) => return Err(AuthError::BrowserFlowFailed(format!("recv error: {e}"))),
        };

        match parse_callback(request.url(), expected_state) {
            Callback::Ignore => {
                let _ = request.respond(tiny_http::Response::from_string("").with_status_code(204));
            }
            Callback::Failed(reason) => {
                let _ = request.respond(html("<h1>Sign-in failed</h1><p>Check the terminal.</p>"));
                return Err(AuthError::BrowserFlowFailed(reason));
            }
            Callback::Token(token) => {
                let _ = request.respond(html("<h1>Signed in to Motif</h1><p>You can close this tab.</p>"));
                return Ok(token);
            }
        }
    }
}
