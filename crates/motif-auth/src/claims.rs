use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::AuthError;

/// Identity claims carried in the payload of a provider ID token.
///
/// Decoded without signature verification: the token is only forwarded to
/// the document store, which verifies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdTokenClaims {
    /// Stable user id (`user_id`, falling back to `sub`).
    pub uid: String,
    pub name: Option<String>,
    pub email: Option<String>,
    /// Avatar URL (`picture`).
    pub picture: Option<String>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct Payload {
    user_id: Option<String>,
    sub: Option<String>,
    name: Option<String>,
    email: Option<String>,
    picture: Option<String>,
    exp: i64,
}

impl IdTokenClaims {
    /// Decode the claims of a compact JWT.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the token is not three dot-separated
    /// segments, the payload is not base64url JSON, or the `exp` or subject
    /// claims are missing.
    pub fn decode(jwt: &str) -> Result<Self, AuthError> {
        let parts: Vec<&str> = jwt.split('.').collect();
        if parts.len() != 3 {
            return Err(AuthError::InvalidToken("invalid JWT format".into()));
        }
        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(parts[1].trim_end_matches('='))
            .map_err(|e| AuthError::InvalidToken(format!("base64 decode failed: {e}")))?;
        let payload: Payload = serde_json::from_slice(&payload)
            .map_err(|e| AuthError::InvalidToken(format!("JSON parse failed: {e}")))?;

        let uid = payload
            .user_id
            .or(payload.sub)
            .filter(|uid| !uid.is_empty())
            .ok_or_else(|| AuthError::InvalidToken("missing subject claim".into()))?;
        let expires_at = DateTime::from_timestamp(payload.exp, 0)
            .ok_or_else(|| AuthError::InvalidToken("invalid exp timestamp".into()))?;

        Ok(Self {
            uid,
            name: payload.name,
            email: payload.email,
            picture: payload.picture,
            expires_at,
        })
    }

    /// Check if the token is expired or expires within `buffer_secs`.
    #[must_use]
    pub fn is_near_expiry(&self, buffer_secs: i64) -> bool {
        let threshold = Utc::now() + chrono::TimeDelta::seconds(buffer_secs);
        self.expires_at <= threshold
    }
}
