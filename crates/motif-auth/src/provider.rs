//! The authentication provider seam and its implementations.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::watch;

use crate::browser_flow;
use crate::claims::IdTokenClaims;
use crate::error::AuthError;
use crate::token_store;

/// Tokens expiring within this window are treated as expired on restore.
const EXPIRY_BUFFER_SECS: i64 = 60;

const FALLBACK_DISPLAY_NAME: &str = "Motif User";

/// Identity published by an [`AuthProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthUser {
    pub uid: String,
    pub display_name: String,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    /// Bearer credential for the document store.
    #[serde(skip)]
    pub id_token: String,
}

impl AuthUser {
    /// Build the identity carried by a provider ID token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the token's claims cannot be decoded.
    pub fn from_id_token(id_token: &str) -> Result<Self, AuthError> {
        let claims = IdTokenClaims::decode(id_token)?;
        Ok(Self::from_claims(claims, id_token))
    }

    #[must_use]
    pub fn from_claims(claims: IdTokenClaims, id_token: impl Into<String>) -> Self {
        let display_name = claims
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| {
                claims
                    .email
                    .as_deref()
                    .and_then(|e| e.split('@').next())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| FALLBACK_DISPLAY_NAME.to_string());
        Self {
            uid: claims.uid,
            display_name,
            email: claims.email,
            photo_url: claims.picture,
            id_token: id_token.into(),
        }
    }
}

/// External identity provider.
///
/// State changes are delivered through the watch channel returned by
/// [`subscribe`](AuthProvider::subscribe): `Some(user)` when signed in,
/// `None` when signed out.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>>;

    /// Run the interactive sign-in flow.
    async fn sign_in(&self) -> Result<AuthUser, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Browser sign-in against a hosted page, with the session kept in the OS
/// keychain (file fallback).
#[derive(Debug)]
pub struct BrowserAuthProvider {
    sign_in_url: String,
    timeout: Duration,
    tx: watch::Sender<Option<AuthUser>>,
}

impl BrowserAuthProvider {
    #[must_use]
    pub fn new(sign_in_url: impl Into<String>, timeout: Duration) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            sign_in_url: sign_in_url.into(),
            timeout,
            tx,
        }
    }

    /// Publish the stored session, if one exists and is still valid.
    ///
    /// An expired or undecodable stored token is treated as signed out.
    pub fn restore(&self) -> Option<AuthUser> {
        let (token, source) = token_store::load()?;
        let user = match IdTokenClaims::decode(&token) {
            Ok(claims) if claims.is_near_expiry(EXPIRY_BUFFER_SECS) => {
                tracing::warn!(
                    source = source.as_str(),
                    expires_at = %claims.expires_at,
                    "stored session expired; run `motif auth login`"
                );
                return None;
            }
            Ok(claims) => AuthUser::from_claims(claims, token),
            Err(error) => {
                tracing::warn!(source = source.as_str(), %error, "ignoring stored token");
                return None;
            }
        };
        tracing::debug!(uid = %user.uid, source = source.as_str(), "restored session");
        self.tx.send_replace(Some(user.clone()));
        Some(user)
    }
}

#[async_trait]
impl AuthProvider for BrowserAuthProvider {
    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.tx.subscribe()
    }

    async fn sign_in(&self) -> Result<AuthUser, AuthError> {
        if self.sign_in_url.is_empty() {
            return Err(AuthError::NotConfigured);
        }
        let token = browser_flow::login(&self.sign_in_url, self.timeout).await?;
        let user = AuthUser::from_id_token(&token)?;
        token_store::store(&token)?;
        tracing::info!(uid = %user.uid, "signed in");
        self.tx.send_replace(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        token_store::delete()?;
        self.tx.send_replace(None);
        tracing::info!("signed out");
        Ok(())
    }
}

/// In-process provider with a fixed identity.
#[derive(Debug)]
pub struct StaticAuthProvider {
    user: AuthUser,
    reject_with: Mutex<Option<String>>,
    tx: watch::Sender<Option<AuthUser>>,
}

impl StaticAuthProvider {
    /// A provider that starts signed out and signs in as `user`.
    #[must_use]
    pub fn new(user: AuthUser) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            user,
            reject_with: Mutex::new(None),
            tx,
        }
    }

    /// Make the next sign-in fail with `reason`.
    pub fn reject_next_sign_in(&self, reason: impl Into<String>) {
        if let Ok(mut slot) = self.reject_with.lock() {
            *slot = Some(reason.into());
        }
    }

    /// Publish a state change as if it came from the provider.
    pub fn publish(&self, user: Option<AuthUser>) {
        self.tx.send_replace(user);
    }
}

#[async_trait]
impl AuthProvider for StaticAuthProvider {
    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.tx.subscribe()
    }

    async fn sign_in(&self) -> Result<AuthUser, AuthError> {
        let rejection = self.reject_with.lock().ok().and_then(|mut slot| slot.take());
        if let Some(reason) = rejection {
            return Err(AuthError::Rejected(reason));
        }
        self.tx.send_replace(Some(self.user.clone()));
        Ok(self.user.clone())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.tx.send_replace(None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::tests::make_jwt;
    use pretty_assertions::assert_eq;

    fn ada() -> AuthUser {
        AuthUser {
            uid: "u1".into(),
            display_name: "Ada".into(),
            email: None,
            photo_url: None,
            id_token: "t".into(),
        }
    }

    #[test]
    fn display_name_falls_back_to_email_then_placeholder() {
        let jwt = make_jwt(r#"{"sub":"u1","email":"grace@example.com","exp":4102444800}"#);
        assert_eq!(AuthUser::from_id_token(&jwt).unwrap().display_name, "grace");

        let jwt = make_jwt(r#"{"sub":"u1","name":" ","exp":4102444800}"#);
        let user = AuthUser::from_id_token(&jwt).unwrap();
        assert_eq!(user.display_name, FALLBACK_DISPLAY_NAME);
        assert_eq!(user.id_token, jwt);
    }

    #[test]
    fn serialized_user_omits_token() {
        let value = serde_json::to_value(ada()).unwrap();
        assert!(value.get("id_token").is_none());
        assert_eq!(value["uid"], "u1");
    }

    #[tokio::test]
    async fn static_provider_publishes_sign_in_and_out() {
        let provider = StaticAuthProvider::new(ada());
        let mut rx = provider.subscribe();
        assert_eq!(*rx.borrow(), None);

        provider.sign_in().await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_ref().map(|u| u.uid.clone()), Some("u1".into()));

        provider.sign_out().await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), None);
    }

    #[tokio::test]
    async fn static_provider_rejection_is_one_shot() {
        let provider = StaticAuthProvider::new(ada());
        provider.reject_next_sign_in("popup closed");
        assert!(matches!(provider.sign_in().await, Err(AuthError::Rejected(_))));
        assert!(provider.sign_in().await.is_ok());
    }

    #[tokio::test]
    async fn browser_provider_requires_sign_in_url() {
        let provider = BrowserAuthProvider::new("", Duration::from_secs(1));
        assert!(matches!(provider.sign_in().await, Err(AuthError::NotConfigured)));
    }
}
