use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated; run `motif auth login`")]
    NotAuthenticated,

    #[error("session expired; run `motif auth login` again")]
    TokenExpired,

    #[error("sign-in is not configured: set auth.sign_in_url")]
    NotConfigured,

    #[error("invalid ID token: {0}")]
    InvalidToken(String),

    #[error("browser sign-in failed: {0}")]
    BrowserFlowFailed(String),

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("sign-in rejected: {0}")]
    Rejected(String),
}
