use std::sync::Arc;

use anyhow::Context;
use motif_auth::{AuthProvider, BrowserAuthProvider};
use motif_config::MotifConfig;
use motif_core::ToastStore;
use motif_core::enums::ToastKind;
use motif_profile::{DocumentStore, FirestoreStore, MemoryStore, ProfileRepo, SessionStore};
use motif_search::{HttpSearchClient, SearchStore};

use crate::cli::GlobalFlags;

/// Shared application stores, created and initialized once at startup.
pub struct AppContext {
    pub config: MotifConfig,
    pub toasts: ToastStore,
    pub search: SearchStore,
    pub session: SessionStore,
}

impl AppContext {
    /// Build every store and subscribe the session to the auth provider.
    ///
    /// A previously stored sign-in is restored before the session subscribes,
    /// so commands start out signed in when a valid token exists.
    pub fn init(config: MotifConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let toasts = ToastStore::new(config.general.toast_ttl());

        let backend = HttpSearchClient::new(config.search.endpoint.clone(), config.search.timeout())
            .context("failed to build search client")?;
        let top_k = flags.limit.filter(|k| *k > 0).unwrap_or(config.search.top_k);
        let search = SearchStore::with_top_k(Arc::new(backend), toasts.clone(), top_k);

        let provider = BrowserAuthProvider::new(
            config.auth.sign_in_url.clone(),
            config.auth.callback_timeout(),
        );
        if provider.restore().is_none() {
            tracing::debug!("no stored sign-in");
        }

        let store: Arc<dyn DocumentStore> = if config.firebase.is_configured() {
            Arc::new(
                FirestoreStore::new(&config.firebase, config.search.timeout())
                    .context("failed to build Firestore client")?,
            )
        } else {
            tracing::debug!("firebase not configured; profile data is kept in memory");
            Arc::new(MemoryStore::new())
        };
        let repo = ProfileRepo::with_collection(store, config.firebase.users_collection.clone());

        let session = SessionStore::new(
            Arc::new(provider) as Arc<dyn AuthProvider>,
            repo,
            toasts.clone(),
        );
        session
            .init()
            .context("failed to initialize session store")?;

        Ok(Self {
            config,
            toasts,
            search,
            session,
        })
    }

    /// Print the visible notification, if any, to stderr.
    pub fn report_toast(&self, flags: &GlobalFlags) {
        if flags.quiet {
            return;
        }
        if let Some(toast) = self.toasts.current() {
            match toast.kind {
                ToastKind::Error => eprintln!("error: {}", toast.message),
                ToastKind::Success => eprintln!("{}", toast.message),
            }
        }
    }
}
