//! Session/profile store.
//!
//! Tracks the signed-in user and their saved collections. On every auth state
//! change the user is published immediately with empty collections, then
//! hydrated from the profile document in the background. Saves are applied
//! locally first and reverted if the remote write fails.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use motif_auth::{AuthProvider, AuthUser};
use motif_core::entities::{DecoratedResult, SavedItem, SessionUser};
use motif_core::enums::{SavedList, SessionPhase};
use motif_core::{Observable, ToastStore};
use serde::Serialize;
use tokio::sync::watch;

use crate::error::ProfileError;
use crate::profile::{TagRecord, UserDocument};
use crate::repo::ProfileRepo;

pub const SIGN_IN_FAILED_TOAST: &str = "Sign-in failed. Please try again.";
pub const SIGN_OUT_FAILED_TOAST: &str = "Sign-out failed. Please try again.";
pub const SIGNED_OUT_TOAST: &str = "Signed out.";
pub const HYDRATION_FAILED_TOAST: &str = "Couldn't load your saved movies.";
pub const UNVERIFIED_TOAST: &str = "This title can't be saved yet.";
pub const TAG_FAILED_TOAST: &str = "Couldn't submit your tag.";

/// A save whose remote write has not completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingSave {
    pub list: SavedList,
    pub id: i64,
    pub adding: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub user: Option<SessionUser>,
    /// Whether `user`'s collections reflect the profile document.
    pub hydrated: bool,
    pub pending: Vec<PendingSave>,
    /// Removals confirmed since the user was published. A hydration read
    /// issued before they landed must not bring the items back.
    #[serde(skip)]
    settled_removals: Vec<(SavedList, i64)>,
}

impl SessionState {
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    #[must_use]
    pub fn is_saved(&self, list: SavedList, id: i64) -> bool {
        self.user.as_ref().is_some_and(|u| u.contains(list, id))
    }
}

/// Handle to the session store. Clones share state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

struct Inner {
    provider: Arc<dyn AuthProvider>,
    repo: ProfileRepo,
    toasts: ToastStore,
    state: Observable<SessionState>,
    initialized: AtomicBool,
    /// Bumped on every auth state change; hydrations from older generations
    /// are discarded.
    generation: AtomicU64,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("repo", &self.inner.repo)
            .field("initialized", &self.inner.initialized.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

enum LocalChange {
    Added,
    Removed(SavedItem),
}

impl SessionStore {
    #[must_use]
    pub fn new(provider: Arc<dyn AuthProvider>, repo: ProfileRepo, toasts: ToastStore) -> Self {
        Self {
            inner: Arc::new(Inner {
                provider,
                repo,
                toasts,
                state: Observable::default(),
                initialized: AtomicBool::new(false),
                generation: AtomicU64::new(0),
            }),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.inner.state.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Subscribe to the auth provider. Must be called once, from within a
    /// tokio runtime, before any other operation.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::AlreadyInitialized`] on a second call.
    pub fn init(&self) -> Result<(), ProfileError> {
        if self.inner.initialized.swap(true, Ordering::SeqCst) {
            return Err(ProfileError::AlreadyInitialized);
        }

        let mut rx = self.inner.provider.subscribe();
        let current = rx.borrow_and_update().clone();
        self.inner.apply_auth_state(current);

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let user = rx.borrow_and_update().clone();
                let Some(inner) = weak.upgrade() else { break };
                inner.apply_auth_state(user);
            }
            tracing::debug!("auth listener stopped");
        });
        Ok(())
    }

    fn ensure_initialized(&self) -> Result<(), ProfileError> {
        if self.inner.initialized.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ProfileError::NotInitialized)
        }
    }

    /// Run the interactive sign-in flow and wait until the user is published.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Auth`] after showing an error toast if sign-in
    /// fails.
    pub async fn login(&self) -> Result<AuthUser, ProfileError> {
        self.ensure_initialized()?;
        self.inner.state.update_if(|s| {
            if s.phase.can_transition_to(SessionPhase::SigningIn) {
                s.phase = SessionPhase::SigningIn;
                true
            } else {
                false
            }
        });

        match self.inner.provider.sign_in().await {
            Ok(user) => {
                let mut rx = self.inner.state.subscribe();
                if rx
                    .wait_for(|s| s.uid() == Some(user.uid.as_str()))
                    .await
                    .is_err()
                {
                    tracing::warn!(uid = %user.uid, "session state closed before sign-in was published");
                }
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "sign-in failed");
                self.inner.toasts.error(SIGN_IN_FAILED_TOAST);
                self.inner.state.update_if(|s| {
                    if s.phase == SessionPhase::SigningIn {
                        s.phase = if s.user.is_some() {
                            SessionPhase::SignedIn
                        } else {
                            SessionPhase::SignedOut
                        };
                        true
                    } else {
                        false
                    }
                });
                Err(e.into())
            }
        }
    }

    /// End the provider session and clear local state.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Auth`] after showing an error toast if the
    /// provider fails to sign out; local state is kept in that case.
    pub async fn logout(&self) -> Result<(), ProfileError> {
        self.ensure_initialized()?;
        if let Err(e) = self.inner.provider.sign_out().await {
            tracing::warn!(error = %e, "sign-out failed");
            self.inner.toasts.error(SIGN_OUT_FAILED_TOAST);
            return Err(e.into());
        }
        self.inner.apply_auth_state(None);
        self.inner.toasts.success(SIGNED_OUT_TOAST);
        Ok(())
    }

    /// Add `item` to, or remove it from, `list`.
    ///
    /// The local collection changes immediately (add is idempotent by id,
    /// remove filters by id) and the item is tracked as pending until the
    /// remote write completes. If the write fails the local change is
    /// reverted and an error toast is shown.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::NotSignedIn`] without a signed-in user, or the
    /// remote write's error.
    pub async fn toggle_saved_item(
        &self,
        list: SavedList,
        item: SavedItem,
        adding: bool,
    ) -> Result<(), ProfileError> {
        let uid = self
            .inner
            .state
            .read(|s| s.uid().map(str::to_string))
            .ok_or(ProfileError::NotSignedIn)?;
        let pending = PendingSave {
            list,
            id: item.id,
            adding,
        };

        let mut change = None;
        self.inner.state.update(|s| {
            if let Some(user) = s.user.as_mut() {
                if adding {
                    if user.insert(list, item.clone()) {
                        change = Some(LocalChange::Added);
                    }
                } else if let Some(removed) = user.remove(list, item.id) {
                    change = Some(LocalChange::Removed(removed));
                }
            }
            s.pending.push(pending);
        });

        // Removal must send the exact stored record.
        let remote_item = match &change {
            Some(LocalChange::Removed(stored)) => stored,
            _ => &item,
        };
        let result = self
            .inner
            .repo
            .toggle_interaction(&uid, list, remote_item, adding)
            .await;

        self.inner.state.update(|s| {
            if let Some(index) = s.pending.iter().position(|p| *p == pending) {
                s.pending.remove(index);
            }
            let same_user = s.uid() == Some(uid.as_str());
            if result.is_ok() && !adding && same_user && !s.hydrated {
                s.settled_removals.push((list, item.id));
            }
            if result.is_err() {
                let Some(user) = s.user.as_mut().filter(|u| u.id == uid) else {
                    return;
                };
                match change {
                    Some(LocalChange::Added) => {
                        user.remove(list, item.id);
                    }
                    Some(LocalChange::Removed(stored)) => {
                        user.insert(list, stored);
                    }
                    None => {}
                }
            }
        });

        result.map_err(|e| {
            tracing::error!(%uid, %list, id = item.id, adding, error = %e, "save failed; reverted");
            self.inner
                .toasts
                .error(format!("Couldn't update your {list}. Please try again."));
            e.into()
        })
    }

    /// [`toggle_saved_item`](Self::toggle_saved_item) for a search result.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Core`] for unverified results, which are never
    /// saved.
    pub async fn toggle_result(
        &self,
        list: SavedList,
        result: &DecoratedResult,
        adding: bool,
    ) -> Result<(), ProfileError> {
        let item = SavedItem::try_from(result).inspect_err(|e| {
            tracing::warn!(error = %e, "refusing to save result");
            self.inner.toasts.error(UNVERIFIED_TOAST);
        })?;
        self.toggle_saved_item(list, item, adding).await
    }

    /// Record a tag contribution for the signed-in user. Local state is not
    /// changed.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::NotSignedIn`] without a signed-in user, or the
    /// remote write's error.
    pub async fn submit_tag(&self, movie_id: i64, tag: &str) -> Result<TagRecord, ProfileError> {
        let uid = self
            .inner
            .state
            .read(|s| s.uid().map(str::to_string))
            .ok_or(ProfileError::NotSignedIn)?;
        self.inner
            .repo
            .submit_tag(&uid, movie_id, tag)
            .await
            .map_err(|e| {
                tracing::error!(%uid, movie_id, error = %e, "tag submission failed");
                self.inner.toasts.error(TAG_FAILED_TOAST);
                e.into()
            })
    }
}

impl Inner {
    fn apply_auth_state(self: &Arc<Self>, user: Option<AuthUser>) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let Some(user) = user else {
            self.repo.authorize(None);
            self.state.replace(SessionState::default());
            tracing::debug!(generation, "session signed out");
            return;
        };

        self.repo.authorize(Some(&user.id_token));
        let session_user = SessionUser::new(
            user.uid.clone(),
            user.display_name.clone(),
            user.email.clone(),
            user.photo_url.clone(),
        );
        self.state.replace(SessionState {
            phase: SessionPhase::SignedIn,
            user: Some(session_user),
            ..SessionState::default()
        });
        tracing::debug!(generation, uid = %user.uid, "session signed in; hydrating");

        let inner = Arc::clone(self);
        tokio::spawn(async move { inner.hydrate(generation, user).await });
    }

    async fn hydrate(&self, generation: u64, user: AuthUser) {
        let result = self
            .repo
            .load_or_create(&user.uid, &user.display_name, user.email.as_deref())
            .await;

        match result {
            Ok(document) => {
                let applied = self.state.update_if(|s| {
                    if self.generation.load(Ordering::SeqCst) != generation {
                        return false;
                    }
                    let mut skipped: Vec<(SavedList, i64)> = s
                        .pending
                        .iter()
                        .filter(|p| !p.adding)
                        .map(|p| (p.list, p.id))
                        .collect();
                    skipped.append(&mut s.settled_removals);
                    let Some(current) = s.user.as_mut().filter(|u| u.id == user.uid) else {
                        return false;
                    };
                    merge(current, document, &skipped);
                    s.hydrated = true;
                    true
                });
                if applied {
                    tracing::debug!(generation, uid = %user.uid, "session hydrated");
                } else {
                    tracing::debug!(generation, uid = %user.uid, "discarding stale hydration");
                }
            }
            Err(e) => {
                if self.generation.load(Ordering::SeqCst) == generation {
                    tracing::warn!(uid = %user.uid, error = %e, "profile hydration failed");
                    self.toasts.error(HYDRATION_FAILED_TOAST);
                }
            }
        }
    }
}

/// Merge fetched collections into the optimistic user: fetched items first,
/// then local additions. Fetched items in `removed` (removals in flight or
/// settled after the read was issued) are skipped.
fn merge(user: &mut SessionUser, document: UserDocument, removed: &[(SavedList, i64)]) {
    let UserDocument {
        hearts, watchlist, ..
    } = document;
    for (list, fetched) in [(SavedList::Hearts, hearts), (SavedList::Watchlist, watchlist)] {
        let mut merged: Vec<SavedItem> = fetched
            .into_iter()
            .filter(|i| !removed.contains(&(list, i.id)))
            .collect();
        merged.extend(user.collection(list).iter().cloned());
        user.replace_collection(list, merged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(id: i64) -> SavedItem {
        SavedItem::new(id, format!("Movie {id}"), "2001", None).unwrap()
    }

    #[test]
    fn merge_keeps_local_additions_and_skips_removals() {
        let mut user = SessionUser::new("u1", "Ada", None, None);
        user.insert(SavedList::Hearts, item(3));
        let document = UserDocument {
            hearts: vec![item(1), item(2), item(3)],
            watchlist: vec![item(9), item(2)],
            ..UserDocument::default()
        };

        merge(&mut user, document, &[(SavedList::Hearts, 2)]);
        assert_eq!(user.hearts, vec![item(1), item(3)]);
        assert_eq!(user.watchlist, vec![item(9), item(2)]);
    }
}
