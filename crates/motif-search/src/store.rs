//! Search interaction store.
//!
//! Owns the query text, the active context filters, and the decorated result
//! list. Every search takes a sequence number when it is issued; a completion
//! is applied only if no newer search (or reset) has been issued since.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use motif_core::entities::{ContextFilters, DecoratedResult, RawSearchResult};
use motif_core::enums::{ContextCategory, SearchPhase};
use motif_core::{Observable, ToastStore, decorate};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;

use crate::client::{SearchBackend, SearchRequest};
use crate::error::SearchError;

/// Result-count hint sent with every request unless overridden.
pub const DEFAULT_TOP_K: u32 = 9;

/// Message shown in the error toast when a search fails.
pub const SEARCH_FAILED_TOAST: &str = "Failed to connect to Motif Core.";

/// Observable state of a search session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchState {
    pub query: String,
    pub filters: ContextFilters,
    pub results: Vec<DecoratedResult>,
    pub phase: SearchPhase,
    pub is_loading: bool,
    pub has_searched: bool,
    pub error: Option<String>,
    pub selected: Option<DecoratedResult>,
}

impl SearchState {
    /// Move to `next` if the phase machine allows it.
    fn enter(&mut self, next: SearchPhase) -> bool {
        if self.phase.can_transition_to(next) {
            self.phase = next;
            true
        } else {
            tracing::warn!(from = %self.phase, to = %next, "rejected search phase transition");
            false
        }
    }
}

/// What happened to a call to [`SearchStore::search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The effective query was empty; nothing was sent.
    Skipped,
    /// The response was applied; carries the number of decorated results.
    Applied(usize),
    /// A newer search or a reset was issued while this one was in flight, so
    /// its completion was discarded.
    Superseded,
}

/// Handle to the search store. Clones share state.
#[derive(Clone)]
pub struct SearchStore {
    inner: Arc<Inner>,
}

struct Inner {
    backend: Arc<dyn SearchBackend>,
    state: Observable<SearchState>,
    toasts: ToastStore,
    top_k: u32,
    latest: AtomicU64,
}

impl std::fmt::Debug for SearchStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchStore")
            .field("top_k", &self.inner.top_k)
            .field("latest", &self.inner.latest.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl SearchStore {
    #[must_use]
    pub fn new(backend: Arc<dyn SearchBackend>, toasts: ToastStore) -> Self {
        Self::with_top_k(backend, toasts, DEFAULT_TOP_K)
    }

    #[must_use]
    pub fn with_top_k(backend: Arc<dyn SearchBackend>, toasts: ToastStore, top_k: u32) -> Self {
        Self {
            inner: Arc::new(Inner {
                backend,
                state: Observable::default(),
                toasts,
                top_k,
                latest: AtomicU64::new(0),
            }),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SearchState {
        self.inner.state.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.inner.state.subscribe()
    }

    pub fn set_query(&self, text: impl Into<String>) {
        let text = text.into();
        self.inner.state.update(|s| s.query = text);
    }

    /// Toggle a context filter. Selecting the active value clears it.
    pub fn toggle_context_filter(&self, category: ContextCategory, value: &str) {
        self.inner.state.update(|s| s.filters.toggle(category, value));
    }

    pub fn select_result(&self, result: DecoratedResult) {
        self.inner.state.update(|s| s.selected = Some(result));
    }

    pub fn close_detail(&self) {
        self.inner.state.update_if(|s| s.selected.take().is_some());
    }

    /// Restore the initial state. Any search still in flight is discarded when
    /// it completes.
    pub fn reset(&self) {
        self.inner.latest.fetch_add(1, Ordering::SeqCst);
        self.inner.state.update(|s| {
            if s.enter(SearchPhase::Idle) {
                *s = SearchState::default();
            }
        });
    }

    /// Run a search.
    ///
    /// The effective query is `query_override` when it is non-blank, else the
    /// stored query. A blank effective query is a no-op. Active filter values
    /// are appended to the effective query as free text.
    ///
    /// # Errors
    ///
    /// Returns the [`SearchError`] of a failed request after recording it in
    /// the state and showing an error toast. Previous results are kept.
    pub async fn search(&self, query_override: Option<&str>) -> Result<SearchOutcome, SearchError> {
        let effective = query_override
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map_or_else(|| self.inner.state.read(|s| s.query.trim().to_string()), str::to_string);
        if effective.is_empty() {
            tracing::debug!("search skipped: empty query");
            return Ok(SearchOutcome::Skipped);
        }

        let seq = self.inner.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let mut hints = String::new();
        self.inner.state.update(|s| {
            s.enter(SearchPhase::Searching);
            s.query.clone_from(&effective);
            s.is_loading = true;
            s.has_searched = true;
            s.error = None;
            hints = s.filters.hint_text();
        });

        let request = SearchRequest {
            query: format!("{effective} {hints}").trim().to_string(),
            top_k: self.inner.top_k,
        };
        tracing::info!(seq, query = %request.query, "search issued");

        let response = self.inner.backend.search(&request).await;

        if self.inner.latest.load(Ordering::SeqCst) != seq {
            tracing::debug!(seq, "discarding stale search completion");
            return Ok(SearchOutcome::Superseded);
        }

        match response {
            Ok(items) => {
                let results = decode_results(items);
                let count = results.len();
                let applied = self.inner.state.update_if(|s| {
                    if !s.enter(SearchPhase::Succeeded) {
                        return false;
                    }
                    s.results = results;
                    s.is_loading = false;
                    true
                });
                if !applied {
                    return Ok(SearchOutcome::Superseded);
                }
                tracing::info!(seq, count, "search succeeded");
                Ok(SearchOutcome::Applied(count))
            }
            Err(e) => {
                tracing::error!(seq, error = %e, "search failed");
                self.inner.toasts.error(SEARCH_FAILED_TOAST);
                let message = e.to_string();
                self.inner.state.update_if(|s| {
                    if !s.enter(SearchPhase::Failed) {
                        return false;
                    }
                    s.error = Some(message);
                    s.is_loading = false;
                    true
                });
                Err(e)
            }
        }
    }
}

/// Decode and decorate each raw item independently, dropping malformed ones.
fn decode_results(items: Vec<Value>) -> Vec<DecoratedResult> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<RawSearchResult>(item) {
            Ok(raw) => Some(decorate(&raw)),
            Err(e) => {
                tracing::warn!(index, error = %e, "dropping malformed search result");
                None
            }
        })
        .collect()
}
