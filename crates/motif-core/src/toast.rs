//! Single-slot transient notifications.
//!
//! The newest toast always wins: `show` replaces whatever is in the slot and
//! restarts the auto-clear timer, cancelling the previous one. There is no
//! queue.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::enums::ToastKind;
use crate::observable::Observable;

/// Default time a toast stays visible.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

/// Handle to the notification slot. Clones share the slot.
#[derive(Debug, Clone)]
pub struct ToastStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    slot: Observable<Option<Toast>>,
    ttl: Duration,
    generation: AtomicU64,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TTL)
    }
}

impl ToastStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                slot: Observable::new(None),
                ttl,
                generation: AtomicU64::new(0),
                timer: Mutex::new(None),
            }),
        }
    }

    /// The visible toast, if any.
    #[must_use]
    pub fn current(&self) -> Option<Toast> {
        self.inner.slot.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Toast>> {
        self.inner.slot.subscribe()
    }

    /// Show `message`, replacing any visible toast.
    ///
    /// Must be called from within a tokio runtime: the auto-clear timer is a
    /// spawned task.
    pub fn show(&self, message: impl Into<String>, kind: ToastKind) {
        let toast = Toast {
            message: message.into(),
            kind,
        };
        tracing::debug!(kind = %toast.kind, message = %toast.message, "toast");

        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.slot.replace(Some(toast));

        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(inner.ttl).await;
            inner.slot.update_if(|slot| {
                if inner.generation.load(Ordering::SeqCst) == generation && slot.is_some() {
                    *slot = None;
                    true
                } else {
                    false
                }
            });
        });

        let previous = self
            .inner
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Error);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Success);
    }

    /// Clear the slot immediately and cancel the pending timer.
    pub fn dismiss(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(timer) = self
            .inner
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            timer.abort();
        }
        self.inner.slot.update_if(|slot| slot.take().is_some());
    }
}
