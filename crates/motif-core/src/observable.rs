//! Watch-backed observable state container.
//!
//! Every Motif store keeps its state in an [`Observable`]. Readers take a
//! [`snapshot`](Observable::snapshot); subscribers hold a
//! [`watch::Receiver`] and unsubscribe by dropping it. Mutation goes through
//! the owning store's operations, which call [`update`](Observable::update)
//! and friends; the container itself is never handed out mutably.

use tokio::sync::watch;

#[derive(Debug)]
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> Observable<T> {
    #[must_use]
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Clone of the current state.
    #[must_use]
    pub fn snapshot(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Run `f` against the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Subscribe to changes. The receiver starts with the current state marked
    /// as seen.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Mutate the state in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Mutate the state; subscribers are notified only when `f` returns `true`.
    pub fn update_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        self.tx.send_if_modified(f)
    }

    /// Replace the state and notify subscribers. Returns the previous state.
    pub fn replace(&self, value: T) -> T {
        self.tx.send_replace(value)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_updates() {
        let state = Observable::new(1_u32);
        state.update(|n| *n += 1);
        assert_eq!(state.snapshot(), 2);
        assert_eq!(state.replace(10), 2);
        assert_eq!(state.read(|n| *n * 2), 20);
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let state = Observable::new(String::from("idle"));
        let mut rx = state.subscribe();
        state.update(|s| *s = "busy".into());
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), "busy");
    }

    #[test]
    fn update_if_false_does_not_notify() {
        let state = Observable::new(0_u8);
        let rx = state.subscribe();
        assert!(!state.update_if(|_| false));
        assert!(!rx.has_changed().unwrap());
        assert!(state.update_if(|n| {
            *n = 3;
            true
        }));
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn dropping_receiver_unsubscribes() {
        let state = Observable::new(0_u8);
        let rx = state.subscribe();
        assert_eq!(state.subscriber_count(), 1);
        drop(rx);
        assert_eq!(state.subscriber_count(), 0);
    }
}
