//! Session store scenarios against the in-memory document store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use motif_auth::{AuthProvider, AuthUser, StaticAuthProvider};
use motif_core::ToastStore;
use motif_core::entities::{RawSearchResult, SavedItem};
use motif_core::enums::{SavedList, SessionPhase, ToastKind};
use motif_profile::document::Fields;
use motif_profile::repo::USERS_COLLECTION;
use motif_profile::session::{SIGN_IN_FAILED_TOAST, SIGNED_OUT_TOAST};
use motif_profile::updates::FieldUpdate;
use motif_profile::{
    DocumentStore, MemoryStore, ProfileError, ProfileRepo, SessionStore, StoreError, UserDocument,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn user(uid: &str) -> AuthUser {
    AuthUser {
        uid: uid.into(),
        display_name: format!("User {uid}"),
        email: Some(format!("{uid}@example.com")),
        photo_url: None,
        id_token: format!("token-{uid}"),
    }
}

fn item(id: i64) -> SavedItem {
    SavedItem::new(id, format!("Movie {id}"), "1999", None).unwrap()
}

struct Harness {
    provider: Arc<StaticAuthProvider>,
    store: Arc<MemoryStore>,
    toasts: ToastStore,
    session: SessionStore,
}

fn harness(uid: &str) -> Harness {
    let provider = Arc::new(StaticAuthProvider::new(user(uid)));
    let store = Arc::new(MemoryStore::new());
    let toasts = ToastStore::new(Duration::from_secs(3600));
    let session = SessionStore::new(
        Arc::clone(&provider) as Arc<dyn AuthProvider>,
        ProfileRepo::new(Arc::clone(&store) as _),
        toasts.clone(),
    );
    Harness {
        provider,
        store,
        toasts,
        session,
    }
}

fn seed(store: &MemoryStore, uid: &str, hearts: &[i64]) {
    let mut document = UserDocument::new(format!("User {uid}"), None);
    document.hearts = hearts.iter().copied().map(item).collect();
    let serde_json::Value::Object(fields) = serde_json::to_value(document).unwrap() else {
        unreachable!()
    };
    store.insert(USERS_COLLECTION, uid, fields);
}

async fn signed_in(h: &Harness) {
    h.session.init().unwrap();
    h.session.login().await.unwrap();
    h.session.subscribe().wait_for(|s| s.hydrated).await.unwrap();
}

fn hearts(h: &Harness) -> Vec<i64> {
    h.session
        .snapshot()
        .user
        .map(|u| u.hearts.iter().map(|i| i.id).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn init_twice_is_rejected() {
    let h = harness("u1");
    h.session.init().unwrap();
    assert!(matches!(h.session.init(), Err(ProfileError::AlreadyInitialized)));
}

#[tokio::test]
async fn operations_need_init_and_a_user() {
    let h = harness("u1");
    assert!(matches!(h.session.login().await, Err(ProfileError::NotInitialized)));

    h.session.init().unwrap();
    assert_eq!(h.session.snapshot().phase, SessionPhase::SignedOut);
    assert!(matches!(
        h.session.toggle_saved_item(SavedList::Hearts, item(1), true).await,
        Err(ProfileError::NotSignedIn)
    ));
    assert!(matches!(
        h.session.submit_tag(1, "cozy").await,
        Err(ProfileError::NotSignedIn)
    ));
}

#[tokio::test]
async fn first_login_creates_profile() {
    let h = harness("u1");
    signed_in(&h).await;

    let state = h.session.snapshot();
    assert_eq!(state.phase, SessionPhase::SignedIn);
    assert_eq!(state.uid(), Some("u1"));
    assert_eq!(h.store.authorized_token().as_deref(), Some("token-u1"));

    let stored = h.store.document(USERS_COLLECTION, "u1").unwrap();
    assert_eq!(stored["name"], json!("User u1"));
    assert_eq!(stored["email"], json!("u1@example.com"));
    assert_eq!(stored["tags_contributed_count"], json!(0));
    assert_eq!(stored["hearts"], json!([]));
    assert_eq!(stored["watchlist"], json!([]));
    assert_eq!(stored["tags_history"], json!([]));
}

#[tokio::test]
async fn login_hydrates_existing_collections() {
    let h = harness("u1");
    seed(&h.store, "u1", &[4, 5]);
    signed_in(&h).await;
    assert_eq!(hearts(&h), vec![4, 5]);
}

#[tokio::test(start_paused = true)]
async fn user_is_published_before_hydration() {
    let h = harness("u1");
    seed(&h.store, "u1", &[4]);
    h.store.delay_reads(Some(Duration::from_millis(500)));
    h.session.init().unwrap();

    h.provider.publish(Some(user("u1")));
    tokio::time::sleep(Duration::from_millis(10)).await;
    let state = h.session.snapshot();
    assert_eq!(state.uid(), Some("u1"));
    assert!(!state.hydrated);
    assert!(hearts(&h).is_empty());

    h.session.subscribe().wait_for(|s| s.hydrated).await.unwrap();
    assert_eq!(hearts(&h), vec![4]);
}

#[tokio::test(start_paused = true)]
async fn stale_hydration_is_discarded() {
    let h = harness("a");
    seed(&h.store, "a", &[1]);
    seed(&h.store, "b", &[2]);
    h.session.init().unwrap();

    h.store.delay_reads(Some(Duration::from_millis(500)));
    h.provider.publish(Some(user("a")));
    tokio::time::sleep(Duration::from_millis(10)).await;

    h.store.delay_reads(Some(Duration::from_millis(50)));
    h.provider.publish(Some(user("b")));
    h.session.subscribe().wait_for(|s| s.hydrated).await.unwrap();
    assert_eq!(hearts(&h), vec![2]);

    // a's read completes now and must not touch b's session.
    tokio::time::sleep(Duration::from_secs(1)).await;
    let state = h.session.snapshot();
    assert_eq!(state.uid(), Some("b"));
    assert_eq!(hearts(&h), vec![2]);
}

#[tokio::test]
async fn saving_twice_keeps_one_entry() {
    let h = harness("u1");
    signed_in(&h).await;

    h.session.toggle_saved_item(SavedList::Hearts, item(7), true).await.unwrap();
    h.session.toggle_saved_item(SavedList::Hearts, item(7), true).await.unwrap();

    assert_eq!(hearts(&h), vec![7]);
    assert!(h.session.snapshot().pending.is_empty());
    let stored = h.store.document(USERS_COLLECTION, "u1").unwrap();
    assert_eq!(stored["hearts"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn removal_sends_the_stored_record() {
    let h = harness("u1");
    seed(&h.store, "u1", &[7]);
    signed_in(&h).await;

    // Caller only knows the id; the stored record is what gets removed.
    let by_id = SavedItem::new(7, "", "", None).unwrap();
    h.session.toggle_saved_item(SavedList::Hearts, by_id, false).await.unwrap();

    assert!(hearts(&h).is_empty());
    let stored = h.store.document(USERS_COLLECTION, "u1").unwrap();
    assert_eq!(stored["hearts"], json!([]));
}

#[tokio::test]
async fn entries_in_older_shapes_can_be_removed() {
    let h = harness("u1");
    let mut fields = Fields::new();
    fields.insert("name".into(), json!("User u1"));
    fields.insert("hearts".into(), json!([{"id": 7, "title": "Heat", "year": "1995"}, 9]));
    fields.insert("watchlist".into(), json!([11]));
    h.store.insert(USERS_COLLECTION, "u1", fields);
    signed_in(&h).await;
    assert_eq!(hearts(&h), vec![7, 9]);

    for (list, id) in [(SavedList::Hearts, 7), (SavedList::Hearts, 9), (SavedList::Watchlist, 11)] {
        let by_id = SavedItem::new(id, "", "", None).unwrap();
        h.session.toggle_saved_item(list, by_id, false).await.unwrap();
    }

    let state = h.session.snapshot();
    assert!(hearts(&h).is_empty());
    assert!(!state.is_saved(SavedList::Watchlist, 11));
    let stored = h.store.document(USERS_COLLECTION, "u1").unwrap();
    assert_eq!(stored["hearts"], json!([]));
    assert_eq!(stored["watchlist"], json!([]));
}

/// Takes its snapshot when the read starts and returns it after a delay, like
/// a slow response carrying an older version of the document.
struct SnapshotThenWait {
    inner: Arc<MemoryStore>,
    delay: Duration,
}

#[async_trait]
impl DocumentStore for SnapshotThenWait {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Fields>, StoreError> {
        let snapshot = self.inner.get(collection, id).await?;
        tokio::time::sleep(self.delay).await;
        Ok(snapshot)
    }

    async fn create(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.inner.create(collection, id, fields).await
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        updates: &[FieldUpdate],
    ) -> Result<(), StoreError> {
        self.inner.update(collection, id, updates).await
    }
}

#[tokio::test(start_paused = true)]
async fn removal_settled_during_hydration_stays_removed() {
    let provider = Arc::new(StaticAuthProvider::new(user("u1")));
    let memory = Arc::new(MemoryStore::new());
    seed(&memory, "u1", &[7, 8]);
    let store = SnapshotThenWait {
        inner: Arc::clone(&memory),
        delay: Duration::from_millis(200),
    };
    let session = SessionStore::new(
        Arc::clone(&provider) as Arc<dyn AuthProvider>,
        ProfileRepo::new(Arc::new(store)),
        ToastStore::new(Duration::from_secs(3600)),
    );
    session.init().unwrap();

    provider.publish(Some(user("u1")));
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(!session.snapshot().hydrated);

    session
        .toggle_saved_item(SavedList::Hearts, item(7), false)
        .await
        .unwrap();
    let stored = memory.document(USERS_COLLECTION, "u1").unwrap();
    assert_eq!(stored["hearts"].as_array().map(Vec::len), Some(1));

    session.subscribe().wait_for(|s| s.hydrated).await.unwrap();
    let state = session.snapshot();
    assert!(!state.is_saved(SavedList::Hearts, 7));
    assert!(state.is_saved(SavedList::Hearts, 8));
}

#[tokio::test]
async fn failed_save_is_reverted_with_error_toast() {
    let h = harness("u1");
    signed_in(&h).await;
    h.store.fail_writes(Some("offline"));

    let err = h
        .session
        .toggle_saved_item(SavedList::Watchlist, item(3), true)
        .await
        .unwrap_err();
    assert!(matches!(err, ProfileError::Store(_)));

    let state = h.session.snapshot();
    assert!(!state.is_saved(SavedList::Watchlist, 3));
    assert!(state.pending.is_empty());
    let toast = h.toasts.current().unwrap();
    assert_eq!(toast.kind, ToastKind::Error);
    assert!(toast.message.contains("watchlist"));
}

#[tokio::test]
async fn failed_removal_restores_item() {
    let h = harness("u1");
    seed(&h.store, "u1", &[8]);
    signed_in(&h).await;
    h.store.fail_writes(Some("offline"));

    assert!(
        h.session
            .toggle_saved_item(SavedList::Hearts, item(8), false)
            .await
            .is_err()
    );
    assert_eq!(hearts(&h), vec![8]);
}

#[tokio::test]
async fn unverified_results_are_never_saved() {
    let h = harness("u1");
    signed_in(&h).await;

    let raw: RawSearchResult = serde_json::from_value(json!({"title": "Mystery"})).unwrap();
    let result = motif_core::decorate(&raw);
    let err = h
        .session
        .toggle_result(SavedList::Hearts, &result, true)
        .await
        .unwrap_err();
    assert!(matches!(err, ProfileError::Core(_)));
    assert!(hearts(&h).is_empty());
    assert_eq!(h.toasts.current().map(|t| t.kind), Some(ToastKind::Error));
}

#[tokio::test]
async fn submit_tag_updates_remote_only() {
    let h = harness("u1");
    signed_in(&h).await;
    let before = h.session.snapshot();

    let record = h.session.submit_tag(42, "rainy").await.unwrap();
    assert_eq!(record.movie_id, Some(42));
    assert_eq!(h.session.snapshot(), before);

    let stored = h.store.document(USERS_COLLECTION, "u1").unwrap();
    assert_eq!(stored["tags_contributed_count"], json!(1));
    assert_eq!(stored["tags_history"][0]["tag"], json!("rainy"));
    assert_eq!(stored["tags_history"][0]["movieId"], json!(42));
}

#[tokio::test]
async fn failed_login_shows_toast_and_propagates() {
    let h = harness("u1");
    h.session.init().unwrap();
    h.provider.reject_next_sign_in("popup closed");

    let err = h.session.login().await.unwrap_err();
    assert!(matches!(err, ProfileError::Auth(_)));
    assert_eq!(h.session.snapshot().phase, SessionPhase::SignedOut);
    let toast = h.toasts.current().unwrap();
    assert_eq!((toast.kind, toast.message.as_str()), (ToastKind::Error, SIGN_IN_FAILED_TOAST));
}

#[tokio::test]
async fn logout_clears_session() {
    let h = harness("u1");
    signed_in(&h).await;
    h.session.toggle_saved_item(SavedList::Hearts, item(1), true).await.unwrap();

    h.session.logout().await.unwrap();
    let state = h.session.snapshot();
    assert_eq!(state.phase, SessionPhase::SignedOut);
    assert!(state.user.is_none());
    assert_eq!(h.store.authorized_token(), None);
    assert_eq!(h.toasts.current().map(|t| t.message), Some(SIGNED_OUT_TOAST.to_string()));
}
