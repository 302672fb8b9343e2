use super::*;
use crate::error::AdminErrorKind;
use crate::storage::MemoryStorage;
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tokio::sync::oneshot;

// =========================================================
// Mock Components
// =========================================================

enum Reply {
    Now(AdminResult<IdentityGrant>),
    Later(oneshot::Receiver<AdminResult<IdentityGrant>>),
}

/// Identity provider answering from a script. Clones share the script and
/// the call log.
#[derive(Clone, Default)]
struct ScriptedProvider {
    replies: Rc<RefCell<VecDeque<Reply>>>,
    /// (operation, email)
    calls: Rc<RefCell<Vec<(String, String)>>>,
}

impl ScriptedProvider {
    fn reply(&self, result: AdminResult<IdentityGrant>) {
        self.replies.borrow_mut().push_back(Reply::Now(result));
    }

    /// The next call stays pending until the returned sender fires.
    fn hold(&self) -> oneshot::Sender<AdminResult<IdentityGrant>> {
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().push_back(Reply::Later(rx));
        tx
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    async fn answer(&self, op: &str, email: &str) -> AdminResult<IdentityGrant> {
        self.calls
            .borrow_mut()
            .push((op.to_string(), email.to_string()));
        let reply = self.replies.borrow_mut().pop_front();
        match reply {
            Some(Reply::Now(result)) => result,
            Some(Reply::Later(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(AdminError::network("sender dropped"))),
            None => Err(AdminError::network("no scripted reply")),
        }
    }
}

#[async_trait(?Send)]
impl IdentityProvider for ScriptedProvider {
    async fn sign_in(&self, email: &str, _password: &str) -> AdminResult<IdentityGrant> {
        self.answer("sign_in", email).await
    }

    async fn sign_up(&self, email: &str, _password: &str) -> AdminResult<IdentityGrant> {
        self.answer("sign_up", email).await
    }
}

fn grant(token: &str, user_id: &str, email: &str) -> IdentityGrant {
    IdentityGrant {
        token: token.to_string(),
        user_id: user_id.to_string(),
        email: email.to_string(),
        display_name: None,
    }
}

fn new_store() -> (
    SessionStore<ScriptedProvider, MemoryStorage>,
    ScriptedProvider,
    MemoryStorage,
) {
    let provider = ScriptedProvider::default();
    let storage = MemoryStorage::new();
    let store = SessionStore::restore(provider.clone(), storage.clone());
    (store, provider, storage)
}

// =========================================================
// login / register
// =========================================================

#[tokio::test]
async fn test_login_success_sets_session_and_persists() {
    let (store, provider, storage) = new_store();
    provider.reply(Ok(grant("T1", "U1", "a@b.com")));

    let profile = store.login("a@b.com", "x").await.unwrap();

    assert_eq!(
        profile,
        Profile {
            email_address: "a@b.com".into(),
            internal_id: "U1".into(),
            display_name: None,
        }
    );
    let session = store.session();
    assert_eq!(session.credential_token(), Some("T1"));
    assert_eq!(session.profile(), Some(&profile));
    assert!(session.is_authenticated());
    assert!(!session.pending_operation());
    assert!(session.last_error().is_none());

    assert_eq!(storage.get(STORAGE_TOKEN_KEY).as_deref(), Some("T1"));
    let raw = storage.get(STORAGE_PROFILE_KEY).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored, serde_json::json!({ "email": "a@b.com", "localId": "U1" }));
}

#[tokio::test]
async fn test_login_failure_records_error_and_keeps_prior_session() {
    let (store, provider, storage) = new_store();
    provider.reply(Ok(grant("T1", "U1", "a@b.com")));
    store.login("a@b.com", "x").await.unwrap();

    provider.reply(Err(AdminError::provider("400", "INVALID_PASSWORD")));
    let err = store.login("other@b.com", "bad").await.unwrap_err();

    assert_eq!(err.kind, AdminErrorKind::Provider);
    assert_eq!(err.message(), "INVALID_PASSWORD");

    let status = store.status();
    assert!(status.is_authenticated);
    assert!(!status.pending_operation);
    assert_eq!(status.last_error, Some(err));
    assert_eq!(store.credential_token().as_deref(), Some("T1"));
    assert_eq!(storage.get(STORAGE_TOKEN_KEY).as_deref(), Some("T1"));
}

#[tokio::test]
async fn test_successful_login_clears_previous_error() {
    let (store, provider, _) = new_store();
    provider.reply(Err(AdminError::provider("400", "EMAIL_NOT_FOUND")));
    provider.reply(Ok(grant("T2", "U2", "a@b.com")));

    assert!(store.login("a@b.com", "x").await.is_err());
    assert!(store.status().last_error.is_some());

    store.login("a@b.com", "x").await.unwrap();
    assert!(store.status().last_error.is_none());
}

#[tokio::test]
async fn test_register_stamps_display_name() {
    let (store, provider, storage) = new_store();
    provider.reply(Ok(grant("T9", "U9", "new@b.com")));

    let profile = store.register("new@b.com", "pw", " Ada ").await.unwrap();

    assert_eq!(profile.display_name.as_deref(), Some("Ada"));
    assert_eq!(profile.label(), "Ada");
    assert_eq!(provider.calls.borrow()[0].0, "sign_up");
    assert!(storage.get(STORAGE_PROFILE_KEY).unwrap().contains("\"displayName\":\"Ada\""));
}

#[tokio::test]
async fn test_network_failure_is_captured_not_propagated_as_fault() {
    let (store, provider, _) = new_store();
    provider.reply(Err(AdminError::network("offline")));

    let err = store.register("a@b.com", "pw", "A").await.unwrap_err();
    assert_eq!(err.kind, AdminErrorKind::Network);
    assert!(!store.is_authenticated());
    assert_eq!(store.status().last_error.map(|e| e.kind), Some(AdminErrorKind::Network));
}

// =========================================================
// 并发守卫
// =========================================================

#[tokio::test]
async fn test_second_login_while_pending_is_rejected() {
    let (store, provider, _) = new_store();
    let tx = provider.hold();

    let (first, second) = tokio::join!(store.login("a@b.com", "x"), async {
        while !store.status().pending_operation {
            tokio::task::yield_now().await;
        }
        let second = store.register("c@d.com", "y", "C").await;
        // the rejected call must not have touched the session
        assert!(store.status().pending_operation);
        assert!(store.status().last_error.is_none());
        let _ = tx.send(Ok(grant("T1", "U1", "a@b.com")));
        second
    });

    assert_eq!(second.unwrap_err().kind, AdminErrorKind::Busy);
    assert_eq!(first.unwrap().email_address, "a@b.com");
    assert_eq!(provider.call_count(), 1);
    assert_eq!(store.credential_token().as_deref(), Some("T1"));
}

#[tokio::test]
async fn test_stale_login_response_after_logout_is_discarded() {
    let (store, provider, storage) = new_store();
    let tx = provider.hold();

    let (result, _) = tokio::join!(store.login("a@b.com", "x"), async {
        while !store.status().pending_operation {
            tokio::task::yield_now().await;
        }
        store.logout();
        let _ = tx.send(Ok(grant("LATE", "U1", "a@b.com")));
    });

    assert_eq!(result.unwrap_err().kind, AdminErrorKind::Superseded);
    let session = store.session();
    assert!(!session.is_authenticated());
    assert!(session.profile().is_none());
    assert!(!session.pending_operation());
    assert!(session.last_error().is_none());
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_login_after_logout_is_not_blocked_by_stale_call() {
    let (store, provider, _) = new_store();
    let stale = provider.hold();
    provider.reply(Ok(grant("FRESH", "U2", "b@b.com")));

    let (old, fresh) = tokio::join!(store.login("a@b.com", "x"), async {
        while !store.status().pending_operation {
            tokio::task::yield_now().await;
        }
        store.logout();
        let fresh = store.login("b@b.com", "y").await;
        let _ = stale.send(Ok(grant("STALE", "U1", "a@b.com")));
        fresh
    });

    assert_eq!(fresh.unwrap().internal_id, "U2");
    assert_eq!(old.unwrap_err().kind, AdminErrorKind::Superseded);
    assert_eq!(store.credential_token().as_deref(), Some("FRESH"));
}

// =========================================================
// logout / update_profile / restore
// =========================================================

#[tokio::test]
async fn test_logout_clears_everything() {
    let (store, provider, storage) = new_store();
    provider.reply(Err(AdminError::provider("400", "INVALID_PASSWORD")));
    provider.reply(Ok(grant("T1", "U1", "a@b.com")));
    let _ = store.login("a@b.com", "bad").await;
    store.login("a@b.com", "x").await.unwrap();

    store.logout();

    let status = store.status();
    assert!(!status.is_authenticated);
    assert!(status.last_error.is_none());
    assert!(store.session().profile().is_none());
    assert!(!storage.contains(STORAGE_TOKEN_KEY));
    assert!(!storage.contains(STORAGE_PROFILE_KEY));
}

#[test]
fn test_logout_when_already_logged_out() {
    let (store, _, storage) = new_store();
    storage.set("unrelated", "keep").unwrap();
    store.logout();
    store.logout();
    assert!(!store.is_authenticated());
    assert!(!storage.contains(STORAGE_TOKEN_KEY));
    assert!(storage.contains("unrelated"));
    assert_eq!(store.session().generation(), 2);
}

#[tokio::test]
async fn test_update_profile_merges_and_persists() {
    let (store, provider, storage) = new_store();
    provider.reply(Ok(grant("T1", "U1", "a@b.com")));
    store.login("a@b.com", "x").await.unwrap();

    let profile = store
        .update_profile(ProfileUpdate {
            display_name: Some("Shop Admin".into()),
            ..ProfileUpdate::default()
        })
        .unwrap();

    assert_eq!(profile.email_address, "a@b.com");
    assert_eq!(profile.display_name.as_deref(), Some("Shop Admin"));
    assert_eq!(store.credential_token().as_deref(), Some("T1"));

    let restored = SessionStore::restore(ScriptedProvider::default(), storage.clone());
    assert_eq!(restored.session().profile(), Some(&profile));
}

#[test]
fn test_update_profile_requires_session() {
    let (store, _, storage) = new_store();
    let err = store
        .update_profile(ProfileUpdate {
            display_name: Some("X".into()),
            ..ProfileUpdate::default()
        })
        .unwrap_err();
    assert_eq!(err.kind, AdminErrorKind::NotAuthenticated);
    assert!(storage.is_empty());
}

#[test]
fn test_restore_reads_persisted_session() {
    let storage = MemoryStorage::new();
    storage.set(STORAGE_TOKEN_KEY, "T7").unwrap();
    storage
        .set(STORAGE_PROFILE_KEY, r#"{"email":"a@b.com","localId":"U7"}"#)
        .unwrap();

    let store = SessionStore::restore(ScriptedProvider::default(), storage);

    assert!(store.is_authenticated());
    let session = store.session();
    assert_eq!(session.profile().unwrap().internal_id, "U7");
    assert_eq!(session.profile().unwrap().label(), "a@b.com");
}

#[test]
fn test_restore_with_token_but_broken_profile_logs_out() {
    let storage = MemoryStorage::new();
    storage.set(STORAGE_TOKEN_KEY, "T7").unwrap();
    storage.set(STORAGE_PROFILE_KEY, "not json").unwrap();

    let store = SessionStore::restore(ScriptedProvider::default(), storage.clone());

    assert!(!store.is_authenticated());
    assert!(storage.is_empty());
}

#[test]
fn test_restore_empty_storage_is_logged_out() {
    let (store, _, _) = new_store();
    assert_eq!(store.status(), SessionStatus::default());
}
