//! Session manager: owns the current session and its persisted mirror.
//!
//! One instance per application lifetime, shared by reference (`Arc`) with
//! the view layer. The in-memory session and the copy stored under
//! [`SESSION_KEY`] are kept identical after every login and logout.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::api::{ApiClient, ApiError, endpoints};
use crate::messages;
use crate::models::{Credentials, RegistrationRequest, Session};
use crate::notify::{Notification, Notifier};
use crate::storage::KeyValueStore;

/// Storage key holding the JSON-serialized session.
pub const SESSION_KEY: &str = "currentUser";

/// Failure of a session operation.
#[derive(Debug)]
pub enum SessionError {
    /// The remote service rejected the request or could not be reached.
    Api(ApiError),
    /// The session could not be written to storage.
    Storage(anyhow::Error),
}

impl SessionError {
    /// Message for the user, falling back when the error carries none.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            SessionError::Api(e) => e.user_message(fallback).to_string(),
            SessionError::Storage(_) => fallback.to_string(),
        }
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, SessionError::Api(e) if e.is_connectivity())
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Api(e) => write!(f, "{e}"),
            SessionError::Storage(_) => f.write_str("Failed to save session"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Api(e) => Some(e),
            SessionError::Storage(e) => Some(e.as_ref()),
        }
    }
}

impl From<ApiError> for SessionError {
    fn from(e: ApiError) -> Self {
        SessionError::Api(e)
    }
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Holds the single current session.
pub struct SessionManager {
    api: ApiClient,
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    current: Mutex<Option<Session>>,
}

impl SessionManager {
    /// Creates the manager and hydrates the session from storage.
    ///
    /// Missing or malformed stored data means "no session".
    pub fn new(
        api: ApiClient,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let current = load_stored_session(store.as_ref());
        Self {
            api,
            store,
            notifier,
            current: Mutex::new(current),
        }
    }

    /// Registers a new account.
    ///
    /// Returns the server response. The session is not touched.
    ///
    /// # Errors
    /// Propagates the request error after notifying the user.
    pub async fn register(&self, request: &RegistrationRequest) -> SessionResult<Value> {
        match self.api.post(endpoints::REGISTER, request).await {
            Ok(response) => {
                tracing::info!(username = %request.username, "Registration succeeded");
                self.notifier
                    .notify(Notification::success(messages::REGISTER_SUCCESS));
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(username = %request.username, error = %e, "Registration failed");
                self.notifier
                    .notify(Notification::error(e.user_message(messages::REGISTER_FAILED)));
                Err(e.into())
            }
        }
    }

    /// Logs in and makes the returned user the current session.
    ///
    /// The session is persisted before it becomes current, so a storage
    /// failure leaves both copies as they were.
    ///
    /// # Errors
    /// Request errors, an unusable response body, or a storage failure.
    pub async fn login(&self, credentials: &Credentials) -> SessionResult<Session> {
        let result = match self
            .api
            .post_json::<_, Session>(endpoints::LOGIN, credentials)
            .await
        {
            Ok(session) => self.commit(session),
            Err(e) => Err(SessionError::Api(e)),
        };

        match result {
            Ok(session) => {
                tracing::info!(username = %session.username, "Logged in");
                self.notifier
                    .notify(Notification::success(messages::welcome(&session.username)));
                Ok(session)
            }
            Err(e) => {
                tracing::warn!(username = %credentials.username, error = %e, "Login failed");
                self.notifier
                    .notify(Notification::error(e.user_message(messages::LOGIN_FAILED)));
                Err(e)
            }
        }
    }

    /// Clears the session from memory and storage. Never fails.
    pub fn logout(&self) {
        {
            let mut current = self.lock();
            *current = None;
            if let Err(e) = self.store.remove_item(SESSION_KEY) {
                tracing::error!(error = %format!("{e:#}"), "Failed to clear stored session");
            }
        }
        tracing::info!("Logged out");
        self.notifier.notify(Notification::info(messages::LOGOUT_DONE));
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().is_some()
    }

    pub fn current_session(&self) -> Option<Session> {
        self.lock().clone()
    }

    /// Persists then publishes a session, under one lock.
    fn commit(&self, session: Session) -> SessionResult<Session> {
        let serialized = serde_json::to_string(&session)
            .map_err(|e| SessionError::Storage(anyhow::Error::new(e)))?;

        let mut current = self.lock();
        self.store
            .set_item(SESSION_KEY, &serialized)
            .map_err(SessionError::Storage)?;
        *current = Some(session.clone());
        Ok(session)
    }

    fn lock(&self) -> MutexGuard<'_, Option<Session>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Reads the stored session, degrading every failure to `None`.
fn load_stored_session(store: &dyn KeyValueStore) -> Option<Session> {
    let raw = match store.get_item(SESSION_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "Failed to read stored session");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed stored session");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::tempdir;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::notify::{NotificationLevel, RecordingNotifier};
    use crate::storage::{FileStore, MemoryStore};

    fn manager(
        base_url: &str,
        store: Arc<dyn KeyValueStore>,
    ) -> (SessionManager, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let manager = SessionManager::new(ApiClient::new(base_url), store, notifier.clone());
        (manager, notifier)
    }

    fn stored(store: &dyn KeyValueStore) -> Option<Session> {
        store
            .get_item(SESSION_KEY)
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    async fn login_server(status: u16, body: Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_login_sets_and_persists_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({"username": "alice", "password": "secret"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1,
                "username": "alice",
                "email": "a@x.com",
                "token": "t0k3n",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let (manager, notifier) = manager(&server.uri(), store.clone());

        let session = manager
            .login(&Credentials::new("alice", "secret"))
            .await
            .unwrap();

        assert!(manager.is_authenticated());
        assert_eq!(session.username, "alice");
        assert_eq!(session.email, "a@x.com");
        assert_eq!(manager.current_session(), Some(session.clone()));
        assert_eq!(stored(store.as_ref()), Some(session));
        assert_eq!(
            notifier.take(),
            vec![Notification::success("Bienvenido alice!")]
        );
    }

    #[tokio::test]
    async fn test_failed_login_leaves_storage_untouched() {
        let server = login_server(401, json!({"message": "Credenciales inválidas"})).await;
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set_item("unrelated", "1").unwrap();
        let (manager, notifier) = manager(&server.uri(), store.clone());

        let err = manager
            .login(&Credentials::new("alice", "wrong"))
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Api(_)));
        assert!(!manager.is_authenticated());
        assert_eq!(store.get_item(SESSION_KEY).unwrap(), None);
        assert_eq!(
            notifier.take(),
            vec![Notification::error("Credenciales inválidas")]
        );
    }

    #[tokio::test]
    async fn test_failed_login_does_not_overwrite_existing_session() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let previous = json!({"id": 9, "username": "bob", "email": "b@x.com"}).to_string();
        store.set_item(SESSION_KEY, &previous).unwrap();

        let server = login_server(500, json!({})).await;
        let (manager, _) = manager(&server.uri(), store.clone());
        assert!(manager.is_authenticated());

        manager
            .login(&Credentials::new("alice", "x"))
            .await
            .unwrap_err();

        assert_eq!(store.get_item(SESSION_KEY).unwrap(), Some(previous));
        assert_eq!(
            manager.current_session().map(|s| s.username),
            Some("bob".to_string())
        );
    }

    #[tokio::test]
    async fn test_login_unreachable_reports_connectivity_message() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let (manager, notifier) = manager("http://127.0.0.1:1", store);

        let err = manager
            .login(&Credentials::new("alice", "secret"))
            .await
            .unwrap_err();

        assert!(err.is_connectivity());
        let notes = notifier.take();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotificationLevel::Error);
        assert_eq!(notes[0].message, "No se puede conectar al servidor");
    }

    #[tokio::test]
    async fn test_login_storage_failure_keeps_memory_empty() {
        let dir = tempdir().unwrap();
        // A directory where the storage file should be makes every write fail.
        let blocked = dir.path().join("storage.json");
        std::fs::create_dir_all(&blocked).unwrap();
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&blocked));

        let server = login_server(200, json!({"id": 1, "username": "alice", "email": "a@x.com"}))
            .await;
        let (manager, notifier) = manager(&server.uri(), store);

        let err = manager
            .login(&Credentials::new("alice", "secret"))
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Storage(_)));
        assert!(!manager.is_authenticated());
        assert_eq!(
            notifier.take(),
            vec![Notification::error("Error al iniciar sesión")]
        );
    }

    #[tokio::test]
    async fn test_login_with_unusable_body_fails() {
        let server = login_server(200, json!({"unexpected": true})).await;
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let (manager, _) = manager(&server.uri(), store.clone());

        assert!(
            manager
                .login(&Credentials::new("alice", "secret"))
                .await
                .is_err()
        );
        assert!(!manager.is_authenticated());
        assert_eq!(store.get_item(SESSION_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_register_error_message_is_exact() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"message": "username taken"})),
            )
            .mount(&server)
            .await;

        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let (manager, notifier) = manager(&server.uri(), store);
        let request = RegistrationRequest::new("alice", "a@x.com", "pw", "Ana", "P");

        let err = manager.register(&request).await.unwrap_err();

        assert_eq!(err.to_string(), "username taken");
        assert_eq!(notifier.take(), vec![Notification::error("username taken")]);
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_success_returns_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .and(body_json(json!({
                "username": "alice",
                "email": "a@x.com",
                "password": "pw",
                "firstName": "Ana",
                "lastName": "P",
            })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"id": 3, "username": "alice", "email": "a@x.com"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let (manager, notifier) = manager(&server.uri(), store);
        let request = RegistrationRequest::new("alice", "a@x.com", "pw", "Ana", "P");

        let response = manager.register(&request).await.unwrap();

        assert_eq!(response["id"], json!(3));
        assert_eq!(
            notifier.take(),
            vec![Notification::success(
                "Registro exitoso! Ahora puedes iniciar sesión"
            )]
        );
        assert!(!manager.is_authenticated());
    }

    #[test]
    fn test_logout_clears_everything_and_is_idempotent() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store
            .set_item(
                SESSION_KEY,
                &json!({"id": 1, "username": "alice", "email": "a@x.com"}).to_string(),
            )
            .unwrap();
        let (manager, notifier) = manager("http://127.0.0.1:1", store.clone());
        assert!(manager.is_authenticated());

        manager.logout();
        assert!(!manager.is_authenticated());
        assert_eq!(store.get_item(SESSION_KEY).unwrap(), None);

        manager.logout();
        assert!(!manager.is_authenticated());
        assert_eq!(store.get_item(SESSION_KEY).unwrap(), None);
        assert_eq!(
            notifier.take(),
            vec![
                Notification::info("Sesión cerrada correctamente"),
                Notification::info("Sesión cerrada correctamente"),
            ]
        );
    }

    /// Serves reads from a seeded map and refuses every write.
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
            self.0.get_item(key)
        }

        fn set_item(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
            anyhow::bail!("read-only store")
        }

        fn remove_item(&self, _key: &str) -> anyhow::Result<bool> {
            anyhow::bail!("read-only store")
        }
    }

    #[test]
    fn test_logout_with_failing_storage_still_clears_memory() {
        let seeded = MemoryStore::new();
        seeded
            .set_item(
                SESSION_KEY,
                &json!({"id": 1, "username": "alice", "email": "a@x.com"}).to_string(),
            )
            .unwrap();
        let store: Arc<dyn KeyValueStore> = Arc::new(ReadOnlyStore(seeded));
        let (session, notifier) = manager("http://127.0.0.1:1", store.clone());
        assert!(session.is_authenticated());

        session.logout();

        assert!(!session.is_authenticated());
        assert_eq!(
            notifier.take(),
            vec![Notification::info("Sesión cerrada correctamente")]
        );

        // The stored copy survives, so the next start hydrates it again.
        assert!(stored(store.as_ref()).is_some());
        let (restarted, _) = manager("http://127.0.0.1:1", store);
        assert!(restarted.is_authenticated());
    }

    #[test]
    fn test_hydration_round_trip_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let session: Session = serde_json::from_value(json!({
            "id": 1,
            "username": "alice",
            "email": "a@x.com",
            "firstName": "Alice",
            "token": "abc",
        }))
        .unwrap();
        FileStore::new(&path)
            .set_item(SESSION_KEY, &serde_json::to_string(&session).unwrap())
            .unwrap();

        let (manager, _) = manager("http://127.0.0.1:1", Arc::new(FileStore::new(&path)));

        assert_eq!(manager.current_session(), Some(session));
    }

    #[test]
    fn test_malformed_stored_session_means_no_session() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set_item(SESSION_KEY, "{broken").unwrap();

        let (manager, notifier) = manager("http://127.0.0.1:1", store);

        assert!(!manager.is_authenticated());
        assert!(notifier.take().is_empty());
    }

    #[test]
    fn test_unreadable_storage_file_means_no_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "garbage").unwrap();

        let (manager, _) = manager("http://127.0.0.1:1", Arc::new(FileStore::new(&path)));

        assert!(!manager.is_authenticated());
    }
}
