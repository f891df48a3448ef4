use crate::auth::AuthClient;
use crate::error::{ImportError, Result};
use crate::storage::LocalStorage;
use std::sync::{Arc, RwLock};
use tracing::info;

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const USER_ID_KEY: &str = "userId";

#[derive(Debug, Clone, Default)]
struct SessionState {
    auth_token: Option<String>,
    user_id: Option<String>,
}

/// Authentication context passed to operations that talk to the API.
pub struct Session {
    storage: Arc<LocalStorage>,
    state: RwLock<SessionState>,
}

impl Session {
    /// Loads the token and user id persisted by an earlier login.
    pub fn restore(storage: Arc<LocalStorage>) -> Result<Self> {
        let state = SessionState {
            auth_token: storage.get::<String>(AUTH_TOKEN_KEY)?,
            user_id: storage.get::<String>(USER_ID_KEY)?,
        };

        Ok(Self {
            storage,
            state: RwLock::new(state),
        })
    }

    pub fn auth_token(&self) -> Option<String> {
        self.state.read().ok().and_then(|s| s.auth_token.clone())
    }

    pub fn user_id(&self) -> Option<String> {
        self.state.read().ok().and_then(|s| s.user_id.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_token().is_some()
    }

    pub async fn login(&self, auth: &AuthClient, username: &str, password: &str) -> Result<()> {
        let credentials = auth.login(username, password).await?;

        self.storage.set(AUTH_TOKEN_KEY, &credentials.access_token)?;
        match &credentials.user_id {
            Some(user_id) => self.storage.set(USER_ID_KEY, user_id)?,
            None => self.storage.remove(USER_ID_KEY)?,
        }

        let mut state = self
            .state
            .write()
            .map_err(|_| ImportError::Config("Session lock poisoned".to_string()))?;
        state.auth_token = Some(credentials.access_token);
        state.user_id = credentials.user_id;

        info!("Logged in");
        Ok(())
    }

    /// Drops the token from storage and memory. The user id is kept.
    pub fn logout(&self) -> Result<()> {
        self.storage.remove(AUTH_TOKEN_KEY)?;
        let mut state = self
            .state
            .write()
            .map_err(|_| ImportError::Config("Session lock poisoned".to_string()))?;
        state.auth_token = None;

        info!("Auth token removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_reads_persisted_values() {
        let storage = Arc::new(LocalStorage::open_in_memory().unwrap());
        storage.set(AUTH_TOKEN_KEY, &"token-1".to_string()).unwrap();
        storage.set(USER_ID_KEY, &"7".to_string()).unwrap();

        let session = Session::restore(storage).unwrap();
        assert_eq!(session.auth_token().as_deref(), Some("token-1"));
        assert_eq!(session.user_id().as_deref(), Some("7"));
    }

    #[test]
    fn test_logout_clears_token_only() {
        let storage = Arc::new(LocalStorage::open_in_memory().unwrap());
        storage.set(AUTH_TOKEN_KEY, &"token-1".to_string()).unwrap();
        storage.set(USER_ID_KEY, &"7".to_string()).unwrap();

        let session = Session::restore(storage.clone()).unwrap();
        session.logout().unwrap();

        assert!(!session.is_authenticated());
        assert_eq!(storage.get::<String>(AUTH_TOKEN_KEY).unwrap(), None);
        assert_eq!(session.user_id().as_deref(), Some("7"));
    }

    #[test]
    fn test_logout_fails_on_poisoned_lock() {
        let storage = Arc::new(LocalStorage::open_in_memory().unwrap());
        storage.set(AUTH_TOKEN_KEY, &"token-1".to_string()).unwrap();
        let session = Arc::new(Session::restore(storage).unwrap());

        let holder = session.clone();
        let _ = std::thread::spawn(move || {
            let _state = holder.state.write().unwrap();
            panic!("writer died holding the session lock");
        })
        .join();

        assert!(matches!(session.logout(), Err(ImportError::Config(_))));
    }

    #[tokio::test]
    async fn test_login_persists_credentials() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/auth/login")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "fresh", "user_id": 99}"#)
            .create_async()
            .await;

        let storage = Arc::new(LocalStorage::open_in_memory().unwrap());
        let session = Session::restore(storage.clone()).unwrap();
        let auth = AuthClient::new(&server.url());

        session.login(&auth, "ada", "secret").await.unwrap();

        assert_eq!(session.auth_token().as_deref(), Some("fresh"));
        assert_eq!(storage.get::<String>(USER_ID_KEY).unwrap().as_deref(), Some("99"));
    }
}
