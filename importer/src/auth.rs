use crate::error::{ImportError, Result};
use shared_types::{LoginRequest, LoginResponse};
use tracing::{debug, warn};

/// Token and user id returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
    pub user_id: Option<String>,
}

pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Credentials> {
        if username.is_empty() || password.is_empty() {
            return Err(ImportError::ValidationError(
                "Please enter both username and password".to_string(),
            ));
        }

        let url = format!("{}/api/auth/login", self.base_url);
        debug!("POST {}", url);

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Login request failed: {}", e);
                ImportError::LoginFailed("Login failed. Please try again.".to_string())
            })?;

        let body: LoginResponse = response.json().await.map_err(|e| {
            warn!("Login response unreadable: {}", e);
            ImportError::LoginFailed("Login failed. Please try again.".to_string())
        })?;

        let user_id = body.resolved_user_id();
        match body.access_token {
            Some(access_token) if !access_token.is_empty() => Ok(Credentials {
                access_token,
                user_id,
            }),
            _ => Err(ImportError::LoginFailed(
                "Login failed. Please check your credentials.".to_string(),
            )),
        }
    }
}
