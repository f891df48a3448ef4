use crate::error::{ImportError, Result};
use crate::session::Session;
use crate::store::ContactStore;
use extractors::generate_user_id;
use reqwest::StatusCode;
use shared_types::{ContactRecord, CreateContactRequest, StoredContact};
use std::fmt;
use tracing::{debug, info, warn};

/// Identifier the API assigned to a submitted contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerId(pub String);

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sends contacts to `POST /api/contacts` and mirrors accepted ones into the
/// local store. The local copy is a backup: failing to write it does not
/// fail the submission.
pub struct SubmissionGateway {
    client: reqwest::Client,
    base_url: String,
    store: ContactStore,
}

impl SubmissionGateway {
    pub fn new(base_url: &str, store: ContactStore) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
        }
    }

    /// Single best-effort request; no retries. A 401 logs the session out.
    pub async fn submit(
        &self,
        record: &ContactRecord,
        form: &StoredContact,
        session: &Session,
    ) -> Result<ServerId> {
        let mut payload = CreateContactRequest::from_record(record, form);
        if payload.user_id.is_empty() {
            payload.user_id = generate_user_id();
        }

        let missing = payload.missing_required_fields();
        if !missing.is_empty() {
            debug!("Missing required fields: {}", missing.join(", "));
            return Err(ImportError::ValidationError(
                "Email, first name, last name, and company are required!".to_string(),
            ));
        }

        let token = session.auth_token().ok_or(ImportError::AuthExpired)?;

        let url = format!("{}/api/contacts", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .header("Accept", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| ImportError::SubmissionFailed(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("API rejected the token, logging out");
            session.logout()?;
            return Err(ImportError::AuthExpired);
        }
        if !status.is_success() {
            return Err(ImportError::SubmissionFailed(format!(
                "API returned status {}",
                status
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ImportError::SubmissionFailed(e.to_string()))?;

        let server_id = match body.get("id") {
            Some(serde_json::Value::String(id)) if !id.is_empty() => id.clone(),
            Some(serde_json::Value::Number(id)) => id.to_string(),
            _ => payload.user_id.clone(),
        };

        info!("Contact submitted with id {}", server_id);
        if let Err(e) = self.store.append(form.clone()) {
            warn!("Contact {} accepted but not kept locally: {}", server_id, e);
        }

        Ok(ServerId(server_id))
    }
}
