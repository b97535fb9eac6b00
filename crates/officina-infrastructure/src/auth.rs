//! Client for the authentication backend.
//!
//! The backend brokers GitLab OAuth and keeps the session server-side;
//! this client only consumes the resulting principal endpoint and the
//! logout route. The reqwest cookie store carries the session cookie the
//! way a browser's credentialed fetch would.

use officina_core::error::{OfficinaError, Result};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// The authenticated principal as reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// HTTP client for the auth routes of the backend.
#[derive(Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// Creates a client over a cookie-carrying `reqwest::Client`.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// `GET /user` — the current principal, or `None` when the session
    /// is not authenticated (401).
    pub async fn current_user(&self) -> Result<Option<Principal>> {
        let url = format!("{}/user", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| OfficinaError::provider(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Ok(None),
            status if status.is_success() => response
                .json()
                .await
                .map(Some)
                .map_err(|e| OfficinaError::provider(format!("invalid user response: {}", e))),
            status => Err(OfficinaError::provider(format!(
                "user request failed with status {}",
                status
            ))),
        }
    }

    /// `GET /auth/logout` — terminates the server-side session.
    pub async fn logout(&self) -> Result<()> {
        let url = format!("{}/auth/logout", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| OfficinaError::provider(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OfficinaError::provider(format!(
                "logout failed with status {}",
                response.status()
            )));
        }
        Ok(())
    }
}
