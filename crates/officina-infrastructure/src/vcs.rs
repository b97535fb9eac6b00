//! Client for the authenticated Git backend.
//!
//! The backend wraps porcelain operations on the server-side repository
//! checkout and requires an authenticated session. Failures arrive as a
//! non-2xx status with an `{error, details}` envelope.

use officina_core::error::{OfficinaError, Result};
use serde::{Deserialize, Serialize};

/// Working-tree status as reported by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitStatus {
    /// Current branch, if any (detached HEAD reports none)
    pub current: Option<String>,
    /// Upstream tracking branch, if configured
    pub tracking: Option<String>,
    #[serde(default)]
    pub ahead: u32,
    #[serde(default)]
    pub behind: u32,
    #[serde(default)]
    pub staged: Vec<String>,
    #[serde(default)]
    pub modified: Vec<String>,
    #[serde(default)]
    pub not_added: Vec<String>,
    #[serde(default)]
    pub conflicted: Vec<String>,
    #[serde(default)]
    pub created: Vec<String>,
    #[serde(default)]
    pub deleted: Vec<String>,
}

impl GitStatus {
    /// Whether there is anything to commit.
    pub fn is_dirty(&self) -> bool {
        !(self.staged.is_empty()
            && self.modified.is_empty()
            && self.not_added.is_empty()
            && self.created.is_empty()
            && self.deleted.is_empty())
    }
}

/// One commit in the history listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitCommit {
    pub hash: String,
    pub date: String,
    pub message: String,
    pub author_name: String,
    pub author_email: String,
}

/// Result of a commit request.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitOutcome {
    #[serde(default)]
    pub success: bool,
    /// Hash of the created commit
    #[serde(default)]
    pub commit: String,
}

/// Branch listing.
#[derive(Debug, Clone, Deserialize)]
pub struct GitBranches {
    pub current: String,
    #[serde(default)]
    pub all: Vec<String>,
}

#[derive(Serialize)]
struct CommitRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: String,
    #[serde(default)]
    details: Option<String>,
}

/// HTTP client for the `/git/*` routes of the backend.
#[derive(Clone)]
pub struct VcsClient {
    client: reqwest::Client,
    base_url: String,
}

impl VcsClient {
    /// Creates a client sharing the authenticated cookie session of
    /// `client`.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let message = match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => match envelope.details {
                Some(details) => format!("{}: {}", envelope.error, details),
                None => envelope.error,
            },
            Err(_) => format!("request failed with status {}", status),
        };
        Err(OfficinaError::provider(message))
    }

    /// `GET /git/status`
    pub async fn status(&self) -> Result<GitStatus> {
        let url = format!("{}/git/status", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| OfficinaError::provider(e.to_string()))?;
        Self::expect_success(response)
            .await?
            .json()
            .await
            .map_err(|e| OfficinaError::provider(format!("invalid status response: {}", e)))
    }

    /// `GET /git/commits?limit=N`
    pub async fn commits(&self, limit: u32) -> Result<Vec<GitCommit>> {
        let url = format!("{}/git/commits", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(|e| OfficinaError::provider(e.to_string()))?;
        Self::expect_success(response)
            .await?
            .json()
            .await
            .map_err(|e| OfficinaError::provider(format!("invalid commits response: {}", e)))
    }

    /// `POST /git/commit` — stages everything and commits with `message`.
    pub async fn commit(&self, message: &str) -> Result<CommitOutcome> {
        let url = format!("{}/git/commit", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&CommitRequest { message })
            .send()
            .await
            .map_err(|e| OfficinaError::provider(e.to_string()))?;
        Self::expect_success(response)
            .await?
            .json()
            .await
            .map_err(|e| OfficinaError::provider(format!("invalid commit response: {}", e)))
    }

    /// `POST /git/push` — pushes the current branch to origin.
    pub async fn push(&self) -> Result<()> {
        let url = format!("{}/git/push", self.base_url);
        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| OfficinaError::provider(e.to_string()))?;
        Self::expect_success(response).await.map(|_| ())
    }

    /// `POST /git/pull` — pulls from origin.
    pub async fn pull(&self) -> Result<()> {
        let url = format!("{}/git/pull", self.base_url);
        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| OfficinaError::provider(e.to_string()))?;
        Self::expect_success(response).await.map(|_| ())
    }

    /// `GET /git/branches`
    pub async fn branches(&self) -> Result<GitBranches> {
        let url = format!("{}/git/branches", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| OfficinaError::provider(e.to_string()))?;
        Self::expect_success(response)
            .await?
            .json()
            .await
            .map_err(|e| OfficinaError::provider(format!("invalid branches response: {}", e)))
    }
}
