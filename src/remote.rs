//! Remote mirror of the rep log, one row per (user, date).

use crate::models::RepCounts;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hung requests degrade into ordinary remote failures after this long.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// One user-day of reps as the remote service stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRow {
    pub date: String,
    #[serde(default)]
    pub pushups: u64,
    #[serde(default)]
    pub squats: u64,
    #[serde(default)]
    pub pullups: u64,
    /// RFC 3339 write timestamp. Recorded for the service's benefit; conflict
    /// resolution ignores it (arrival order wins).
    #[serde(default)]
    pub updated_at: String,
}

impl RemoteRow {
    pub fn from_counts(date: String, counts: RepCounts) -> Self {
        Self {
            date,
            pushups: counts.pushups,
            squats: counts.squats,
            pullups: counts.pullups,
            updated_at: Utc::now().to_rfc3339(),
        }
    }

    pub fn counts(&self) -> RepCounts {
        RepCounts {
            pushups: self.pushups,
            squats: self.squats,
            pullups: self.pullups,
        }
    }
}

#[derive(Debug)]
pub enum RemoteError {
    /// Request never completed (connect failure, timeout, broken transfer)
    Transport(String),
    /// Service answered with a non-success status
    Status(u16),
    /// Response body was not the expected shape
    Decode(String),
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteError::Transport(e) => write!(f, "transport error: {e}"),
            RemoteError::Status(code) => write!(f, "remote responded with status {code}"),
            RemoteError::Decode(e) => write!(f, "unexpected response body: {e}"),
        }
    }
}

impl std::error::Error for RemoteError {}

/// Per-record store for the signed-in user's log.
///
/// `upsert` replaces the whole row for `(user, date)` on conflict: the last
/// write to *arrive* wins, even when an older write lands after a newer one.
/// No retry or cancellation exists above this trait; callers treat every
/// failure as non-fatal.
#[async_trait]
pub trait RemoteLogStore: Send + Sync {
    /// Every row belonging to `user_id`, in no particular order.
    async fn query(&self, user_id: &str) -> Result<Vec<RemoteRow>, RemoteError>;

    /// Inserts or replaces the row for `(user_id, row.date)`.
    async fn upsert(&self, user_id: &str, row: &RemoteRow) -> Result<(), RemoteError>;
}

/// reqwest-backed client for the log service's REST endpoints.
pub struct HttpRemote {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct UpsertPayload<'a> {
    user_id: &'a str,
    date: &'a str,
    pushups: u64,
    squats: u64,
    pullups: u64,
    updated_at: &'a str,
}

impl HttpRemote {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| RemoteError::Transport(err.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    fn logs_url(&self) -> String {
        format!("{}/logs", self.base_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl RemoteLogStore for HttpRemote {
    async fn query(&self, user_id: &str) -> Result<Vec<RemoteRow>, RemoteError> {
        let response = self
            .authorize(self.client.get(self.logs_url()).query(&[("user", user_id)]))
            .send()
            .await
            .map_err(|err| RemoteError::Transport(err.to_string()))?;
        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status().as_u16()));
        }
        response
            .json::<Vec<RemoteRow>>()
            .await
            .map_err(|err| RemoteError::Decode(err.to_string()))
    }

    async fn upsert(&self, user_id: &str, row: &RemoteRow) -> Result<(), RemoteError> {
        let payload = UpsertPayload {
            user_id,
            date: &row.date,
            pushups: row.pushups,
            squats: row.squats,
            pullups: row.pullups,
            updated_at: &row.updated_at,
        };
        let response = self
            .authorize(self.client.post(self.logs_url()).json(&payload))
            .send()
            .await
            .map_err(|err| RemoteError::Transport(err.to_string()))?;
        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}
