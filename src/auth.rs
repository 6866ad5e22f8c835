//! Sign-in state for the remote account, observed through a change channel.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::watch;
use tracing::warn;

/// An authenticated user, reduced to the opaque identifier the log service
/// keys rows by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
}

#[derive(Debug)]
pub enum AuthError {
    /// No remote capability was configured for this process
    NotConfigured,
    /// Request never completed
    Transport(String),
    /// Service answered with a non-success status
    Status(u16),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::NotConfigured => write!(f, "remote sync is not configured"),
            AuthError::Transport(e) => write!(f, "transport error: {e}"),
            AuthError::Status(code) => write!(f, "auth service responded with status {code}"),
        }
    }
}

impl std::error::Error for AuthError {}

/// The external account service, reduced to the four calls this app makes.
///
/// Sign-in and sign-out run as external flows: their completion is observed
/// on the [`AuthProvider::changes`] channel, never through the return value
/// of the call that started them.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The session that already exists, if any. Queried once at startup;
    /// implementations absorb transport failures and read them as "no
    /// session" so the app can still come up offline.
    async fn current_session(&self) -> Option<Session>;

    /// Starts the sign-in flow. `Ok` means the flow was started, not that a
    /// session exists yet.
    async fn sign_in(&self) -> Result<(), AuthError>;

    /// Invalidates the session. The `None` it produces arrives on the
    /// change channel like any other transition.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Receiver for session transitions; the latest value wins.
    fn changes(&self) -> watch::Receiver<Option<Session>>;
}

/// reqwest-backed client for the account service's REST endpoints.
pub struct HttpAuth {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
    sessions: watch::Sender<Option<Session>>,
}

#[derive(Debug, Deserialize)]
struct SessionBody {
    user_id: String,
}

impl HttpAuth {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .map_err(|err| AuthError::Transport(err.to_string()))?;
        let (sessions, _) = watch::channel(None);
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client,
            sessions,
        })
    }

    fn auth_url(&self, leaf: &str) -> String {
        format!("{}/auth/{leaf}", self.base_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn fetch_session(&self) -> Result<Option<Session>, AuthError> {
        let response = self
            .authorize(self.client.get(self.auth_url("session")))
            .send()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))?;
        match response.status().as_u16() {
            200 => {
                let body: SessionBody = response
                    .json()
                    .await
                    .map_err(|err| AuthError::Transport(err.to_string()))?;
                Ok(Some(Session {
                    user_id: body.user_id,
                }))
            }
            401 | 404 => Ok(None),
            code => Err(AuthError::Status(code)),
        }
    }
}

#[async_trait]
impl AuthProvider for HttpAuth {
    async fn current_session(&self) -> Option<Session> {
        match self.fetch_session().await {
            Ok(session) => session,
            Err(err) => {
                warn!("session probe failed: {err}");
                None
            }
        }
    }

    async fn sign_in(&self) -> Result<(), AuthError> {
        let response = self
            .authorize(self.client.post(self.auth_url("signin")))
            .send()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))?;
        if !response.status().is_success() {
            return Err(AuthError::Status(response.status().as_u16()));
        }
        let session = self.fetch_session().await?;
        self.sessions.send_replace(session);
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        // Remote token invalidation is best effort; the local transition to
        // signed-out happens regardless.
        let result = self
            .authorize(self.client.post(self.auth_url("signout")))
            .send()
            .await;
        if let Err(err) = result {
            warn!("sign-out request failed: {err}");
        }
        self.sessions.send_replace(None);
        Ok(())
    }

    fn changes(&self) -> watch::Receiver<Option<Session>> {
        self.sessions.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_urls_are_rooted_at_the_base() {
        let auth = HttpAuth::new("http://localhost:9000/", None).unwrap();
        assert_eq!(auth.auth_url("session"), "http://localhost:9000/auth/session");
        assert_eq!(auth.auth_url("signin"), "http://localhost:9000/auth/signin");
    }

    #[tokio::test]
    async fn session_probe_failure_reads_as_no_session() {
        // Nothing listens here; the transport error is absorbed.
        let auth = HttpAuth::new("http://127.0.0.1:1", None).unwrap();
        assert_eq!(auth.current_session().await, None);
    }

    #[tokio::test]
    async fn sign_out_always_publishes_none() {
        // Point at a port nothing listens on: the POST fails, the
        // transition still lands on the channel.
        let auth = HttpAuth::new("http://127.0.0.1:1", None).unwrap();
        let mut changes = auth.changes();
        auth.sign_out().await.unwrap();
        changes.changed().await.unwrap();
        assert_eq!(*changes.borrow(), None);
    }
}
