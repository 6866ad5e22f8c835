//! Session lifecycle and write-through of the rep log.
//!
//! The controller owns the in-memory [`LogDocument`] for the life of the
//! process. Every accepted mutation is written through to the local store;
//! when a session exists it is additionally mirrored to the remote store,
//! local-first and best-effort.

use crate::auth::{AuthError, AuthProvider, Session};
use crate::dates::format_date;
use crate::models::{Exercise, LogDocument, RepCounts, SummaryResponse};
use crate::remote::{RemoteLogStore, RemoteRow};
use crate::{stats, storage};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Where the current user's data lives, as the presentation needs to know it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No remote capability configured: local-only, nothing to gate.
    NoRemote,
    /// Remote configured but nobody signed in: the page gates on sign-in.
    SignedOut,
    /// Signed in: local cache plus best-effort remote mirror.
    SignedIn(String),
}

/// The remote half of the capability, present only when configured.
struct RemoteSync {
    store: Arc<dyn RemoteLogStore>,
    auth: Arc<dyn AuthProvider>,
}

struct ControllerState {
    doc: LogDocument,
    session: Option<Session>,
}

pub struct SyncController {
    data_path: PathBuf,
    /// Decided once at startup; the only place mutation logic consults it is
    /// the single mirror-write site in [`SyncController::add_reps`].
    remote: Option<RemoteSync>,
    state: Mutex<ControllerState>,
}

impl SyncController {
    /// Local-only controller: the remote capability is absent entirely.
    pub async fn local(data_path: PathBuf) -> Arc<Self> {
        let doc = storage::load_document(&data_path).await;
        Arc::new(Self {
            data_path,
            remote: None,
            state: Mutex::new(ControllerState { doc, session: None }),
        })
    }

    /// Remote-enabled controller. Probes the provider for an existing
    /// session, loads from the matching source, and starts the listener that
    /// follows later sign-in/sign-out transitions.
    pub async fn with_remote(
        data_path: PathBuf,
        store: Arc<dyn RemoteLogStore>,
        auth: Arc<dyn AuthProvider>,
    ) -> Arc<Self> {
        let doc = storage::load_document(&data_path).await;
        let session = auth.current_session().await;
        let controller = Arc::new(Self {
            data_path,
            remote: Some(RemoteSync { store, auth }),
            state: Mutex::new(ControllerState { doc, session: None }),
        });
        if let Some(session) = session {
            controller.apply_session(Some(session)).await;
        }
        Self::spawn_session_listener(&controller);
        controller
    }

    fn spawn_session_listener(this: &Arc<Self>) {
        let Some(remote) = &this.remote else {
            return;
        };
        let mut changes = remote.auth.changes();
        // Weak handle so the listener never keeps the controller alive.
        let controller = Arc::downgrade(this);
        tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                let Some(controller) = controller.upgrade() else {
                    break;
                };
                let session = changes.borrow_and_update().clone();
                controller.apply_session(session).await;
            }
        });
    }

    /// Moves the controller into the state a session transition implies.
    ///
    /// Sign-in makes the remote store authoritative: its rows replace the
    /// in-memory document and are cached into the local store. A failed
    /// query falls back to the local cache without dropping the session, so
    /// later mutations still attempt the mirror write. Sign-out only clears
    /// the session; the document stays visible until the next startup.
    async fn apply_session(&self, session: Option<Session>) {
        let Some(remote) = &self.remote else {
            return;
        };
        match session {
            Some(session) => {
                let doc = match remote.store.query(&session.user_id).await {
                    Ok(rows) => {
                        let doc = document_from_rows(rows);
                        if let Err(err) = storage::persist_document(&self.data_path, &doc).await {
                            error!("failed to cache remote log locally: {err}");
                        }
                        doc
                    }
                    Err(err) => {
                        warn!("remote log query failed, falling back to local cache: {err}");
                        storage::load_document(&self.data_path).await
                    }
                };
                info!("session established for {}", session.user_id);
                let mut state = self.state.lock().await;
                state.doc = doc;
                state.session = Some(session);
            }
            None => {
                info!("session ended");
                let mut state = self.state.lock().await;
                state.session = None;
            }
        }
    }

    /// Records `amount` reps of `exercise` on `date` and returns the date's
    /// updated counts.
    ///
    /// Non-positive amounts are rejected without mutating anything; the
    /// add-only product surface has no use for them and treats the attempt
    /// as a no-op rather than an error. The state lock is held across the
    /// local write, so mutations are applied and persisted one at a time.
    pub async fn add_reps(&self, exercise: Exercise, amount: i64, date: NaiveDate) -> RepCounts {
        let key = format_date(date);
        let mut state = self.state.lock().await;
        if amount < 1 {
            debug!("ignoring non-positive amount {amount} for {key}");
            return state.doc.logs.get(&key).copied().unwrap_or_default();
        }

        let updated = {
            let entry = state.doc.logs.entry(key.clone()).or_default();
            entry.add(exercise, amount as u64);
            *entry
        };

        if let Err(err) = storage::persist_document(&self.data_path, &state.doc).await {
            error!("failed to persist log document: {err}");
        }

        if let (Some(remote), Some(session)) = (&self.remote, &state.session) {
            spawn_remote_upsert(
                Arc::clone(&remote.store),
                session.user_id.clone(),
                RemoteRow::from_counts(key, updated),
            );
        }

        updated
    }

    pub async fn summary(&self, reference: NaiveDate) -> SummaryResponse {
        let state = self.state.lock().await;
        stats::build_summary(&state.doc, reference)
    }

    pub async fn session_state(&self) -> SessionState {
        if self.remote.is_none() {
            return SessionState::NoRemote;
        }
        let state = self.state.lock().await;
        match &state.session {
            Some(session) => SessionState::SignedIn(session.user_id.clone()),
            None => SessionState::SignedOut,
        }
    }

    /// Starts the external sign-in flow. Completion arrives through the
    /// session listener, not through this return value.
    pub async fn sign_in(&self) -> Result<(), AuthError> {
        match &self.remote {
            Some(remote) => remote.auth.sign_in().await,
            None => Err(AuthError::NotConfigured),
        }
    }

    pub async fn sign_out(&self) -> Result<(), AuthError> {
        match &self.remote {
            Some(remote) => remote.auth.sign_out().await,
            None => Err(AuthError::NotConfigured),
        }
    }
}

/// Detached mirror write: bounded by the client timeout, never retried,
/// never awaited by the mutation that spawned it. Failure is logged and
/// swallowed; the local write it mirrors has already succeeded.
fn spawn_remote_upsert(store: Arc<dyn RemoteLogStore>, user_id: String, row: RemoteRow) {
    tokio::spawn(async move {
        if let Err(err) = store.upsert(&user_id, &row).await {
            warn!("remote upsert for {} failed: {err}", row.date);
        }
    });
}

fn document_from_rows(rows: Vec<RemoteRow>) -> LogDocument {
    let mut doc = LogDocument::default();
    for row in rows {
        doc.logs.insert(row.date.clone(), row.counts());
    }
    doc
}
