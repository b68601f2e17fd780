//! Session lifecycle around the backend client.
//!
//! The controller owns the in-memory session collection, the active
//! session id, and the globally active role. One external event drives
//! it: [`ChatController::send`]. Everything else is selection and
//! read-only views for a UI to render.

pub mod ids;
pub mod store;
pub mod types;

pub use ids::{MessageId, SessionId};
pub use store::SessionStore;
pub use types::{Author, Message, Session};

use crate::rag::QueryBackend;
use crate::roles::Role;

/// Fixed notice written into the pending assistant message when the
/// backend exchange fails. Never retried automatically.
pub const BACKEND_FAILURE_NOTICE: &str =
    "Sync failure: Node handshake timed out. Re-verify authority credentials for this silo.";

/// How a send's backend exchange ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SendStatus {
    /// The backend answered; content and sources are final.
    Answered,
    /// The exchange failed; the assistant message carries
    /// [`BACKEND_FAILURE_NOTICE`] and no sources.
    Failed,
}

/// Receipt for one completed `send`, naming everything it touched.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SendReceipt {
    /// Session the turn was appended to (created if none was active).
    pub session_id: SessionId,
    /// The appended user message.
    pub user_message: MessageId,
    /// The assistant message that received the answer or the notice.
    pub assistant_message: MessageId,
    /// Outcome of the backend exchange.
    pub status: SendStatus,
}

/// Controller for role-scoped chat sessions.
///
/// Sends are serialized by construction: `send` takes `&mut self`, so a
/// second send cannot race the first through the same controller. All
/// mutations stay keyed by session id and message id regardless.
pub struct ChatController<B> {
    backend: B,
    store: SessionStore,
    active_session: Option<SessionId>,
    active_role: Role,
}

impl<B: QueryBackend> ChatController<B> {
    /// Create a controller with the startup default role.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_role(backend, Role::default())
    }

    /// Create a controller with an explicit starting role.
    #[must_use]
    pub fn with_role(backend: B, role: Role) -> Self {
        Self {
            backend,
            store: SessionStore::new(),
            active_session: None,
            active_role: role,
        }
    }

    /// The globally active role, used when the next send opens a session.
    #[must_use]
    pub const fn active_role(&self) -> Role {
        self.active_role
    }

    /// Switch the globally active role by explicit user action.
    pub fn set_active_role(&mut self, role: Role) {
        self.active_role = role;
    }

    /// Id of the active session, if any.
    #[must_use]
    pub const fn active_session_id(&self) -> Option<SessionId> {
        self.active_session
    }

    /// The active session, if any.
    #[must_use]
    pub fn active_session(&self) -> Option<&Session> {
        self.active_session.and_then(|id| self.store.get(id))
    }

    /// Look up a session by id.
    #[must_use]
    pub fn session(&self, id: SessionId) -> Option<&Session> {
        self.store.get(id)
    }

    /// Sessions sorted for display, most recent activity first.
    #[must_use]
    pub fn sessions(&self) -> Vec<&Session> {
        self.store.sorted()
    }

    /// Number of sessions held.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.store.len()
    }

    /// Make `id` the active session and adopt its role as the globally
    /// active one, so the next new session defaults to the silo the user
    /// was last viewing. Returns `false` if the session does not exist.
    pub fn select_session(&mut self, id: SessionId) -> bool {
        match self.store.get(id) {
            Some(session) => {
                let role = session.role;
                self.active_session = Some(id);
                self.active_role = role;
                tracing::debug!(session = %id, role = %role, "switched session");
                true
            }
            None => false,
        }
    }

    /// Leave the active session; the next send opens a fresh one under
    /// the currently active role.
    pub fn new_chat(&mut self) {
        self.active_session = None;
    }

    /// Send a prompt under the active session (or open one).
    ///
    /// An empty-after-trim prompt is a no-op: nothing is created, no
    /// request is made, and `None` is returned. Otherwise the user
    /// message and an assistant placeholder are appended before the
    /// network round trip, so a UI can show a pending state immediately.
    ///
    /// The request always runs under the *session's* role, not the
    /// globally active one — the session's silo is authoritative once
    /// created. Backend failures never escape: the placeholder is
    /// overwritten with [`BACKEND_FAILURE_NOTICE`] and the receipt
    /// reports [`SendStatus::Failed`].
    pub async fn send(&mut self, prompt: &str) -> Option<SendReceipt> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return None;
        }

        let user_message = Message::user(prompt);
        let user_id = user_message.id;

        let active = self
            .active_session
            .filter(|id| self.store.contains(*id));
        let (session_id, session_role) = if let Some(id) = active {
            let role = self.store.get(id).map_or(self.active_role, |s| s.role);
            self.store.append_message(id, user_message);
            (id, role)
        } else {
            let session = Session::open(self.active_role, user_message);
            let id = session.id;
            let role = session.role;
            self.store.insert(session);
            self.active_session = Some(id);
            tracing::info!(session = %id, role = %role, "opened session");
            (id, role)
        };

        let assistant = Message::assistant_pending(session_role);
        let assistant_id = assistant.id;
        self.store.append_message(session_id, assistant);

        let Self { backend, store, .. } = self;
        let outcome = {
            let mut on_chunk = |chunk: &str| {
                store.append_chunk(session_id, assistant_id, chunk);
            };
            backend.query(prompt, session_role, &mut on_chunk).await
        };

        let status = match outcome {
            Ok(answer) => {
                store.attach_sources(session_id, assistant_id, answer.sources);
                SendStatus::Answered
            }
            Err(err) => {
                tracing::warn!(session = %session_id, error = %err, "query failed");
                store.replace_content(session_id, assistant_id, BACKEND_FAILURE_NOTICE);
                SendStatus::Failed
            }
        };

        Some(SendReceipt {
            session_id,
            user_message: user_id,
            assistant_message: assistant_id,
            status,
        })
    }
}
