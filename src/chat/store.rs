//! In-memory session store.
//!
//! Sessions live for the process lifetime only; there is no persistence
//! and no deletion. Every mutating operation is keyed by session id and
//! message id, never by positional index, so an in-flight response can
//! finalize its own message no matter how the listing has been reordered
//! in the meantime.

use super::ids::{MessageId, SessionId};
use super::types::{Message, Session};

/// Ordered collection of chat sessions.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Vec<Session>,
}

impl SessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Insert a freshly opened session at the head of the collection.
    pub fn insert(&mut self, session: Session) {
        self.sessions.insert(0, session);
    }

    /// Look up a session by id.
    #[must_use]
    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Look up a session by id for mutation.
    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| s.id == id)
    }

    /// Whether a session with this id exists.
    #[must_use]
    pub fn contains(&self, id: SessionId) -> bool {
        self.get(id).is_some()
    }

    /// Sessions sorted for display: `last_activity` descending, most
    /// recent first. Ties keep insertion order (the sort is stable).
    #[must_use]
    pub fn sorted(&self) -> Vec<&Session> {
        let mut view: Vec<&Session> = self.sessions.iter().collect();
        view.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
        view
    }

    /// Append a message to a session and refresh its `last_activity`.
    ///
    /// Returns `false` if no session with this id exists.
    pub fn append_message(&mut self, session_id: SessionId, message: Message) -> bool {
        self.get_mut(session_id).is_some_and(|session| {
            session.push(message);
            true
        })
    }

    /// Append partial answer text to a message's content.
    ///
    /// Returns `false` if the session or message cannot be found.
    pub fn append_chunk(
        &mut self,
        session_id: SessionId,
        message_id: MessageId,
        chunk: &str,
    ) -> bool {
        self.with_message(session_id, message_id, |message| {
            message.content.push_str(chunk);
        })
    }

    /// Overwrite a message's content (used for the fixed failure notice).
    ///
    /// Returns `false` if the session or message cannot be found.
    pub fn replace_content(
        &mut self,
        session_id: SessionId,
        message_id: MessageId,
        content: &str,
    ) -> bool {
        self.with_message(session_id, message_id, |message| {
            message.content.clear();
            message.content.push_str(content);
        })
    }

    /// Attach the resolved citations to a message.
    ///
    /// Returns `false` if the session or message cannot be found.
    pub fn attach_sources(
        &mut self,
        session_id: SessionId,
        message_id: MessageId,
        sources: Vec<String>,
    ) -> bool {
        self.with_message(session_id, message_id, |message| {
            message.sources = sources;
        })
    }

    fn with_message(
        &mut self,
        session_id: SessionId,
        message_id: MessageId,
        apply: impl FnOnce(&mut Message),
    ) -> bool {
        self.get_mut(session_id)
            .and_then(|session| session.message_mut(message_id))
            .is_some_and(|message| {
                apply(message);
                true
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::roles::Role;

    use super::super::types::Author;
    use super::*;

    fn seeded(role: Role, prompt: &str) -> (SessionStore, SessionId) {
        let mut store = SessionStore::new();
        let session = Session::open(role, Message::user(prompt));
        let id = session.id;
        store.insert(session);
        (store, id)
    }

    #[test]
    fn test_sorted_is_last_activity_descending() {
        let (mut store, first) = seeded(Role::Finance, "one");
        let second = Session::open(Role::Hr, Message::user("two"));
        let second_id = second.id;
        store.insert(second);

        let ordered: Vec<SessionId> = store.sorted().iter().map(|s| s.id).collect();
        assert_eq!(ordered, vec![second_id, first]);
    }

    #[test]
    fn test_appending_moves_session_to_front() {
        let (mut store, older) = seeded(Role::Finance, "one");
        store.insert(Session::open(Role::Hr, Message::user("two")));

        assert!(store.append_message(older, Message::user("again")));

        let front = store.sorted()[0].id;
        assert_eq!(front, older);
    }

    #[test]
    fn test_mutations_are_id_keyed() {
        let (mut store, target) = seeded(Role::Finance, "one");
        let other = Session::open(Role::Hr, Message::user("two"));
        let other_id = other.id;
        store.insert(other);

        let pending = Message::assistant_pending(Role::Finance);
        let pending_id = pending.id;
        assert!(store.append_message(target, pending));

        assert!(store.append_chunk(target, pending_id, "partial"));
        assert!(store.attach_sources(target, pending_id, vec!["doc.pdf".to_owned()]));

        // The other session is untouched.
        let untouched = store.get(other_id).unwrap();
        assert_eq!(untouched.history.len(), 1);
        assert_eq!(untouched.history[0].author, Author::User);

        let mutated = store.get(target).unwrap();
        assert_eq!(mutated.history[1].content, "partial");
        assert_eq!(mutated.history[1].sources, vec!["doc.pdf"]);
    }

    #[test]
    fn test_replace_content_overwrites() {
        let (mut store, id) = seeded(Role::General, "hello");
        let pending = Message::assistant_pending(Role::General);
        let pending_id = pending.id;
        store.append_message(id, pending);
        store.append_chunk(id, pending_id, "half an ans");

        assert!(store.replace_content(id, pending_id, "notice"));
        assert_eq!(store.get(id).unwrap().history[1].content, "notice");
    }

    #[test]
    fn test_missing_targets_report_false() {
        let (mut store, id) = seeded(Role::General, "hello");
        assert!(!store.append_chunk(id, MessageId::new(), "x"));
        assert!(!store.append_message(SessionId::new(), Message::user("y")));
        assert!(!store.contains(SessionId::new()));
    }
}
