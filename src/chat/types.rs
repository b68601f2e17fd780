//! Domain types for chat sessions and messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::roles::Role;

use super::ids::{MessageId, SessionId};

/// Author of a chat message.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    /// The human side of the conversation.
    User,
    /// The assistant side.
    Assistant,
}

/// One turn in a conversation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    /// Unique within the session; the key for in-place mutation.
    pub id: MessageId,
    /// Who authored the message.
    pub author: Author,
    /// Text body. Assistant content starts empty and accumulates as
    /// response text becomes available.
    pub content: String,
    /// Creation time; immutable.
    pub timestamp: DateTime<Utc>,
    /// Ordered citation strings; empty until the response resolves.
    /// Only assistant messages carry sources.
    pub sources: Vec<String>,
    /// Access silo the request was made under. Assistant messages only;
    /// immutable once created.
    pub role: Option<Role>,
}

impl Message {
    /// Build a user message from (already trimmed) prompt text.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            author: Author::User,
            content: content.into(),
            timestamp: Utc::now(),
            sources: Vec::new(),
            role: None,
        }
    }

    /// Build the pending assistant placeholder for a request under `role`.
    #[must_use]
    pub fn assistant_pending(role: Role) -> Self {
        Self {
            id: MessageId::new(),
            author: Author::Assistant,
            content: String::new(),
            timestamp: Utc::now(),
            sources: Vec::new(),
            role: Some(role),
        }
    }
}

/// One conversation thread.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier, assigned at creation.
    pub id: SessionId,
    /// Derived from the first user message.
    pub title: String,
    /// Access silo the session was created under; never changes, even if
    /// the globally active role changes later.
    pub role: Role,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every appended message; the descending sort key for
    /// session listings.
    pub last_activity: DateTime<Utc>,
    /// Ordered message history. Append-only, except for the in-place
    /// content/sources mutation of the pending assistant message.
    pub history: Vec<Message>,
}

impl Session {
    /// Character bound for derived titles.
    pub const TITLE_MAX_CHARS: usize = 30;

    /// Open a session under `role`, seeded with its first user message.
    #[must_use]
    pub fn open(role: Role, first_message: Message) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            title: Self::title_from_prompt(&first_message.content),
            role,
            created_at: now,
            last_activity: now,
            history: vec![first_message],
        }
    }

    /// Derive a display title from a prompt, truncated to
    /// [`Self::TITLE_MAX_CHARS`] characters with an ellipsis marker.
    #[must_use]
    pub fn title_from_prompt(prompt: &str) -> String {
        if prompt.chars().count() > Self::TITLE_MAX_CHARS {
            let mut title: String = prompt.chars().take(Self::TITLE_MAX_CHARS).collect();
            title.push_str("...");
            title
        } else {
            prompt.to_owned()
        }
    }

    /// Append a message and refresh `last_activity`.
    pub fn push(&mut self, message: Message) {
        self.history.push(message);
        self.last_activity = Utc::now();
    }

    /// Locate a message by id for in-place mutation.
    pub fn message_mut(&mut self, id: MessageId) -> Option<&mut Message> {
        self.history.iter_mut().find(|m| m.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_title_kept_when_short() {
        assert_eq!(Session::title_from_prompt("budget recap"), "budget recap");
    }

    #[test]
    fn test_title_truncated_with_ellipsis() {
        let prompt = "a".repeat(45);
        let title = Session::title_from_prompt(&prompt);
        assert_eq!(title, format!("{}...", "a".repeat(30)));
    }

    #[test]
    fn test_title_exactly_at_bound_is_not_truncated() {
        let prompt = "b".repeat(30);
        assert_eq!(Session::title_from_prompt(&prompt), prompt);
    }

    #[test]
    fn test_title_truncates_on_char_boundary() {
        // 40 multibyte characters; byte-indexed slicing would panic.
        let prompt = "é".repeat(40);
        let title = Session::title_from_prompt(&prompt);
        assert_eq!(title, format!("{}...", "é".repeat(30)));
    }

    #[test]
    fn test_open_seeds_history_and_title() {
        let session = Session::open(Role::Marketing, Message::user("campaign ROI for Q2"));
        assert_eq!(session.role, Role::Marketing);
        assert_eq!(session.title, "campaign ROI for Q2");
        assert_eq!(session.history.len(), 1);
        assert_eq!(session.history[0].author, Author::User);
    }

    #[test]
    fn test_push_refreshes_last_activity() {
        let mut session = Session::open(Role::Hr, Message::user("leave policy"));
        let before = session.last_activity;
        session.push(Message::assistant_pending(Role::Hr));
        assert!(session.last_activity >= before);
        assert_eq!(session.history.len(), 2);
    }

    #[test]
    fn test_assistant_placeholder_shape() {
        let message = Message::assistant_pending(Role::Engineering);
        assert_eq!(message.author, Author::Assistant);
        assert!(message.content.is_empty());
        assert!(message.sources.is_empty());
        assert_eq!(message.role, Some(Role::Engineering));
    }

    #[test]
    fn test_message_mut_finds_by_id() {
        let mut session = Session::open(Role::General, Message::user("hello"));
        let pending = Message::assistant_pending(Role::General);
        let pending_id = pending.id;
        session.push(pending);

        let found = session.message_mut(pending_id).unwrap();
        found.content.push_str("world");
        assert_eq!(session.history[1].content, "world");
    }
}
