use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A message from the conversation history.
///
/// History is owned by the persistence collaborator; sessions only read it
/// to build the request context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
}

impl SessionMessage {
    /// Create a message with a fresh id
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&MessageRole::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&MessageRole::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn test_constructors_assign_unique_ids() {
        let a = SessionMessage::user("hello");
        let b = SessionMessage::assistant("hi");
        assert_ne!(a.id, b.id);
        assert!(a.is_user());
        assert!(!b.is_user());
    }

    #[test]
    fn test_deserialize_from_history_json() {
        let json = r#"{"id":"m-1","role":"assistant","content":"<reply>ok</reply>"}"#;
        let msg: SessionMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, "m-1");
        assert_eq!(msg.role, MessageRole::Assistant);
        assert_eq!(msg.content, "<reply>ok</reply>");
    }
}
