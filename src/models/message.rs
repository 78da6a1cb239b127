use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::role::Role;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A message to or from the model
pub struct Message {
    pub role: Role,
    pub created: i64,
    /// Plain text for user messages, a serialized record otherwise
    pub content: String,
}

impl Message {
    fn new<S: Into<String>>(role: Role, content: S) -> Self {
        Message {
            role,
            created: Utc::now().timestamp(),
            content: content.into(),
        }
    }

    /// Create a new user message with the current timestamp
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self::new(Role::User, content)
    }

    /// Create a new assistant message with the current timestamp
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Create a new developer message with the current timestamp
    pub fn developer<S: Into<String>>(content: S) -> Self {
        Self::new(Role::Developer, content)
    }

    pub fn text(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_constructors_set_role() {
        assert_eq!(Message::user("hi").role, Role::User);
        assert_eq!(Message::assistant("hi").role, Role::Assistant);
        assert_eq!(Message::developer("hi").role, Role::Developer);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let message = Message::developer("{}");
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["role"], json!("developer"));
        assert_eq!(value["content"], json!("{}"));
    }
}
