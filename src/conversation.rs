use uuid::Uuid;

use crate::models::message::Message;

/// The in-memory message history of one chat session
///
/// Messages are only ever appended; [`Conversation::clear`] starts a fresh session with a
/// new id instead of editing history in place.
#[derive(Debug, Clone)]
pub struct Conversation {
    id: Uuid,
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            messages: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_starts_new_session() {
        let mut conversation = Conversation::new();
        let first_id = conversation.id();
        conversation.push(Message::user("hello"));
        assert_eq!(conversation.len(), 1);

        conversation.clear();
        assert!(conversation.is_empty());
        assert_ne!(conversation.id(), first_id);
    }
}
