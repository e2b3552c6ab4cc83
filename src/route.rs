use serde::Serialize;
use std::fmt;

use crate::conversation::ConversationId;

/// Navigation target: `/chat/:conversationId`, optionally anchored at a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub conversation_id: ConversationId,
    pub message_index: Option<i64>,
}

impl Route {
    pub fn conversation(conversation_id: ConversationId) -> Self {
        Route {
            conversation_id,
            message_index: None,
        }
    }

    pub fn message(conversation_id: ConversationId, message_index: i64) -> Self {
        Route {
            conversation_id,
            message_index: Some(message_index),
        }
    }

    pub fn path(&self) -> String {
        match self.message_index {
            Some(index) => format!("/chat/{}#msg-{}", self.conversation_id, index),
            None => format!("/chat/{}", self.conversation_id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_path() {
        let route = Route::conversation("abc".into());
        assert_eq!(route.path(), "/chat/abc");
    }

    #[test]
    fn test_message_path() {
        let route = Route::message("abc".into(), 7);
        assert_eq!(route.path(), "/chat/abc#msg-7");
        assert_eq!(route.to_string(), "/chat/abc#msg-7");
    }
}
