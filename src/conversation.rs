//! Append-only conversation store.

use crate::types::{Annotations, ChatMessage, Role};

pub const SEED_GREETING: &str = "안녕하세요! \nkenopi 고객지원팀 노피🤖입니다. 무엇을 도와드릴까요?";

/// The synthetic bot greeting that opens every session.
pub fn seed_message() -> ChatMessage {
    ChatMessage::bot(
        SEED_GREETING,
        Annotations {
            selected_mode: Some("auto".to_string()),
            auto_selection: Some(true),
            ..Annotations::default()
        },
    )
}

/// Ordered message history. The first entry is always the seed greeting.
#[derive(Clone, Debug, PartialEq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    generation: u64,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: vec![seed_message()],
            generation: 0,
        }
    }

    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Discards all history and starts over from the seed greeting.
    pub fn reset(&mut self) {
        self.messages = vec![seed_message()];
        self.generation += 1;
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Bumped by every reset; replies tagged with an older value are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_seed_only(&self) -> bool {
        matches!(
            self.messages.as_slice(),
            [only] if only.role == Role::Bot && only.content == SEED_GREETING
        )
    }
}
