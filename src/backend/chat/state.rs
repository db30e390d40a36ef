use crate::shared::ChatMessage;

/// Most messages the log holds before trimming
pub const MAX_MESSAGES: usize = 200;

/// Messages kept after an overflow trim
pub const TRIM_TO: usize = 100;

/// In-memory chat log
///
/// Messages are kept in timestamp order. Once the log grows past
/// [`MAX_MESSAGES`] the oldest messages are dropped until [`TRIM_TO`] remain.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    messages: Vec<ChatMessage>,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the log from persisted messages
    pub fn from_messages(mut messages: Vec<ChatMessage>) -> Self {
        messages.sort_by_key(|message| message.ts);
        let mut state = Self { messages };
        state.trim();
        state
    }

    /// Append a message, trimming on overflow
    ///
    /// Returns the number of messages dropped.
    pub fn add_message(&mut self, message: ChatMessage) -> usize {
        let position = self
            .messages
            .partition_point(|existing| existing.ts <= message.ts);
        self.messages.insert(position, message);
        self.trim()
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

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    fn trim(&mut self) -> usize {
        if self.messages.len() <= MAX_MESSAGES {
            return 0;
        }
        let dropped = self.messages.len() - TRIM_TO;
        self.messages.drain(..dropped);
        dropped
    }
}
