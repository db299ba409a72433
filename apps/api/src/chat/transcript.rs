//! Chat transcript with the turn counter that caps the dialogue.
//!
//! Every user reply that follows an assistant message containing a literal `?`
//! counts as one answered question. Once `max_questions` answers are in, the next
//! assistant turn is [`END_SENTINEL`] and the transcript is finished.

use serde::{Deserialize, Serialize};

/// Assistant turn that terminates the dialogue.
pub const END_SENTINEL: &str = "FIN_DU_QUESTIONNAIRE";

pub const DEFAULT_MAX_QUESTIONS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    Assistant,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTranscript {
    pub messages: Vec<ChatMessage>,
    pub questions_asked: u32,
    pub max_questions: u32,
    pub finished: bool,
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_QUESTIONS)
    }
}

impl ChatTranscript {
    pub fn new(max_questions: u32) -> Self {
        Self {
            messages: Vec::new(),
            questions_asked: 0,
            max_questions,
            finished: false,
        }
    }

    pub fn is_started(&self) -> bool {
        !self.messages.is_empty()
    }

    pub fn push_system(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::new(ChatRole::System, content));
    }

    /// Appends an assistant turn. A turn carrying the sentinel finishes the dialogue.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        let content = content.into();
        if content.contains(END_SENTINEL) {
            self.finished = true;
        }
        self.messages.push(ChatMessage::new(ChatRole::Assistant, content));
    }

    /// Appends a user turn, counting it as an answer when the last assistant
    /// message asked something.
    pub fn record_user_reply(&mut self, content: impl Into<String>) {
        if self
            .last_assistant()
            .map(|m| m.content.contains('?'))
            .unwrap_or(false)
        {
            self.questions_asked += 1;
        }
        self.messages.push(ChatMessage::new(ChatRole::User, content));
    }

    pub fn limit_reached(&self) -> bool {
        self.questions_asked >= self.max_questions
    }

    /// Appends the sentinel as the closing assistant turn.
    pub fn close(&mut self) {
        self.push_assistant(END_SENTINEL);
    }

    pub fn last_assistant(&self) -> Option<&ChatMessage> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::Assistant)
    }

    /// Messages without the system prompt, for display and persistence.
    pub fn visible_messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter().filter(|m| m.role != ChatRole::System)
    }
}
