// Per-user form session: which page the user is on and everything answered so far.
// Sessions are request-scoped values loaded from and saved to a SessionStore.

pub mod flow;
pub mod handlers;
pub mod service;
pub mod store;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chat::transcript::{ChatMessage, ChatTranscript};
use crate::profiles::assessment::Assessment;
use crate::questionnaire::answers::AnswerRecord;
use crate::questionnaire::{page_questions, Page, Question};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub page: Page,
    pub user_id: Option<String>,
    pub answers: AnswerRecord,
    pub chat: ChatTranscript,
    pub base_score: Option<i64>,
    pub assessment: Option<Assessment>,
    /// False when the profile row could not be written.
    #[serde(default)]
    pub profile_saved: bool,
}

impl SessionState {
    pub fn new(max_questions: u32) -> Self {
        Self {
            page: Page::Login,
            user_id: None,
            answers: AnswerRecord::new(),
            chat: ChatTranscript::new(max_questions),
            base_score: None,
            assessment: None,
            profile_saved: false,
        }
    }

    /// Back to the login page with nothing answered.
    pub fn reset(&mut self) {
        *self = Self::new(self.chat.max_questions);
    }
}

/// What a front-end needs to render the current page.
#[derive(Debug, Serialize)]
pub struct PageView {
    pub session_id: Uuid,
    pub page: Page,
    pub title: &'static str,
    pub user_id: Option<String>,
    pub questions: &'static [Question],
    pub answers: AnswerRecord,
    pub chat: Vec<ChatMessage>,
    pub chat_finished: bool,
    pub questions_asked: u32,
    pub max_questions: u32,
}

impl PageView {
    pub fn new(session_id: Uuid, state: &SessionState) -> Self {
        Self {
            session_id,
            page: state.page,
            title: state.page.title(),
            user_id: state.user_id.clone(),
            questions: page_questions(state.page),
            answers: state.answers.clone(),
            chat: state.chat.visible_messages().cloned().collect(),
            chat_finished: state.chat.finished,
            questions_asked: state.chat.questions_asked,
            max_questions: state.chat.max_questions,
        }
    }
}
