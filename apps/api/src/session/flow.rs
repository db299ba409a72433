//! Page dispatcher: applies one form submission to a session.
//!
//! Pure and synchronous. Anything needing the chat model or the stores is
//! returned as a [`Transition`] for the service layer to carry out.

use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::questionnaire::answers::AnswerValue;
use crate::questionnaire::{find_question, validate_answer, Page};
use crate::session::SessionState;

/// A submitted form, tagged with the page it belongs to.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Submission {
    Login {
        user_id: String,
    },
    QuestionsPart1 {
        relationship_priority: String,
        sociability: String,
    },
    QuestionsPart2 {
        ideal_day: String,
        seriousness: i64,
    },
    Lifestyle {
        activity_level: i64,
        wants_children: bool,
        smoker: bool,
        accepts_smoker: bool,
        values: Vec<String>,
    },
    Chat {
        message: String,
    },
    /// "Refaire le questionnaire" on the result page.
    #[serde(rename = "result")]
    Restart,
}

impl Submission {
    pub fn page(&self) -> Page {
        match self {
            Submission::Login { .. } => Page::Login,
            Submission::QuestionsPart1 { .. } => Page::QuestionsPart1,
            Submission::QuestionsPart2 { .. } => Page::QuestionsPart2,
            Submission::Lifestyle { .. } => Page::Lifestyle,
            Submission::Chat { .. } => Page::Chat,
            Submission::Restart => Page::Result,
        }
    }
}

/// What the service layer must do after a submission was applied.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// The session moved to a plain form page.
    Moved(Page),
    /// The session entered the chat page; the model must ask its first question.
    OpenChat,
    /// A chat message to hand to the conversation.
    ChatReply(String),
    /// The form is complete: score, assess and store the profile.
    Finalize,
}

pub fn advance(
    session: &mut SessionState,
    submission: Submission,
    chat_enabled: bool,
) -> Result<Transition, AppError> {
    if submission.page() != session.page {
        return Err(AppError::Conflict(format!(
            "Submission for {:?} but the session is on {:?}",
            submission.page(),
            session.page
        )));
    }

    let transition = match submission {
        Submission::Login { user_id } => {
            let user_id = user_id.trim();
            if user_id.is_empty() {
                return Err(AppError::Validation(
                    "Merci de renseigner un identifiant.".to_string(),
                ));
            }
            session.user_id = Some(user_id.to_string());
            move_to(session, Page::QuestionsPart1)
        }
        Submission::QuestionsPart1 {
            relationship_priority,
            sociability,
        } => {
            record_answers(
                session,
                vec![
                    ("relationship_priority", AnswerValue::Text(relationship_priority)),
                    ("sociability", AnswerValue::Text(sociability)),
                ],
            )?;
            move_to(session, Page::QuestionsPart2)
        }
        Submission::QuestionsPart2 {
            ideal_day,
            seriousness,
        } => {
            record_answers(
                session,
                vec![
                    ("ideal_day", AnswerValue::Text(ideal_day.trim().to_string())),
                    ("seriousness", AnswerValue::Int(seriousness)),
                ],
            )?;
            move_to(session, Page::Lifestyle)
        }
        Submission::Lifestyle {
            activity_level,
            wants_children,
            smoker,
            accepts_smoker,
            values,
        } => {
            record_answers(
                session,
                vec![
                    ("activity_level", AnswerValue::Int(activity_level)),
                    ("wants_children", AnswerValue::Bool(wants_children)),
                    ("smoker", AnswerValue::Bool(smoker)),
                    ("accepts_smoker", AnswerValue::Bool(accepts_smoker)),
                    ("values", AnswerValue::List(values)),
                ],
            )?;
            if chat_enabled {
                session.page = Page::Chat;
                Transition::OpenChat
            } else {
                Transition::Finalize
            }
        }
        Submission::Chat { message } => Transition::ChatReply(message),
        Submission::Restart => {
            session.reset();
            Transition::Moved(Page::Login)
        }
    };

    debug!("Session transition: {transition:?}");
    Ok(transition)
}

fn move_to(session: &mut SessionState, page: Page) -> Transition {
    session.page = page;
    Transition::Moved(page)
}

/// Validates every answer first, so a rejected page leaves the record untouched.
fn record_answers(
    session: &mut SessionState,
    answers: Vec<(&'static str, AnswerValue)>,
) -> Result<(), AppError> {
    for (key, value) in &answers {
        let question = find_question(key)
            .ok_or_else(|| AppError::Validation(format!("unknown question {key}")))?;
        validate_answer(question, value).map_err(AppError::Validation)?;
    }
    for (key, value) in answers {
        session.answers.insert(key.to_string(), value);
    }
    Ok(())
}
