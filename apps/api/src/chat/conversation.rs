//! Drives the capped dialogue between a user and the hosted chat model.

use tracing::{info, warn};

use crate::chat::prompts::{CHAT_SYSTEM_TEMPLATE, FALLBACK_QUESTION};
use crate::chat::transcript::{ChatRole, ChatTranscript, END_SENTINEL};
use crate::errors::AppError;
use crate::llm_client::prompts::FRENCH_TONE;
use crate::llm_client::ChatModel;
use crate::questionnaire::answers::AnswerRecord;

/// Seeds the system prompt and asks the model for its first question.
/// Does nothing on a transcript that already has messages.
pub async fn open_conversation(
    model: &dyn ChatModel,
    transcript: &mut ChatTranscript,
    answers: &AnswerRecord,
) {
    if transcript.is_started() {
        return;
    }
    transcript.push_system(build_system_prompt(answers, transcript.max_questions));
    next_assistant_turn(model, transcript).await;
}

/// Records the user's reply, then either closes the dialogue with the sentinel
/// or asks the model for the next turn.
pub async fn reply(
    model: &dyn ChatModel,
    transcript: &mut ChatTranscript,
    text: &str,
) -> Result<(), AppError> {
    if transcript.finished {
        return Err(AppError::Conflict("The conversation is already over".to_string()));
    }
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    transcript.record_user_reply(text);

    if transcript.limit_reached() {
        info!(
            "Chat reached {} answered questions, closing",
            transcript.questions_asked
        );
        transcript.close();
        return Ok(());
    }

    next_assistant_turn(model, transcript).await;
    Ok(())
}

async fn next_assistant_turn(model: &dyn ChatModel, transcript: &mut ChatTranscript) {
    let system = transcript
        .messages
        .iter()
        .find(|m| m.role == ChatRole::System)
        .map(|m| m.content.clone())
        .unwrap_or_default();

    match model.complete(&system, &transcript.messages).await {
        Ok(text) => transcript.push_assistant(text),
        Err(e) => {
            warn!("Chat model unavailable, using fallback question: {e}");
            transcript.push_assistant(FALLBACK_QUESTION);
        }
    }
}

fn build_system_prompt(answers: &AnswerRecord, max_questions: u32) -> String {
    let answers_json = serde_json::to_string_pretty(answers).unwrap_or_else(|_| "{}".to_string());
    let prompt = CHAT_SYSTEM_TEMPLATE
        .replace("{answers}", &answers_json)
        .replace("{max_questions}", &max_questions.to_string())
        .replace("{sentinel}", END_SENTINEL);
    format!("{prompt}\n\n{FRENCH_TONE}")
}
