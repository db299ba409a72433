//! Session orchestration: runs the dispatcher, then the chat model, scoring and
//! storage side effects it asks for.
//!
//! Flow on finish: questionnaire_score → assess_profile → append row → result page.

use anyhow::Context;
use chrono::Utc;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::chat::conversation::{open_conversation, reply};
use crate::errors::AppError;
use crate::matching::questionnaire_score::{questionnaire_score, score_band};
use crate::matching::{rank_matches, Match};
use crate::models::profile::{ProfileData, ProfileRow};
use crate::profiles::assessment::{assess_profile, Assessment};
use crate::questionnaire::answers::text;
use crate::questionnaire::Page;
use crate::session::flow::{advance, Submission, Transition};
use crate::session::SessionState;
use crate::state::AppState;

/// A stored profile whose questionnaire score is close to the user's.
#[derive(Debug, Clone, Serialize)]
pub struct BandEntry {
    pub user_id: String,
    pub score: f64,
    pub ideal_day: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResultView {
    pub user_id: Option<String>,
    pub base_score: i64,
    pub assessment: Assessment,
    pub profile_saved: bool,
    pub score_band: Vec<BandEntry>,
    pub matches: Vec<Match>,
    pub best_match: Option<Match>,
}

/// Applies a submission to the session, including any model calls and the
/// final profile write.
pub async fn submit(
    state: &AppState,
    session: &mut SessionState,
    submission: Submission,
) -> Result<(), AppError> {
    let model = state.chat_model.as_deref();

    match advance(session, submission, model.is_some())? {
        Transition::Moved(page) => {
            info!("Session for {:?} moved to {page:?}", session.user_id);
        }
        Transition::OpenChat => {
            if let Some(model) = model {
                open_conversation(model, &mut session.chat, &session.answers).await;
            }
            if session.chat.finished {
                finalize(state, session).await?;
            }
        }
        Transition::ChatReply(message) => {
            let model = model
                .ok_or_else(|| AppError::Conflict("Chat is not available".to_string()))?;
            reply(model, &mut session.chat, &message).await?;
            if session.chat.finished {
                finalize(state, session).await?;
            }
        }
        Transition::Finalize => finalize(state, session).await?,
    }
    Ok(())
}

/// Scores, assesses and stores the completed profile, then shows the result page.
/// A failed write is logged and reported on the result page, not raised.
async fn finalize(state: &AppState, session: &mut SessionState) -> Result<(), AppError> {
    let base_score = questionnaire_score(&session.answers);
    let assessment =
        assess_profile(state.chat_model.as_deref(), &session.answers, &session.chat).await;

    let data = ProfileData {
        answers: session.answers.clone(),
        chat: session.chat.visible_messages().cloned().collect(),
        assessment: Some(assessment.clone()),
    };
    let row = ProfileRow {
        user_id: session.user_id.clone().unwrap_or_default(),
        submitted_at: Utc::now(),
        data: serde_json::to_value(&data).context("Failed to serialize profile data")?,
        score: Some(base_score.to_string()),
        feedback: Some(assessment.feedback.clone()),
    };

    session.profile_saved = match state.profiles.append(&row).await {
        Ok(()) => true,
        Err(e) => {
            error!("Could not store profile for {}: {e}", row.user_id);
            false
        }
    };

    info!("Profile finalized for {}: score={base_score}", row.user_id);
    session.base_score = Some(base_score);
    session.assessment = Some(assessment);
    session.page = Page::Result;
    Ok(())
}

/// Builds the result page: score band, ranked matches and the best match.
/// If stored rows cannot be read, both lists come back empty.
pub async fn build_result(
    state: &AppState,
    session: &SessionState,
) -> Result<ResultView, AppError> {
    if session.page != Page::Result {
        return Err(AppError::Conflict(format!(
            "No result yet, the session is on {:?}",
            session.page
        )));
    }

    let user_id = session.user_id.clone().unwrap_or_default();
    let base_score = session
        .base_score
        .unwrap_or_else(|| questionnaire_score(&session.answers));

    let rows = state.profiles.list_all().await.unwrap_or_else(|e| {
        warn!("Could not read stored profiles, showing no matches: {e}");
        Vec::new()
    });

    let band: Vec<BandEntry> = score_band(&rows, base_score, state.config.match_score_band)
        .into_iter()
        .filter(|row| row.user_id != user_id)
        .filter_map(|row| {
            Some(BandEntry {
                user_id: row.user_id.clone(),
                score: row.numeric_score()?,
                ideal_day: row
                    .answers()
                    .ok()
                    .and_then(|a| text(&a, "ideal_day").map(String::from)),
            })
        })
        .collect();

    let matches = rank_matches(&session.answers, &user_id, &rows);
    let best_match = matches.first().cloned();

    Ok(ResultView {
        user_id: session.user_id.clone(),
        base_score,
        assessment: session.assessment.clone().unwrap_or_else(Assessment::placeholder),
        profile_saved: session.profile_saved,
        score_band: band,
        matches,
        best_match,
    })
}
