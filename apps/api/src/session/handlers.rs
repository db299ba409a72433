//! Axum route handlers for the form session API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::flow::Submission;
use crate::session::service::{build_result, submit, ResultView};
use crate::session::{PageView, SessionState};
use crate::state::AppState;

async fn load_session(state: &AppState, id: Uuid) -> Result<SessionState, AppError> {
    state
        .sessions
        .load(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

/// POST /api/v1/sessions
///
/// Starts a new session on the login page.
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<PageView>), AppError> {
    let id = Uuid::new_v4();
    let session = SessionState::new(state.config.chat_max_questions);
    state.sessions.save(id, &session).await?;
    Ok((StatusCode::CREATED, Json(PageView::new(id, &session))))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PageView>, AppError> {
    let session = load_session(&state, id).await?;
    Ok(Json(PageView::new(id, &session)))
}

/// POST /api/v1/sessions/:id/submit
///
/// Applies the form for the current page and returns the next page to render.
/// A rejected submission leaves the stored session unchanged.
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(submission): Json<Submission>,
) -> Result<Json<PageView>, AppError> {
    let mut session = load_session(&state, id).await?;
    submit(&state, &mut session, submission).await?;
    state.sessions.save(id, &session).await?;
    Ok(Json(PageView::new(id, &session)))
}

/// GET /api/v1/sessions/:id/result
pub async fn handle_get_result(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResultView>, AppError> {
    let session = load_session(&state, id).await?;
    Ok(Json(build_result(&state, &session).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
