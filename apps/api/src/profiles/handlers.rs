use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::profile::ProfileRow;
use crate::state::AppState;

/// GET /api/v1/profiles
///
/// Every stored row, oldest first. Duplicate submissions are listed as-is.
pub async fn handle_list_profiles(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfileRow>>, AppError> {
    Ok(Json(state.profiles.list_all().await?))
}
