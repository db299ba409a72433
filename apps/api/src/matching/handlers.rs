//! Axum route handlers for stateless matching.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::matching::compatibility::compute_compatibility;
use crate::matching::dealbreakers::passes_dealbreakers;
use crate::questionnaire::answers::AnswerRecord;

#[derive(Debug, Deserialize)]
pub struct CompatibilityRequest {
    pub a: AnswerRecord,
    pub b: AnswerRecord,
}

#[derive(Debug, Serialize)]
pub struct CompatibilityResponse {
    pub percentage: u32,
    pub passes_dealbreakers: bool,
}

/// POST /api/v1/compatibility
///
/// Scores two answer records against each other without touching any store.
pub async fn handle_compatibility(
    Json(request): Json<CompatibilityRequest>,
) -> Json<CompatibilityResponse> {
    Json(CompatibilityResponse {
        percentage: compute_compatibility(&request.a, &request.b),
        passes_dealbreakers: passes_dealbreakers(&request.a, &request.b),
    })
}
