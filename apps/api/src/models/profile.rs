use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::chat::transcript::ChatMessage;
use crate::profiles::assessment::Assessment;
use crate::questionnaire::answers::AnswerRecord;

/// One submitted profile: `user_id | timestamp | data(JSON) | score | feedback`.
///
/// `score` is kept as text because rows are never validated on write; use
/// [`ProfileRow::numeric_score`] to read it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub user_id: String,
    pub submitted_at: DateTime<Utc>,
    pub data: Value,
    pub score: Option<String>,
    pub feedback: Option<String>,
}

/// The JSON blob stored in `ProfileRow::data`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileData {
    #[serde(default)]
    pub answers: AnswerRecord,
    #[serde(default)]
    pub chat: Vec<ChatMessage>,
    #[serde(default)]
    pub assessment: Option<Assessment>,
}

impl ProfileRow {
    /// Coerces the stored score to a number; non-numeric text reads as absent.
    pub fn numeric_score(&self) -> Option<f64> {
        self.score
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|s| s.is_finite())
    }

    /// Reads the answers out of the data blob. Blobs that are a bare answer map
    /// (no `answers` wrapper) are accepted too.
    pub fn answers(&self) -> Result<AnswerRecord, serde_json::Error> {
        if self.data.get("answers").is_some() {
            serde_json::from_value::<ProfileData>(self.data.clone()).map(|d| d.answers)
        } else {
            serde_json::from_value::<AnswerRecord>(self.data.clone())
        }
    }
}
