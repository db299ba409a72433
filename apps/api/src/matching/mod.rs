// Matching: compatibility scoring, dealbreakers and the questionnaire score.
// Everything here is pure; handlers load rows and pass them in.

pub mod compatibility;
pub mod dealbreakers;
pub mod handlers;
pub mod questionnaire_score;

use serde::Serialize;
use tracing::warn;

use crate::models::profile::ProfileRow;
use crate::questionnaire::answers::AnswerRecord;
use compatibility::compute_compatibility;
use dealbreakers::passes_dealbreakers;

/// A stored profile scored against the current user.
#[derive(Debug, Clone, Serialize)]
pub struct Match {
    pub user_id: String,
    pub compatibility: u32,
    pub score: Option<String>,
    pub feedback: Option<String>,
}

/// Scores every stored row against `me`, best first.
///
/// Rows of the same user, rows whose blob cannot be read and rows that fail a
/// dealbreaker are left out. Ties keep the order rows were stored in, so the
/// head of the list is the first maximum seen.
pub fn rank_matches(me: &AnswerRecord, my_user_id: &str, rows: &[ProfileRow]) -> Vec<Match> {
    let mut matches: Vec<Match> = rows
        .iter()
        .filter(|row| row.user_id != my_user_id)
        .filter_map(|row| match row.answers() {
            Ok(answers) => Some((row, answers)),
            Err(e) => {
                warn!("Skipping unreadable profile row for {}: {e}", row.user_id);
                None
            }
        })
        .filter(|(_, answers)| passes_dealbreakers(me, answers))
        .map(|(row, answers)| Match {
            user_id: row.user_id.clone(),
            compatibility: compute_compatibility(me, &answers),
            score: row.score.clone(),
            feedback: row.feedback.clone(),
        })
        .collect();

    // sort_by is stable
    matches.sort_by(|a, b| b.compatibility.cmp(&a.compatibility));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::{json, Value};

    fn row(user_id: &str, data: Value) -> ProfileRow {
        ProfileRow {
            user_id: user_id.to_string(),
            submitted_at: Utc::now(),
            data,
            score: None,
            feedback: None,
        }
    }

    fn me() -> AnswerRecord {
        serde_json::from_value(json!({
            "relationship_priority": "A) La confiance",
            "seriousness": 8,
            "smoker": false,
            "accepts_smoker": false,
            "values": ["Famille"]
        }))
        .unwrap()
    }

    #[test]
    fn test_ranked_best_first_and_self_excluded() {
        let rows = vec![
            row("moi", json!({"answers": me()})),
            row("loin", json!({"answers": {"seriousness": 0, "values": ["Ambition"]}})),
            row("proche", json!({"answers": me()})),
        ];
        let ranked = rank_matches(&me(), "moi", &rows);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].user_id, "proche");
        assert_eq!(ranked[0].compatibility, 100);
        assert!(ranked[1].compatibility < 100);
    }

    #[test]
    fn test_ties_keep_first_seen() {
        let rows = vec![
            row("premier", json!({"answers": me()})),
            row("second", json!({"answers": me()})),
        ];
        let ranked = rank_matches(&me(), "moi", &rows);
        assert_eq!(ranked[0].user_id, "premier");
        assert_eq!(ranked[1].user_id, "second");
    }

    #[test]
    fn test_dealbreakers_and_unreadable_rows_skipped() {
        let rows = vec![
            row("fumeur", json!({"answers": {"smoker": true}})),
            row("casse", json!(42)),
            row("ok", json!({"smoker": false})),
        ];
        let ranked = rank_matches(&me(), "moi", &rows);
        let ids: Vec<_> = ranked.iter().map(|m| m.user_id.as_str()).collect();
        assert_eq!(ids, vec!["ok"]);
    }

    #[test]
    fn test_rows_with_float_or_null_sliders_are_ranked() {
        let rows = vec![
            row("decimal", json!({"answers": {"seriousness": 7.8, "smoker": false}})),
            row("vide", json!({"answers": {"seriousness": null, "activity_level": null}})),
        ];
        let ranked = rank_matches(&me(), "moi", &rows);
        let ids: Vec<_> = ranked.iter().map(|m| m.user_id.as_str()).collect();
        assert_eq!(ids, vec!["decimal", "vide"]);
    }

    #[test]
    fn test_no_rows_no_matches() {
        assert!(rank_matches(&me(), "moi", &[]).is_empty());
    }
}
