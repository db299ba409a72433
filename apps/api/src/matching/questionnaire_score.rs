//! Deterministic questionnaire score and the score-band filter built on it.

use crate::models::profile::ProfileRow;
use crate::questionnaire::answers::{numeric_or_midpoint, text, AnswerRecord};

const RELATIONSHIP_PRIORITY_POINTS: &[(&str, i64)] = &[
    ("A) La confiance", 10),
    ("B) L’aventure et la spontanéité", 8),
    ("C) La communication", 7),
    ("D) L’intimité et la complicité", 6),
];

const SOCIABILITY_POINTS: &[(&str, i64)] = &[
    ("Très sociable", 8),
    ("Assez sociable", 6),
    ("Introverti(e)", 4),
    ("Plutôt solitaire", 2),
];

/// Keywords looked for in the free-text ideal day, each counted once.
const IDEAL_DAY_KEYWORDS: &[(&str, i64)] = &[
    ("voyage", 5),
    ("plage", 5),
    ("océan", 5),
    ("aventure", 5),
    ("tranquillité", 3),
    ("famille", 3),
    ("sport", 3),
    ("culture", 3),
];

/// Sum of the per-question points. Unknown choices score 0; the seriousness
/// slider counts its raw value.
pub fn questionnaire_score(answers: &AnswerRecord) -> i64 {
    let priority = lookup(RELATIONSHIP_PRIORITY_POINTS, text(answers, "relationship_priority"));
    let sociability = lookup(SOCIABILITY_POINTS, text(answers, "sociability"));
    let ideal_day = keyword_points(text(answers, "ideal_day").unwrap_or_default());
    let seriousness = numeric_or_midpoint(answers, "seriousness");

    priority + sociability + ideal_day + seriousness
}

fn lookup(table: &[(&str, i64)], choice: Option<&str>) -> i64 {
    choice
        .and_then(|c| table.iter().find(|(option, _)| *option == c))
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

fn keyword_points(text: &str) -> i64 {
    let lowered = text.to_lowercase();
    IDEAL_DAY_KEYWORDS
        .iter()
        .filter(|(word, _)| lowered.contains(word))
        .map(|(_, points)| points)
        .sum()
}

/// Rows whose stored score lies within `band` points of `score`.
/// Rows with a missing or non-numeric score are skipped.
pub fn score_band<'a>(rows: &'a [ProfileRow], score: i64, band: i64) -> Vec<&'a ProfileRow> {
    let (min, max) = (
        score.saturating_sub(band) as f64,
        score.saturating_add(band) as f64,
    );
    rows.iter()
        .filter(|row| {
            row.numeric_score()
                .map(|s| s >= min && s <= max)
                .unwrap_or(false)
        })
        .collect()
}
