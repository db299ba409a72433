//! LLM-written psychological profile: `{"score": int, "feedback": string}`.
//!
//! Nothing here fails the request. An unreachable model or an unreadable reply
//! degrades to [`Assessment::placeholder`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::chat::transcript::{ChatMessage, ChatRole, ChatTranscript};
use crate::llm_client::prompts::{FRENCH_TONE, JSON_ONLY_SYSTEM};
use crate::llm_client::{strip_json_fences, ChatModel};
use crate::profiles::prompts::{ASSESSMENT_PROMPT_TEMPLATE, ASSESSMENT_SYSTEM};
use crate::questionnaire::answers::AnswerRecord;

pub const PLACEHOLDER_FEEDBACK: &str =
    "Ton profil n'a pas encore pu être analysé. Reviens un peu plus tard !";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub score: i64,
    pub feedback: String,
}

impl Assessment {
    pub fn placeholder() -> Self {
        Self {
            score: 0,
            feedback: PLACEHOLDER_FEEDBACK.to_string(),
        }
    }
}

/// Asks the model for a profile. Without a model the placeholder is returned.
pub async fn assess_profile(
    model: Option<&dyn ChatModel>,
    answers: &AnswerRecord,
    transcript: &ChatTranscript,
) -> Assessment {
    let Some(model) = model else {
        return Assessment::placeholder();
    };

    let prompt = ASSESSMENT_PROMPT_TEMPLATE
        .replace(
            "{answers}",
            &serde_json::to_string_pretty(answers).unwrap_or_else(|_| "{}".to_string()),
        )
        .replace("{transcript}", &render_transcript(transcript));
    let system = format!("{ASSESSMENT_SYSTEM}\n{FRENCH_TONE}\n{JSON_ONLY_SYSTEM}");

    match model
        .complete(&system, &[ChatMessage::new(ChatRole::User, prompt)])
        .await
    {
        Ok(text) => {
            let assessment = parse_assessment(&text);
            info!("Profile assessed: score={}", assessment.score);
            assessment
        }
        Err(e) => {
            warn!("Profile assessment failed, using placeholder: {e}");
            Assessment::placeholder()
        }
    }
}

fn render_transcript(transcript: &ChatTranscript) -> String {
    let lines: Vec<String> = transcript
        .visible_messages()
        .map(|m| {
            let speaker = match m.role {
                ChatRole::Assistant => "Coach",
                _ => "Utilisateur",
            };
            format!("{speaker} : {}", m.content)
        })
        .collect();
    if lines.is_empty() {
        "(aucune discussion)".to_string()
    } else {
        lines.join("\n")
    }
}

/// Reads the model's reply leniently.
///
/// - a JSON object (optionally fenced or wrapped in prose) gives score + feedback
/// - the score may be an integer, a float or a numeric string; otherwise 0
/// - plain prose becomes the feedback with a score of 0
/// - an empty reply gives the placeholder
pub fn parse_assessment(text: &str) -> Assessment {
    let text = strip_json_fences(text);
    if text.is_empty() {
        return Assessment::placeholder();
    }

    let Some(object) = extract_json_object(text) else {
        return Assessment {
            score: 0,
            feedback: text.to_string(),
        };
    };

    let score = object
        .get("score")
        .and_then(|v| match v {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
            Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f.round() as i64),
            _ => None,
        })
        .unwrap_or(0)
        .clamp(0, 100);

    let feedback = object
        .get("feedback")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .unwrap_or_else(|| PLACEHOLDER_FEEDBACK.to_string());

    Assessment { score, feedback }
}

fn extract_json_object(text: &str) -> Option<Value> {
    if let Ok(v @ Value::Object(_)) = serde_json::from_str::<Value>(text) {
        return Some(v);
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(v @ Value::Object(_)) => Some(v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedModel;

    #[test]
    fn test_parse_plain_json() {
        let a = parse_assessment(r#"{"score": 72, "feedback": "Personne posée."}"#);
        assert_eq!(a.score, 72);
        assert_eq!(a.feedback, "Personne posée.");
    }

    #[test]
    fn test_parse_fenced_json_with_string_score() {
        let a =
            parse_assessment("```json\n{\"score\": \"64.6\", \"feedback\": \"Ouverte.\"}\n```");
        assert_eq!(a.score, 65);
        assert_eq!(a.feedback, "Ouverte.");
    }

    #[test]
    fn test_parse_json_wrapped_in_prose() {
        let a = parse_assessment(
            "Voici mon analyse : {\"score\": 40, \"feedback\": \"Réservé.\"} Merci.",
        );
        assert_eq!(a.score, 40);
    }

    #[test]
    fn test_parse_bad_score_defaults_to_zero_and_clamps() {
        assert_eq!(parse_assessment(r#"{"score": "élevé", "feedback": "x"}"#).score, 0);
        assert_eq!(parse_assessment(r#"{"score": 250, "feedback": "x"}"#).score, 100);
        assert_eq!(parse_assessment(r#"{"score": -3, "feedback": "x"}"#).score, 0);
    }

    #[test]
    fn test_parse_missing_feedback_uses_placeholder() {
        let a = parse_assessment(r#"{"score": 50}"#);
        assert_eq!(a.feedback, PLACEHOLDER_FEEDBACK);
    }

    #[test]
    fn test_parse_prose_becomes_feedback() {
        let a = parse_assessment("Tu es quelqu'un de curieux.");
        assert_eq!(a.score, 0);
        assert_eq!(a.feedback, "Tu es quelqu'un de curieux.");
    }

    #[test]
    fn test_parse_empty_is_placeholder() {
        assert_eq!(parse_assessment("   "), Assessment::placeholder());
    }

    #[tokio::test]
    async fn test_no_model_gives_placeholder() {
        let a = assess_profile(None, &AnswerRecord::new(), &ChatTranscript::default()).await;
        assert_eq!(a, Assessment::placeholder());
    }

    #[tokio::test]
    async fn test_model_failure_gives_placeholder() {
        let model = ScriptedModel::failing();
        let a = assess_profile(
            Some(&model as &dyn ChatModel),
            &AnswerRecord::new(),
            &ChatTranscript::default(),
        )
        .await;
        assert_eq!(a, Assessment::placeholder());
    }

    #[tokio::test]
    async fn test_prompt_includes_transcript() {
        let model = ScriptedModel::new(vec![r#"{"score": 81, "feedback": "Solaire."}"#]);
        let mut transcript = ChatTranscript::default();
        transcript.push_assistant("Ton plat préféré ?");
        transcript.record_user_reply("La raclette");

        let a = assess_profile(
            Some(&model as &dyn ChatModel),
            &AnswerRecord::new(),
            &transcript,
        )
        .await;
        assert_eq!(a.score, 81);

        let calls = model.calls.lock().unwrap();
        let (system, messages) = &calls[0];
        assert!(system.contains("JSON"));
        assert!(messages[0].content.contains("Utilisateur : La raclette"));
    }
}
