//! Questionnaire catalog: the pages of the form and the questions each one asks.

pub mod answers;

use serde::{Deserialize, Serialize};

use answers::{AnswerValue, SLIDER_MAX, SLIDER_MIDPOINT, SLIDER_MIN};

pub const RELATIONSHIP_PRIORITY_OPTIONS: &[&str] = &[
    "A) La confiance",
    "B) L’aventure et la spontanéité",
    "C) La communication",
    "D) L’intimité et la complicité",
];

pub const SOCIABILITY_OPTIONS: &[&str] = &[
    "Très sociable",
    "Assez sociable",
    "Introverti(e)",
    "Plutôt solitaire",
];

pub const VALUES_OPTIONS: &[&str] = &[
    "Famille",
    "Honnêteté",
    "Ambition",
    "Humour",
    "Spiritualité",
    "Aventure",
    "Créativité",
    "Indépendance",
];

/// Screens of the form, in the order a user walks through them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Login,
    QuestionsPart1,
    QuestionsPart2,
    Lifestyle,
    Chat,
    Result,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Login => "Bienvenue sur OneLove – Matchmaking IA",
            Page::QuestionsPart1 => "Questionnaire (1/3)",
            Page::QuestionsPart2 => "Questionnaire (2/3)",
            Page::Lifestyle => "Questionnaire (3/3)",
            Page::Chat => "Discussion",
            Page::Result => "Résultats et Matching",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Widget {
    Radio { options: &'static [&'static str] },
    Slider { min: i64, max: i64, default: i64 },
    Checkbox,
    FreeText,
    MultiSelect { options: &'static [&'static str] },
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Question {
    pub key: &'static str,
    pub label: &'static str,
    pub widget: Widget,
}

const SLIDER: Widget = Widget::Slider {
    min: SLIDER_MIN,
    max: SLIDER_MAX,
    default: SLIDER_MIDPOINT,
};

static LOGIN: [Question; 1] = [Question {
    key: "user_id",
    label: "Entrez votre pseudo ou email :",
    widget: Widget::FreeText,
}];

static PART1: [Question; 2] = [
    Question {
        key: "relationship_priority",
        label: "Dans une relation, qu'est-ce qui est le plus important pour toi ?",
        widget: Widget::Radio {
            options: RELATIONSHIP_PRIORITY_OPTIONS,
        },
    },
    Question {
        key: "sociability",
        label: "Quel est ton niveau de sociabilité ?",
        widget: Widget::Radio {
            options: SOCIABILITY_OPTIONS,
        },
    },
];

static PART2: [Question; 2] = [
    Question {
        key: "ideal_day",
        label: "Décris ta journée idéale en quelques mots :",
        widget: Widget::FreeText,
    },
    Question {
        key: "seriousness",
        label: "A quel point cherches-tu une relation sérieuse ? (0 = pas du tout, 10 = très)",
        widget: SLIDER,
    },
];

static LIFESTYLE: [Question; 5] = [
    Question {
        key: "activity_level",
        label: "Quel est ton niveau d'activité physique ? (0 = calme, 10 = très sportif)",
        widget: SLIDER,
    },
    Question {
        key: "wants_children",
        label: "Souhaites-tu avoir des enfants ?",
        widget: Widget::Checkbox,
    },
    Question {
        key: "smoker",
        label: "Es-tu fumeur(se) ?",
        widget: Widget::Checkbox,
    },
    Question {
        key: "accepts_smoker",
        label: "Accepterais-tu un(e) partenaire fumeur(se) ?",
        widget: Widget::Checkbox,
    },
    Question {
        key: "values",
        label: "Quelles valeurs comptent le plus pour toi ?",
        widget: Widget::MultiSelect {
            options: VALUES_OPTIONS,
        },
    },
];

/// Questions rendered on a page. Chat and result pages have none.
pub fn page_questions(page: Page) -> &'static [Question] {
    match page {
        Page::Login => &LOGIN,
        Page::QuestionsPart1 => &PART1,
        Page::QuestionsPart2 => &PART2,
        Page::Lifestyle => &LIFESTYLE,
        Page::Chat | Page::Result => &[],
    }
}

pub fn find_question(key: &str) -> Option<&'static Question> {
    [&LOGIN[..], &PART1[..], &PART2[..], &LIFESTYLE[..]]
        .into_iter()
        .flatten()
        .find(|q| q.key == key)
}

/// Checks that a value is something the question's widget could have produced.
pub fn validate_answer(question: &Question, value: &AnswerValue) -> Result<(), String> {
    match (&question.widget, value) {
        (Widget::Radio { options }, AnswerValue::Text(choice)) => {
            if options.iter().any(|o| o == choice) {
                Ok(())
            } else {
                Err(format!("'{choice}' is not an option for {}", question.key))
            }
        }
        (Widget::Slider { min, max, .. }, AnswerValue::Int(n)) => {
            if (*min..=*max).contains(n) {
                Ok(())
            } else {
                Err(format!("{} must be between {min} and {max}", question.key))
            }
        }
        (Widget::Checkbox, AnswerValue::Bool(_)) => Ok(()),
        (Widget::FreeText, AnswerValue::Text(_)) => Ok(()),
        (Widget::MultiSelect { options }, AnswerValue::List(items)) => {
            match items.iter().find(|item| !options.iter().any(|o| o == *item)) {
                Some(unknown) => Err(format!("'{unknown}' is not an option for {}", question.key)),
                None => Ok(()),
            }
        }
        _ => Err(format!("wrong answer type for {}", question.key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_form_page_has_questions() {
        for page in [
            Page::Login,
            Page::QuestionsPart1,
            Page::QuestionsPart2,
            Page::Lifestyle,
        ] {
            assert!(!page_questions(page).is_empty(), "{page:?} has no questions");
        }
        assert!(page_questions(Page::Chat).is_empty());
        assert!(page_questions(Page::Result).is_empty());
    }

    #[test]
    fn test_find_question_across_pages() {
        assert_eq!(find_question("seriousness").unwrap().key, "seriousness");
        assert_eq!(find_question("values").unwrap().key, "values");
        assert!(find_question("favourite_colour").is_none());
    }

    #[test]
    fn test_radio_rejects_unknown_option() {
        let q = find_question("sociability").unwrap();
        assert!(validate_answer(q, &AnswerValue::Text("Très sociable".into())).is_ok());
        assert!(validate_answer(q, &AnswerValue::Text("Ermite".into())).is_err());
    }

    #[test]
    fn test_slider_range_is_inclusive() {
        let q = find_question("seriousness").unwrap();
        assert!(validate_answer(q, &AnswerValue::Int(0)).is_ok());
        assert!(validate_answer(q, &AnswerValue::Int(10)).is_ok());
        assert!(validate_answer(q, &AnswerValue::Int(11)).is_err());
    }

    #[test]
    fn test_multi_select_rejects_unknown_item() {
        let q = find_question("values").unwrap();
        let ok = AnswerValue::List(vec!["Humour".into(), "Famille".into()]);
        let bad = AnswerValue::List(vec!["Humour".into(), "Argent".into()]);
        assert!(validate_answer(q, &ok).is_ok());
        assert!(validate_answer(q, &bad).is_err());
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let q = find_question("smoker").unwrap();
        assert!(validate_answer(q, &AnswerValue::Text("oui".into())).is_err());
    }
}
