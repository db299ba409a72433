use crate::questionnaire::answers::{flag, AnswerRecord};

/// Boolean exclusions checked before a pair is scored.
///
/// A pair is excluded when either side refuses a smoking partner and the other
/// side smokes. Missing answers read as "does not smoke" and "accepts smokers".
pub fn passes_dealbreakers(me: &AnswerRecord, other: &AnswerRecord) -> bool {
    !refuses_smoker(me, other) && !refuses_smoker(other, me)
}

fn refuses_smoker(picky: &AnswerRecord, candidate: &AnswerRecord) -> bool {
    let accepts = flag(picky, "accepts_smoker").unwrap_or(true);
    let smokes = flag(candidate, "smoker").unwrap_or(false);
    !accepts && smokes
}
