//! Weighted-sum compatibility between two answer records.
//!
//! Each attribute contributes up to its weight:
//! - exact-match criteria: full weight when both answers are equal
//! - sliders: `weight * (1 - |a - b| / range)`, malformed values read as the midpoint
//! - values multi-select: `weight * jaccard(a, b)`
//!
//! The sum is divided by `MAX_WEIGHT` and rounded to an integer percentage.

use std::collections::BTreeSet;

use crate::questionnaire::answers::{
    numeric_or_midpoint, string_set, AnswerRecord, SLIDER_MAX, SLIDER_MIN,
};

/// Attributes scored on exact equality.
const EXACT_MATCH_WEIGHTS: &[(&str, f64)] = &[
    ("relationship_priority", 15.0),
    ("sociability", 10.0),
    ("wants_children", 20.0),
    ("smoker", 10.0),
];

/// Slider attributes scored with a linear penalty on the gap.
const SLIDER_WEIGHTS: &[(&str, f64)] = &[("seriousness", 15.0), ("activity_level", 10.0)];

const VALUES_KEY: &str = "values";
const VALUES_WEIGHT: f64 = 20.0;

pub const MAX_WEIGHT: f64 = 100.0;

/// Returns the compatibility of two records as a percentage in 0..=100.
pub fn compute_compatibility(a: &AnswerRecord, b: &AnswerRecord) -> u32 {
    let mut total = 0.0_f64;

    for (key, weight) in EXACT_MATCH_WEIGHTS {
        if a.get(*key) == b.get(*key) {
            total += weight;
        }
    }

    let range = (SLIDER_MAX - SLIDER_MIN) as f64;
    for (key, weight) in SLIDER_WEIGHTS {
        let gap = (numeric_or_midpoint(a, key) - numeric_or_midpoint(b, key)).abs() as f64;
        total += weight * (range - gap) / range;
    }

    total += VALUES_WEIGHT * jaccard(&string_set(a, VALUES_KEY), &string_set(b, VALUES_KEY));

    ((total / MAX_WEIGHT) * 100.0).round().clamp(0.0, 100.0) as u32
}

/// |A ∩ B| / |A ∪ B|. Two empty selections count as identical.
fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 1.0;
    }
    a.intersection(b).count() as f64 / union as f64
}
