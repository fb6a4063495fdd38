use serde::{Deserialize, Serialize};
use thiserror::Error;

use prakriti_core::models::dosha::{Dosha, ScoreDistribution, round_one_decimal};
use prakriti_core::models::psychometric::{PersonalityAxis, PsychometricProfile};
use prakriti_core::models::question::{AnswerSet, QuestionItem, Section};

/// Inclusive range of accepted Likert values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikertRange {
    pub min: i32,
    pub max: i32,
}

impl LikertRange {
    pub const FIVE_POINT: LikertRange = LikertRange { min: 1, max: 5 };
    pub const SEVEN_POINT: LikertRange = LikertRange { min: 1, max: 7 };

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }
}

/// A single rejected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub section: Section,
    pub question_id: String,
    pub value: i32,
    pub expected_range: LikertRange,
    pub message: String,
}

/// Weighted category percentages for one answer set.
///
/// Each category accumulates `weight × answer` over every item; the totals
/// are normalised by their grand total and rounded to one decimal.
/// Unanswered items contribute nothing. A grand total of zero or less
/// yields [`ScoreDistribution::equal_split`].
pub fn score_doshas(answers: &AnswerSet, questions: &[QuestionItem]) -> ScoreDistribution {
    let mut totals = ScoreDistribution::new(0.0, 0.0, 0.0);
    for question in questions {
        let Some(value) = answers.get(&question.id) else {
            continue;
        };
        for dosha in Dosha::ALL {
            let acc = totals.get(dosha) + question.weight(dosha) * f64::from(value);
            totals.set(dosha, acc);
        }
    }

    let grand_total = totals.total();
    if grand_total <= 0.0 || !grand_total.is_finite() {
        return ScoreDistribution::equal_split();
    }

    let mut pct = ScoreDistribution::new(0.0, 0.0, 0.0);
    for (dosha, total) in totals.iter() {
        pct.set(dosha, round_one_decimal(total / grand_total * 100.0));
    }
    pct
}

/// `(axis, keyed item, reverse-keyed item)` for the 10-item paired layout.
pub const PSYCHOMETRIC_PAIRS: [(PersonalityAxis, &str, &str); 5] = [
    (PersonalityAxis::Extraversion, "E1", "E6"),
    (PersonalityAxis::Agreeableness, "A6", "A1"),
    (PersonalityAxis::Conscientiousness, "C1", "C6"),
    (PersonalityAxis::Emotionality, "N1", "N6"),
    (PersonalityAxis::Openness, "O1", "O6"),
];

/// Five personality-axis percentages from the paired 1–7 items.
///
/// Each axis averages its keyed item with the reversed (`8 − x`) partner,
/// then rescales linearly from 1–7 to 0–100. If any expected id is absent
/// every axis is 50.
pub fn psychometric_profile(answers: &AnswerSet) -> PsychometricProfile {
    let range = LikertRange::SEVEN_POINT;
    let mut profile = PsychometricProfile::neutral();

    for (axis, keyed, reversed) in PSYCHOMETRIC_PAIRS {
        let (Some(k), Some(r)) = (answers.get(keyed), answers.get(reversed)) else {
            tracing::debug!(keyed, reversed, "incomplete psychometric pair, using neutral profile");
            return PsychometricProfile::neutral();
        };
        let raw = f64::from(range.clamp(k) + (8 - range.clamp(r))) / 2.0;
        let pct = round_one_decimal((raw - 1.0) / 6.0 * 100.0);
        match axis {
            PersonalityAxis::Extraversion => profile.extraversion = pct,
            PersonalityAxis::Agreeableness => profile.agreeableness = pct,
            PersonalityAxis::Conscientiousness => profile.conscientiousness = pct,
            PersonalityAxis::Emotionality => profile.emotionality = pct,
            PersonalityAxis::Openness => profile.openness = pct,
        }
    }
    profile
}
