use std::collections::BTreeMap;

use prakriti_core::models::dosha::{Dosha, ScoreDistribution};
use prakriti_core::models::psychometric::PsychometricProfile;
use prakriti_core::models::recommendation::CareerRecommendation;

const BASE_SCORE: u32 = 50;
const RESEARCH_FALLBACK_SCORE: u32 = 65;

/// Roles for the dominant constitutional category, boosted by personality
/// cues and sorted by descending score. Equal scores keep table order.
pub fn recommend_career(
    prakriti: &ScoreDistribution,
    psych: &PsychometricProfile,
    career_rules: &BTreeMap<Dosha, Vec<String>>,
) -> Vec<CareerRecommendation> {
    let dominant = prakriti.dominant();
    let roles = career_rules.get(&dominant).map(Vec::as_slice).unwrap_or_default();
    if roles.is_empty() {
        tracing::debug!(%dominant, "no career roles configured");
    }

    let mentions = |role: &str, words: &[&str]| words.iter().any(|w| role.contains(w));

    let mut recs: Vec<CareerRecommendation> = roles
        .iter()
        .map(|role| {
            let mut score = BASE_SCORE;
            if psych.openness > 65.0 && mentions(role, &["Research", "Creative", "Writer"]) {
                score += 10;
            }
            if psych.conscientiousness > 65.0 && mentions(role, &["Manager", "Engineer"]) {
                score += 8;
            }
            if psych.extraversion > 60.0 && mentions(role, &["Clinician", "Teacher"]) {
                score += 6;
            }
            CareerRecommendation {
                role: role.clone(),
                score,
                reason: format!("Matches dominant {dominant} + personality cues."),
            }
        })
        .collect();

    if psych.openness > 70.0 && !recs.iter().any(|r| r.role.contains("Research")) {
        recs.push(CareerRecommendation {
            role: "Research & Innovation".to_string(),
            score: RESEARCH_FALLBACK_SCORE,
            reason: "High openness suggests research fit.".to_string(),
        });
    }

    recs.sort_by(|a, b| b.score.cmp(&a.score));
    recs
}

/// Longer personalised rationale for one suggestion, as printed in the report.
pub fn career_rationale(
    rec: &CareerRecommendation,
    prakriti: &ScoreDistribution,
    psych: &PsychometricProfile,
) -> String {
    let mut parts = Vec::new();
    let reason = rec.reason.trim();
    if !reason.is_empty() {
        parts.push(reason.to_string());
    }

    parts.push(
        match prakriti.dominant() {
            Dosha::Vata => "Your constitutional Vata suggests creativity and flexible thinking — roles that allow variety and autonomy tend to suit well.",
            Dosha::Pitta => "Your constitutional Pitta suggests focus and leadership — roles with clear goals and measurable outcomes fit well.",
            Dosha::Kapha => "Your constitutional Kapha suggests steadiness and reliability — roles with structured progress and team support are favourable.",
        }
        .to_string(),
    );

    if psych.emotionality >= 60.0 {
        parts.push("Manageable stress and clear routines will help sustain performance.".to_string());
    }

    parts.push(format!("Score: {}", rec.score));
    parts.join(" ")
}
