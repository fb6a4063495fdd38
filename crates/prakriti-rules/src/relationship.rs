use prakriti_core::models::dosha::{Dosha, ScoreDistribution};
use prakriti_core::models::psychometric::PsychometricProfile;
use prakriti_core::models::recommendation::RelationshipTip;

fn tip(title: &str, detail: &str) -> RelationshipTip {
    RelationshipTip {
        title: title.to_string(),
        detail: detail.to_string(),
    }
}

/// One tip for the dominant constitutional category, then personality
/// tips for low agreeableness and high emotionality.
pub fn recommend_relationship(
    prakriti: &ScoreDistribution,
    psych: &PsychometricProfile,
) -> Vec<RelationshipTip> {
    let mut tips = vec![match prakriti.dominant() {
        Dosha::Vata => tip(
            "Stability & routines",
            "Vata benefits from grounding, predictable routines; short daily check-ins help.",
        ),
        Dosha::Pitta => tip(
            "Cooling communication",
            "Pause before responding and use neutral language during disagreements.",
        ),
        Dosha::Kapha => tip(
            "Introduce small novelty",
            "Gentle new activities reduce inertia and boost engagement.",
        ),
    }];

    if psych.agreeableness < 40.0 {
        tips.push(tip(
            "Reflective listening",
            "Summarize what partner said before giving your view.",
        ));
    }
    if psych.emotionality > 60.0 {
        tips.push(tip(
            "Emotion regulation",
            "Use 3-minute breathing or journaling before difficult talks.",
        ));
    }
    tips
}
