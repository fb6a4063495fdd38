use std::sync::LazyLock;

use prakriti_core::models::dosha::Dosha::{Kapha, Pitta, Vata};
use prakriti_core::models::question::QuestionItem;

use super::item;

/// Constitutional (baseline) questionnaire: 25 items on a 1–5 scale.
pub fn default_questions() -> &'static [QuestionItem] {
    static QUESTIONS: LazyLock<Vec<QuestionItem>> = LazyLock::new(|| {
        vec![
            item("P1", "Natural body frame: thin/slender", &[(Vata, 1.0)]),
            item("P2", "Tendency for dry, rough skin", &[(Vata, 1.0)]),
            item("P3", "Variable appetite / digestion", &[(Vata, 1.0)]),
            item("P4", "Light sleep, easily awakened", &[(Vata, 1.0)]),
            item("P5", "Quick, changeable mood", &[(Vata, 0.9), (Pitta, 0.1)]),
            item("P6", "Warm body/flush easily", &[(Pitta, 1.0)]),
            item("P7", "Strong appetite, tolerates spicy", &[(Pitta, 1.0)]),
            item("P8", "Ambitious, focused under pressure", &[(Pitta, 0.8)]),
            item("P9", "Calm, steady energy", &[(Kapha, 1.0)]),
            item("P10", "Good endurance and build", &[(Kapha, 1.0)]),
            item("P11", "Tendency to gain weight", &[(Kapha, 1.0)]),
            item(
                "P12",
                "Slow digestion vs regular digestion",
                &[(Kapha, 0.7), (Vata, 0.3)],
            ),
            item("P13", "Cold extremities often", &[(Vata, 0.8)]),
            item("P14", "Perspiration: sweats easily", &[(Pitta, 0.7)]),
            item(
                "P15",
                "Memory: quick recall vs steady long-term",
                &[(Vata, 0.5), (Kapha, 0.5)],
            ),
            item("P16", "Preference for warm foods", &[(Vata, 0.6)]),
            item("P17", "Tendency for oily skin", &[(Pitta, 0.6), (Kapha, 0.4)]),
            item("P18", "Joint stiffness when inactive", &[(Kapha, 0.8)]),
            item("P19", "Speech: fast vs slow", &[(Vata, 0.7), (Kapha, 0.3)]),
            item(
                "P20",
                "Physical strength & stamina",
                &[(Kapha, 0.7), (Pitta, 0.3)],
            ),
            item(
                "P21",
                "Prone to allergies/congestion",
                &[(Kapha, 0.7), (Pitta, 0.3)],
            ),
            item(
                "P22",
                "Easily excited / enthusiastic",
                &[(Vata, 0.7), (Pitta, 0.3)],
            ),
            item(
                "P23",
                "Face color: reddish vs pale",
                &[(Pitta, 0.8), (Kapha, 0.4)],
            ),
            item("P24", "Thirst level (high/low)", &[(Pitta, 0.7), (Kapha, 0.3)]),
            item("P25", "Tendency for constipation", &[(Vata, 0.9)]),
        ]
    });
    &QUESTIONS
}
