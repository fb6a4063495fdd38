use std::sync::LazyLock;

use prakriti_core::models::dosha::Dosha::{Kapha, Pitta, Vata};
use prakriti_core::models::question::QuestionItem;

use super::item;

/// Current-state questionnaire: 20 items on a 1–5 scale, answered for today.
pub fn default_questions() -> &'static [QuestionItem] {
    static QUESTIONS: LazyLock<Vec<QuestionItem>> = LazyLock::new(|| {
        vec![
            item("V1", "Anxiety, restlessness today", &[(Vata, 1.0)]),
            item("V2", "Racing thoughts, insomnia", &[(Vata, 1.0)]),
            item("V3", "Cold hands/feet today", &[(Vata, 0.8)]),
            item("V4", "Excess heat, anger, irritability", &[(Pitta, 1.0)]),
            item("V5", "Acidity, heartburn, sour belching", &[(Pitta, 1.0)]),
            item("V6", "Red rashes or inflammation", &[(Pitta, 1.0)]),
            item("V7", "Heaviness, lethargy, sleepiness", &[(Kapha, 1.0)]),
            item("V8", "Congestion, phlegm, mucus", &[(Kapha, 1.0)]),
            item("V9", "Slow digestion, poor appetite", &[(Kapha, 0.8)]),
            item("V10", "Joint stiffness or swelling", &[(Kapha, 0.7)]),
            item("V11", "Excess thirst or dry mouth", &[(Pitta, 0.6)]),
            item("V12", "Loose stools or irregular digestion", &[(Vata, 0.8)]),
            item("V13", "Excess worrying today", &[(Vata, 0.9)]),
            item("V14", "Agitation or short temper", &[(Pitta, 0.9)]),
            item("V15", "Sleep fragmented", &[(Vata, 0.8)]),
            item("V16", "Sensation of heaviness in the head", &[(Kapha, 0.7)]),
            item("V17", "Excess sweating", &[(Pitta, 0.5)]),
            item("V18", "Reduced motivation", &[(Kapha, 0.8)]),
            item("V19", "Unusual cravings (salty/sweet)", &[(Kapha, 0.6)]),
            item(
                "V20",
                "Irritable bowel symptoms",
                &[(Pitta, 0.6), (Vata, 0.4)],
            ),
        ]
    });
    &QUESTIONS
}
