use std::sync::LazyLock;

use prakriti_core::models::psychometric::PsychometricProfile;
use prakriti_core::models::question::{AnswerSet, QuestionItem, Section};

use super::item;
use crate::Instrument;
use crate::scoring::{LikertRange, psychometric_profile};

/// Ten personality items on a 1–7 scale, paired keyed/reversed per axis.
pub fn default_questions() -> &'static [QuestionItem] {
    static QUESTIONS: LazyLock<Vec<QuestionItem>> = LazyLock::new(|| {
        vec![
            item("E1", "Outgoing, enthusiastic", &[]),
            item("E6", "Reserved, quiet", &[]),
            item("A1", "Often critical", &[]),
            item("A6", "Warm, sympathetic", &[]),
            item("C1", "Organized, reliable", &[]),
            item("C6", "Disorganized, careless", &[]),
            item("N1", "Often anxious", &[]),
            item("N6", "Emotionally stable", &[]),
            item("O1", "Open to new ideas", &[]),
            item("O6", "Conventional, prefers routine", &[]),
        ]
    });
    &QUESTIONS
}

#[derive(Debug, Clone)]
pub struct PsychometricInstrument {
    questions: Vec<QuestionItem>,
}

impl PsychometricInstrument {
    pub fn new(questions: Vec<QuestionItem>) -> Self {
        Self { questions }
    }
}

impl Instrument for PsychometricInstrument {
    type Score = PsychometricProfile;

    fn id(&self) -> &str {
        Section::Psychometric.as_str()
    }

    fn name(&self) -> &str {
        "Psychometric"
    }

    fn questions(&self) -> &[QuestionItem] {
        &self.questions
    }

    fn answer_range(&self) -> LikertRange {
        LikertRange::SEVEN_POINT
    }

    fn default_answer(&self) -> i32 {
        4
    }

    fn section(&self) -> Section {
        Section::Psychometric
    }

    fn score(&self, answers: &AnswerSet) -> PsychometricProfile {
        psychometric_profile(answers)
    }
}
