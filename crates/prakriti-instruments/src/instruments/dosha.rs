use prakriti_core::models::dosha::ScoreDistribution;
use prakriti_core::models::question::{AnswerSet, QuestionItem, Section};

use crate::Instrument;
use crate::scoring::{LikertRange, score_doshas};

/// A weighted questionnaire scored into a three-category distribution.
/// Backs both the Prakriti and Vikriti sections.
#[derive(Debug, Clone)]
pub struct DoshaInstrument {
    section: Section,
    name: &'static str,
    questions: Vec<QuestionItem>,
    default_answer: i32,
}

impl DoshaInstrument {
    /// Constitutional baseline. Sliders start at the midpoint.
    pub fn prakriti(questions: Vec<QuestionItem>) -> Self {
        Self {
            section: Section::Prakriti,
            name: "Prakriti",
            questions,
            default_answer: 3,
        }
    }

    /// Current state. Sliders start at "not present".
    pub fn vikriti(questions: Vec<QuestionItem>) -> Self {
        Self {
            section: Section::Vikriti,
            name: "Vikriti",
            questions,
            default_answer: 1,
        }
    }
}

impl Instrument for DoshaInstrument {
    type Score = ScoreDistribution;

    fn id(&self) -> &str {
        self.section.as_str()
    }

    fn name(&self) -> &str {
        self.name
    }

    fn questions(&self) -> &[QuestionItem] {
        &self.questions
    }

    fn answer_range(&self) -> LikertRange {
        LikertRange::FIVE_POINT
    }

    fn default_answer(&self) -> i32 {
        self.default_answer
    }

    fn section(&self) -> Section {
        self.section
    }

    fn score(&self, answers: &AnswerSet) -> ScoreDistribution {
        score_doshas(answers, &self.questions)
    }
}
