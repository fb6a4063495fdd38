//! prakriti-instruments
//!
//! Questionnaire definitions and the Scorer. Pure functions, no I/O.
//! Defines the default question banks, answer validation, and the weighted
//! category and personality-axis scoring rules.

pub mod defaults;
pub mod error;
pub mod instruments;
pub mod scoring;

use std::collections::HashSet;

use prakriti_core::config::QuestionBanks;
use prakriti_core::models::question::{AnswerSet, QuestionItem, Section};

use error::InstrumentError;
use scoring::{LikertRange, ValidationError};

/// Trait implemented by each questionnaire.
pub trait Instrument {
    /// What scoring a complete answer set produces.
    type Score;

    /// Section identifier (e.g., "prakriti", "psychometric").
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Items in presentation order.
    fn questions(&self) -> &[QuestionItem];

    /// Accepted Likert values.
    fn answer_range(&self) -> LikertRange;

    /// Starting slider position for an unanswered item.
    fn default_answer(&self) -> i32;

    fn section(&self) -> Section;

    fn score(&self, answers: &AnswerSet) -> Self::Score;

    /// Validate an answer set against this questionnaire's items and range.
    fn validate_answers(&self, answers: &AnswerSet) -> Vec<ValidationError> {
        let range = self.answer_range();
        let mut errors = Vec::new();
        for (id, value) in answers.iter() {
            let known = self.questions().iter().any(|q| q.id == id);
            if !known {
                errors.push(ValidationError {
                    section: self.section(),
                    question_id: id.to_string(),
                    value,
                    expected_range: range,
                    message: format!("{}: unknown question id '{id}'", self.name()),
                });
            } else if !range.contains(value) {
                errors.push(ValidationError {
                    section: self.section(),
                    question_id: id.to_string(),
                    value,
                    expected_range: range,
                    message: format!(
                        "{}: answer {value} to '{id}' is outside range [{}, {}]",
                        self.name(),
                        range.min,
                        range.max,
                    ),
                });
            }
        }
        errors
    }

    /// Validate, returning a single error that carries every rejection.
    fn check_answers(&self, answers: &AnswerSet) -> Result<(), InstrumentError> {
        let errors = self.validate_answers(answers);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(InstrumentError::InvalidAnswers {
                section: self.section(),
                errors,
            })
        }
    }

    /// Copy of `answers` with every unanswered item at its default position.
    fn with_defaults(&self, answers: &AnswerSet) -> AnswerSet {
        let mut filled = answers.clone();
        for question in self.questions() {
            if !filled.contains(&question.id) {
                filled.insert(question.id.clone(), self.default_answer());
            }
        }
        filled
    }

    /// Answers rendered as `- question: value` lines under a heading.
    fn to_structured_text(&self, answers: &AnswerSet) -> String {
        let mut output = format!("## {}\n\n", self.name());
        for question in self.questions() {
            if let Some(value) = answers.get(&question.id) {
                output.push_str(&format!("- {} ({}): {}\n", question.text, question.id, value));
            }
        }
        output
    }
}

/// Reject banks with duplicate ids or no items.
pub fn validate_banks(banks: &QuestionBanks) -> Result<(), InstrumentError> {
    for (section, questions) in [
        (Section::Prakriti, &banks.prakriti),
        (Section::Vikriti, &banks.vikriti),
        (Section::Psychometric, &banks.psychometric),
    ] {
        if questions.is_empty() {
            return Err(InstrumentError::EmptyBank { section });
        }
        let mut seen = HashSet::new();
        for question in questions {
            if !seen.insert(question.id.as_str()) {
                return Err(InstrumentError::DuplicateQuestion {
                    section,
                    id: question.id.clone(),
                });
            }
        }
    }
    Ok(())
}

/// The three questionnaires built from one set of question banks.
#[derive(Debug, Clone)]
pub struct InstrumentSet {
    pub prakriti: instruments::dosha::DoshaInstrument,
    pub vikriti: instruments::dosha::DoshaInstrument,
    pub psychometric: instruments::psychometric::PsychometricInstrument,
}

impl InstrumentSet {
    pub fn from_banks(banks: &QuestionBanks) -> Self {
        Self {
            prakriti: instruments::dosha::DoshaInstrument::prakriti(banks.prakriti.clone()),
            vikriti: instruments::dosha::DoshaInstrument::vikriti(banks.vikriti.clone()),
            psychometric: instruments::psychometric::PsychometricInstrument::new(
                banks.psychometric.clone(),
            ),
        }
    }
}
