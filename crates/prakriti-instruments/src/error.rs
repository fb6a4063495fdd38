use thiserror::Error;

use prakriti_core::models::question::Section;

use crate::scoring::ValidationError;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{} answers rejected: {}", .section.as_str(), summarize(.errors))]
    InvalidAnswers {
        section: Section,
        errors: Vec<ValidationError>,
    },

    #[error("duplicate question id '{id}' in {} bank", .section.as_str())]
    DuplicateQuestion { section: Section, id: String },

    #[error("{} question bank is empty", .section.as_str())]
    EmptyBank { section: Section },
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
