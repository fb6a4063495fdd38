//! prakriti-rules
//!
//! Recommendation rules. Pure lookup and threshold functions that map
//! scored distributions to canned guidance: diet, lifestyle and herbs,
//! careers, relationship tips, the personalised guideline and the
//! transformation plan. There is no error path; degenerate input yields
//! empty or generic output.

pub mod appendix;
pub mod career;
pub mod context;
pub mod guideline;
pub mod health;
pub mod plan;
pub mod relationship;
pub mod tone;

use prakriti_core::models::dosha::{Dosha, ScoreDistribution};

/// Highest-valued category; ties go to the earlier category in canonical
/// order (Vata, Pitta, Kapha).
pub fn dominant(distribution: &ScoreDistribution) -> Dosha {
    distribution.dominant()
}
