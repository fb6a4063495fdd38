use serde::{Deserialize, Serialize};

use super::dosha::ScoreDistribution;
use super::patient::Patient;
use super::psychometric::PsychometricProfile;
use super::question::AnswerSet;
use super::recommendation::{CareerRecommendation, CarePlan, HealthRecommendation, RelationshipTip};

/// Append-only log row for one submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub id: i64,
    pub patient_id: i64,
    pub assessor: String,
    pub data: AssessmentRecord,
    pub created_at: jiff::Timestamp,
}

/// Listing view of an assessment without the embedded payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentSummary {
    pub id: i64,
    pub patient_id: i64,
    pub assessor: String,
    pub created_at: jiff::Timestamp,
}

/// Everything captured for one submission: inputs, scores and
/// recommendations. Stored as `data_json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub patient: Patient,
    pub prakriti_answers: AnswerSet,
    pub vikriti_answers: AnswerSet,
    pub psych_answers: AnswerSet,
    pub prakriti_pct: ScoreDistribution,
    pub vikriti_pct: ScoreDistribution,
    pub psych_pct: PsychometricProfile,
    pub career_recs: Vec<CareerRecommendation>,
    pub relationship_tips: Vec<RelationshipTip>,
    pub health_recs: HealthRecommendation,
    #[serde(default)]
    pub care_plan: Option<CarePlan>,
    pub created_at: jiff::Timestamp,
}
