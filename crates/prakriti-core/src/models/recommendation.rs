use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::dosha::Dosha;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerRecommendation {
    pub role: String,
    pub score: u32,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipTip {
    pub title: String,
    pub detail: String,
}

/// Imbalance level of one category against the configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Balanced,
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Balanced => "balanced",
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthRecommendation {
    pub diet: Vec<String>,
    pub lifestyle: Vec<String>,
    pub herbs: Vec<String>,
    pub severity: BTreeMap<Dosha, Severity>,
}

/// One column of the "start today / this week / this month" strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityAction {
    pub title: String,
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Plain-language transformation plan handed to the patient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarePlan {
    pub hero: String,
    pub plan: String,
    pub habit_stack: String,
    pub wow_tips: String,
    pub checklist: String,
    pub doctor_note: String,
}
