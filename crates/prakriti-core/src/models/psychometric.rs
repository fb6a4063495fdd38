use std::fmt;

use serde::{Deserialize, Serialize};

/// Personality axis derived from a pair of Likert items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PersonalityAxis {
    Extraversion,
    Agreeableness,
    Conscientiousness,
    Emotionality,
    Openness,
}

impl PersonalityAxis {
    pub const ALL: [PersonalityAxis; 5] = [
        PersonalityAxis::Extraversion,
        PersonalityAxis::Agreeableness,
        PersonalityAxis::Conscientiousness,
        PersonalityAxis::Emotionality,
        PersonalityAxis::Openness,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PersonalityAxis::Extraversion => "Extraversion",
            PersonalityAxis::Agreeableness => "Agreeableness",
            PersonalityAxis::Conscientiousness => "Conscientiousness",
            PersonalityAxis::Emotionality => "Emotionality",
            PersonalityAxis::Openness => "Openness",
        }
    }
}

impl fmt::Display for PersonalityAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Five personality-axis percentages, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PsychometricProfile {
    #[serde(rename = "Extraversion")]
    pub extraversion: f64,
    #[serde(rename = "Agreeableness")]
    pub agreeableness: f64,
    #[serde(rename = "Conscientiousness")]
    pub conscientiousness: f64,
    #[serde(rename = "Emotionality")]
    pub emotionality: f64,
    #[serde(rename = "Openness")]
    pub openness: f64,
}

impl PsychometricProfile {
    /// Every axis at the midpoint. Returned when the answer set is incomplete.
    pub fn neutral() -> Self {
        Self {
            extraversion: 50.0,
            agreeableness: 50.0,
            conscientiousness: 50.0,
            emotionality: 50.0,
            openness: 50.0,
        }
    }

    pub fn get(&self, axis: PersonalityAxis) -> f64 {
        match axis {
            PersonalityAxis::Extraversion => self.extraversion,
            PersonalityAxis::Agreeableness => self.agreeableness,
            PersonalityAxis::Conscientiousness => self.conscientiousness,
            PersonalityAxis::Emotionality => self.emotionality,
            PersonalityAxis::Openness => self.openness,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PersonalityAxis, f64)> + '_ {
        PersonalityAxis::ALL.into_iter().map(|a| (a, self.get(a)))
    }

    /// Highest-scoring axis; earlier axes win ties.
    pub fn strongest(&self) -> PersonalityAxis {
        let mut best = PersonalityAxis::Extraversion;
        for axis in PersonalityAxis::ALL {
            if self.get(axis) > self.get(best) {
                best = axis;
            }
        }
        best
    }
}

impl Default for PsychometricProfile {
    fn default() -> Self {
        Self::neutral()
    }
}
