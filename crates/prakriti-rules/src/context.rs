use std::fmt;

use serde::{Deserialize, Serialize};

use prakriti_core::models::patient::Patient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Free-text registry value → normalised gender. Anything unrecognised
    /// (including "Prefer not to say") maps to `Other`.
    pub fn from_registry(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "m" | "male" | "man" => Gender::Male,
            "f" | "female" | "woman" => Gender::Female,
            _ => Gender::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    Child,
    YoungAdult,
    Adult,
    OlderAdult,
}

impl AgeGroup {
    pub fn from_age(age: u32) -> Self {
        match age {
            0..=12 => AgeGroup::Child,
            13..=25 => AgeGroup::YoungAdult,
            26..=60 => AgeGroup::Adult,
            _ => AgeGroup::OlderAdult,
        }
    }
}

/// Approximate Indian season (ritu) for a calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ritu {
    Hemanta,
    Shishira,
    Vasanta,
    Grishma,
    Varsha,
    Sharad,
    /// November, when winter is arriving.
    HemantaSharad,
}

impl Ritu {
    /// `month` is 1-based. Out-of-range values fall back to the
    /// Hemanta/Sharad transition.
    pub fn from_month(month: i8) -> Self {
        match month {
            12 | 1 => Ritu::Hemanta,
            2 => Ritu::Shishira,
            3 | 4 => Ritu::Vasanta,
            5 | 6 => Ritu::Grishma,
            7 | 8 => Ritu::Varsha,
            9 | 10 => Ritu::Sharad,
            _ => Ritu::HemantaSharad,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ritu::Hemanta => "Hemanta",
            Ritu::Shishira => "Shishira",
            Ritu::Vasanta => "Vasanta",
            Ritu::Grishma => "Grishma",
            Ritu::Varsha => "Varsha",
            Ritu::Sharad => "Sharad",
            Ritu::HemantaSharad => "Hemanta/Sharad",
        }
    }

    /// One-line seasonal care tip.
    pub fn tip(&self) -> &'static str {
        match self {
            Ritu::Hemanta | Ritu::Shishira => {
                "Season (Hemanta/Shishira): Cold/time to keep warm; prefer warm oils, soups, and avoid long cold exposure."
            }
            Ritu::Grishma => {
                "Season (Grishma - hot): Cooling foods, lighter meals, increase hydration, avoid mid-day heat."
            }
            Ritu::Varsha => {
                "Season (Varsha - monsoon): Favor cooked, dry, well-spiced food; avoid street food; keep digestion strong."
            }
            Ritu::Sharad => {
                "Season (Sharad): Gradually transition to slightly lighter foods; morning sun exposure is useful."
            }
            Ritu::Vasanta | Ritu::HemantaSharad => {
                "Season: Follow balanced seasonal adjustments — prefer warm cooked food and steady routines."
            }
        }
    }
}

impl fmt::Display for Ritu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Patient attributes the rules tailor their text to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientContext {
    pub gender: Gender,
    pub age_group: AgeGroup,
    pub ritu: Ritu,
}

impl PatientContext {
    pub fn new(patient: &Patient, month: i8) -> Self {
        Self {
            gender: Gender::from_registry(&patient.gender),
            age_group: AgeGroup::from_age(patient.age),
            ritu: Ritu::from_month(month),
        }
    }
}
