//! Built-in configuration written on first start.

use std::collections::BTreeMap;

use prakriti_core::config::{
    Branding, DoshaThresholds, Mappings, Meta, QuestionBanks, RulesConfig, WatermarkConfig,
};
use prakriti_core::models::dosha::Dosha;

use crate::instruments::{prakriti, psychometric, vikriti};

/// Current config schema version.
pub const CONFIG_VERSION: u32 = 1;

pub fn default_banks() -> QuestionBanks {
    QuestionBanks {
        prakriti: prakriti::default_questions().to_vec(),
        vikriti: vikriti::default_questions().to_vec(),
        psychometric: psychometric::default_questions().to_vec(),
    }
}

pub fn default_career_rules() -> BTreeMap<Dosha, Vec<String>> {
    let roles = |list: &[&str]| list.iter().map(|r| r.to_string()).collect::<Vec<_>>();
    BTreeMap::from([
        (
            Dosha::Vata,
            roles(&["Writer", "Designer", "Consultant - Creative", "Researcher"]),
        ),
        (
            Dosha::Pitta,
            roles(&["Clinician", "Analyst", "Manager", "Engineer"]),
        ),
        (
            Dosha::Kapha,
            roles(&["Teacher", "Counselor", "Hospitality", "HR", "Agriculture"]),
        ),
    ])
}

pub fn default_config() -> RulesConfig {
    RulesConfig {
        config_version: CONFIG_VERSION,
        meta: Meta {
            app_name: "AyurPrakriti Pro Mega".to_string(),
            version: "2.0".to_string(),
            author: "Generated".to_string(),
        },
        questions: default_banks(),
        mappings: Mappings {
            career_rules: default_career_rules(),
            dosha_thresholds: DoshaThresholds::default(),
        },
        branding: Branding::default(),
        watermark: WatermarkConfig::default(),
    }
}
