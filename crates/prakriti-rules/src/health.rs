use std::collections::BTreeMap;

use prakriti_core::config::DoshaThresholds;
use prakriti_core::models::dosha::{Dosha, ScoreDistribution, round_one_decimal};
use prakriti_core::models::recommendation::{HealthRecommendation, Severity};

pub const VATA_DIET: &str =
    "Warm, cooked meals; include healthy oils; regular meal timings; avoid iced drinks first thing.";
pub const VATA_LIFESTYLE: &str = "Daily warm oil massage (Abhyanga) 5–10 min; grounding morning routine; consistent sleep schedule.";
pub const VATA_HERBS: &str = "Ashwagandha (under clinician guidance), Bala for strength.";

pub const PITTA_DIET: &str =
    "Cooling foods; reduce spicy, fried and fermented foods; include bitter greens.";
pub const PITTA_LIFESTYLE: &str = "Avoid midday heat; cooling pranayama; calm, regular breaks.";
pub const PITTA_HERBS: &str = "Amla, Guduchi (clinician review).";

pub const KAPHA_DIET: &str = "Light, warm, slightly astringent foods; reduce dairy & sweets.";
pub const KAPHA_LIFESTYLE: &str =
    "Stimulating exercise 30–60 min daily; vary routine; dry massage (udvartana).";
pub const KAPHA_HERBS: &str = "Trikatu, Guggulu (clinician supervision).";

/// Classify a combined score against the thresholds.
pub fn severity(score: f64, thresholds: &DoshaThresholds) -> Severity {
    if score >= thresholds.severe {
        Severity::Severe
    } else if score >= thresholds.moderate {
        Severity::Moderate
    } else if score >= thresholds.mild {
        Severity::Mild
    } else {
        Severity::Balanced
    }
}

/// Diet, lifestyle and herb guidance for the dominant constitutional
/// category, plus a per-category severity from the mean of the
/// constitutional and current percentages.
pub fn recommend_health(
    prakriti: &ScoreDistribution,
    vikriti: &ScoreDistribution,
    thresholds: &DoshaThresholds,
) -> HealthRecommendation {
    let severity_map: BTreeMap<Dosha, Severity> = prakriti
        .iter()
        .map(|(dosha, pct)| {
            let combined = round_one_decimal((pct + vikriti.get(dosha)) / 2.0);
            (dosha, severity(combined, thresholds))
        })
        .collect();

    let (diet, lifestyle, herbs) = match prakriti.dominant() {
        Dosha::Vata => (VATA_DIET, VATA_LIFESTYLE, VATA_HERBS),
        Dosha::Pitta => (PITTA_DIET, PITTA_LIFESTYLE, PITTA_HERBS),
        Dosha::Kapha => (KAPHA_DIET, KAPHA_LIFESTYLE, KAPHA_HERBS),
    };

    HealthRecommendation {
        diet: vec![diet.to_string()],
        lifestyle: vec![lifestyle.to_string()],
        herbs: vec![herbs.to_string()],
        severity: severity_map,
    }
}
