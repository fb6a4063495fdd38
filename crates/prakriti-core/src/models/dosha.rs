use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three classification buckets used throughout scoring.
///
/// Declaration order is the canonical order: it drives iteration, table
/// rendering and tie-breaking when two categories share the top score.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Dosha {
    Vata,
    Pitta,
    Kapha,
}

impl Dosha {
    pub const ALL: [Dosha; 3] = [Dosha::Vata, Dosha::Pitta, Dosha::Kapha];

    pub fn name(&self) -> &'static str {
        match self {
            Dosha::Vata => "Vata",
            Dosha::Pitta => "Pitta",
            Dosha::Kapha => "Kapha",
        }
    }
}

impl fmt::Display for Dosha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Percentage distribution over the three categories.
///
/// Values sum to 100 (within rounding), or are an equal split when the
/// underlying answers carried no weight at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    #[serde(rename = "Vata")]
    pub vata: f64,
    #[serde(rename = "Pitta")]
    pub pitta: f64,
    #[serde(rename = "Kapha")]
    pub kapha: f64,
}

impl ScoreDistribution {
    pub fn new(vata: f64, pitta: f64, kapha: f64) -> Self {
        Self { vata, pitta, kapha }
    }

    /// The degenerate-input fallback: 100 / 3 each, rounded to one decimal.
    pub fn equal_split() -> Self {
        let third = round_one_decimal(100.0 / 3.0);
        Self::new(third, third, third)
    }

    pub fn get(&self, dosha: Dosha) -> f64 {
        match dosha {
            Dosha::Vata => self.vata,
            Dosha::Pitta => self.pitta,
            Dosha::Kapha => self.kapha,
        }
    }

    pub fn set(&mut self, dosha: Dosha, value: f64) {
        match dosha {
            Dosha::Vata => self.vata = value,
            Dosha::Pitta => self.pitta = value,
            Dosha::Kapha => self.kapha = value,
        }
    }

    /// `(category, percentage)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Dosha, f64)> + '_ {
        Dosha::ALL.into_iter().map(|d| (d, self.get(d)))
    }

    pub fn total(&self) -> f64 {
        self.vata + self.pitta + self.kapha
    }

    /// Highest-valued category. Ties go to the earlier category in
    /// canonical order.
    pub fn dominant(&self) -> Dosha {
        let mut best = Dosha::Vata;
        for dosha in Dosha::ALL {
            if self.get(dosha) > self.get(best) {
                best = dosha;
            }
        }
        best
    }
}

/// Round to one decimal place, the precision every percentage is reported at.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
