use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use prakriti_core::models::question::AnswerSet;
use prakriti_instruments::{Instrument, InstrumentSet};

/// One submission's answers, as read from a YAML or JSON file:
///
/// ```yaml
/// prakriti: { P1: 4, P2: 2 }
/// vikriti: { V1: 3 }
/// psychometric: { E1: 6, E6: 2 }
/// ```
///
/// Missing sections are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnswerFile {
    pub prakriti: AnswerSet,
    pub vikriti: AnswerSet,
    pub psychometric: AnswerSet,
}

impl AnswerFile {
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("failed to read answers at {}: {e}", path.display()))?;
        Self::parse(&contents)
    }

    /// YAML is a superset of JSON, so either format parses.
    pub fn parse(contents: &str) -> eyre::Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Reject unknown ids and out-of-range values in every section.
    pub fn validate(&self, instruments: &InstrumentSet) -> eyre::Result<()> {
        instruments.prakriti.check_answers(&self.prakriti)?;
        instruments.vikriti.check_answers(&self.vikriti)?;
        instruments.psychometric.check_answers(&self.psychometric)?;
        Ok(())
    }

    /// Unanswered items at their default slider positions.
    pub fn with_defaults(&self, instruments: &InstrumentSet) -> Self {
        Self {
            prakriti: instruments.prakriti.with_defaults(&self.prakriti),
            vikriti: instruments.vikriti.with_defaults(&self.vikriti),
            psychometric: instruments.psychometric.with_defaults(&self.psychometric),
        }
    }
}
