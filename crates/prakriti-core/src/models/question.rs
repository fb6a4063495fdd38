use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::dosha::Dosha;

/// A single questionnaire item. Psychometric items carry no weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionItem {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub weights: BTreeMap<Dosha, f64>,
}

impl QuestionItem {
    pub fn weight(&self, dosha: Dosha) -> f64 {
        self.weights.get(&dosha).copied().unwrap_or(0.0)
    }
}

/// Which questionnaire a set of answers belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Prakriti,
    Vikriti,
    Psychometric,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Prakriti => "prakriti",
            Section::Vikriti => "vikriti",
            Section::Psychometric => "psychometric",
        }
    }
}

/// Question id → integer Likert value for one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, i32>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<i32> {
        self.0.get(id).copied()
    }

    pub fn insert(&mut self, id: impl Into<String>, value: i32) {
        self.0.insert(id.into(), value);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, i32)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (K, i32)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
