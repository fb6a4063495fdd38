pub mod dosha;
pub mod prakriti;
pub mod psychometric;
pub mod vikriti;

use std::collections::BTreeMap;

use prakriti_core::models::dosha::Dosha;
use prakriti_core::models::question::QuestionItem;

fn item(id: &str, text: &str, weights: &[(Dosha, f64)]) -> QuestionItem {
    QuestionItem {
        id: id.to_string(),
        text: text.to_string(),
        weights: weights.iter().copied().collect::<BTreeMap<_, _>>(),
    }
}
