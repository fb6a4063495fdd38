use std::collections::BTreeMap;

use prakriti_core::models::dosha::Dosha;
use prakriti_core::models::question::{AnswerSet, QuestionItem, Section};
use prakriti_instruments::defaults::{default_banks, default_config};
use prakriti_instruments::error::InstrumentError;
use prakriti_instruments::instruments::{prakriti, psychometric, vikriti};
use prakriti_instruments::scoring::{psychometric_profile, score_doshas};
use prakriti_instruments::{Instrument, InstrumentSet, validate_banks};

fn assert_sums_to_100(a: f64, b: f64, c: f64) {
    let total = a + b + c;
    assert!((total - 100.0).abs() <= 0.15, "sum was {total}");
}

#[test]
fn default_banks_have_expected_sizes() {
    assert_eq!(prakriti::default_questions().len(), 25);
    assert_eq!(vikriti::default_questions().len(), 20);
    assert_eq!(psychometric::default_questions().len(), 10);
    validate_banks(&default_banks()).unwrap();
}

#[test]
fn percentages_sum_to_100_for_full_answer_sets() {
    let questions = prakriti::default_questions();
    for seed in 1..=5 {
        let answers: AnswerSet = questions
            .iter()
            .enumerate()
            .map(|(i, q)| (q.id.clone(), ((i as i32 + seed) % 5) + 1))
            .collect();
        let dist = score_doshas(&answers, questions);
        assert_sums_to_100(dist.vata, dist.pitta, dist.kapha);
    }
}

#[test]
fn empty_answer_set_yields_equal_split() {
    let dist = score_doshas(&AnswerSet::new(), prakriti::default_questions());
    assert_eq!((dist.vata, dist.pitta, dist.kapha), (33.3, 33.3, 33.3));
}

#[test]
fn zero_weight_questions_yield_equal_split() {
    let questions = vec![QuestionItem {
        id: "Z1".to_string(),
        text: "No weight".to_string(),
        weights: BTreeMap::new(),
    }];
    let answers: AnswerSet = [("Z1", 5)].into_iter().collect();
    let dist = score_doshas(&answers, &questions);
    assert_eq!((dist.vata, dist.pitta, dist.kapha), (33.3, 33.3, 33.3));
}

#[test]
fn weighted_sum_is_normalised() {
    let questions = vec![
        QuestionItem {
            id: "Q1".to_string(),
            text: "Vata item".to_string(),
            weights: BTreeMap::from([(Dosha::Vata, 1.0)]),
        },
        QuestionItem {
            id: "Q2".to_string(),
            text: "Mixed item".to_string(),
            weights: BTreeMap::from([(Dosha::Pitta, 0.5), (Dosha::Kapha, 0.5)]),
        },
    ];
    // Vata 1*4 = 4, Pitta 0.5*2 = 1, Kapha 0.5*2 = 1 → 66.7 / 16.7 / 16.7
    let answers: AnswerSet = [("Q1", 4), ("Q2", 2)].into_iter().collect();
    let dist = score_doshas(&answers, &questions);
    assert_eq!(dist.vata, 66.7);
    assert_eq!(dist.pitta, 16.7);
    assert_eq!(dist.kapha, 16.7);
}

#[test]
fn psychometric_midpoint_answers_score_fifty() {
    let answers: AnswerSet = psychometric::default_questions()
        .iter()
        .map(|q| (q.id.clone(), 4))
        .collect();
    let profile = psychometric_profile(&answers);
    for (_, pct) in profile.iter() {
        assert_eq!(pct, 50.0);
    }
}

#[test]
fn psychometric_extremes_map_to_bounds() {
    let answers: AnswerSet = [
        ("E1", 7),
        ("E6", 1),
        ("A1", 7),
        ("A6", 1),
        ("C1", 7),
        ("C6", 1),
        ("N1", 1),
        ("N6", 7),
        ("O1", 7),
        ("O6", 1),
    ]
    .into_iter()
    .collect();
    let profile = psychometric_profile(&answers);
    assert_eq!(profile.extraversion, 100.0);
    assert_eq!(profile.agreeableness, 0.0);
    assert_eq!(profile.conscientiousness, 100.0);
    assert_eq!(profile.emotionality, 0.0);
    assert_eq!(profile.openness, 100.0);
}

#[test]
fn psychometric_missing_item_returns_neutral() {
    let answers: AnswerSet = [("E1", 7), ("E6", 1)].into_iter().collect();
    let profile = psychometric_profile(&answers);
    for (_, pct) in profile.iter() {
        assert_eq!(pct, 50.0);
    }
}

#[test]
fn psychometric_axes_stay_in_bounds_for_out_of_range_input() {
    let ids = ["E1", "E6", "A1", "A6", "C1", "C6", "N1", "N6", "O1", "O6"];
    for value in [-3, 0, 1, 4, 7, 9, 100] {
        let answers: AnswerSet = ids.iter().map(|id| (*id, value)).collect();
        let profile = psychometric_profile(&answers);
        for (axis, pct) in profile.iter() {
            assert!((0.0..=100.0).contains(&pct), "{axis} = {pct} for input {value}");
        }
    }
}

#[test]
fn validation_reports_range_and_unknown_ids() {
    let set = InstrumentSet::from_banks(&default_banks());
    let answers: AnswerSet = [("P1", 6), ("P2", 3), ("X99", 2)].into_iter().collect();
    let errors = set.prakriti.validate_answers(&answers);
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().any(|e| e.question_id == "P1" && e.value == 6));
    assert!(errors.iter().any(|e| e.question_id == "X99"));

    match set.prakriti.check_answers(&answers) {
        Err(InstrumentError::InvalidAnswers { section, errors }) => {
            assert_eq!(section, Section::Prakriti);
            assert_eq!(errors.len(), 2);
        }
        other => panic!("expected InvalidAnswers, got {other:?}"),
    }
}

#[test]
fn psychometric_accepts_seven_point_scale() {
    let set = InstrumentSet::from_banks(&default_banks());
    let answers: AnswerSet = [("E1", 7), ("N6", 1)].into_iter().collect();
    assert!(set.psychometric.validate_answers(&answers).is_empty());
}

#[test]
fn defaults_fill_unanswered_items() {
    let set = InstrumentSet::from_banks(&default_banks());
    let answers: AnswerSet = [("V1", 5)].into_iter().collect();
    let filled = set.vikriti.with_defaults(&answers);
    assert_eq!(filled.len(), 20);
    assert_eq!(filled.get("V1"), Some(5));
    assert_eq!(filled.get("V2"), Some(1));

    let filled = set.prakriti.with_defaults(&AnswerSet::new());
    assert_eq!(filled.get("P7"), Some(3));

    let filled = set.psychometric.with_defaults(&AnswerSet::new());
    assert_eq!(set.psychometric.score(&filled).openness, 50.0);
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut banks = default_config().questions;
    let dup = banks.vikriti[0].clone();
    banks.vikriti.push(dup);
    assert!(matches!(
        validate_banks(&banks),
        Err(InstrumentError::DuplicateQuestion { section: Section::Vikriti, .. })
    ));
}

#[test]
fn structured_text_lists_answered_items() {
    let set = InstrumentSet::from_banks(&default_banks());
    let answers: AnswerSet = [("P1", 4)].into_iter().collect();
    let text = set.prakriti.to_structured_text(&answers);
    assert!(text.starts_with("## Prakriti"));
    assert!(text.contains("(P1): 4"));
    assert!(!text.contains("P2"));
}
