use std::collections::BTreeMap;

use prakriti_core::config::DoshaThresholds;
use prakriti_core::models::dosha::{Dosha, ScoreDistribution};
use prakriti_core::models::psychometric::PsychometricProfile;
use prakriti_core::models::recommendation::Severity;
use prakriti_rules::career::{career_rationale, recommend_career};
use prakriti_rules::context::{AgeGroup, Gender, PatientContext, Ritu};
use prakriti_rules::guideline::{active_doshas, personalised_guideline};
use prakriti_rules::health::{self, recommend_health};
use prakriti_rules::plan::{care_plan, priority_actions};
use prakriti_rules::relationship::recommend_relationship;
use prakriti_rules::tone::neutralize_tone;
use prakriti_rules::dominant;

fn thresholds() -> DoshaThresholds {
    DoshaThresholds {
        mild: 55.0,
        moderate: 70.0,
        severe: 85.0,
    }
}

fn career_rules() -> BTreeMap<Dosha, Vec<String>> {
    let roles = |r: &[&str]| r.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    BTreeMap::from([
        (
            Dosha::Vata,
            roles(&["Writer", "Designer", "Consultant - Creative", "Researcher"]),
        ),
        (Dosha::Pitta, roles(&["Clinician", "Analyst", "Manager", "Engineer"])),
        (
            Dosha::Kapha,
            roles(&["Teacher", "Counselor", "Hospitality", "HR", "Agriculture"]),
        ),
    ])
}

fn context() -> PatientContext {
    PatientContext {
        gender: Gender::Other,
        age_group: AgeGroup::Adult,
        ritu: Ritu::Vasanta,
    }
}

#[test]
fn vata_dominant_returns_vata_tables_verbatim() {
    let prakriti = ScoreDistribution::new(70.0, 20.0, 10.0);
    let vikriti = ScoreDistribution::new(70.0, 20.0, 10.0);
    assert_eq!(dominant(&prakriti), Dosha::Vata);

    let recs = recommend_health(&prakriti, &vikriti, &thresholds());
    assert_eq!(
        recs.diet,
        vec!["Warm, cooked meals; include healthy oils; regular meal timings; avoid iced drinks first thing."]
    );
    assert_eq!(
        recs.lifestyle,
        vec!["Daily warm oil massage (Abhyanga) 5–10 min; grounding morning routine; consistent sleep schedule."]
    );
    assert_eq!(
        recs.herbs,
        vec!["Ashwagandha (under clinician guidance), Bala for strength."]
    );
    assert_eq!(recs.severity[&Dosha::Vata], Severity::Moderate);
    assert_eq!(recs.severity[&Dosha::Kapha], Severity::Balanced);
}

#[test]
fn kapha_and_pitta_tables_follow_the_dominant_category() {
    let kapha = ScoreDistribution::new(10.0, 20.0, 70.0);
    let recs = recommend_health(&kapha, &kapha, &thresholds());
    assert_eq!(recs.diet, vec![health::KAPHA_DIET]);

    let pitta = ScoreDistribution::new(20.0, 60.0, 20.0);
    let recs = recommend_health(&pitta, &pitta, &thresholds());
    assert_eq!(recs.herbs, vec![health::PITTA_HERBS]);
}

#[test]
fn severity_uses_mean_of_both_distributions() {
    let t = thresholds();
    assert_eq!(health::severity(54.9, &t), Severity::Balanced);
    assert_eq!(health::severity(55.0, &t), Severity::Mild);
    assert_eq!(health::severity(70.0, &t), Severity::Moderate);
    assert_eq!(health::severity(85.0, &t), Severity::Severe);

    // (90 + 80) / 2 = 85 → severe
    let prakriti = ScoreDistribution::new(90.0, 5.0, 5.0);
    let vikriti = ScoreDistribution::new(80.0, 10.0, 10.0);
    let recs = recommend_health(&prakriti, &vikriti, &t);
    assert_eq!(recs.severity[&Dosha::Vata], Severity::Severe);
}

#[test]
fn ties_resolve_in_canonical_order() {
    assert_eq!(dominant(&ScoreDistribution::new(40.0, 40.0, 20.0)), Dosha::Vata);
    assert_eq!(dominant(&ScoreDistribution::new(20.0, 40.0, 40.0)), Dosha::Pitta);
    assert_eq!(dominant(&ScoreDistribution::equal_split()), Dosha::Vata);
}

#[test]
fn career_boosts_and_ordering() {
    let prakriti = ScoreDistribution::new(20.0, 60.0, 20.0);
    let psych = PsychometricProfile {
        conscientiousness: 80.0,
        extraversion: 70.0,
        ..PsychometricProfile::neutral()
    };
    let recs = recommend_career(&prakriti, &psych, &career_rules());
    let roles: Vec<(&str, u32)> = recs.iter().map(|r| (r.role.as_str(), r.score)).collect();
    assert_eq!(
        roles,
        vec![("Manager", 58), ("Engineer", 58), ("Clinician", 56), ("Analyst", 50)]
    );
    assert_eq!(recs[0].reason, "Matches dominant Pitta + personality cues.");
}

#[test]
fn high_openness_adds_research_when_missing() {
    let prakriti = ScoreDistribution::new(10.0, 10.0, 80.0);
    let psych = PsychometricProfile {
        openness: 75.0,
        ..PsychometricProfile::neutral()
    };
    let recs = recommend_career(&prakriti, &psych, &career_rules());
    assert_eq!(recs[0].role, "Research & Innovation");
    assert_eq!(recs[0].score, 65);
    assert_eq!(recs[0].reason, "High openness suggests research fit.");

    // Vata already lists a Researcher, so nothing is added.
    let vata = ScoreDistribution::new(80.0, 10.0, 10.0);
    let recs = recommend_career(&vata, &psych, &career_rules());
    assert!(!recs.iter().any(|r| r.role == "Research & Innovation"));
    assert_eq!(recs[0].score, 60);
}

#[test]
fn empty_career_table_yields_no_roles() {
    let recs = recommend_career(
        &ScoreDistribution::equal_split(),
        &PsychometricProfile::neutral(),
        &BTreeMap::new(),
    );
    assert!(recs.is_empty());
}

#[test]
fn rationale_mentions_score_and_constitution() {
    let prakriti = ScoreDistribution::new(20.0, 20.0, 60.0);
    let psych = PsychometricProfile {
        emotionality: 70.0,
        ..PsychometricProfile::neutral()
    };
    let recs = recommend_career(&prakriti, &psych, &career_rules());
    let text = career_rationale(&recs[0], &prakriti, &psych);
    assert!(text.starts_with("Matches dominant Kapha"));
    assert!(text.contains("constitutional Kapha"));
    assert!(text.contains("clear routines"));
    assert!(text.ends_with("Score: 50"));
}

#[test]
fn relationship_tips_follow_personality() {
    let prakriti = ScoreDistribution::new(20.0, 60.0, 20.0);
    let tips = recommend_relationship(&prakriti, &PsychometricProfile::neutral());
    assert_eq!(tips.len(), 1);
    assert_eq!(tips[0].title, "Cooling communication");

    let psych = PsychometricProfile {
        agreeableness: 30.0,
        emotionality: 65.0,
        ..PsychometricProfile::neutral()
    };
    let titles: Vec<String> = recommend_relationship(&prakriti, &psych)
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(
        titles,
        vec!["Cooling communication", "Reflective listening", "Emotion regulation"]
    );
}

#[test]
fn season_and_age_mapping() {
    assert_eq!(Ritu::from_month(1), Ritu::Hemanta);
    assert_eq!(Ritu::from_month(2), Ritu::Shishira);
    assert_eq!(Ritu::from_month(4), Ritu::Vasanta);
    assert_eq!(Ritu::from_month(6), Ritu::Grishma);
    assert_eq!(Ritu::from_month(8), Ritu::Varsha);
    assert_eq!(Ritu::from_month(10), Ritu::Sharad);
    assert_eq!(Ritu::from_month(11).name(), "Hemanta/Sharad");
    assert_eq!(Ritu::from_month(12), Ritu::Hemanta);

    assert_eq!(AgeGroup::from_age(12), AgeGroup::Child);
    assert_eq!(AgeGroup::from_age(13), AgeGroup::YoungAdult);
    assert_eq!(AgeGroup::from_age(25), AgeGroup::YoungAdult);
    assert_eq!(AgeGroup::from_age(60), AgeGroup::Adult);
    assert_eq!(AgeGroup::from_age(61), AgeGroup::OlderAdult);

    assert_eq!(Gender::from_registry(" Female "), Gender::Female);
    assert_eq!(Gender::from_registry("M"), Gender::Male);
    assert_eq!(Gender::from_registry("Prefer not to say"), Gender::Other);
}

#[test]
fn active_doshas_fall_back_to_constitution() {
    let prakriti = ScoreDistribution::new(20.0, 20.0, 60.0);
    let spread = ScoreDistribution::new(35.0, 35.0, 30.0);
    assert_eq!(active_doshas(&prakriti, &spread), vec![Dosha::Kapha]);

    let vikriti = ScoreDistribution::new(45.0, 42.0, 13.0);
    assert_eq!(active_doshas(&prakriti, &vikriti), vec![Dosha::Vata, Dosha::Pitta]);
}

#[test]
fn guideline_covers_every_section() {
    let prakriti = ScoreDistribution::new(60.0, 25.0, 15.0);
    let vikriti = ScoreDistribution::new(50.0, 30.0, 20.0);
    let ctx = PatientContext {
        gender: Gender::Female,
        age_group: AgeGroup::OlderAdult,
        ritu: Ritu::Grishma,
    };
    let text = personalised_guideline(&prakriti, &vikriti, &PsychometricProfile::neutral(), &ctx);
    let paragraphs: Vec<&str> = text.split("\n\n").collect();
    assert_eq!(paragraphs.len(), 7);
    assert!(paragraphs[0].contains("Vata-dominant"));
    assert!(paragraphs[1].starts_with("Immediate focus: grounding"));
    assert!(paragraphs[2].starts_with("Daily: Wake earlier"));
    assert!(paragraphs[3].contains("older adults") && paragraphs[3].contains("Women"));
    assert!(paragraphs[4].starts_with("Mind:"));
    assert!(paragraphs[5].starts_with("Season (Grishma"));
    assert!(paragraphs[5].contains("For Vata tendencies"));
    assert!(paragraphs[6].starts_with("Micro-actions"));
}

#[test]
fn priority_extras_land_on_this_week() {
    let vikriti = ScoreDistribution::new(20.0, 20.0, 60.0);
    let psych = PsychometricProfile {
        emotionality: 75.0,
        ..PsychometricProfile::neutral()
    };
    let ctx = PatientContext {
        gender: Gender::Female,
        age_group: AgeGroup::OlderAdult,
        ritu: Ritu::Varsha,
    };
    let columns = priority_actions(&vikriti, &psych, &ctx);
    assert_eq!(columns.len(), 3);
    assert_eq!(columns[0].title, "Start today (Kapha lightening)");
    assert!(columns[0].note.is_none());
    let note = columns[1].note.as_deref().unwrap();
    assert!(note.starts_with("Short calming breath"));
    assert!(note.contains("gentler movement"));
    assert!(note.contains("iron-friendly"));
    assert!(note.ends_with(Ritu::Varsha.tip()));
    assert!(columns[2].note.is_none());
}

#[test]
fn priority_note_always_carries_season() {
    let columns = priority_actions(
        &ScoreDistribution::new(60.0, 20.0, 20.0),
        &PsychometricProfile::neutral(),
        &context(),
    );
    assert_eq!(columns[1].note.as_deref(), Some(Ritu::Vasanta.tip()));
}

#[test]
fn care_plan_hero_uses_name_and_state() {
    let prakriti = ScoreDistribution::new(20.0, 60.0, 20.0);
    let vikriti = ScoreDistribution::new(20.0, 20.0, 60.0);
    let plan = care_plan("Asha", &prakriti, &vikriti);
    assert!(plan.hero.starts_with("Asha — you have Pitta-style strengths"));
    assert!(plan.hero.ends_with("slow & heavy."));
    assert!(plan.checklist.starts_with("ONE-PAGE ACTION CHECKLIST"));
    assert_eq!(plan.checklist.lines().filter(|l| l.starts_with("- ")).count(), 6);

    let anonymous = care_plan("  ", &prakriti, &vikriti);
    assert!(anonymous.hero.starts_with("You — "));
}

#[test]
fn tone_is_rewritten_for_clinicians() {
    assert_eq!(
        neutralize_tone("You should rest. Try warm water; you're doing well with your routine."),
        "It is recommended to rest. Consider warm water; the client is doing well with the client's routine."
    );
    assert_eq!(neutralize_tone("  youth stays  "), "youth stays");
}
