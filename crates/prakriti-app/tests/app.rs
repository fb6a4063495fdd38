use std::fs;

use jiff::{Timestamp, Zoned};

use prakriti_app::answers::AnswerFile;
use prakriti_app::config::{bootstrap_config, load_config, save_config, set_config_value};
use prakriti_app::paths::AppPaths;
use prakriti_app::pipeline::{ReportOptions, assess, write_artifacts};
use prakriti_core::models::dosha::Dosha;
use prakriti_core::models::patient::{NewPatient, Patient};
use prakriti_export::pdf::PdfEngine;
use prakriti_instruments::defaults::default_config;
use prakriti_storage::Database;

fn patient() -> Patient {
    Patient {
        id: 3,
        name: "Meera Iyer".to_string(),
        age: 67,
        gender: "F".to_string(),
        contact: String::new(),
        created_at: Timestamp::now(),
    }
}

const VATA_ANSWERS: &str = "
prakriti: { P1: 5, P2: 5, P3: 5 }
vikriti: { V1: 5 }
psychometric: { E1: 6, E6: 2, A1: 2, A6: 6, C1: 7, C6: 1, N1: 6, N6: 2, O1: 7, O6: 1 }
";

#[test]
fn bootstrap_does_not_overwrite() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config_rules.yaml");
    assert!(bootstrap_config(&path).unwrap());

    fs::write(&path, "# edited by hand\n").unwrap();
    assert!(!bootstrap_config(&path).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), "# edited by hand\n");
}

#[test]
fn saved_config_loads_back() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config_rules.yaml");
    let mut config = default_config();
    config.branding.clinic_name = "Kakunje Wellness".to_string();
    save_config(&path, &config).unwrap();

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded, config);
    assert!(!tmp.path().join("config_rules.yaml.tmp").exists());
}

#[test]
fn invalid_config_is_not_saved() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config_rules.yaml");
    let mut config = default_config();
    config.mappings.dosha_thresholds.mild = 90.0;
    assert!(save_config(&path, &config).is_err());
    assert!(!path.exists());
}

#[test]
fn malformed_yaml_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("config_rules.yaml");
    fs::write(&path, "meta: [unterminated").unwrap();
    assert!(load_config(&path).is_err());
}

#[test]
fn config_set_is_typed() {
    let config = default_config();
    let updated = set_config_value(&config, "branding.clinic_name", "Kakunje Wellness").unwrap();
    assert_eq!(updated.branding.clinic_name, "Kakunje Wellness");

    let updated = set_config_value(&config, "mappings.dosha_thresholds.severe", "90").unwrap();
    assert_eq!(updated.mappings.dosha_thresholds.severe, 90.0);

    assert!(set_config_value(&config, "branding.no_such_field", "x").is_err());
    assert!(set_config_value(&config, "watermark.opacity", "0.9").is_err());
    assert!(set_config_value(&config, "mappings.dosha_thresholds.mild", "high").is_err());
}

#[test]
fn answer_files_validate_ids_and_ranges() {
    let instruments = prakriti_instruments::InstrumentSet::from_banks(&default_config().questions);

    let ok = AnswerFile::parse(VATA_ANSWERS).unwrap();
    ok.validate(&instruments).unwrap();

    let out_of_range = AnswerFile::parse("prakriti: { P1: 9 }").unwrap();
    assert!(out_of_range.validate(&instruments).is_err());

    let unknown = AnswerFile::parse(r#"{"vikriti": {"Z9": 2}}"#).unwrap();
    assert!(unknown.validate(&instruments).is_err());

    assert!(AnswerFile::parse("extra: {}").is_err());
    assert_eq!(AnswerFile::parse("").unwrap(), AnswerFile::default());
}

#[test]
fn assess_fills_defaults_and_recommends() {
    let config = default_config();
    let answers = AnswerFile::parse(VATA_ANSWERS).unwrap();
    let record = assess(&config, &patient(), &answers, Timestamp::now()).unwrap();

    assert_eq!(record.prakriti_answers.len(), 25);
    assert_eq!(record.vikriti_answers.len(), 20);
    assert_eq!(record.psych_answers.len(), 10);
    assert_eq!(record.prakriti_answers.get("P4"), Some(3));
    assert_eq!(record.vikriti_answers.get("V2"), Some(1));

    let total = record.prakriti_pct.total();
    assert!((total - 100.0).abs() <= 0.15);
    assert_eq!(record.prakriti_pct.dominant(), Dosha::Vata);
    assert!(!record.career_recs.is_empty());
    assert!(!record.relationship_tips.is_empty());
    assert!(record.care_plan.is_some());
}

#[test]
fn artifacts_are_written_and_charts_removed() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = AppPaths::at(tmp.path().join("app"));
    paths.ensure().unwrap();

    let config = default_config();
    let record = assess(&config, &patient(), &AnswerFile::default(), Timestamp::now()).unwrap();
    let options = ReportOptions {
        pdf: true,
        docx: true,
        action_plan: true,
        ics: true,
        appendix: true,
        neutral_tone: true,
        doctor_note: Some("Review diet in two weeks.".to_string()),
        followup_days: Some(14),
    };
    let artifacts = write_artifacts(
        &config,
        12,
        record,
        &options,
        &paths.reports,
        &paths.tmp,
        &Zoned::now(),
    )
    .unwrap();

    let (pdf, engine) = artifacts.pdf.clone().unwrap();
    assert_eq!(engine, PdfEngine::Primary);
    assert!(pdf.ends_with("Branded_Report_Meera_Iyer_12.pdf"));
    assert_eq!(artifacts.paths().len(), 4);
    for path in artifacts.paths() {
        assert!(fs::metadata(path).unwrap().len() > 0);
    }
    assert_eq!(fs::read_dir(&paths.tmp).unwrap().count(), 0);
}

#[test]
fn assessment_round_trips_through_the_store() {
    let config = default_config();
    let db = Database::open_in_memory().unwrap();
    let patient = db
        .create_patient(&NewPatient {
            name: "Meera Iyer".to_string(),
            age: 67,
            gender: "Female".to_string(),
            contact: String::new(),
        })
        .unwrap();
    let record = assess(&config, &patient, &AnswerFile::parse(VATA_ANSWERS).unwrap(), Timestamp::now()).unwrap();
    let id = db.save_assessment(patient.id, "Administrator", &record).unwrap();
    let stored = db.get_assessment(id).unwrap();
    assert_eq!(stored.data.prakriti_pct, record.prakriti_pct);
    assert_eq!(stored.data.care_plan, record.care_plan);
}

#[test]
fn tmp_clean_removes_files() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = AppPaths::at(tmp.path());
    paths.ensure().unwrap();
    fs::write(paths.tmp.join("radar_1.png"), b"x").unwrap();
    fs::write(paths.tmp.join("psych_1.png"), b"x").unwrap();
    assert_eq!(paths.clean_tmp(), 2);
    assert_eq!(paths.clean_tmp(), 0);
}
