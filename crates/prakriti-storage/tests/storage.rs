use jiff::Timestamp;
use rusqlite::{Connection, params};

use prakriti_core::models::assessment::AssessmentRecord;
use prakriti_core::models::dosha::ScoreDistribution;
use prakriti_core::models::patient::{NewPatient, Patient};
use prakriti_core::models::psychometric::PsychometricProfile;
use prakriti_core::models::question::AnswerSet;
use prakriti_core::models::recommendation::HealthRecommendation;
use prakriti_core::models::user::Role;
use prakriti_storage::password::legacy_hash;
use prakriti_storage::users::PasswordReset;
use prakriti_storage::{Database, StorageError, export_bytes};

fn new_patient(name: &str) -> NewPatient {
    NewPatient {
        name: name.to_string(),
        age: 41,
        gender: "Male".to_string(),
        contact: "+91 90000 00000".to_string(),
    }
}

fn record_for(patient: &Patient) -> AssessmentRecord {
    let answers: AnswerSet = [("P1", 4), ("P2", 2)].into_iter().collect();
    AssessmentRecord {
        patient: patient.clone(),
        prakriti_answers: answers.clone(),
        vikriti_answers: answers,
        psych_answers: AnswerSet::new(),
        prakriti_pct: ScoreDistribution::new(50.0, 30.0, 20.0),
        vikriti_pct: ScoreDistribution::equal_split(),
        psych_pct: PsychometricProfile::neutral(),
        career_recs: Vec::new(),
        relationship_tips: Vec::new(),
        health_recs: HealthRecommendation::default(),
        care_plan: None,
        created_at: Timestamp::now(),
    }
}

#[test]
fn fresh_database_accepts_default_admin() {
    let db = Database::open_in_memory().unwrap();
    let user = db.authenticate("admin", "admin123").unwrap().unwrap();
    assert_eq!(user.display_name, "Administrator");
    assert_eq!(user.role, Role::Admin);
    assert!(db.authenticate("admin", "wrong").unwrap().is_none());
    assert!(db.authenticate("nobody", "admin123").unwrap().is_none());
}

#[test]
fn reopening_keeps_data_and_does_not_reseed() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nested").join("ayurprakriti.db");
    {
        let db = Database::open(&path).unwrap();
        db.reset_password("admin", "changed").unwrap();
        db.create_patient(&new_patient("Ravi")).unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert!(db.authenticate("admin", "admin123").unwrap().is_none());
    assert!(db.authenticate("admin", "changed").unwrap().is_some());
    assert_eq!(db.list_patients().unwrap().len(), 1);
    assert_eq!(db.list_users().unwrap().len(), 1);

    let bytes = export_bytes(&path).unwrap();
    assert!(bytes.starts_with(b"SQLite format 3\0"));
}

#[test]
fn duplicate_username_is_typed() {
    let db = Database::open_in_memory().unwrap();
    db.create_user("vaidya", "Dr. Vaidya", "pw1", Role::Clinician).unwrap();
    let err = db
        .create_user("vaidya", "Someone else", "pw2", Role::Clinician)
        .unwrap_err();
    assert!(matches!(err, StorageError::DuplicateUsername(ref name) if name == "vaidya"));
}

#[test]
fn blank_username_rejected() {
    let db = Database::open_in_memory().unwrap();
    let err = db.create_user("   ", "", "pw", Role::Clinician).unwrap_err();
    assert!(matches!(err, StorageError::EmptyField("username")));
}

#[test]
fn created_user_can_log_in() {
    let db = Database::open_in_memory().unwrap();
    let user = db.create_user("asha", "", "s3cret", Role::Clinician).unwrap();
    assert_eq!(user.display_name, "asha");
    assert!(user.password_hash.starts_with("pbkdf2_sha256$"));
    let logged_in = db.authenticate("asha", "s3cret").unwrap().unwrap();
    assert_eq!(logged_in.id, user.id);
    assert_eq!(logged_in.role, Role::Clinician);
}

#[test]
fn legacy_hash_verifies_and_is_upgraded() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("legacy.db");
    drop(Database::open(&path).unwrap());

    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "INSERT INTO users (username, display_name, password_hash, role, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params!["old", "Old Admin", legacy_hash("admin123"), "admin", "2024-05-01T10:00:00.000001"],
    )
    .unwrap();
    drop(conn);

    let db = Database::open(&path).unwrap();
    let user = db.authenticate("old", "admin123").unwrap().unwrap();
    assert!(!user.password_hash.starts_with("pbkdf2_sha256$"));
    let upgraded = db.get_user("old").unwrap();
    assert!(upgraded.password_hash.starts_with("pbkdf2_sha256$"));
    assert!(db.authenticate("old", "admin123").unwrap().is_some());
}

#[test]
fn passlib_admin_logs_in_and_is_upgraded() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("ayurprakriti.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT, username TEXT UNIQUE,
         display_name TEXT, password_hash TEXT, role TEXT, created_at TEXT);",
    )
    .unwrap();
    conn.execute(
        "INSERT INTO users (username, display_name, password_hash, role, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            "admin",
            "Administrator",
            "$pbkdf2-sha256$29000$MDEyMzQ1Njc4OWFiY2RlZg$NHBlffTsUBBEsyzbUshC.4tfZ7ylPsyNjIqBqOJHiH4",
            "admin",
            "2024-01-15T08:30:00.250000"
        ],
    )
    .unwrap();
    drop(conn);

    let db = Database::open(&path).unwrap();
    assert!(db.authenticate("admin", "wrong").unwrap().is_none());
    let user = db.authenticate("admin", "admin123").unwrap().unwrap();
    assert_eq!(user.role, Role::Admin);
    assert!(db.get_user("admin").unwrap().password_hash.starts_with("pbkdf2_sha256$"));
    assert!(db.authenticate("admin", "admin123").unwrap().is_some());
}

#[test]
fn reset_password_creates_missing_admin() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(
        db.reset_password("frontdesk", "pw").unwrap(),
        PasswordReset::CreatedAdmin
    );
    let user = db.authenticate("frontdesk", "pw").unwrap().unwrap();
    assert_eq!(user.role, Role::Admin);
    assert_eq!(db.reset_password("frontdesk", "pw2").unwrap(), PasswordReset::Updated);
}

#[test]
fn patients_round_trip_and_list_newest_first() {
    let db = Database::open_in_memory().unwrap();
    let first = db.create_patient(&new_patient("First")).unwrap();
    let second = db.create_patient(&new_patient("Second")).unwrap();
    assert_eq!(db.get_patient(first.id).unwrap().name, "First");

    let listed: Vec<i64> = db.list_patients().unwrap().iter().map(|p| p.id).collect();
    assert_eq!(listed, vec![second.id, first.id]);

    assert!(matches!(
        db.get_patient(999),
        Err(StorageError::NotFound { entity: "patient", .. })
    ));
    assert!(matches!(
        db.create_patient(&new_patient(" ")),
        Err(StorageError::EmptyField("name"))
    ));
}

#[test]
fn assessments_are_appended_per_patient() {
    let db = Database::open_in_memory().unwrap();
    let asha = db.create_patient(&new_patient("Asha")).unwrap();
    let ravi = db.create_patient(&new_patient("Ravi")).unwrap();

    let a1 = db.save_assessment(asha.id, "admin", &record_for(&asha)).unwrap();
    let a2 = db.save_assessment(asha.id, "admin", &record_for(&asha)).unwrap();
    db.save_assessment(ravi.id, "vaidya", &record_for(&ravi)).unwrap();

    let for_asha = db.list_assessments(Some(asha.id)).unwrap();
    assert_eq!(for_asha.iter().map(|a| a.id).collect::<Vec<_>>(), vec![a2, a1]);
    assert_eq!(db.list_assessments(None).unwrap().len(), 3);

    let stored = db.get_assessment(a1).unwrap();
    assert_eq!(stored.patient_id, asha.id);
    assert_eq!(stored.data.patient.name, "Asha");
    assert_eq!(stored.data.prakriti_answers.get("P1"), Some(4));
    assert_eq!(stored.data.prakriti_pct, ScoreDistribution::new(50.0, 30.0, 20.0));
}

#[test]
fn assessment_for_unknown_patient_is_rejected() {
    let db = Database::open_in_memory().unwrap();
    let ghost = Patient {
        id: 77,
        name: "Ghost".to_string(),
        age: 30,
        gender: "Other".to_string(),
        contact: String::new(),
        created_at: Timestamp::now(),
    };
    assert!(matches!(
        db.save_assessment(77, "admin", &record_for(&ghost)),
        Err(StorageError::NotFound { .. })
    ));
    assert!(matches!(db.get_assessment(1), Err(StorageError::NotFound { .. })));
}
