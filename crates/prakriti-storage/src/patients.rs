use rusqlite::{OptionalExtension, params};
use tracing::info;

use prakriti_core::models::patient::{NewPatient, Patient};

use crate::db::{Database, now_text, parse_timestamp};
use crate::error::StorageError;

const SELECT_PATIENT: &str = "SELECT id, name, age, gender, contact, created_at FROM patients";

struct PatientRow {
    id: i64,
    name: Option<String>,
    age: Option<i64>,
    gender: Option<String>,
    contact: Option<String>,
    created_at: Option<String>,
}

impl PatientRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            age: row.get(2)?,
            gender: row.get(3)?,
            contact: row.get(4)?,
            created_at: row.get(5)?,
        })
    }

    fn into_patient(self) -> Result<Patient, StorageError> {
        Ok(Patient {
            id: self.id,
            name: self.name.unwrap_or_default(),
            age: self.age.and_then(|a| u32::try_from(a).ok()).unwrap_or(0),
            gender: self.gender.unwrap_or_default(),
            contact: self.contact.unwrap_or_default(),
            created_at: parse_timestamp(self.created_at.as_deref().unwrap_or_default())?,
        })
    }
}

impl Database {
    pub fn create_patient(&self, patient: &NewPatient) -> Result<Patient, StorageError> {
        let name = patient.name.trim();
        if name.is_empty() {
            return Err(StorageError::EmptyField("name"));
        }
        self.conn.execute(
            "INSERT INTO patients (name, age, gender, contact, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![name, patient.age, patient.gender, patient.contact, now_text()],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(patient_id = id, "Registered patient");
        self.get_patient(id)
    }

    pub fn get_patient(&self, id: i64) -> Result<Patient, StorageError> {
        self.conn
            .query_row(&format!("{SELECT_PATIENT} WHERE id = ?1"), params![id], PatientRow::from_row)
            .optional()?
            .ok_or_else(|| StorageError::not_found("patient", id))?
            .into_patient()
    }

    /// Newest first.
    pub fn list_patients(&self) -> Result<Vec<Patient>, StorageError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_PATIENT} ORDER BY created_at DESC, id DESC"))?;
        let rows = stmt.query_map([], PatientRow::from_row)?;
        rows.map(|r| r.map_err(StorageError::from).and_then(PatientRow::into_patient))
            .collect()
    }
}
