use rusqlite::{OptionalExtension, params};
use tracing::info;

use prakriti_core::models::assessment::{Assessment, AssessmentRecord, AssessmentSummary};

use crate::db::{Database, parse_timestamp, timestamp_text};
use crate::error::StorageError;

impl Database {
    /// Append an assessment for an existing patient. Returns the new id.
    pub fn save_assessment(
        &self,
        patient_id: i64,
        assessor: &str,
        record: &AssessmentRecord,
    ) -> Result<i64, StorageError> {
        // surface a missing patient as NotFound rather than a constraint error
        self.get_patient(patient_id)?;
        let data_json = serde_json::to_string(record)?;
        self.conn.execute(
            "INSERT INTO assessments (patient_id, assessor, data_json, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![patient_id, assessor, data_json, timestamp_text(record.created_at)],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(assessment_id = id, patient_id, assessor, "Saved assessment");
        Ok(id)
    }

    /// Newest first, optionally for one patient.
    pub fn list_assessments(&self, patient_id: Option<i64>) -> Result<Vec<AssessmentSummary>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, patient_id, assessor, created_at FROM assessments
             WHERE ?1 IS NULL OR patient_id = ?1
             ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map(params![patient_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, Option<i64>>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        })?;
        rows.map(|r| {
            let (id, patient_id, assessor, created_at) = r?;
            Ok(AssessmentSummary {
                id,
                patient_id: patient_id.unwrap_or_default(),
                assessor: assessor.unwrap_or_default(),
                created_at: parse_timestamp(created_at.as_deref().unwrap_or_default())?,
            })
        })
        .collect()
    }

    pub fn get_assessment(&self, id: i64) -> Result<Assessment, StorageError> {
        let (patient_id, assessor, data_json, created_at) = self
            .conn
            .query_row(
                "SELECT patient_id, assessor, data_json, created_at FROM assessments WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, Option<i64>>(0)?,
                        row.get::<_, Option<String>>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, Option<String>>(3)?,
                    ))
                },
            )
            .optional()?
            .ok_or_else(|| StorageError::not_found("assessment", id))?;

        Ok(Assessment {
            id,
            patient_id: patient_id.unwrap_or_default(),
            assessor: assessor.unwrap_or_default(),
            data: serde_json::from_str(data_json.as_deref().unwrap_or_default())?,
            created_at: parse_timestamp(created_at.as_deref().unwrap_or_default())?,
        })
    }
}
