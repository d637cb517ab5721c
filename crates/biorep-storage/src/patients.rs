use rusqlite::{Connection, OptionalExtension, Row, params};

use biorep_core::models::patient::PatientRecord;
use biorep_core::models::search::{PatientQuery, SearchMode};

use crate::error::StorageError;

const SELECT_PATIENT: &str = "
SELECT first_name, last_name, dob, gender, patient_id, sample_id,
       analysis_id, sample_date, address, diagnosis
FROM patients";

/// Look up the first patient matching `query`.
///
/// Name searches match either the given or the family name. When several
/// rows match, the one inserted first wins; there is no disambiguation.
pub fn find_patient(conn: &Connection, query: &PatientQuery) -> Result<PatientRecord, StorageError> {
    let filter = match query.mode() {
        SearchMode::PatientId => "WHERE patient_id = ?1",
        SearchMode::SampleId => "WHERE sample_id = ?1",
        SearchMode::Name => "WHERE last_name = ?1 OR first_name = ?1",
    };
    let sql = format!("{SELECT_PATIENT} {filter} ORDER BY id LIMIT 1");

    let record = conn
        .query_row(&sql, params![query.value()], patient_from_row)
        .optional()?;

    match record {
        Some(record) => {
            tracing::info!(mode = %query.mode(), patient_id = %record.patient_id, "patient found");
            Ok(record)
        }
        None => Err(StorageError::NotFound {
            mode: query.mode().to_string(),
            value: query.value().to_string(),
        }),
    }
}

/// Insert a patient row. Used to seed stores for demos and tests.
pub fn insert_patient(conn: &Connection, record: &PatientRecord) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO patients (
            patient_id, sample_id, analysis_id, first_name, last_name, dob,
            gender, address, diagnosis, sample_date
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            record.patient_id,
            record.sample_id,
            record.analysis_id,
            record.given_name,
            record.family_name,
            record.date_of_birth,
            record.gender,
            record.address,
            record.diagnosis,
            record.sample_date,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<PatientRecord> {
    let text = |idx: usize| -> rusqlite::Result<String> {
        Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
    };
    Ok(PatientRecord {
        given_name: text(0)?,
        family_name: text(1)?,
        date_of_birth: text(2)?,
        gender: text(3)?,
        patient_id: text(4)?,
        sample_id: text(5)?,
        analysis_id: text(6)?,
        sample_date: text(7)?,
        address: text(8)?,
        diagnosis: text(9)?,
    })
}
