use biorep_core::models::patient::PatientRecord;
use biorep_core::models::search::{PatientQuery, SearchMode};
use biorep_storage::error::StorageError;
use biorep_storage::{create_store, find_patient, insert_patient, open_memory_store, open_store};
use rusqlite::Connection;

fn record(patient_id: &str, sample_id: &str, given: &str, family: &str) -> PatientRecord {
    PatientRecord {
        given_name: given.to_string(),
        family_name: family.to_string(),
        date_of_birth: "1985-04-12".to_string(),
        gender: "weiblich".to_string(),
        patient_id: patient_id.to_string(),
        sample_id: sample_id.to_string(),
        analysis_id: "338252/53/54/56".to_string(),
        sample_date: "2025-09-08".to_string(),
        address: "Berlin, Germany".to_string(),
        diagnosis: "Chronic Kidney Disease".to_string(),
    }
}

fn seeded() -> Connection {
    let conn = open_memory_store().unwrap();
    insert_patient(&conn, &record("1234", "567890", "Alice", "Smith")).unwrap();
    insert_patient(&conn, &record("1235", "567891", "Bob", "Johnson")).unwrap();
    insert_patient(&conn, &record("1236", "567892", "Charlie", "Brown")).unwrap();
    conn
}

fn query(mode: SearchMode, value: &str) -> PatientQuery {
    PatientQuery::new(mode, value).unwrap()
}

#[test]
fn finds_by_patient_id() {
    let conn = seeded();
    let found = find_patient(&conn, &query(SearchMode::PatientId, "1235")).unwrap();
    assert_eq!(found.patient_id, "1235");
    assert_eq!(found.given_name, "Bob");
}

#[test]
fn finds_by_sample_id() {
    let conn = seeded();
    let found = find_patient(&conn, &query(SearchMode::SampleId, "567892")).unwrap();
    assert_eq!(found.sample_id, "567892");
    assert_eq!(found.family_name, "Brown");
}

#[test]
fn name_matches_given_or_family_name() {
    let conn = seeded();
    let by_family = find_patient(&conn, &query(SearchMode::Name, "Smith")).unwrap();
    let by_given = find_patient(&conn, &query(SearchMode::Name, "Alice")).unwrap();
    assert_eq!(by_family, by_given);
    assert_eq!(by_family.patient_id, "1234");
}

#[test]
fn first_match_wins() {
    let conn = seeded();
    insert_patient(&conn, &record("9999", "000001", "Dora", "Smith")).unwrap();
    let found = find_patient(&conn, &query(SearchMode::Name, "Smith")).unwrap();
    assert_eq!(found.patient_id, "1234");
}

#[test]
fn unknown_key_is_not_found() {
    let conn = seeded();
    let err = find_patient(&conn, &query(SearchMode::PatientId, "0000")).unwrap_err();
    match err {
        StorageError::NotFound { mode, value } => {
            assert_eq!(mode, "patient-id");
            assert_eq!(value, "0000");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn lookup_is_exact_match() {
    let conn = seeded();
    assert!(find_patient(&conn, &query(SearchMode::PatientId, "123")).is_err());
    assert!(find_patient(&conn, &query(SearchMode::Name, "smith")).is_err());
}

#[test]
fn null_columns_read_as_empty() {
    let conn = open_memory_store().unwrap();
    conn.execute(
        "INSERT INTO patients (patient_id, first_name, last_name) VALUES ('42', 'Eve', 'Adams')",
        [],
    )
    .unwrap();
    let found = find_patient(&conn, &query(SearchMode::PatientId, "42")).unwrap();
    assert_eq!(found.diagnosis, "");
    assert_eq!(found.sample_id, "");
}

#[test]
fn missing_store_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.db");
    let err = open_store(&path).unwrap_err();
    assert!(matches!(err, StorageError::StoreMissing { .. }));
    assert!(!path.exists());
}

#[test]
fn existing_store_opens_read_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("patients.db");
    {
        let conn = create_store(&path).unwrap();
        insert_patient(&conn, &record("P9", "S9", "Eva", "Beispiel")).unwrap();
    }

    let conn = open_store(&path).unwrap();
    let found = find_patient(&conn, &query(SearchMode::SampleId, "S9")).unwrap();
    assert_eq!(found.family_name, "Beispiel");
    insert_patient(&conn, &record("P10", "S10", "Jonas", "Probst")).unwrap();
    drop(conn);

    let reopened = open_store(&path).unwrap();
    let added = find_patient(&reopened, &query(SearchMode::PatientId, "P10")).unwrap();
    assert_eq!(added.family_name, "Probst");
}
