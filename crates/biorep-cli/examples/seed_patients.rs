//! Create a small patient store for trying out the generator.
//!
//! ```sh
//! cargo run -p biorep-cli --example seed_patients -- /tmp/patients.db
//! ```

use std::path::PathBuf;

use biorep_core::models::patient::PatientRecord;
use biorep_storage::{create_store, insert_patient};

fn patient(fields: [&str; 10]) -> PatientRecord {
    let [given, family, dob, gender, pid, sid, aid, sample_date, address, diagnosis] = fields;
    PatientRecord {
        given_name: given.to_string(),
        family_name: family.to_string(),
        date_of_birth: dob.to_string(),
        gender: gender.to_string(),
        patient_id: pid.to_string(),
        sample_id: sid.to_string(),
        analysis_id: aid.to_string(),
        sample_date: sample_date.to_string(),
        address: address.to_string(),
        diagnosis: diagnosis.to_string(),
    }
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("patients.db"));

    let conn = create_store(&path)?;
    let patients = [
        patient([
            "Anna", "Muster", "12.03.1961", "weiblich", "P1001", "S2001", "A3001",
            "02.09.2026", "Lindenweg 4, 30159 Hannover", "Hypertonie",
        ]),
        patient([
            "Jonas", "Beispiel", "27.11.1974", "männlich", "P1002", "S2002", "A3002",
            "05.09.2026", "Am Markt 1, 30161 Hannover", "",
        ]),
        patient([
            "Maria", "Prange", "03.07.1958", "female", "P1003", "S2003", "A3003",
            "11.09.2026", "Bahnhofstr. 9, 31134 Hildesheim", "Diabetes mellitus Typ 2",
        ]),
    ];
    for p in &patients {
        insert_patient(&conn, p)?;
    }

    println!("seeded {} patients into {}", patients.len(), path.display());
    Ok(())
}
