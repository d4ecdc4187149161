//! End-to-end shell sessions against a seeded store.

use std::fs;

use hospital_records_core::{AppointmentStatus, RecordKind, RecordSnapshot, RecordStore};
use hospital_records_shell::{parse_command, AlwaysConfirm, Outcome, Session};
use proptest::prelude::*;
use tempfile::TempDir;

fn run(session: &mut Session, line: &str) -> String {
    match session.execute_line(line, &mut AlwaysConfirm) {
        Ok(Some(Outcome::Message(text))) => text,
        other => panic!("'{}' gave {:?}", line, other),
    }
}

#[test]
fn test_book_complete_and_filter() {
    let mut session = Session::new(RecordStore::with_seed_data());

    run(&mut session, "appointments");
    let out = run(
        &mut session,
        "add patient=2 doctor=1 date=2024-09-03 time=15:30 notes='Check sugar levels'",
    );
    assert!(out.starts_with("Appointment added successfully!"));
    assert!(out.contains("Bob Davis"));
    assert!(out.contains("Dr. John Smith"));

    run(&mut session, "add patient=1 doctor=2 date=2024-09-04 time=08:00");
    run(&mut session, "update 1 status=completed");

    let completed = run(&mut session, "list COMPLETED");
    assert!(completed.contains("2024-09-03 15:30"));
    assert!(!completed.contains("2024-09-04 08:00"));

    let all = run(&mut session, "list All");
    assert!(all.contains("2024-09-04 08:00"));

    let first = session.store().get_appointment(1).unwrap();
    assert_eq!(first.status, AppointmentStatus::Completed);
    assert_eq!(first.notes, "Check sugar levels");
}

#[test]
fn test_deleted_patient_shows_unknown() {
    let mut session = Session::new(RecordStore::with_seed_data());
    run(&mut session, "tab appointments");
    run(&mut session, "add patient=1 doctor=1 date=2024-02-01 time=11:00");

    run(&mut session, "patients");
    run(&mut session, "delete 1 -y");
    assert_eq!(session.store().count(RecordKind::Appointment), 1);
    assert_eq!(session.store().dangling_appointments().len(), 1);

    run(&mut session, "appointments");
    let table = run(&mut session, "list");
    assert!(table.contains("Unknown"));
    assert!(table.contains("Dr. John Smith"));
}

#[test]
fn test_new_ids_after_delete() {
    let mut session = Session::new(RecordStore::with_seed_data());
    run(&mut session, "delete 2");
    run(&mut session, "add name=Eve age=61 phone=555-0111 gender=Other");

    let ids: Vec<u32> = session
        .store()
        .list_patients()
        .iter()
        .map(|p| p.patient_id)
        .collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_validation_message_reaches_user() {
    let mut session = Session::new(RecordStore::with_seed_data());
    let err = session
        .execute_line("add name=Zed age=200 phone=1", &mut AlwaysConfirm)
        .unwrap_err();
    assert_eq!(err.to_string(), "Please enter a valid age (1-150).");
    assert_eq!(session.store().count(RecordKind::Patient), 2);
}

#[test]
fn test_run_script_file() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("setup.txt");
    fs::write(
        &script,
        "# new doctor and a booking\n\
         doctors\n\
         add name=\"Dr. Ada Park\" spec=Dermatology phone=555-3000 fee=95.5\n\
         appointments\n\
         add patient=1 doctor=4 date=2024-10-01 time=13:45\n",
    )
    .unwrap();

    let mut session = Session::new(RecordStore::with_seed_data());
    let mut output = Vec::new();
    session.run_file(&script, |text| output.push(text)).unwrap();

    assert_eq!(output.len(), 4);
    assert!(output[1].contains("$95.50"));
    assert!(output[3].contains("Dr. Ada Park"));
}

#[test]
fn test_run_file_prints_lines_before_failure() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("partial.txt");
    fs::write(&script, "doctors\nadd name=\"Dr. Kim\" spec=ENT phone=555 fee=80\nadd name=Nobody\n").unwrap();

    let mut session = Session::new(RecordStore::with_seed_data());
    let mut output = Vec::new();
    let err = session
        .run_file(&script, |text| output.push(text))
        .unwrap_err();

    assert_eq!(format!("{:#}", err), "line 3: Please enter specialization.");
    assert_eq!(output.len(), 2);
    assert!(output[1].starts_with("Doctor added successfully!"));
    assert_eq!(session.store().count(RecordKind::Doctor), 4);
}

#[test]
fn test_run_file_missing() {
    let dir = TempDir::new().unwrap();
    let mut session = Session::new(RecordStore::new());
    let err = session
        .run_file(&dir.path().join("absent.txt"), |_| {})
        .unwrap_err();
    assert!(err.to_string().starts_with("cannot read"));
}

#[test]
fn test_export_json_to_file_verifies() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.json");
    let mut session = Session::new(RecordStore::with_seed_data());

    let out = run(&mut session, &format!("export json '{}'", path.display()));
    assert!(out.starts_with("Exported to"));

    let snapshot = RecordSnapshot::from_json(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(snapshot.verify().unwrap());
    assert_eq!(snapshot.doctors.len(), 3);
}

#[test]
fn test_export_csv_of_active_panel() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("doctors.csv");
    let mut session = Session::new(RecordStore::with_seed_data());

    run(&mut session, "doctors");
    run(&mut session, &format!("export csv '{}'", path.display()));

    let csv = fs::read_to_string(&path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("ID,Name,Specialization,Phone,Email,Fee"));
    assert_eq!(csv.lines().count(), 4);
}

#[test]
fn test_search_patients() {
    let mut session = Session::new(RecordStore::with_seed_data());
    let out = run(&mut session, "search alice");
    assert!(out.contains("Alice Wilson"));
    assert!(!out.contains("Bob Davis"));
}

proptest! {
    #[test]
    fn parse_command_never_panics(line in "\\PC{0,60}") {
        let _ = parse_command(&line);
    }

    #[test]
    fn unknown_panel_command_leaves_store(word in "[a-z]{8,12}") {
        let mut session = Session::new(RecordStore::with_seed_data());
        let before = session.store().list_patients();
        let _ = session.execute_line(&word, &mut AlwaysConfirm);
        prop_assert_eq!(session.store().list_patients(), before);
    }
}
