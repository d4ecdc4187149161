//! Demonstration rows inserted when a seeded store is created.

use tracing::{info, warn};

use super::RecordStore;
use crate::models::{Doctor, Gender, Patient};

fn seed_doctors() -> Vec<Doctor> {
    vec![
        Doctor::new("Dr. John Smith", "Cardiology", "123-456-7890", 150.0)
            .with_email("john.smith@hospital.com")
            .with_schedule("Mon-Fri 9AM-5PM"),
        Doctor::new("Dr. Sarah Johnson", "Pediatrics", "123-456-7891", 120.0)
            .with_email("sarah.johnson@hospital.com")
            .with_schedule("Mon-Sat 8AM-4PM"),
        Doctor::new("Dr. Michael Brown", "Orthopedics", "123-456-7892", 180.0)
            .with_email("michael.brown@hospital.com")
            .with_schedule("Tue-Sat 10AM-6PM"),
    ]
}

fn seed_patients() -> Vec<Patient> {
    vec![
        Patient::new("Alice Wilson", 35, Gender::Female, "555-0101")
            .with_address("123 Main St")
            .with_medical_history("No known allergies"),
        Patient::new("Bob Davis", 42, Gender::Male, "555-0102")
            .with_address("456 Oak Ave")
            .with_medical_history("Diabetes Type 2"),
    ]
}

/// Insert the seed rows. Only called on a fresh store, so IDs start at 1.
pub(super) fn populate(store: &mut RecordStore) {
    for doctor in seed_doctors() {
        if let Err(e) = store.add_doctor(doctor) {
            warn!(error = %e, "failed to seed doctor");
        }
    }
    for patient in seed_patients() {
        if let Err(e) = store.add_patient(patient) {
            warn!(error = %e, "failed to seed patient");
        }
    }
    info!(
        doctors = store.doctors.len(),
        patients = store.patients.len(),
        "seed data loaded"
    );
}
