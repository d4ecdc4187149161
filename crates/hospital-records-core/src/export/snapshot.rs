//! Full-store snapshot export with a content digest.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

use super::ExportResult;
use crate::models::{Appointment, Doctor, Patient};
use crate::store::RecordStore;

/// Snapshot format version.
pub const SNAPSHOT_FORMAT_VERSION: &str = "1.0";

/// Snapshot metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotMetadata {
    /// Export format version
    pub format_version: String,
    /// Export timestamp (RFC 3339)
    pub exported_at: String,
    /// Hash algorithm used for the digest
    pub hash_algorithm: String,
    /// Hex digest of the three collections
    pub digest: String,
    pub patient_count: usize,
    pub doctor_count: usize,
    pub appointment_count: usize,
}

/// Everything in the store at one point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordSnapshot {
    pub metadata: SnapshotMetadata,
    pub patients: Vec<Patient>,
    pub doctors: Vec<Doctor>,
    pub appointments: Vec<Appointment>,
}

#[derive(Serialize)]
struct SnapshotContent<'a> {
    patients: &'a [Patient],
    doctors: &'a [Doctor],
    appointments: &'a [Appointment],
}

impl RecordSnapshot {
    /// Capture the store's current contents.
    pub fn capture(store: &RecordStore) -> ExportResult<Self> {
        let patients = store.list_patients();
        let doctors = store.list_doctors();
        let appointments = store.list_appointments();

        let digest = content_digest(&patients, &doctors, &appointments)?;
        info!(digest = %digest, "snapshot captured");

        Ok(Self {
            metadata: SnapshotMetadata {
                format_version: SNAPSHOT_FORMAT_VERSION.to_string(),
                exported_at: chrono::Utc::now().to_rfc3339(),
                hash_algorithm: "SHA-256".to_string(),
                digest,
                patient_count: patients.len(),
                doctor_count: doctors.len(),
                appointment_count: appointments.len(),
            },
            patients,
            doctors,
            appointments,
        })
    }

    /// Recompute the digest and compare it to the recorded one.
    pub fn verify(&self) -> ExportResult<bool> {
        let digest = content_digest(&self.patients, &self.doctors, &self.appointments)?;
        Ok(digest == self.metadata.digest)
    }

    /// Export to JSON.
    pub fn to_json(&self) -> ExportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> ExportResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Hex SHA-256 over the canonical JSON of the collections.
fn content_digest(
    patients: &[Patient],
    doctors: &[Doctor],
    appointments: &[Appointment],
) -> ExportResult<String> {
    let content = serde_json::to_vec(&SnapshotContent {
        patients,
        doctors,
        appointments,
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    #[test]
    fn test_capture_counts() {
        let snapshot = RecordSnapshot::capture(&RecordStore::with_seed_data()).unwrap();
        assert_eq!(snapshot.metadata.patient_count, 2);
        assert_eq!(snapshot.metadata.doctor_count, 3);
        assert_eq!(snapshot.metadata.appointment_count, 0);
        assert_eq!(snapshot.metadata.digest.len(), 64);
    }

    #[test]
    fn test_digest_stable_for_same_state() {
        let store = RecordStore::with_seed_data();
        let a = RecordSnapshot::capture(&store).unwrap();
        let b = RecordSnapshot::capture(&store.clone()).unwrap();
        assert_eq!(a.metadata.digest, b.metadata.digest);
    }

    #[test]
    fn test_digest_changes_with_state() {
        let mut store = RecordStore::with_seed_data();
        let before = RecordSnapshot::capture(&store).unwrap();

        let mut alice = store.get_patient(1).unwrap().clone();
        alice.age += 1;
        store.update_patient(alice).unwrap();

        let after = RecordSnapshot::capture(&store).unwrap();
        assert_ne!(before.metadata.digest, after.metadata.digest);
    }

    #[test]
    fn test_json_round_trip_verifies() {
        let mut store = RecordStore::with_seed_data();
        store
            .add_patient(Patient::new("Eve", 70, Gender::Female, "555"))
            .unwrap();

        let json = RecordSnapshot::capture(&store).unwrap().to_json().unwrap();
        let mut parsed = RecordSnapshot::from_json(&json).unwrap();
        assert!(parsed.verify().unwrap());

        parsed.patients[0].name = "Tampered".into();
        assert!(!parsed.verify().unwrap());
    }
}
