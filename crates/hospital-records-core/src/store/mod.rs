//! In-memory record store for patients, doctors and appointments.
//!
//! The store is an ordinary value: construct it with [`RecordStore::new`] or
//! [`RecordStore::with_seed_data`] and pass it by reference. Each entity kind
//! lives in its own [`Table`], which assigns sequential IDs and keeps rows in
//! insertion order.

mod appointments;
mod doctors;
mod patients;
mod seed;

#[allow(unused_imports)]
pub use appointments::*;
#[allow(unused_imports)]
pub use doctors::*;
#[allow(unused_imports)]
pub use patients::*;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{Appointment, Doctor, Patient, RecordId, UNASSIGNED_ID};

/// The kind of entity a table holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Patient,
    Doctor,
    Appointment,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [
        RecordKind::Patient,
        RecordKind::Doctor,
        RecordKind::Appointment,
    ];

    /// Lower-case singular name ("patient").
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Patient => "patient",
            RecordKind::Doctor => "doctor",
            RecordKind::Appointment => "appointment",
        }
    }

    /// Capitalised singular name for user messages ("Patient").
    pub fn title(&self) -> &'static str {
        match self {
            RecordKind::Patient => "Patient",
            RecordKind::Doctor => "Doctor",
            RecordKind::Appointment => "Appointment",
        }
    }

    /// Plural table name ("patients").
    pub fn plural(&self) -> &'static str {
        match self {
            RecordKind::Patient => "patients",
            RecordKind::Doctor => "doctors",
            RecordKind::Appointment => "appointments",
        }
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "patient" | "patients" => Ok(RecordKind::Patient),
            "doctor" | "doctors" => Ok(RecordKind::Doctor),
            "appointment" | "appointments" => Ok(RecordKind::Appointment),
            _ => Err(format!(
                "Unknown record kind: '{}'. Must be one of: patients, doctors, appointments",
                s
            )),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("No {kind} with id {id}")]
    NotFound { kind: RecordKind, id: RecordId },

    #[error("Cannot add {kind} with id {id}: ids below {next} are already allocated")]
    IdConflict {
        kind: RecordKind,
        id: RecordId,
        next: RecordId,
    },

    #[error("No {0} ids left to assign")]
    IdSpaceExhausted(RecordKind),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// An entity that can live in a [`Table`].
pub trait Record: Clone {
    const KIND: RecordKind;

    fn id(&self) -> RecordId;

    fn set_id(&mut self, id: RecordId);
}

impl Record for Patient {
    const KIND: RecordKind = RecordKind::Patient;

    fn id(&self) -> RecordId {
        self.patient_id
    }

    fn set_id(&mut self, id: RecordId) {
        self.patient_id = id;
    }
}

impl Record for Doctor {
    const KIND: RecordKind = RecordKind::Doctor;

    fn id(&self) -> RecordId {
        self.doctor_id
    }

    fn set_id(&mut self, id: RecordId) {
        self.doctor_id = id;
    }
}

impl Record for Appointment {
    const KIND: RecordKind = RecordKind::Appointment;

    fn id(&self) -> RecordId {
        self.appointment_id
    }

    fn set_id(&mut self, id: RecordId) {
        self.appointment_id = id;
    }
}

/// One collection of records, keyed by ID.
///
/// IDs only ever grow, so iterating in key order is iterating in insertion
/// order.
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: BTreeMap<RecordId, T>,
    next_id: RecordId,
}

impl<T: Record> Table<T> {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Add a record, assigning the next ID if it has none.
    ///
    /// A caller-supplied ID must not be below the next ID to be assigned.
    pub fn insert(&mut self, mut record: T) -> StoreResult<T> {
        let id = match record.id() {
            UNASSIGNED_ID => self.next_id,
            id if id < self.next_id => {
                return Err(StoreError::IdConflict {
                    kind: T::KIND,
                    id,
                    next: self.next_id,
                })
            }
            id => id,
        };
        let next_id = id
            .checked_add(1)
            .ok_or(StoreError::IdSpaceExhausted(T::KIND))?;

        record.set_id(id);
        self.next_id = next_id;
        self.rows.insert(id, record.clone());
        debug!(kind = %T::KIND, id, "record added");
        Ok(record)
    }

    /// Copy of every record, in insertion order.
    pub fn list(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.rows.contains_key(&id)
    }

    /// Replace the record with the same ID.
    pub fn update(&mut self, record: T) -> StoreResult<()> {
        let id = record.id();
        match self.rows.get_mut(&id) {
            Some(slot) => {
                *slot = record;
                debug!(kind = %T::KIND, id, "record updated");
                Ok(())
            }
            None => Err(StoreError::NotFound { kind: T::KIND, id }),
        }
    }

    /// Remove a record, returning it if it existed.
    pub fn remove(&mut self, id: RecordId) -> Option<T> {
        let removed = self.rows.remove(&id);
        if removed.is_some() {
            debug!(kind = %T::KIND, id, "record deleted");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// ID the next unassigned record will receive.
    pub fn next_id(&self) -> RecordId {
        self.next_id
    }
}

impl<T: Record> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The record store: one table per entity kind.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    patients: Table<Patient>,
    doctors: Table<Doctor>,
    appointments: Table<Appointment>,
}

impl RecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the demonstration rows.
    pub fn with_seed_data() -> Self {
        let mut store = Self::new();
        seed::populate(&mut store);
        store
    }

    pub fn patients(&self) -> &Table<Patient> {
        &self.patients
    }

    pub fn doctors(&self) -> &Table<Doctor> {
        &self.doctors
    }

    pub fn appointments(&self) -> &Table<Appointment> {
        &self.appointments
    }

    /// Number of records of the given kind.
    pub fn count(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Patient => self.patients.len(),
            RecordKind::Doctor => self.doctors.len(),
            RecordKind::Appointment => self.appointments.len(),
        }
    }
}
