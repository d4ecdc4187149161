//! Domain models for hospital records.

mod appointment;
mod doctor;
mod patient;

pub use appointment::*;
pub use doctor::*;
pub use patient::*;

/// Identifier of a stored record, unique per entity kind.
pub type RecordId = u32;

/// Sentinel ID for a record that has not been added to a store yet.
pub const UNASSIGNED_ID: RecordId = 0;
