//! Patient models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{RecordId, UNASSIGNED_ID};

/// Patient gender as offered by the registration form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    /// All selectable values, in form order.
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(format!("Unknown gender: '{}'", s)),
        }
    }
}

/// A registered patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Store-assigned ID (0 until added)
    pub patient_id: RecordId,
    /// Full name
    pub name: String,
    /// Age in years (1-150 when entered through the form)
    pub age: u8,
    pub gender: Gender,
    /// Contact phone number
    pub phone: String,
    pub address: String,
    /// Free-text medical history
    pub medical_history: String,
}

impl Patient {
    /// Create an unsaved patient with required fields.
    pub fn new(name: impl Into<String>, age: u8, gender: Gender, phone: impl Into<String>) -> Self {
        Self {
            patient_id: UNASSIGNED_ID,
            name: name.into(),
            age,
            gender,
            phone: phone.into(),
            address: String::new(),
            medical_history: String::new(),
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_medical_history(mut self, history: impl Into<String>) -> Self {
        self.medical_history = history.into();
        self
    }

    /// Check if this patient has been stored.
    pub fn is_saved(&self) -> bool {
        self.patient_id != UNASSIGNED_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_patient() {
        let patient = Patient::new("Alice Wilson", 35, Gender::Female, "555-0101");
        assert_eq!(patient.name, "Alice Wilson");
        assert_eq!(patient.age, 35);
        assert!(patient.address.is_empty());
        assert!(!patient.is_saved());
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!(" OTHER ".parse::<Gender>().unwrap(), Gender::Other);
        assert!("unknown".parse::<Gender>().is_err());
        assert_eq!(Gender::default(), Gender::Male);
    }
}
