//! Patient models.

use serde::{Deserialize, Serialize};

use super::Record;

/// Canonical field order for patient files.
pub const PATIENT_FIELDS: &[&str] = &[
    "id",
    "tipo_documento",
    "documento",
    "nombres",
    "apellidos",
    "direccion",
    "telefono",
];

/// Entity kind marker for patient repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Patient;

/// Input for registering a patient. The store assigns the id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewPatient {
    /// Document type abbreviation (e.g., "C.C", "T.I")
    pub tipo_documento: String,
    /// Document number, the natural key
    pub documento: String,
    pub nombres: String,
    pub apellidos: String,
    pub direccion: String,
    pub telefono: String,
}

impl NewPatient {
    /// Create a patient input with the identifying fields.
    pub fn new(
        tipo_documento: impl Into<String>,
        documento: impl ToString,
        nombres: impl Into<String>,
        apellidos: impl Into<String>,
    ) -> Self {
        Self {
            tipo_documento: tipo_documento.into(),
            documento: documento.to_string(),
            nombres: nombres.into(),
            apellidos: apellidos.into(),
            ..Self::default()
        }
    }

    pub fn with_direccion(mut self, direccion: impl Into<String>) -> Self {
        self.direccion = direccion.into();
        self
    }

    pub fn with_telefono(mut self, telefono: impl ToString) -> Self {
        self.telefono = telefono.to_string();
        self
    }
}

impl From<NewPatient> for Record {
    fn from(patient: NewPatient) -> Self {
        Record::from([
            ("tipo_documento", patient.tipo_documento),
            ("documento", patient.documento),
            ("nombres", patient.nombres),
            ("apellidos", patient.apellidos),
            ("direccion", patient.direccion),
            ("telefono", patient.telefono),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_patient_record() {
        let record: Record = NewPatient::new("C.C", 1001, "Ana", "Pérez")
            .with_telefono(3001234567_u64)
            .into();

        assert_eq!(record.get("documento"), "1001");
        assert_eq!(record.get("telefono"), "3001234567");
        assert_eq!(record.get("direccion"), "");
        assert!(!record.contains("id"));
    }
}
