//! Doctor models.

use serde::{Deserialize, Serialize};

use super::Record;

/// Canonical field order for doctor files.
pub const DOCTOR_FIELDS: &[&str] = &[
    "id",
    "tipo_documento",
    "documento",
    "nombres",
    "apellidos",
    "especialidad",
    "telefono",
    "estado",
    "consultorio",
    "hospital",
];

/// Entity kind marker for doctor repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Doctor;

impl Doctor {
    /// Whether a doctor record is marked inactive (`estado`, case-insensitive).
    pub fn is_inactive(record: &Record) -> bool {
        record.get("estado").trim().eq_ignore_ascii_case("inactivo")
    }
}

/// Input for registering a doctor. The store assigns the id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewDoctor {
    pub tipo_documento: String,
    /// Document number, the natural key
    pub documento: String,
    pub nombres: String,
    pub apellidos: String,
    pub especialidad: String,
    pub telefono: String,
    /// "Activo" or "Inactivo"
    pub estado: String,
    pub consultorio: String,
    /// Older data files have no hospital column
    pub hospital: Option<String>,
}

impl NewDoctor {
    /// Create an active doctor input with the identifying fields.
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
            estado: "Activo".to_string(),
            ..Self::default()
        }
    }

    pub fn with_especialidad(mut self, especialidad: impl Into<String>) -> Self {
        self.especialidad = especialidad.into();
        self
    }

    pub fn with_estado(mut self, estado: impl Into<String>) -> Self {
        self.estado = estado.into();
        self
    }

    pub fn with_consultorio(mut self, consultorio: impl Into<String>) -> Self {
        self.consultorio = consultorio.into();
        self
    }

    pub fn with_telefono(mut self, telefono: impl ToString) -> Self {
        self.telefono = telefono.to_string();
        self
    }

    pub fn with_hospital(mut self, hospital: impl Into<String>) -> Self {
        self.hospital = Some(hospital.into());
        self
    }
}

impl From<NewDoctor> for Record {
    fn from(doctor: NewDoctor) -> Self {
        let mut record = Record::from([
            ("tipo_documento", doctor.tipo_documento),
            ("documento", doctor.documento),
            ("nombres", doctor.nombres),
            ("apellidos", doctor.apellidos),
            ("especialidad", doctor.especialidad),
            ("telefono", doctor.telefono),
            ("estado", doctor.estado),
            ("consultorio", doctor.consultorio),
        ]);
        if let Some(hospital) = doctor.hospital {
            record.set("hospital", hospital);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_doctor_defaults_active() {
        let record: Record = NewDoctor::new("C.C", "222", "Luis", "Gómez").into();
        assert_eq!(record.get("estado"), "Activo");
        assert!(!record.contains("hospital"));
        assert!(!Doctor::is_inactive(&record));
    }

    #[test]
    fn test_inactive_is_case_insensitive() {
        let record = Record::from([("estado", " INACTIVO ")]);
        assert!(Doctor::is_inactive(&record));

        let record = Record::from([("estado", "Inactiva")]);
        assert!(!Doctor::is_inactive(&record));
    }
}
