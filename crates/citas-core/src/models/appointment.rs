//! Appointment models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Record;

/// Canonical field order for appointment files.
pub const APPOINTMENT_FIELDS: &[&str] = &[
    "id",
    "documento_paciente",
    "documento_medico",
    "fecha",
    "hora",
    "motivo",
    "estado",
];

/// Entity kind marker for appointment repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appointment;

impl Appointment {
    /// Whether two appointment records occupy the same slot:
    /// same patient, doctor, date and time.
    pub fn same_slot(a: &Record, b: &Record) -> bool {
        ["documento_paciente", "documento_medico", "fecha", "hora"]
            .iter()
            .all(|field| a.get(field) == b.get(field))
    }
}

/// Appointment lifecycle status as written by the UI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AppointmentStatus {
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "Completada")]
    Completed,
    #[serde(rename = "Cancelada")]
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pendiente",
            AppointmentStatus::Completed => "Completada",
            AppointmentStatus::Cancelled => "Cancelada",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An `estado` value that is not one of the three written statuses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown appointment status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for AppointmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pendiente" => Ok(AppointmentStatus::Pending),
            "completada" => Ok(AppointmentStatus::Completed),
            "cancelada" => Ok(AppointmentStatus::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Statistics bucket for a free-form `estado` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusBucket {
    Pending,
    Approved,
    Cancelled,
    /// Counted in totals only
    Other,
}

impl StatusBucket {
    /// Classify an `estado` value (trimmed, case-insensitive).
    pub fn classify(estado: &str) -> Self {
        match estado.trim().to_lowercase().as_str() {
            "pendiente" => StatusBucket::Pending,
            "completada" | "aprobada" | "finalizada" => StatusBucket::Approved,
            "cancelada" | "anulada" => StatusBucket::Cancelled,
            _ => StatusBucket::Other,
        }
    }
}

/// Input for scheduling an appointment. The store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewAppointment {
    pub documento_paciente: String,
    pub documento_medico: String,
    /// Date, `YYYY-MM-DD`
    pub fecha: String,
    /// Time, `HH:MM`
    pub hora: String,
    pub motivo: String,
    pub estado: String,
}

impl NewAppointment {
    /// Create a pending appointment.
    pub fn new(
        documento_paciente: impl ToString,
        documento_medico: impl ToString,
        fecha: impl Into<String>,
        hora: impl Into<String>,
        motivo: impl Into<String>,
    ) -> Self {
        Self {
            documento_paciente: documento_paciente.to_string(),
            documento_medico: documento_medico.to_string(),
            fecha: fecha.into(),
            hora: hora.into(),
            motivo: motivo.into(),
            estado: AppointmentStatus::Pending.to_string(),
        }
    }

    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.estado = status.to_string();
        self
    }
}

impl From<NewAppointment> for Record {
    fn from(appointment: NewAppointment) -> Self {
        Record::from([
            ("documento_paciente", appointment.documento_paciente),
            ("documento_medico", appointment.documento_medico),
            ("fecha", appointment.fecha),
            ("hora", appointment.hora),
            ("motivo", appointment.motivo),
            ("estado", appointment.estado),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        assert_eq!("Pendiente".parse(), Ok(AppointmentStatus::Pending));
        assert_eq!(" CANCELADA ".parse(), Ok(AppointmentStatus::Cancelled));
        assert_eq!(
            "Aprobada".parse::<AppointmentStatus>(),
            Err(UnknownStatus("aprobada".to_string()))
        );
        assert_eq!(AppointmentStatus::Completed.to_string(), "Completada");
    }

    #[test]
    fn test_bucket_classification() {
        assert_eq!(StatusBucket::classify("Pendiente"), StatusBucket::Pending);
        assert_eq!(StatusBucket::classify(" finalizada"), StatusBucket::Approved);
        assert_eq!(StatusBucket::classify("APROBADA"), StatusBucket::Approved);
        assert_eq!(StatusBucket::classify("Anulada"), StatusBucket::Cancelled);
        assert_eq!(StatusBucket::classify("reprogramada"), StatusBucket::Other);
        assert_eq!(StatusBucket::classify(""), StatusBucket::Other);
    }

    #[test]
    fn test_same_slot_needs_all_four_fields() {
        let a: Record = NewAppointment::new("111", "222", "2025-10-30", "09:00", "Control").into();
        let mut b = a.clone();
        b.set("motivo", "Otro");
        assert!(Appointment::same_slot(&a, &b));

        b.set("hora", "10:00");
        assert!(!Appointment::same_slot(&a, &b));
    }
}
