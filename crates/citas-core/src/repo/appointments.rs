//! Appointment repository rules and queries.

use super::{Entity, Repository};
use crate::models::{Appointment, Record, APPOINTMENT_FIELDS};
use crate::store::StoreResult;

impl Entity for Appointment {
    const FIELDS: &'static [&'static str] = APPOINTMENT_FIELDS;
    const KEY_FIELD: &'static str = "id";

    /// Same patient, doctor, date and time.
    fn conflicts(existing: &Record, candidate: &Record) -> bool {
        Appointment::same_slot(existing, candidate)
    }
}

impl Repository<Appointment> {
    /// Every appointment booked for a patient document.
    pub fn find_by_patient(&self, documento_paciente: &str) -> StoreResult<Vec<Record>> {
        let records = self.store.load_all()?;
        Ok(records
            .into_iter()
            .filter(|r| r.get("documento_paciente") == documento_paciente)
            .collect())
    }

    /// A doctor's appointments on a given date.
    pub fn find_by_doctor_and_date(
        &self,
        documento_medico: &str,
        fecha: &str,
    ) -> StoreResult<Vec<Record>> {
        let records = self.store.load_all()?;
        Ok(records
            .into_iter()
            .filter(|r| r.get("documento_medico") == documento_medico && r.get("fecha") == fecha)
            .collect())
    }

    /// Whether the doctor has no appointment at `fecha` `hora`.
    pub fn is_doctor_available(
        &self,
        documento_medico: &str,
        fecha: &str,
        hora: &str,
    ) -> StoreResult<bool> {
        let booked = self.find_by_doctor_and_date(documento_medico, fecha)?;
        Ok(!booked.iter().any(|r| r.get("hora") == hora))
    }

    /// Remove every appointment for a patient document (batch cancel).
    pub fn delete_by_patient(&self, documento_paciente: &str) -> StoreResult<bool> {
        let mut records = self.store.load_all()?;
        let before = records.len();
        records.retain(|r| r.get("documento_paciente") != documento_paciente);

        if records.len() == before {
            return Ok(false);
        }
        self.store.save_all(&records)?;
        tracing::debug!(
            documento_paciente,
            removed = before - records.len(),
            "Cancelled patient appointments"
        );
        Ok(true)
    }
}
