//! Appointment scheduling with cross-entity checks.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::directory::{find_in, find_on_disk, PersonKind};
use crate::config::DataPaths;
use crate::models::{Appointment, Doctor, NewAppointment, Record};
use crate::repo::Repository;
use crate::store::StoreResult;

/// Why an appointment was not created.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleRejection {
    #[error("patient is not registered")]
    UnknownPatient,

    #[error("doctor is not registered")]
    UnknownDoctor,

    #[error("doctor is inactive")]
    InactiveDoctor,

    #[error("an appointment already exists for that patient, doctor, date and time")]
    SlotTaken,
}

/// Result of a scheduling attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleOutcome {
    Created(Record),
    Rejected(ScheduleRejection),
}

impl ScheduleOutcome {
    pub fn created(&self) -> Option<&Record> {
        match self {
            ScheduleOutcome::Created(record) => Some(record),
            ScheduleOutcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<ScheduleRejection> {
        match self {
            ScheduleOutcome::Created(_) => None,
            ScheduleOutcome::Rejected(reason) => Some(*reason),
        }
    }
}

/// Look a person up in the caller's list first, then on disk.
fn resolve_person(
    paths: &DataPaths,
    known: &[Record],
    kind: PersonKind,
    documento: &str,
) -> StoreResult<Option<Record>> {
    match find_in(known, documento) {
        Some(record) => Ok(Some(record.clone())),
        None => find_on_disk(paths, kind, documento),
    }
}

/// Create an appointment in `paths.appointments()` after checking that the
/// patient and doctor exist, that the doctor is active and that the slot is
/// free.
///
/// `known_patients` and `known_doctors` are the caller's in-memory lists; a
/// stale or empty list falls back to the data files.
pub fn schedule_appointment(
    paths: &DataPaths,
    known_patients: &[Record],
    known_doctors: &[Record],
    appointment: NewAppointment,
) -> StoreResult<ScheduleOutcome> {
    let patient = resolve_person(
        paths,
        known_patients,
        PersonKind::Patient,
        &appointment.documento_paciente,
    )?;
    if patient.is_none() {
        return Ok(ScheduleOutcome::Rejected(ScheduleRejection::UnknownPatient));
    }

    let doctor = resolve_person(
        paths,
        known_doctors,
        PersonKind::Doctor,
        &appointment.documento_medico,
    )?;
    match doctor {
        None => return Ok(ScheduleOutcome::Rejected(ScheduleRejection::UnknownDoctor)),
        Some(doctor) if Doctor::is_inactive(&doctor) => {
            return Ok(ScheduleOutcome::Rejected(ScheduleRejection::InactiveDoctor))
        }
        Some(_) => {}
    }

    let repo: Repository<Appointment> = Repository::open(paths.appointments());
    Ok(match repo.create(appointment)? {
        Some(record) => ScheduleOutcome::Created(record),
        None => ScheduleOutcome::Rejected(ScheduleRejection::SlotTaken),
    })
}
