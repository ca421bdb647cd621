//! Citas Core Library
//!
//! Flat-file record store for patients, doctors and medical appointments.
//!
//! # Architecture
//!
//! ```text
//!                          UI (menus, tables, calendar)
//!                                      │
//!                                   Agenda
//!                                      │
//!            ┌─────────────────────────┼─────────────────────────┐
//!            │                         │                         │
//!            ▼                         ▼                         ▼
//!     Entity Repository           Fusion Layer            Rules (schedule,
//!   (patients, doctors,     (citas.json + citas.csv,      stats, directory)
//!       appointments)         origin tag, dates)
//!            │                         │
//!            └──────────► Record Store ◄┘
//!                              │
//!                         Format Codec
//!                        (JSON │ CSV)
//! ```
//!
//! # Core Principle
//!
//! **The file is the source of truth.** Every operation re-reads the whole
//! file, mutates the list in memory and rewrites the whole file. Missing
//! records and conflicts are return values, never errors; malformed files
//! read as empty.
//!
//! # Modules
//!
//! - [`models`]: Record type and entity field layouts
//! - [`store`]: Format codec and single-file record store
//! - [`repo`]: Per-entity CRUD with id generation and conflict rules
//! - [`fusion`]: Combined JSON + CSV appointment view
//! - [`rules`]: Scheduling checks, person lookup, statistics
//! - [`config`]: Data file locations

pub mod config;
pub mod fusion;
pub mod models;
pub mod repo;
pub mod rules;
pub mod store;

// Re-export commonly used types
pub use config::DataPaths;
pub use fusion::{DeletionReport, Origin};
pub use models::{
    Appointment, AppointmentStatus, Doctor, NewAppointment, NewDoctor, NewPatient, Patient,
    Record,
};
pub use repo::{generate_id, Entity, Repository};
pub use rules::{DoctorStats, PersonKind, ScheduleOutcome, ScheduleRejection};
pub use store::{Decoded, Format, RecordStore, StoreError, StoreResult, UnknownFormat};

// =========================================================================
// Main API Object
// =========================================================================

/// Entry point for the UI layer: every store operation for one data
/// directory.
///
/// Holds configuration only, so it is cheap to clone and share.
#[derive(Debug, Clone, Default)]
pub struct Agenda {
    paths: DataPaths,
}

impl Agenda {
    pub fn new(paths: DataPaths) -> Self {
        Self { paths }
    }

    /// Agenda configured from `CITAS_DATA_DIR` / `CITAS_FORMAT`.
    pub fn from_env() -> Self {
        Self::new(DataPaths::from_env())
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    /// Create the three data files for the configured format if missing.
    pub fn initialize(&self) -> StoreResult<()> {
        self.patients().initialize()?;
        self.doctors().initialize()?;
        self.appointments().initialize()?;
        Ok(())
    }

    // =========================================================================
    // Repositories
    // =========================================================================

    pub fn patients(&self) -> Repository<Patient> {
        Repository::open(self.paths.patients())
    }

    pub fn doctors(&self) -> Repository<Doctor> {
        Repository::open(self.paths.doctors())
    }

    pub fn appointments(&self) -> Repository<Appointment> {
        Repository::open(self.paths.appointments())
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a patient. `None` if the document is already registered.
    pub fn register_patient(&self, patient: NewPatient) -> StoreResult<Option<Record>> {
        let created = self.patients().create(patient)?;
        if let Some(record) = &created {
            tracing::info!(id = record.id(), "Registered patient");
        }
        Ok(created)
    }

    /// Register a doctor. `None` if the document is already registered.
    pub fn register_doctor(&self, doctor: NewDoctor) -> StoreResult<Option<Record>> {
        let created = self.doctors().create(doctor)?;
        if let Some(record) = &created {
            tracing::info!(id = record.id(), "Registered doctor");
        }
        Ok(created)
    }

    // =========================================================================
    // Appointments
    // =========================================================================

    /// Schedule an appointment, checking patient, doctor and slot.
    ///
    /// The currently configured patient and doctor files serve as the
    /// in-memory lists; the other format is consulted when they miss.
    pub fn schedule(&self, appointment: NewAppointment) -> StoreResult<ScheduleOutcome> {
        let patients = self.patients().read_all()?;
        let doctors = self.doctors().read_all()?;
        let outcome = rules::schedule_appointment(&self.paths, &patients, &doctors, appointment)?;

        match &outcome {
            ScheduleOutcome::Created(record) => {
                tracing::info!(id = record.id(), "Scheduled appointment")
            }
            ScheduleOutcome::Rejected(reason) => {
                tracing::debug!(%reason, "Appointment not scheduled")
            }
        }
        Ok(outcome)
    }

    /// Appointments from both `citas.json` and `citas.csv`, tagged by origin.
    pub fn combined_appointments(&self) -> StoreResult<Vec<Record>> {
        fusion::load_combined(&self.paths.appointments_base())
    }

    /// Delete an appointment id from both appointment files.
    pub fn cancel_everywhere(&self, id: &str) -> StoreResult<DeletionReport> {
        let report = fusion::delete_everywhere(&self.paths.appointments_base(), id)?;
        if report.any() {
            tracing::info!(id, json = report.json, csv = report.csv, "Deleted appointment");
        }
        Ok(report)
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Per-doctor appointment statistics from the data directory.
    pub fn statistics(&self) -> StoreResult<Vec<DoctorStats>> {
        rules::statistics_from_disk(&self.paths)
    }

    /// "nombres apellidos" of a patient or doctor, if registered.
    pub fn full_name(&self, kind: PersonKind, documento: &str) -> StoreResult<Option<String>> {
        rules::full_name(&self.paths, kind, documento)
    }
}
