//! Per-doctor appointment statistics.

use serde::{Deserialize, Serialize};

use super::directory::display_name;
use crate::config::{DataPaths, APPOINTMENTS_STEM, DOCTORS_STEM};
use crate::models::{Record, StatusBucket};
use crate::store::{self, Format, StoreResult};

/// Appointment counters for one doctor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DoctorStats {
    pub documento: String,
    pub nombre: String,
    pub especialidad: String,
    /// Every matched appointment, whatever its state
    pub total: usize,
    pub pendientes: usize,
    /// completada, aprobada or finalizada
    pub aprobadas: usize,
    /// cancelada or anulada
    pub canceladas: usize,
}

/// Count each doctor's appointments by status bucket.
///
/// Appointments are matched on trimmed `documento_medico`; output follows
/// the order of `doctors`.
pub fn doctor_statistics(doctors: &[Record], appointments: &[Record]) -> Vec<DoctorStats> {
    doctors
        .iter()
        .map(|doctor| {
            let documento = doctor.get("documento").trim();
            let especialidad = match doctor.get("especialidad").trim() {
                "" => "N/A",
                value => value,
            };
            let mut stats = DoctorStats {
                documento: documento.to_string(),
                nombre: display_name(doctor),
                especialidad: especialidad.to_string(),
                ..DoctorStats::default()
            };

            for appointment in appointments
                .iter()
                .filter(|a| a.get("documento_medico").trim() == documento)
            {
                stats.total += 1;
                match StatusBucket::classify(appointment.get("estado")) {
                    StatusBucket::Pending => stats.pendientes += 1,
                    StatusBucket::Approved => stats.aprobadas += 1,
                    StatusBucket::Cancelled => stats.canceladas += 1,
                    StatusBucket::Other => {}
                }
            }
            stats
        })
        .collect()
}

/// First format in `order` whose file exists and holds at least one record.
fn load_first_non_empty(
    paths: &DataPaths,
    stem: &str,
    order: [Format; 2],
) -> StoreResult<Vec<Record>> {
    for format in order {
        let path = paths.file(stem, format);
        if !path.exists() {
            continue;
        }
        let records = store::decode_file(&path)?.into_records();
        if !records.is_empty() {
            return Ok(records);
        }
    }
    Ok(Vec::new())
}

/// Statistics straight from the data directory, read-only.
///
/// Doctors come from CSV (JSON if that is empty); appointments come from
/// JSON (CSV if that is empty).
pub fn statistics_from_disk(paths: &DataPaths) -> StoreResult<Vec<DoctorStats>> {
    let doctors = load_first_non_empty(paths, DOCTORS_STEM, [Format::Csv, Format::Json])?;
    let appointments =
        load_first_non_empty(paths, APPOINTMENTS_STEM, [Format::Json, Format::Csv])?;
    Ok(doctor_statistics(&doctors, &appointments))
}
