//! Data file locations.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::fusion::sibling_path;
use crate::store::Format;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "CITAS_DATA_DIR";

/// Environment variable selecting the storage format (`json` or `csv`).
pub const FORMAT_ENV: &str = "CITAS_FORMAT";

pub const DEFAULT_DATA_DIR: &str = "data";

pub const PATIENTS_STEM: &str = "pacientes";
pub const DOCTORS_STEM: &str = "medicos";
pub const APPOINTMENTS_STEM: &str = "citas";

/// Where the data files live and which format new writes go to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPaths {
    pub data_dir: PathBuf,
    pub format: Format,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            format: Format::default(),
        }
    }
}

impl DataPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Defaults overridden by `CITAS_DATA_DIR` and `CITAS_FORMAT`.
    pub fn from_env() -> Self {
        let mut paths = Self::default();

        if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|dir| !dir.is_empty()) {
            paths.data_dir = PathBuf::from(dir);
        }

        if let Ok(value) = env::var(FORMAT_ENV) {
            match value.parse() {
                Ok(format) => paths.format = format,
                Err(e) => tracing::warn!(%value, error = %e, "Ignoring {}", FORMAT_ENV),
            }
        }

        paths
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of a dataset without extension (`data/citas`).
    pub fn base(&self, stem: &str) -> PathBuf {
        self.data_dir.join(stem)
    }

    /// Path of a dataset in a specific format.
    pub fn file(&self, stem: &str, format: Format) -> PathBuf {
        sibling_path(&self.base(stem), format)
    }

    pub fn patients(&self) -> PathBuf {
        self.file(PATIENTS_STEM, self.format)
    }

    pub fn doctors(&self) -> PathBuf {
        self.file(DOCTORS_STEM, self.format)
    }

    pub fn appointments(&self) -> PathBuf {
        self.file(APPOINTMENTS_STEM, self.format)
    }

    /// Extension-less path used by the fused appointment view.
    pub fn appointments_base(&self) -> PathBuf {
        self.base(APPOINTMENTS_STEM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let paths = DataPaths::default();
        assert_eq!(paths.patients(), PathBuf::from("data/pacientes.json"));
        assert_eq!(paths.appointments_base(), PathBuf::from("data/citas"));
    }

    #[test]
    fn test_csv_layout() {
        let paths = DataPaths::new("/srv/clinica").with_format(Format::Csv);
        assert_eq!(paths.doctors(), PathBuf::from("/srv/clinica/medicos.csv"));
        assert_eq!(
            paths.file(APPOINTMENTS_STEM, Format::Json),
            PathBuf::from("/srv/clinica/citas.json")
        );
    }
}
