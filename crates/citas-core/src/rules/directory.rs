//! Person lookup by document number across both file formats.

use serde::{Deserialize, Serialize};

use crate::config::{DataPaths, DOCTORS_STEM, PATIENTS_STEM};
use crate::models::Record;
use crate::store::{self, Decoded, Format, StoreResult};

/// Which person dataset to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonKind {
    Patient,
    Doctor,
}

impl PersonKind {
    pub fn stem(&self) -> &'static str {
        match self {
            PersonKind::Patient => PATIENTS_STEM,
            PersonKind::Doctor => DOCTORS_STEM,
        }
    }
}

/// First record in `records` whose trimmed `documento` equals `documento`.
pub fn find_in<'a>(records: &'a [Record], documento: &str) -> Option<&'a Record> {
    let documento = documento.trim();
    records.iter().find(|r| r.get("documento").trim() == documento)
}

/// Search the person's `.json` file, then the `.csv` one.
///
/// Read-only: missing files are skipped, not created.
pub fn find_on_disk(
    paths: &DataPaths,
    kind: PersonKind,
    documento: &str,
) -> StoreResult<Option<Record>> {
    for format in [Format::Json, Format::Csv] {
        let path = paths.file(kind.stem(), format);
        if !path.exists() {
            continue;
        }
        if let Decoded::Records(records) = store::decode_file(&path)? {
            if let Some(found) = find_in(&records, documento) {
                return Ok(Some(found.clone()));
            }
        }
    }
    Ok(None)
}

/// "nombres apellidos" for a person record.
pub fn display_name(record: &Record) -> String {
    let first = non_empty(record, "nombres", "nombre");
    let last = non_empty(record, "apellidos", "apellido");
    format!("{} {}", first.trim(), last.trim()).trim().to_string()
}

fn non_empty<'a>(record: &'a Record, field: &str, fallback: &str) -> &'a str {
    match record.get(field) {
        "" => record.get(fallback),
        value => value,
    }
}

/// Full name of the person with `documento`, searched on disk.
pub fn full_name(
    paths: &DataPaths,
    kind: PersonKind,
    documento: &str,
) -> StoreResult<Option<String>> {
    Ok(find_on_disk(paths, kind, documento)?.map(|record| display_name(&record)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_display_name_fallbacks() {
        let record = Record::from([("nombres", " Ana "), ("apellidos", "Pérez")]);
        assert_eq!(display_name(&record), "Ana Pérez");

        let legacy = Record::from([("nombre", "Luis"), ("apellido", "")]);
        assert_eq!(display_name(&legacy), "Luis");

        assert_eq!(display_name(&Record::new()), "");
    }

    #[test]
    fn test_find_on_disk_falls_back_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(dir.path());

        fs::write(
            paths.file(PATIENTS_STEM, Format::Json),
            r#"[{"id": "1", "documento": "1001", "nombres": "Ana", "apellidos": "Pérez"}]"#,
        )
        .unwrap();
        fs::write(
            paths.file(PATIENTS_STEM, Format::Csv),
            "id,tipo_documento,documento,nombres,apellidos\n1,C.C,2002,Juan,Ruiz\n",
        )
        .unwrap();

        assert_eq!(
            full_name(&paths, PersonKind::Patient, "1001").unwrap().as_deref(),
            Some("Ana Pérez")
        );
        assert_eq!(
            full_name(&paths, PersonKind::Patient, " 2002 ").unwrap().as_deref(),
            Some("Juan Ruiz")
        );
        assert!(full_name(&paths, PersonKind::Patient, "3003").unwrap().is_none());
        assert!(full_name(&paths, PersonKind::Doctor, "1001").unwrap().is_none());
        assert!(!paths.file(DOCTORS_STEM, Format::Json).exists());
    }
}
