//! Patient repository rules.

use super::Entity;
use crate::models::{Patient, Record, PATIENT_FIELDS};

impl Entity for Patient {
    const FIELDS: &'static [&'static str] = PATIENT_FIELDS;
    const KEY_FIELD: &'static str = "documento";

    fn conflicts(existing: &Record, candidate: &Record) -> bool {
        existing.get("documento") == candidate.get("documento")
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{NewPatient, Patient};
    use crate::repo::Repository;

    fn setup_repo(dir: &tempfile::TempDir, name: &str) -> Repository<Patient> {
        Repository::open(dir.path().join(name))
    }

    #[test]
    fn test_create_and_find() {
        let dir = tempfile::tempdir().unwrap();
        let repo = setup_repo(&dir, "pacientes.json");

        let patient = NewPatient::new("C.C", 1001, "Ana", "Pérez")
            .with_direccion("Calle 1")
            .with_telefono(3001234567_u64);
        let created = repo.create(patient).unwrap().unwrap();
        assert_eq!(created.id(), "1");

        let all = repo.read_all().unwrap();
        assert_eq!(all, vec![created.clone()]);

        let found = repo.find_by_key("1001").unwrap().unwrap();
        assert_eq!(found.get("nombres"), "Ana");
        assert_eq!(found.get("telefono"), "3001234567");
        assert!(repo.find_by_key("9999").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_documento_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let repo = setup_repo(&dir, "pacientes.csv");

        assert!(repo.create(NewPatient::new("C.C", 1001, "Ana", "Pérez")).unwrap().is_some());
        assert!(repo.create(NewPatient::new("T.I", 1001, "Otra", "Persona")).unwrap().is_none());
        assert_eq!(repo.read_all().unwrap().len(), 1);

        let second = repo.create(NewPatient::new("C.C", 1002, "Juan", "Ruiz")).unwrap().unwrap();
        assert_eq!(second.id(), "2");
    }

    #[test]
    fn test_update_patient() {
        let dir = tempfile::tempdir().unwrap();
        let repo = setup_repo(&dir, "pacientes.json");
        repo.create(NewPatient::new("C.C", 1001, "Ana", "Pérez")).unwrap();

        let updated = repo
            .update("1001", [("telefono", "3110000000"), ("direccion", "Carrera 7")])
            .unwrap()
            .unwrap();
        assert_eq!(updated.get("direccion"), "Carrera 7");
        assert_eq!(updated.get("nombres"), "Ana");
        assert_eq!(updated.id(), "1");

        let reloaded = repo.find_by_key("1001").unwrap().unwrap();
        assert_eq!(reloaded, updated);

        assert!(repo.update("0000", [("nombres", "Nadie")]).unwrap().is_none());
    }

    #[test]
    fn test_delete_patient() {
        let dir = tempfile::tempdir().unwrap();
        let repo = setup_repo(&dir, "pacientes.csv");
        repo.create(NewPatient::new("C.C", 1001, "Ana", "Pérez")).unwrap();
        repo.create(NewPatient::new("C.C", 1002, "Juan", "Ruiz")).unwrap();

        assert!(!repo.delete("7777").unwrap());
        assert_eq!(repo.read_all().unwrap().len(), 2);

        assert!(repo.delete("1001").unwrap());
        let remaining = repo.read_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].get("documento"), "1002");
    }
}
