//! Doctor repository rules.

use super::Entity;
use crate::models::{Doctor, Record, DOCTOR_FIELDS};

impl Entity for Doctor {
    const FIELDS: &'static [&'static str] = DOCTOR_FIELDS;
    const KEY_FIELD: &'static str = "documento";

    fn conflicts(existing: &Record, candidate: &Record) -> bool {
        existing.get("documento") == candidate.get("documento")
    }
}
