//! Domain models for the appointment record store.

mod appointment;
mod doctor;
mod patient;
mod record;

pub use appointment::*;
pub use doctor::*;
pub use patient::*;
pub use record::*;
