//! Business rules over the record store: scheduling checks, person lookup
//! and per-doctor statistics.

mod directory;
mod schedule;
mod stats;

pub use directory::*;
pub use schedule::*;
pub use stats::*;
