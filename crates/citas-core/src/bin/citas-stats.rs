//! Print per-doctor appointment statistics as JSON.
//!
//! Usage: `citas-stats [DATA_DIR]`. Without an argument the directory comes
//! from `CITAS_DATA_DIR` (default `data`). Log verbosity follows `RUST_LOG`.

use anyhow::Context;
use citas_core::{Agenda, DataPaths};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let mut paths = DataPaths::from_env();
    if let Some(dir) = std::env::args_os().nth(1) {
        paths.data_dir = dir.into();
    }

    let agenda = Agenda::new(paths);
    let stats = agenda
        .statistics()
        .with_context(|| format!("reading data from {}", agenda.paths().data_dir().display()))?;

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
