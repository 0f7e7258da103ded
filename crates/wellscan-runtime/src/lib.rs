//! WellScan Runtime: runs documents through the extraction pipeline on a
//! worker pool and summarizes the run.

pub mod orchestrator;
pub mod types;

pub use orchestrator::{load_into, Orchestrator};
pub use types::*;
