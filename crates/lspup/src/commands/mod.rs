//! Command implementations.

pub mod list;
pub mod run;

pub use run::{RunReport, execute_run};
