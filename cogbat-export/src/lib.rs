//! Session export artifacts: a flat CSV of every trial and a plain-text
//! summary of the completed tests. Both are pure formatting over
//! [`SessionData`]; a failed write leaves the session untouched and can be
//! retried.

pub mod csv;
pub mod summary;

use std::io;

pub use csv::{CSV_HEADER, csv_report, write_csv};
pub use summary::{summary_report, write_summary};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write export artifact: {0}")]
    Io(#[from] io::Error),
}
