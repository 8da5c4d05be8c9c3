use std::path::PathBuf;
use thiserror::Error;

/// Failures reading or writing the CSV-backed stores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),

    #[error("{} is missing required column '{column}'", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("listing id '{0}' appears more than once")]
    DuplicateListing(String),

    #[error("⚠️ Please fill all fields.")]
    IncompleteForm,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
