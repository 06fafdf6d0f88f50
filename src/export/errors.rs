// petrors-logs/src/export/errors.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("File IO error: {0}")]
    IoError(#[from] std::io::Error),
}
