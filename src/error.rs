use std::path::PathBuf;

use thiserror::Error;

/// Error type returned by workbook readers. The driver adds path and sheet context.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Unable to open workbook {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("Input path has no file name: {}", .0.display())]
    InvalidInputPath(PathBuf),

    #[error("Failed to create file {}: {source}", path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Unable to read worksheet {sheet}: {source}")]
    OpenRows {
        sheet: String,
        #[source]
        source: BoxError,
    },

    #[error("Unable to read row {row} of worksheet {sheet}: {source}")]
    ReadRow {
        sheet: String,
        row: usize,
        #[source]
        source: BoxError,
    },

    #[error("Failed to write row {row} to {}: {source}", path.display())]
    WriteRow {
        path: PathBuf,
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to flush {}: {source}", path.display())]
    Flush {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
