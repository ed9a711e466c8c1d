use std::io;

use thiserror::Error;

/// Why a month's file could not be turned into a dataset. Every variant names
/// the file so the caller can show a precise message.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("missing columns in {file}: {}", .columns.join(", "))]
    MissingColumns { file: String, columns: Vec<String> },

    #[error("no usable rows in {file}")]
    EmptyDataset { file: String },

    #[error("{file}, line {line}: invalid value {value:?} in column {column}: {reason}")]
    Parse {
        file: String,
        line: u64,
        column: String,
        value: String,
        reason: String,
    },

    #[error("failed to read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: io::Error,
    },

    #[error("malformed csv in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },
}

impl LoadError {
    pub fn file(&self) -> &str {
        match self {
            LoadError::MissingColumns { file, .. }
            | LoadError::EmptyDataset { file }
            | LoadError::Parse { file, .. }
            | LoadError::Io { file, .. }
            | LoadError::Csv { file, .. } => file,
        }
    }
}
