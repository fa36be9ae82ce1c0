// src/error.rs

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::course_table::RequiredColumn;

/// Everything that can stop an update before or while it touches storage.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// The source table does not exist or cannot be opened.
    #[error("cannot read source table '{}'", path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source was readable but is not a well-formed delimited table.
    #[error("malformed table '{}'", path.display())]
    MalformedTable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// One or more required columns are absent from the header row.
    #[error("missing required column(s): {}", join_columns(missing))]
    Schema { missing: Vec<RequiredColumn> },

    /// The destination could not be written or replaced.
    #[error("cannot write table to '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("table format '{0}' is not supported")]
    UnsupportedFormat(String),
}

impl UpdateError {
    pub fn write(path: impl Into<PathBuf>, source: impl Into<io::Error>) -> Self {
        Self::Write {
            path: path.into(),
            source: source.into(),
        }
    }
}

fn join_columns(columns: &[RequiredColumn]) -> String {
    columns
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
