//! Failure taxonomy for the log scan and trace extraction.
//!
//! Everything here is fatal: the tool never retries and never returns a
//! partial table. Errors travel through `anyhow` so the top level can
//! downcast and special-case the file-access message.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraceError {
    /// Log file missing or unreadable.
    #[error("failed to open {path}")]
    FileAccess {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A data record carried a token that does not parse as a number.
    #[error("line {line}: field {column:?} is not numeric: {token:?}")]
    FieldParse {
        line: usize,
        column: String,
        token: String,
    },

    /// A data record's field count differs from the header's.
    #[error("line {line}: expected {expected} fields per the header, found {found}")]
    SchemaMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A column the trace extraction needs is absent from the header.
    #[error("log header has no {name:?} column")]
    MissingColumn { name: String },
}

impl TraceError {
    pub fn file_access(path: impl Into<String>, source: io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    pub fn missing_column(name: impl Into<String>) -> Self {
        Self::MissingColumn { name: name.into() }
    }
}
