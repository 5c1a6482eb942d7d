//! Error types for csvmodel operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for csvmodel operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The data source could not be opened.
    #[error("cannot open source {}: {source}", path.display())]
    SourceUnavailable {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The source contained malformed delimited text.
    #[error("malformed source: {0}")]
    SourceRead(#[from] csv::Error),

    /// A column was requested that the header does not contain.
    #[error("column not found: {column}")]
    ColumnNotFound {
        /// The requested column name.
        column: String,
    },

    /// A row was built with a body that does not match its header.
    #[error("row has {found} values but the header has {expected} columns")]
    RowLength {
        /// Number of header columns.
        expected: usize,
        /// Number of body values.
        found: usize,
    },

    /// A raw value could not be assigned to a record field.
    #[error(transparent)]
    FieldBinding(#[from] FieldBindingError),

    /// Invalid reader configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error outside of opening the data source.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Failure to assign a raw column value to a field of a record type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldBindingError {
    /// The field map named a field the record type does not bind.
    #[error("record has no bound field named `{field}`")]
    UnknownField {
        /// The unrecognized field name.
        field: String,
    },

    /// The raw value is not compatible with the field's declared type.
    #[error("field `{field}` expects {expected}, got {value:?}: {reason}")]
    TypeMismatch {
        /// Field being assigned.
        field: String,
        /// The raw text value.
        value: String,
        /// Name of the declared field type.
        expected: &'static str,
        /// Why the conversion failed.
        reason: String,
    },
}

impl FieldBindingError {
    /// Returns the name of the field this error refers to.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::UnknownField { field } | Self::TypeMismatch { field, .. } => field,
        }
    }
}

/// A specialized Result type for csvmodel operations.
pub type Result<T> = std::result::Result<T, Error>;
