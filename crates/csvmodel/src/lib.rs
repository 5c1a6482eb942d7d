//! A small query layer over CSV files.
//!
//! This library reads delimited text, filters rows through caller-supplied
//! predicates, and binds the surviving rows into typed records through a
//! declarative field-to-column table.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod binding;
pub mod config;
pub mod convert;
pub mod error;
pub mod materialize;
pub mod predicate;
pub mod query;
pub mod row;

pub use binding::{FieldBinding, FieldMap, Record};
pub use config::{ReaderConfig, TrimMode};
pub use convert::{ConversionError, FromColumn};
pub use error::{Error, FieldBindingError, Result};
pub use predicate::{ColumnMatch, FilterMode, Predicate, column_eq, column_ne};
pub use query::{QueryBuilder, open};
pub use row::Row;
