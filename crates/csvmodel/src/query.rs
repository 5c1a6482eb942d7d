//! Query and filter operations over delimited-text sources.
//!
//! A [`QueryBuilder`] owns an open source and an ordered list of predicates.
//! A terminal call ([`execute`](QueryBuilder::execute),
//! [`rows`](QueryBuilder::rows), [`select`](QueryBuilder::select) or
//! [`count`](QueryBuilder::count)) consumes
//! the builder, reads the whole source once, releases it, and returns the
//! result.
//!
//! # Examples
//!
//! ```no_run
//! use csvmodel::bind_record;
//!
//! #[derive(Debug, Default)]
//! struct Test {
//!     id: String,
//!     name: String,
//!     active: String,
//! }
//!
//! bind_record!(Test {
//!     id => "id",
//!     name => "name",
//!     active => "active",
//! });
//!
//! # fn example() -> csvmodel::Result<()> {
//! let tests: Vec<Test> = csvmodel::open("tests.csv")?
//!     .filter(|row: &csvmodel::Row| row.value("active") == Some("true"))
//!     .execute()?;
//! println!("{}", tests[0].id);
//! # Ok(())
//! # }
//! ```

use crate::binding::{self, FieldMap, Record};
use crate::config::ReaderConfig;
use crate::error::{Error, Result};
use crate::materialize;
use crate::predicate::Predicate;
use crate::row::Row;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, trace};

/// Builder that filters the rows of one source and binds them into records.
///
/// The builder is single-use: every terminal operation takes `self`.
pub struct QueryBuilder<R> {
    source: R,
    predicates: Vec<Box<dyn Predicate>>,
    config: ReaderConfig,
}

impl QueryBuilder<File> {
    /// Opens the file at `path` as the query source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceUnavailable`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened query source");
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> QueryBuilder<R> {
    /// Uses an arbitrary reader as the query source.
    #[must_use]
    pub fn from_reader(source: R) -> Self {
        Self {
            source,
            predicates: Vec::new(),
            config: ReaderConfig::default(),
        }
    }

    /// Replaces the reader configuration.
    #[must_use]
    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the reader configuration in effect.
    #[must_use]
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Attaches a predicate after the ones already attached.
    #[must_use]
    pub fn filter<P>(mut self, predicate: P) -> Self
    where
        P: Predicate + 'static,
    {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Returns the number of attached predicates.
    #[must_use]
    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    /// Reads the source and returns every matching row bound into a `T`.
    ///
    /// Rows keep their source order. The header is checked against the
    /// bindings of `T` before any row is read, so a missing column is
    /// reported even when no row matches. The source is released before the
    /// records are built.
    ///
    /// # Errors
    ///
    /// - [`Error::SourceRead`] if the source is not well-formed delimited text
    /// - [`Error::ColumnNotFound`] if `T` binds a column the header lacks
    /// - [`Error::FieldBinding`] if a value does not fit its field's type
    pub fn execute<T: Record>(self) -> Result<Vec<T>> {
        let mut staged: Vec<FieldMap> = Vec::new();
        self.scan(binding::check_columns::<T>, |row| {
            staged.push(binding::resolve::<T>(&row)?);
            Ok(())
        })?;
        materialize::build_all(staged)
    }

    /// Reads the source and returns the matching rows without binding them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceRead`] if the source is not well-formed.
    pub fn rows(self) -> Result<Vec<Row>> {
        let mut rows = Vec::new();
        self.scan(accept_header, |row| {
            rows.push(row);
            Ok(())
        })?;
        Ok(rows)
    }

    /// Reads the source and returns the matching rows narrowed to `columns`,
    /// in the order given.
    ///
    /// # Errors
    ///
    /// - [`Error::SourceRead`] if the source is not well-formed
    /// - [`Error::ColumnNotFound`] if the header lacks one of `columns`, even
    ///   when no row matches
    pub fn select(self, columns: &[String]) -> Result<Vec<Row>> {
        let mut rows = Vec::new();
        let check_header = |header: &[String]| match columns
            .iter()
            .find(|column| !header.contains(column))
        {
            Some(column) => Err(Error::ColumnNotFound {
                column: column.clone(),
            }),
            None => Ok(()),
        };
        self.scan(check_header, |row| {
            rows.push(row.project(columns)?);
            Ok(())
        })?;
        Ok(rows)
    }

    /// Reads the source and returns how many rows match.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceRead`] if the source is not well-formed.
    pub fn count(self) -> Result<usize> {
        let mut matched = 0;
        self.scan(accept_header, |_| {
            matched += 1;
            Ok(())
        })?;
        Ok(matched)
    }

    /// Reads every record, hands the rows that pass the filter to `keep`,
    /// and drops the source once the last record has been read.
    ///
    /// `check_header` sees the header before any record is read. A source
    /// with no header line skips the check.
    fn scan<H, F>(self, check_header: H, mut keep: F) -> Result<()>
    where
        H: FnOnce(&[String]) -> Result<()>,
        F: FnMut(Row) -> Result<()>,
    {
        let Self {
            source,
            predicates,
            config,
        } = self;

        let mut reader = config.reader_builder()?.from_reader(source);
        let header: Arc<[String]> = reader.headers()?.iter().map(str::to_string).collect();
        if !header.is_empty() {
            check_header(&header)?;
        }
        let records = reader
            .records()
            .collect::<std::result::Result<Vec<_>, csv::Error>>();
        drop(reader);
        let records = records?;

        let mut matched = 0usize;
        for (index, record) in records.iter().enumerate() {
            let row = Row::new(
                Arc::clone(&header),
                record.iter().map(str::to_string).collect(),
            )?;
            if !config.filter_mode.evaluate(&predicates, &row) {
                trace!(row = index + 1, "row rejected by filter");
                continue;
            }
            matched += 1;
            keep(row)?;
        }

        debug!(
            columns = header.len(),
            rows = records.len(),
            matched,
            predicates = predicates.len(),
            "scanned query source"
        );
        Ok(())
    }
}

fn accept_header(_: &[String]) -> Result<()> {
    Ok(())
}

impl<R> std::fmt::Debug for QueryBuilder<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("predicates", &self.predicates.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Opens the file at `path` as a query source.
///
/// Shorthand for [`QueryBuilder::open`].
///
/// # Errors
///
/// Returns [`Error::SourceUnavailable`] if the file cannot be opened.
pub fn open(path: impl AsRef<Path>) -> Result<QueryBuilder<File>> {
    QueryBuilder::open(path)
}
