//! Column-name access to a single data row.
//!
//! A [`Row`] pairs the shared header of a source with one record's values.
//! All rows produced by one read share the same header allocation.

use crate::error::{Error, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;

/// One data row together with the header it was read under.
///
/// The header and body always have the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    header: Arc<[String]>,
    body: Vec<String>,
}

impl Row {
    /// Creates a row from a header and a body of values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowLength`] if `body` does not have exactly one value
    /// per header column.
    ///
    /// # Examples
    ///
    /// ```
    /// use csvmodel::Row;
    /// use std::sync::Arc;
    ///
    /// let header: Arc<[String]> = vec!["id".to_string(), "name".to_string()].into();
    /// let row = Row::new(header, vec!["7".to_string(), "Alice".to_string()]).unwrap();
    /// assert_eq!(row.get("id").unwrap(), "7");
    /// ```
    pub fn new(header: Arc<[String]>, body: Vec<String>) -> Result<Self> {
        if header.len() != body.len() {
            return Err(Error::RowLength {
                expected: header.len(),
                found: body.len(),
            });
        }
        Ok(Self { header, body })
    }

    /// Returns the value stored under `column`.
    ///
    /// The header is scanned left to right and the first exact match wins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnNotFound`] when no header column is named `column`.
    pub fn get(&self, column: &str) -> Result<&str> {
        self.value(column).ok_or_else(|| Error::ColumnNotFound {
            column: column.to_string(),
        })
    }

    /// Returns the value stored under `column`, or `None` if the header has
    /// no such column.
    #[must_use]
    pub fn value(&self, column: &str) -> Option<&str> {
        self.header
            .iter()
            .position(|name| name == column)
            .map(|index| self.body[index].as_str())
    }

    /// Returns the column names.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Returns the raw values in column order.
    #[must_use]
    pub fn body(&self) -> &[String] {
        &self.body
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns `true` if the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.header
            .iter()
            .zip(&self.body)
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns a row holding only `columns`, in the order given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnNotFound`] for the first column the header lacks.
    pub fn project(&self, columns: &[String]) -> Result<Self> {
        let body = columns
            .iter()
            .map(|column| self.get(column).map(str::to_string))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            header: columns.iter().cloned().collect(),
            body,
        })
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}
