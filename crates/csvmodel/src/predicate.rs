//! Row predicates and the policy that combines them.

use crate::row::Row;
use serde::{Deserialize, Serialize};

/// A test applied to each row of a query.
///
/// Any `Fn(&Row) -> bool` closure is a predicate; it may capture values
/// supplied by the caller when it is attached.
pub trait Predicate {
    /// Returns `true` if `row` should be kept.
    fn test(&self, row: &Row) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&Row) -> bool,
{
    fn test(&self, row: &Row) -> bool {
        self(row)
    }
}

/// Compares one column of each row against a fixed value.
///
/// Built with [`column_eq`] or [`column_ne`]. A row that lacks the column
/// never matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMatch {
    column: String,
    value: String,
    negate: bool,
}

impl Predicate for ColumnMatch {
    fn test(&self, row: &Row) -> bool {
        row.value(&self.column)
            .is_some_and(|found| (found == self.value) != self.negate)
    }
}

/// Keeps rows whose `column` equals `value`.
pub fn column_eq(column: impl Into<String>, value: impl Into<String>) -> ColumnMatch {
    ColumnMatch {
        column: column.into(),
        value: value.into(),
        negate: false,
    }
}

/// Keeps rows whose `column` is present and differs from `value`.
pub fn column_ne(column: impl Into<String>, value: impl Into<String>) -> ColumnMatch {
    ColumnMatch {
        column: column.into(),
        value: value.into(),
        negate: true,
    }
}

/// How the verdicts of several attached predicates decide whether a row is kept.
///
/// With no predicates attached every row is kept, whatever the mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterMode {
    /// A row is kept only if every predicate accepts it.
    #[default]
    All,
    /// Every predicate runs in attachment order and only the last verdict counts.
    LastWins,
}

impl FilterMode {
    /// Applies `predicates` to `row` under this mode.
    pub fn evaluate(self, predicates: &[Box<dyn Predicate>], row: &Row) -> bool {
        match self {
            Self::All => predicates.iter().all(|predicate| predicate.test(row)),
            Self::LastWins => predicates
                .iter()
                .fold(true, |_, predicate| predicate.test(row)),
        }
    }
}
