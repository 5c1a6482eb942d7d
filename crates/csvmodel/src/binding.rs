//! Declarative field-to-column bindings.
//!
//! A record type describes, once, which column feeds each of its fields by
//! implementing [`Record`]. The binding table is a constant slice of
//! [`FieldBinding`] entries, each pairing a field name and a column name with
//! the function that assigns a raw value to that field. Fields that have no
//! entry are never touched while binding and keep their default value.
//!
//! The [`bind_record!`](crate::bind_record) macro writes the table:
//!
//! ```
//! use csvmodel::{bind_record, Record};
//!
//! #[derive(Debug, Default)]
//! struct Person {
//!     id: u32,
//!     name: String,
//!     nickname: Option<String>,
//!     note: String,
//! }
//!
//! bind_record!(Person {
//!     id => "id",
//!     name => "full_name",
//!     nickname => "nick",
//! });
//!
//! assert_eq!(Person::FIELDS.len(), 3);
//! assert_eq!(Person::FIELDS[1].column, "full_name");
//! ```

use crate::convert::ConversionError;
use crate::error::{Error, Result};
use crate::row::Row;

/// Assigns a raw column value to one field of `T`.
pub type AssignFn<T> = fn(&mut T, &str) -> std::result::Result<(), ConversionError>;

/// Binding of one record field to one column.
pub struct FieldBinding<T> {
    /// Name of the record field.
    pub field: &'static str,
    /// Name of the column that supplies the field's value.
    pub column: &'static str,
    /// Converts and stores a raw value into the field.
    pub assign: AssignFn<T>,
}

impl<T> FieldBinding<T> {
    /// Creates a binding entry.
    pub const fn new(field: &'static str, column: &'static str, assign: AssignFn<T>) -> Self {
        Self {
            field,
            column,
            assign,
        }
    }
}

impl<T> std::fmt::Debug for FieldBinding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldBinding")
            .field("field", &self.field)
            .field("column", &self.column)
            .finish_non_exhaustive()
    }
}

/// A record type that can be materialized from a row.
///
/// Implementations are normally generated with
/// [`bind_record!`](crate::bind_record). New instances start from
/// [`Default`], so unbound fields keep their default value.
pub trait Record: Default + Sized + 'static {
    /// The field-to-column binding table, in declaration order.
    const FIELDS: &'static [FieldBinding<Self>];

    /// Looks up the binding entry for `field`.
    #[must_use]
    fn binding(field: &str) -> Option<&'static FieldBinding<Self>> {
        Self::FIELDS.iter().find(|binding| binding.field == field)
    }
}

/// Raw field values for one row, keyed by field name.
///
/// Entries keep the order in which they were first inserted. Built by
/// [`resolve`] and consumed by [`build`](crate::materialize::build).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    values: Vec<(String, String)>,
}

impl FieldMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `field`, returning the previous value if any.
    ///
    /// Replacing a value keeps the field's original position.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let field = field.into();
        let value = value.into();
        match self.values.iter_mut().find(|(name, _)| *name == field) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.values.push((field, value));
                None
            }
        }
    }

    /// Returns the raw value stored for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Removes `field` from the map and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        let index = self.values.iter().position(|(name, _)| name == field)?;
        Some(self.values.remove(index).1)
    }

    /// Returns the number of fields in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the map holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(field, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (field, value) in iter {
            map.insert(field, value);
        }
        map
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// Reads every bound column of `T` from `row`.
///
/// Values are copied as raw text; no type conversion happens here.
///
/// # Errors
///
/// Returns [`Error::ColumnNotFound`](crate::Error::ColumnNotFound) if a
/// binding names a column the row's header does not contain.
pub fn resolve<T: Record>(row: &Row) -> Result<FieldMap> {
    let mut map = FieldMap::new();
    for binding in T::FIELDS {
        map.insert(binding.field, row.get(binding.column)?);
    }
    Ok(map)
}

/// Checks that `header` contains every column `T` binds.
///
/// # Errors
///
/// Returns [`Error::ColumnNotFound`](crate::Error::ColumnNotFound) for the
/// first binding, in declaration order, whose column is absent.
pub fn check_columns<T: Record>(header: &[String]) -> Result<()> {
    match T::FIELDS
        .iter()
        .find(|binding| !header.iter().any(|name| name == binding.column))
    {
        Some(binding) => Err(Error::ColumnNotFound {
            column: binding.column.to_string(),
        }),
        None => Ok(()),
    }
}

/// Implements [`Record`] for a struct from `field => "column"` pairs.
///
/// Every listed field must implement [`FromColumn`](crate::FromColumn).
/// Fields not listed are left at their [`Default`] value.
///
/// # Examples
///
/// ```
/// use csvmodel::bind_record;
///
/// #[derive(Debug, Default)]
/// struct Test {
///     id: String,
///     name: String,
///     active: bool,
/// }
///
/// bind_record!(Test {
///     id => "id",
///     name => "name",
///     active => "active",
/// });
/// ```
#[macro_export]
macro_rules! bind_record {
    ($ty:ty { $($field:ident => $column:expr),* $(,)? }) => {
        impl $crate::Record for $ty {
            const FIELDS: &'static [$crate::FieldBinding<Self>] = &[
                $(
                    $crate::FieldBinding::new(
                        stringify!($field),
                        $column,
                        |record: &mut Self,
                         raw: &str|
                         -> ::core::result::Result<(), $crate::ConversionError> {
                            record.$field = $crate::FromColumn::from_column(raw)?;
                            ::core::result::Result::Ok(())
                        },
                    ),
                )*
            ];
        }
    };
}
