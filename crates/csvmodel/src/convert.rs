//! Conversion of raw column text into typed field values.
//!
//! Every bound field type implements [`FromColumn`]. The conversion decides
//! whether a raw value is compatible with the field's declared type; an
//! incompatible value is reported rather than dropped.

use std::fmt;

/// A raw value that could not be converted to the requested type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionError {
    /// Name of the target type.
    pub expected: &'static str,
    /// Description of the failure.
    pub reason: String,
}

impl ConversionError {
    /// Creates a conversion error for target type `T`.
    pub fn new<T: ?Sized>(reason: impl fmt::Display) -> Self {
        Self {
            expected: std::any::type_name::<T>(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot convert to {}: {}", self.expected, self.reason)
    }
}

impl std::error::Error for ConversionError {}

/// Types that can be assigned from a raw column value.
///
/// # Examples
///
/// ```
/// use csvmodel::FromColumn;
///
/// assert_eq!(u32::from_column("42").unwrap(), 42);
/// assert_eq!(Option::<u32>::from_column("").unwrap(), None);
/// assert!(bool::from_column("yes").is_err());
/// ```
pub trait FromColumn: Sized {
    /// Converts `raw` into `Self`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionError`] if `raw` is not a valid `Self`.
    fn from_column(raw: &str) -> Result<Self, ConversionError>;
}

impl FromColumn for String {
    fn from_column(raw: &str) -> Result<Self, ConversionError> {
        Ok(raw.to_string())
    }
}

impl<T: FromColumn> FromColumn for Option<T> {
    /// Empty text maps to `None`.
    fn from_column(raw: &str) -> Result<Self, ConversionError> {
        if raw.is_empty() {
            Ok(None)
        } else {
            T::from_column(raw).map(Some)
        }
    }
}

macro_rules! impl_from_column_parse {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromColumn for $ty {
                fn from_column(raw: &str) -> Result<Self, ConversionError> {
                    raw.parse::<$ty>().map_err(ConversionError::new::<$ty>)
                }
            }
        )*
    };
}

impl_from_column_parse!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn string_accepts_anything() {
        assert_eq!(String::from_column("").unwrap(), "");
        assert_eq!(String::from_column(" x ").unwrap(), " x ");
    }

    #[rstest]
    #[case::int("42", Some(42))]
    #[case::negative("-3", Some(-3))]
    #[case::padded(" 4", None)]
    #[case::float("1.5", None)]
    #[case::word("abc", None)]
    fn i64_parses_strictly(#[case] raw: &str, #[case] expected: Option<i64>) {
        assert_eq!(i64::from_column(raw).ok(), expected);
    }

    #[rstest]
    #[case::lower_true("true", Some(true))]
    #[case::lower_false("false", Some(false))]
    #[case::capitalized("True", None)]
    #[case::numeric("1", None)]
    fn bool_parses_literals(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(bool::from_column(raw).ok(), expected);
    }

    #[test]
    fn option_maps_empty_to_none() {
        assert_eq!(Option::<f64>::from_column("").unwrap(), None);
        assert_eq!(Option::<f64>::from_column("2.5").unwrap(), Some(2.5));
        assert!(Option::<f64>::from_column("x").is_err());
    }

    #[test]
    fn error_names_the_target_type() {
        let err = u8::from_column("300").unwrap_err();
        assert_eq!(err.expected, "u8");
        assert!(err.to_string().contains("u8"));
    }
}
