//! Conversion of field maps into typed records.

use crate::binding::{FieldMap, Record};
use crate::error::{FieldBindingError, Result};

/// Builds one record of type `T` from a field map.
///
/// The record starts from `T::default()`. Entries are assigned through the
/// bindings of `T` in declaration order, so the first failing field is the
/// same on every run.
///
/// # Errors
///
/// Returns [`FieldBindingError::TypeMismatch`] for the first bound field, in
/// declaration order, whose value cannot be converted, and
/// [`FieldBindingError::UnknownField`] if `fields` names a field that `T`
/// does not bind.
///
/// # Examples
///
/// ```
/// use csvmodel::{bind_record, materialize, FieldMap};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Item {
///     sku: String,
///     qty: u32,
/// }
///
/// bind_record!(Item { sku => "sku", qty => "quantity" });
///
/// let fields: FieldMap = [("sku", "A-1"), ("qty", "3")].into_iter().collect();
/// let item: Item = materialize::build(fields).unwrap();
/// assert_eq!(item, Item { sku: "A-1".into(), qty: 3 });
/// ```
pub fn build<T: Record>(mut fields: FieldMap) -> Result<T> {
    let mut record = T::default();
    for binding in T::FIELDS {
        let Some(value) = fields.remove(binding.field) else {
            continue;
        };
        if let Err(err) = (binding.assign)(&mut record, &value) {
            return Err(FieldBindingError::TypeMismatch {
                field: binding.field.to_string(),
                value,
                expected: err.expected,
                reason: err.reason,
            }
            .into());
        }
    }
    if let Some((field, _)) = fields.into_iter().next() {
        return Err(FieldBindingError::UnknownField { field }.into());
    }
    Ok(record)
}

/// Builds a typed collection from field maps, preserving their order.
///
/// # Errors
///
/// Fails on the first map that [`build`] rejects; no partial collection is
/// returned.
pub fn build_all<T: Record>(maps: impl IntoIterator<Item = FieldMap>) -> Result<Vec<T>> {
    maps.into_iter().map(build::<T>).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind_record;
    use crate::error::Error;

    #[derive(Debug, Default, PartialEq)]
    struct Sensor {
        id: String,
        reading: f64,
        online: bool,
        location: Option<String>,
        label: String,
    }

    bind_record!(Sensor {
        id => "id",
        reading => "reading",
        online => "online",
        location => "location",
    });

    fn fields(pairs: &[(&str, &str)]) -> FieldMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn build_sets_every_bound_field() {
        let sensor: Sensor = build(fields(&[
            ("id", "s-1"),
            ("reading", "21.5"),
            ("online", "true"),
            ("location", "roof"),
        ]))
        .unwrap();

        assert_eq!(
            sensor,
            Sensor {
                id: "s-1".to_string(),
                reading: 21.5,
                online: true,
                location: Some("roof".to_string()),
                label: String::new(),
            }
        );
    }

    #[test]
    fn missing_entries_keep_defaults() {
        let sensor: Sensor = build(fields(&[("id", "s-2")])).unwrap();
        assert_eq!(sensor.id, "s-2");
        assert!(!sensor.online);
        assert_eq!(sensor.location, None);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = build::<Sensor>(fields(&[("id", "s-3"), ("colour", "red")])).unwrap_err();
        match err {
            Error::FieldBinding(FieldBindingError::UnknownField { field }) => {
                assert_eq!(field, "colour");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unbound_struct_field_counts_as_unknown() {
        let err = build::<Sensor>(fields(&[("label", "x")])).unwrap_err();
        assert!(matches!(
            err,
            Error::FieldBinding(FieldBindingError::UnknownField { ref field }) if field == "label"
        ));
    }

    #[test]
    fn incompatible_value_reports_mismatch() {
        let err = build::<Sensor>(fields(&[("reading", "warm")])).unwrap_err();
        match err {
            Error::FieldBinding(FieldBindingError::TypeMismatch {
                field,
                value,
                expected,
                ..
            }) => {
                assert_eq!(field, "reading");
                assert_eq!(value, "warm");
                assert_eq!(expected, "f64");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn build_all_preserves_order() {
        let sensors: Vec<Sensor> = build_all(vec![
            fields(&[("id", "a")]),
            fields(&[("id", "b")]),
            fields(&[("id", "c")]),
        ])
        .unwrap();
        let ids: Vec<_> = sensors.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn build_all_returns_nothing_on_failure() {
        let result = build_all::<Sensor>(vec![
            fields(&[("id", "a")]),
            fields(&[("online", "maybe")]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn build_all_of_nothing_is_empty() {
        let sensors: Vec<Sensor> = build_all(Vec::new()).unwrap();
        assert!(sensors.is_empty());
    }

    #[derive(Debug, Default)]
    struct Nums {
        a: u32,
        b: u32,
        c: u32,
    }

    bind_record!(Nums {
        a => "a",
        b => "b",
        c => "c",
    });

    fn mismatched_field(err: Error) -> String {
        match err {
            Error::FieldBinding(FieldBindingError::TypeMismatch { field, .. }) => field,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn first_declared_bad_field_is_reported() {
        for _ in 0..50 {
            let err = build::<Nums>(fields(&[("c", "z"), ("b", "y"), ("a", "x")])).unwrap_err();
            assert_eq!(mismatched_field(err), "a");
        }
    }

    #[test]
    fn later_bad_field_is_reported_once_earlier_ones_convert() {
        let err = build::<Nums>(fields(&[("c", "z"), ("a", "1"), ("b", "y")])).unwrap_err();
        assert_eq!(mismatched_field(err), "b");
    }

    #[test]
    fn first_inserted_unknown_key_is_reported() {
        let err = build::<Nums>(fields(&[("a", "1"), ("zeta", "?"), ("alpha", "?")])).unwrap_err();
        assert!(matches!(
            err,
            Error::FieldBinding(FieldBindingError::UnknownField { ref field }) if field == "zeta"
        ));
    }
}
