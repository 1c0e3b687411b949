//! Loose-type coercion for raw column values.
//!
//! Drifted stores hold the same logical value under different storage
//! classes: an hours column may be REAL in one generation and TEXT in a
//! legacy import. Coercion maps whatever is on disk into one logical
//! value, and it never errors — an unexpected representation degrades a
//! single field, not the row.

/// A storage value after coercion: the single logical shape the rest of
/// the read path works with.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

/// Coerce a raw storage value into a logical one, first match wins:
/// exact integer, then real, then text (trimmed; parsed as integer, then
/// as decimal, else kept as text). NULL, blobs, and empty text coerce to
/// nothing.
#[must_use]
pub fn coerce_value(value: &libsql::Value) -> Option<BoundValue> {
    match value {
        libsql::Value::Integer(i) => Some(BoundValue::Integer(*i)),
        libsql::Value::Real(r) => Some(BoundValue::Real(*r)),
        libsql::Value::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            if let Ok(i) = trimmed.parse::<i64>() {
                return Some(BoundValue::Integer(i));
            }
            if let Ok(r) = trimmed.parse::<f64>() {
                return Some(BoundValue::Real(r));
            }
            Some(BoundValue::Text(trimmed.to_string()))
        }
        libsql::Value::Null | libsql::Value::Blob(_) => None,
    }
}

/// Coerce toward `i64`. Reals are accepted only when fraction-free and in
/// range; text goes through [`coerce_value`] first.
#[must_use]
pub fn coerce_integer(value: &libsql::Value) -> Option<i64> {
    match coerce_value(value)? {
        BoundValue::Integer(i) => Some(i),
        #[allow(clippy::cast_possible_truncation)]
        BoundValue::Real(r) if r.fract() == 0.0 && r.abs() <= i64::MAX as f64 => Some(r as i64),
        BoundValue::Real(_) | BoundValue::Text(_) => None,
    }
}

/// Coerce toward `f64`. Integers widen; text goes through
/// [`coerce_value`] first; non-numeric text coerces to nothing.
#[must_use]
pub fn coerce_number(value: &libsql::Value) -> Option<f64> {
    match coerce_value(value)? {
        #[allow(clippy::cast_precision_loss)]
        BoundValue::Integer(i) => Some(i as f64),
        BoundValue::Real(r) => Some(r),
        BoundValue::Text(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::stored_integer(libsql::Value::Integer(3), Some(3.0))]
    #[case::stored_real(libsql::Value::Real(3.0), Some(3.0))]
    #[case::stored_text(libsql::Value::Text("3".into()), Some(3.0))]
    #[case::stored_text_decimal(libsql::Value::Text("3.5".into()), Some(3.5))]
    #[case::stored_text_padded(libsql::Value::Text(" 3 ".into()), Some(3.0))]
    #[case::not_applicable(libsql::Value::Text("N/A".into()), None)]
    #[case::null(libsql::Value::Null, None)]
    fn number_precedence(#[case] value: libsql::Value, #[case] expected: Option<f64>) {
        assert_eq!(coerce_number(&value), expected);
    }

    #[rstest]
    #[case::stored_integer(libsql::Value::Integer(7), Some(7))]
    #[case::fraction_free_real(libsql::Value::Real(7.0), Some(7))]
    #[case::fractional_real(libsql::Value::Real(7.5), None)]
    #[case::stored_text(libsql::Value::Text("7".into()), Some(7))]
    #[case::non_numeric_text(libsql::Value::Text("seven".into()), None)]
    #[case::null(libsql::Value::Null, None)]
    fn integer_precedence(#[case] value: libsql::Value, #[case] expected: Option<i64>) {
        assert_eq!(coerce_integer(&value), expected);
    }

    #[test]
    fn text_stays_text_when_not_numeric() {
        let coerced = coerce_value(&libsql::Value::Text("  Fall 2025  ".into()));
        assert_eq!(coerced, Some(BoundValue::Text("Fall 2025".into())));
    }

    #[test]
    fn empty_text_coerces_to_nothing() {
        assert_eq!(coerce_value(&libsql::Value::Text("   ".into())), None);
    }

    #[test]
    fn blob_coerces_to_nothing() {
        assert_eq!(coerce_value(&libsql::Value::Blob(vec![1, 2, 3])), None);
    }
}
