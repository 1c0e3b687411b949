//! Synchronous validation helpers.
//!
//! Every add operation validates its inputs here before touching the
//! database; a `ValidationError` therefore guarantees no row was written.
//! Helpers that accept text return the trimmed value so the trimmed form is
//! what gets persisted.

use chrono::NaiveDate;

use crate::errors::ValidationError;

/// Require a non-empty display name and return it trimmed.
///
/// # Errors
///
/// Returns `ValidationError::Empty` if the value is empty after trimming.
pub fn require_name(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_string())
}

/// Require a numeric value to be non-negative.
///
/// # Errors
///
/// Returns `ValidationError::Negative` for values below zero.
pub fn require_non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(value)
}

/// Require an hours value to be non-negative when present.
///
/// # Errors
///
/// Returns `ValidationError::Negative` for values below zero.
pub fn require_optional_hours(
    field: &'static str,
    value: Option<f64>,
) -> Result<Option<f64>, ValidationError> {
    value.map(|v| require_non_negative(field, v)).transpose()
}

/// Require `end` to fall strictly after `start`.
///
/// # Errors
///
/// Returns `ValidationError::DateOrder` when the range is empty or inverted.
pub fn require_date_order(
    field: &'static str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(), ValidationError> {
    if end <= start {
        return Err(ValidationError::DateOrder {
            field,
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

/// Require a plausible email address and return it trimmed.
///
/// This is deliberately shallow — presence of one `@` with text on both
/// sides — because the store, not this layer, is the authority on identity.
///
/// # Errors
///
/// Returns `ValidationError::Empty` or `ValidationError::Invalid`.
pub fn require_email(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    let mut parts = trimmed.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ValidationError::Invalid {
            field,
            reason: format!("'{trimmed}' is not an email address"),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn require_name_trims() {
        assert_eq!(require_name("name", "  Physics  ").unwrap(), "Physics");
    }

    #[test]
    fn require_name_rejects_blank() {
        assert_eq!(
            require_name("name", "   "),
            Err(ValidationError::Empty { field: "name" })
        );
    }

    #[test]
    fn require_non_negative_accepts_zero() {
        assert_eq!(require_non_negative("hours", 0.0).unwrap(), 0.0);
        assert!(require_non_negative("hours", -1.5).is_err());
    }

    #[test]
    fn require_optional_hours_passes_none_through() {
        assert_eq!(require_optional_hours("hours", None).unwrap(), None);
        assert_eq!(
            require_optional_hours("hours", Some(0.0)).unwrap(),
            Some(0.0)
        );
        assert!(require_optional_hours("hours", Some(-1.5)).is_err());
    }

    #[test]
    fn require_date_order_rejects_equal_and_inverted() {
        let d1 = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 5, 30).unwrap();
        assert!(require_date_order("term", d1, d2).is_ok());
        assert!(require_date_order("term", d2, d1).is_err());
        assert!(require_date_order("term", d1, d1).is_err());
    }

    #[test]
    fn require_email_accepts_plain_addresses() {
        assert_eq!(
            require_email("email", " jdoe@example.edu ").unwrap(),
            "jdoe@example.edu"
        );
    }

    #[test]
    fn require_email_rejects_malformed() {
        assert!(require_email("email", "jdoe").is_err());
        assert!(require_email("email", "@example.edu").is_err());
        assert!(require_email("email", "jdoe@").is_err());
        assert!(require_email("email", "a@b@c").is_err());
    }
}
