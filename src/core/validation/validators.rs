//! Reusable record validators
//!
//! Records call these from `Record::validate`, so the same rules hold for
//! freshly created records and for records after a partial update.

use crate::core::error::{DomainError, DomainResult};
use regex::RegexBuilder;
use std::fmt::Display;

fn field_error(field: &str, message: String) -> DomainError {
    DomainError::InvalidData {
        message: format!("'{}' {}", field, message),
        details: Some(serde_json::json!({ "fields": { field: [message] } })),
    }
}

/// Field must not be empty after trimming
pub fn not_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        Err(field_error(field, "must not be empty".to_string()))
    } else {
        Ok(())
    }
}

/// Field, when present, must not exceed `max` characters
pub fn max_chars(field: &str, value: Option<&str>, max: usize) -> DomainResult<()> {
    match value {
        Some(v) if v.chars().count() > max => Err(field_error(
            field,
            format!("must be at most {} characters", max),
        )),
        _ => Ok(()),
    }
}

/// Field must be exactly four ASCII digits
pub fn last4(field: &str, value: &str) -> DomainResult<()> {
    if value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(field_error(field, "must be exactly 4 digits".to_string()))
    }
}

/// Field must be a three-letter currency code
pub fn currency(field: &str, value: &str) -> DomainResult<()> {
    if value.len() == 3 && value.bytes().all(|b| b.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(field_error(
            field,
            "must be a three-letter currency code".to_string(),
        ))
    }
}

/// Field, when present, must compile as a regular expression
pub fn regex(field: &str, pattern: Option<&str>) -> DomainResult<()> {
    match pattern {
        Some(p) => RegexBuilder::new(p)
            .case_insensitive(true)
            .build()
            .map(|_| ())
            .map_err(|e| field_error(field, format!("is not a valid regex: {}", e))),
        None => Ok(()),
    }
}

/// `low` must not be greater than `high` when both are present
pub fn ordered<T: PartialOrd + Display>(
    low_field: &str,
    low: Option<&T>,
    high_field: &str,
    high: Option<&T>,
) -> DomainResult<()> {
    match (low, high) {
        (Some(l), Some(h)) if l > h => Err(field_error(
            low_field,
            format!("({}) must not be greater than '{}' ({})", l, high_field, h),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("label", "Food").is_ok());
        assert!(not_blank("label", "   ").is_err());
    }

    #[test]
    fn test_max_chars_counts_characters() {
        assert!(max_chars("name", Some("ñandú"), 5).is_ok());
        assert!(max_chars("name", Some("abcdef"), 5).is_err());
        assert!(max_chars("name", None, 0).is_ok());
    }

    #[test]
    fn test_last4() {
        assert!(last4("last4", "0042").is_ok());
        assert!(last4("last4", "42").is_err());
        assert!(last4("last4", "42a1").is_err());
    }

    #[test]
    fn test_currency() {
        assert!(currency("currency", "usd").is_ok());
        assert!(currency("currency", "US").is_err());
        assert!(currency("currency", "U$D").is_err());
    }

    #[test]
    fn test_regex() {
        assert!(regex("payee_regex", Some("^uber.*eats$")).is_ok());
        assert!(regex("payee_regex", Some("(unclosed")).is_err());
        assert!(regex("payee_regex", None).is_ok());
    }

    #[test]
    fn test_ordered() {
        let jan = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let feb = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        assert!(ordered("period_start", Some(&jan), "period_end", Some(&feb)).is_ok());
        assert!(ordered("period_start", Some(&feb), "period_end", Some(&jan)).is_err());
        assert!(ordered::<NaiveDate>("a", None, "b", Some(&jan)).is_ok());
    }
}
