//! Field value types used by filters and sorting

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// A polymorphic field value that can hold any record attribute
///
/// Records expose their attributes by name as `FieldValue`s so that the
/// storage layer can filter and sort any record type without knowing its
/// concrete shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Decimal(Decimal),
    Boolean(bool),
    Uuid(Uuid),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Compare two values of compatible kinds
    ///
    /// Integers and decimals compare numerically with each other. `Null`
    /// sorts before every other value. Values of unrelated kinds are not
    /// comparable and yield `None`.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        use FieldValue as V;

        match (self, other) {
            (V::Null, V::Null) => Some(Ordering::Equal),
            (V::Null, _) => Some(Ordering::Less),
            (_, V::Null) => Some(Ordering::Greater),
            (V::String(a), V::String(b)) => Some(a.cmp(b)),
            (V::Integer(a), V::Integer(b)) => Some(a.cmp(b)),
            (V::Decimal(a), V::Decimal(b)) => Some(a.cmp(b)),
            (V::Integer(a), V::Decimal(b)) => Some(Decimal::from(*a).cmp(b)),
            (V::Decimal(a), V::Integer(b)) => Some(a.cmp(&Decimal::from(*b))),
            (V::Boolean(a), V::Boolean(b)) => Some(a.cmp(b)),
            (V::Uuid(a), V::Uuid(b)) => Some(a.cmp(b)),
            (V::Date(a), V::Date(b)) => Some(a.cmp(b)),
            (V::DateTime(a), V::DateTime(b)) => Some(a.cmp(b)),
            (V::Date(a), V::DateTime(b)) => Some(a.cmp(&b.date_naive())),
            (V::DateTime(a), V::Date(b)) => Some(a.date_naive().cmp(b)),
            _ => None,
        }
    }

    /// Reinterpret a string value as the kind of `like`
    ///
    /// Query strings carry every value as text. When a filter is compared
    /// against a typed attribute the text is parsed into that attribute's
    /// kind. Returns `None` when the text does not parse.
    pub fn coerce_like(&self, like: &FieldValue) -> Option<FieldValue> {
        let FieldValue::String(raw) = self else {
            return Some(self.clone());
        };
        let raw = raw.trim();

        match like {
            FieldValue::String(_) | FieldValue::Null => Some(self.clone()),
            FieldValue::Integer(_) => raw.parse().ok().map(FieldValue::Integer),
            FieldValue::Decimal(_) => raw.parse().ok().map(FieldValue::Decimal),
            FieldValue::Boolean(_) => raw.parse().ok().map(FieldValue::Boolean),
            FieldValue::Uuid(_) => Uuid::parse_str(raw).ok().map(FieldValue::Uuid),
            FieldValue::Date(_) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(FieldValue::Date),
            FieldValue::DateTime(_) => DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| FieldValue::DateTime(dt.with_timezone(&Utc))),
        }
    }

    /// Human-readable kind name, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::String(_) => "string",
            FieldValue::Integer(_) => "integer",
            FieldValue::Decimal(_) => "decimal",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Uuid(_) => "uuid",
            FieldValue::Date(_) => "date",
            FieldValue::DateTime(_) => "datetime",
            FieldValue::Null => "null",
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value as i64)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Decimal(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Uuid(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}
