//! Helpers for partial-update payloads
//!
//! Update payloads distinguish an absent field (leave unchanged) from an
//! explicit `null` (clear the value). Nullable attributes therefore use
//! `Option<Option<T>>`:
//!
//! | JSON              | Rust               |
//! |-------------------|--------------------|
//! | field omitted     | `None`             |
//! | `"field": null`   | `Some(None)`       |
//! | `"field": value`  | `Some(Some(value))`|
//!
//! ```rust,ignore
//! #[derive(Deserialize)]
//! struct TagRuleUpdate {
//!     #[serde(default, deserialize_with = "nullable")]
//!     name: Option<Option<String>>,
//! }
//! ```

use serde::{Deserialize, Deserializer};

/// Deserialize a present field (even `null`) into `Some(..)`
///
/// Combine with `#[serde(default)]` so that a missing field becomes `None`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Assign `value` to `target` when the field was present
pub fn merge<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "nullable")]
        name: Option<Option<String>>,
    }

    #[test]
    fn test_absent_null_and_value_are_distinct() {
        let absent: Patch = serde_json::from_value(json!({})).unwrap();
        let null: Patch = serde_json::from_value(json!({ "name": null })).unwrap();
        let value: Patch = serde_json::from_value(json!({ "name": "Groceries" })).unwrap();

        assert_eq!(absent.name, None);
        assert_eq!(null.name, Some(None));
        assert_eq!(value.name, Some(Some("Groceries".to_string())));
    }

    #[test]
    fn test_merge() {
        let mut amount = 10;
        merge(&mut amount, None);
        assert_eq!(amount, 10);
        merge(&mut amount, Some(20));
        assert_eq!(amount, 20);
    }
}
