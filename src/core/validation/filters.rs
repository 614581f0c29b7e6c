//! Reusable normalization filters
//!
//! Applied to payload values before they are stored.

/// Trim surrounding whitespace
pub fn trim(value: String) -> String {
    if value.trim().len() == value.len() {
        value
    } else {
        value.trim().to_string()
    }
}

/// Trim and uppercase (currency codes)
pub fn upper(value: String) -> String {
    trim(value).to_uppercase()
}

/// Trim, turning a blank string into `None`
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.map(trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim() {
        assert_eq!(trim("  Galicia ".to_string()), "Galicia");
        assert_eq!(trim("Galicia".to_string()), "Galicia");
    }

    #[test]
    fn test_upper() {
        assert_eq!(upper(" ars".to_string()), "ARS");
    }

    #[test]
    fn test_blank_to_none() {
        assert_eq!(blank_to_none(Some("  ".to_string())), None);
        assert_eq!(blank_to_none(Some(" uber ".to_string())), Some("uber".to_string()));
        assert_eq!(blank_to_none(None), None);
    }
}
