//! Field checks shared by the submission form and the invoice composer.

use crate::errors::{Error, Result};

/// Returns the trimmed value, or a validation error if it is blank.
pub fn require_text(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(field, "is required"));
    }
    Ok(trimmed.to_string())
}

/// Loose shape check: one `@`, non-empty local part, a dotted domain, no spaces.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

/// Returns the trimmed address, or a validation error if it is blank or malformed.
pub fn require_email(field: &'static str, value: &str) -> Result<String> {
    let trimmed = require_text(field, value)?;
    if !is_valid_email(&trimmed) {
        return Err(Error::validation(field, "is not a valid email address"));
    }
    Ok(trimmed)
}

/// Trims optional free text, mapping blank input to `None`.
#[must_use]
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("name", "  Jo  ").unwrap(), "Jo");
        assert!(matches!(
            require_text("name", "   "),
            Err(Error::Validation { field: "name", .. })
        ));
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("nurse@example.co.uk"));
        assert!(is_valid_email(" practice@smile.dental "));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("a@localhost"));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("a@.com"));
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(None), None);
        assert_eq!(optional_text(Some("   ")), None);
        assert_eq!(optional_text(Some(" great shift ")), Some("great shift".to_string()));
    }
}
