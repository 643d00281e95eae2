//! Internal helpers for input validation and normalization.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation so every operation enforces the same rules on text fields.

use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, ResultEngine};

/// Character used to escape `%`, `_` and itself in LIKE patterns.
pub(crate) const LIKE_ESCAPE: char = '!';

/// Trim a required text field and reject it when empty.
pub(crate) fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// Folded form of a name used for case-insensitive matching.
///
/// NFKC first so that compatibility forms (full-width letters, ligatures)
/// compare equal to their plain counterparts, then lowercase.
pub(crate) fn search_key(value: &str) -> String {
    value.trim().nfkc().collect::<String>().to_lowercase()
}

/// Build a `%fragment%` LIKE pattern that matches `fragment` literally.
pub(crate) fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Minimal structural email check: one `@` with something on both sides.
pub(crate) fn validate_email(value: &str) -> ResultEngine<String> {
    let email = normalize_required_text(value, "email")?;
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(email)
        }
        _ => Err(EngineError::InvalidInput(format!("invalid email: {email}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_is_trimmed() {
        assert_eq!(normalize_required_text("  Rice ", "item").unwrap(), "Rice");
        assert_eq!(
            normalize_required_text("   ", "item"),
            Err(EngineError::InvalidInput("item must not be empty".to_string()))
        );
    }

    #[test]
    fn search_key_folds_case_and_width() {
        assert_eq!(search_key("ALIce"), "alice");
        assert_eq!(search_key("ＡＬＩ"), "ali");
    }

    #[test]
    fn contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("ali"), "%ali%");
        assert_eq!(contains_pattern("50%_off"), "%50!%!_off%");
        assert_eq!(contains_pattern("wow!"), "%wow!!%");
    }

    #[test]
    fn email_needs_both_sides() {
        assert!(validate_email("a@b.c").is_ok());
        assert!(validate_email("@b.c").is_err());
        assert!(validate_email("a@").is_err());
        assert!(validate_email("a@b@c").is_err());
        assert!(validate_email("plain").is_err());
    }
}
