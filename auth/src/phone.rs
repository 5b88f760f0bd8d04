//! Phone number input normalization.
//!
//! Converts free-form user input into the canonical dialable form the
//! identity provider expects (`+` followed by digits only).

/// Normalize raw phone input into canonical dialable form.
///
/// Formatting characters (spaces, dashes, dots, parentheses) are stripped.
/// Input starting with `+` is treated as already carrying its country code;
/// otherwise `default_country_code` is prepended.
///
/// Returns `None` when the input contains no digits at all, so callers can
/// suppress the submission instead of surfacing an error.
///
/// # Examples
///
/// ```
/// use otpgate_auth::phone::normalize;
///
/// assert_eq!(normalize("(555) 123-4567", "1"), Some("+15551234567".into()));
/// assert_eq!(normalize("+33 6 12 34 56 78", "1"), Some("+33612345678".into()));
/// assert_eq!(normalize("no digits here", "1"), None);
/// ```
#[must_use]
pub fn normalize(raw: &str, default_country_code: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }

    if raw.trim_start().starts_with('+') {
        Some(format!("+{digits}"))
    } else {
        Some(format!("+{default_country_code}{digits}"))
    }
}
