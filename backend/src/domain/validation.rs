//! Pure field-level validation checks.
//!
//! These functions are stateless and side-effect free. The lifecycle service
//! composes them in a fixed order so the first failing check is the one
//! reported to the caller.

/// Whether a text field carries a usable value.
///
/// Fails for empty or all-whitespace input. Callers collapse a missing value
/// to the empty string before invoking this check.
///
/// # Examples
/// ```
/// use backend::domain::validation::has_required_text;
///
/// assert!(has_required_text("Ada"));
/// assert!(!has_required_text("   "));
/// ```
pub fn has_required_text(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Whether an age value is acceptable at creation time.
pub const fn is_non_negative_age(age: i32) -> bool {
    age >= 0
}

/// Loose syntactic email check.
///
/// Accepts any non-blank value that contains a `@` past the first position,
/// a `.` strictly after the position following the `@`, and more than five
/// characters in total. This is deliberately not a full address grammar; the
/// quirks (including the length floor) are kept for compatibility with
/// records validated by earlier releases.
///
/// # Examples
/// ```
/// use backend::domain::validation::is_well_formed_email;
///
/// assert!(is_well_formed_email("ada@example.com"));
/// assert!(!is_well_formed_email("a@b.c")); // five characters, too short
/// assert!(!is_well_formed_email("@example.com"));
/// ```
pub fn is_well_formed_email(email: &str) -> bool {
    if email.trim().is_empty() {
        return false;
    }
    let Some(at) = email.find('@') else {
        return false;
    };
    let Some(dot) = email.rfind('.') else {
        return false;
    };
    at > 0 && dot > at + 1 && email.len() > 5
}
