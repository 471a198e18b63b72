//! Validation predicates for caller-side checks.
//!
//! The model never rejects data itself; callers run these before
//! invoking a repository. Uniqueness enforcement stays with the
//! repositories and the store.

/// Both name parts present and non-blank.
pub fn is_valid_name(first_name: &str, last_name: &str) -> bool {
    !first_name.trim().is_empty() && !last_name.trim().is_empty()
}

/// Syntactically plausible email: one `@`, non-empty local part, dotted
/// domain, no whitespace. Not RFC-complete on purpose.
pub fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
