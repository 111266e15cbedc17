//! Request body validation.

use lettre::Address;

use crate::error::FieldError;

/// Longest address accepted (RFC 5321 path limit minus brackets).
const MAX_EMAIL_LEN: usize = 254;
/// Longest local part accepted.
const MAX_LOCAL_LEN: usize = 64;

/// Field-level validation run after a body deserializes.
pub trait Validate {
    /// Return every invalid field, or `Ok` when the value is acceptable.
    fn validate(&self) -> Result<(), Vec<FieldError>>;
}

/// Check that `address` is a syntactically valid email address.
///
/// Parsing follows the mail relay's own address rules, so internationalized
/// local parts and domains are accepted. On top of that the domain must be
/// dotted with no empty or hyphen-edged labels, the local part may not start,
/// end or repeat dots, and the usual length limits apply.
pub fn is_valid_email(address: &str) -> bool {
    if address.len() > MAX_EMAIL_LEN {
        return false;
    }

    let Ok(parsed) = address.parse::<Address>() else {
        return false;
    };

    let local = parsed.user();
    let domain = parsed.domain();

    let local_ok = local.len() <= MAX_LOCAL_LEN
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..");

    let domain_ok = domain.contains('.')
        && domain
            .split('.')
            .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'));

    local_ok && domain_ok
}

/// Push an error when a required text field is blank.
pub fn require_non_blank(field: &'static str, value: &str, errors: &mut Vec<FieldError>) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "field must not be empty"));
    }
}
