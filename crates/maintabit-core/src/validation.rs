//! Input validation shared by the service crates.

use crate::error::{MaintabitError, MaintabitResult};

/// Loose email shape check: `local@domain.tld` with no whitespace.
///
/// This mirrors what the web client enforces; deliverability is proven by
/// the OTP round trip, not here.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > 254 || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub fn validate_email(email: &str) -> MaintabitResult<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(MaintabitError::validation(
            "Please enter a valid email address",
        ))
    }
}

/// Return the trimmed value, or a validation error naming the field.
pub fn require<'a>(field: &str, value: Option<&'a str>) -> MaintabitResult<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(MaintabitError::validation(format!("{field} is required"))),
    }
}
