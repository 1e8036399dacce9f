//! Field validation for sanitized lead forms.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Field, Result};
use crate::limits::{MIN_NAME_LEN, MIN_PHONE_LEN};
use crate::sanitize::LeadForm;
use crate::submission::FormType;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email pattern"));

static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^[+]?[0-9\s-]{{{},}}$", MIN_PHONE_LEN)).expect("invalid phone pattern")
});

/// Name must be at least two characters after sanitization.
pub fn is_valid_name(name: &str) -> bool {
    name.chars().count() >= MIN_NAME_LEN
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Whitespace is stripped before matching, so `+91 98765 43210` counts
/// twelve significant characters.
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_REGEX.is_match(&compact)
}

/// Validates a sanitized form in field order name, email, phone, formType.
///
/// Returns the parsed form type; the first failing field wins.
pub fn validate_form(form: &LeadForm) -> Result<FormType> {
    if !is_valid_name(&form.name) {
        return Err(Error::invalid(Field::Name));
    }

    if let Some(email) = &form.email {
        if !is_valid_email(email) {
            return Err(Error::invalid(Field::Email));
        }
    }

    if let Some(phone) = &form.phone {
        if !is_valid_phone(phone) {
            return Err(Error::invalid(Field::Phone));
        }
    }

    form.form_type
        .as_deref()
        .and_then(|t| t.parse::<FormType>().ok())
        .ok_or_else(|| Error::invalid(Field::FormType))
}
