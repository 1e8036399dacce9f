//! HTML escaping for free-text form fields.
//!
//! Only `<`, `>`, `"` and `'` are escaped; `&` is left alone. The escaped
//! output therefore contains none of the escaped characters, and
//! `sanitize_input(sanitize_input(x)) == sanitize_input(x)`.

use crate::limits::MAX_USER_AGENT_LEN;
use crate::submission::LeadPayload;

/// Escapes HTML-significant characters, then trims surrounding whitespace.
pub fn sanitize_input(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out.trim().to_string()
}

/// Sanitizes an optional field. Blank values become `None`.
pub fn sanitize_optional(input: Option<&str>) -> Option<String> {
    input.map(sanitize_input).filter(|s| !s.is_empty())
}

/// Sanitizes the `User-Agent` header and caps its length.
pub fn sanitize_user_agent(input: Option<&str>) -> Option<String> {
    sanitize_optional(input).map(|ua| ua.chars().take(MAX_USER_AGENT_LEN).collect())
}

/// Form fields after sanitization, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadForm {
    /// Empty when the payload had no name.
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub investment_range: Option<String>,
    pub message: Option<String>,
    pub budget: Option<String>,
    pub preferred_location: Option<String>,
    /// Compared against the known form types as-is; `None` when missing or
    /// not a JSON string.
    pub form_type: Option<String>,
}

impl LeadPayload {
    /// Sanitizes every free-text field.
    pub fn sanitize(&self) -> LeadForm {
        LeadForm {
            name: self.name.as_deref().map(sanitize_input).unwrap_or_default(),
            email: sanitize_optional(self.email.as_deref()),
            phone: sanitize_optional(self.phone.as_deref()),
            city: sanitize_optional(self.city.as_deref()),
            investment_range: sanitize_optional(self.investment_range.as_deref()),
            message: sanitize_optional(self.message.as_deref()),
            budget: sanitize_optional(self.budget.as_deref()),
            preferred_location: sanitize_optional(self.preferred_location.as_deref()),
            form_type: self
                .form_type
                .as_ref()
                .and_then(|v| v.as_str())
                .map(str::to_string),
        }
    }
}
