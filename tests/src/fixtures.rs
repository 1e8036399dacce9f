//! Test fixtures and payload generators.

use serde_json::{json, Value};

/// A submission every validator accepts.
pub fn valid_lead() -> Value {
    json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "+91 9876543210",
        "formType": "consultation"
    })
}

/// Catalogue request with every optional field filled in.
pub fn full_lead() -> Value {
    json!({
        "name": "Arjun Mehta",
        "email": "arjun@example.com",
        "phone": "+91 98765 43210",
        "city": "Mumbai",
        "investmentRange": "5-10 Cr",
        "message": "Interested in sea-facing properties",
        "budget": "8 Cr",
        "preferredLocation": "Worli",
        "formType": "catalogue"
    })
}

/// `valid_lead` with one field replaced.
pub fn lead_with(field: &str, value: Value) -> Value {
    let mut lead = valid_lead();
    lead[field] = value;
    lead
}

/// `valid_lead` without one field.
pub fn lead_without(field: &str) -> Value {
    let mut lead = valid_lead();
    if let Some(map) = lead.as_object_mut() {
        map.remove(field);
    }
    lead
}

/// A distinct client IP per index, for bypassing the per-IP limit.
pub fn client_ip(n: usize) -> String {
    format!("10.{}.{}.{}", (n >> 16) & 0xff, (n >> 8) & 0xff, n & 0xff)
}
