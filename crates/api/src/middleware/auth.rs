//! Admin key check for the submission listing.

/// Whether `supplied` matches the configured admin key.
///
/// No configured key (or an empty one) locks the listing for everyone.
pub fn admin_key_matches(configured: Option<&str>, supplied: Option<&str>) -> bool {
    match (configured, supplied) {
        (Some(expected), Some(given)) if !expected.is_empty() => {
            constant_time_eq(expected.as_bytes(), given.as_bytes())
        }
        _ => false,
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
