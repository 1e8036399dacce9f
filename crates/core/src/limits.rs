//! Size and rate limits for lead intake.
//!
//! Defaults are the production values. Config structs in other crates
//! start from these constants.

// === Rate Limiting ===

/// Fixed rate window length in seconds.
pub const RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Maximum submissions per IP per window.
pub const RATE_LIMIT_MAX_REQUESTS: u32 = 5;

/// Rate limit key used when no forwarding header is present.
///
/// Every client behind a proxy that strips the headers shares this bucket.
pub const UNKNOWN_CLIENT_IP: &str = "unknown";

// === Fallback Store ===

/// Maximum records kept in the in-memory store before FIFO eviction.
pub const FALLBACK_STORE_CAPACITY: usize = 100;

/// Records returned by the admin listing.
pub const RECENT_LISTING_LIMIT: usize = 50;

// === Payload ===

/// Maximum request body size in bytes (64KB).
///
/// A lead form is a handful of short strings; anything larger is abuse.
pub const MAX_BODY_SIZE_BYTES: usize = 64 * 1024;

/// Minimum name length after sanitization (chars).
pub const MIN_NAME_LEN: usize = 2;

/// Minimum significant phone characters.
pub const MIN_PHONE_LEN: usize = 10;

/// Length of the random base-36 suffix in submission ids.
pub const ID_SUFFIX_LEN: usize = 9;

/// User agent string max length.
/// Browser UAs: 100-300 typical, 500+ with extensions.
pub const MAX_USER_AGENT_LEN: usize = 512;

// === External Persistence ===

/// Default timeout for the external store write (seconds).
pub const DEFAULT_PERSIST_TIMEOUT_SECS: u64 = 5;
