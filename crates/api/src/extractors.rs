//! Request extractors.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use lead_core::limits::UNKNOWN_CLIENT_IP;
use std::convert::Infallible;

/// Client IP address, used as the rate-limit key.
///
/// Falls back to `"unknown"`, so every client without forwarding headers
/// shares one bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Try X-Forwarded-For first (for proxied requests)
        if let Some(xff) = header_str(parts, "X-Forwarded-For") {
            // Take the first IP in the chain
            if let Some(ip) = xff.split(',').next().map(str::trim) {
                if !ip.is_empty() {
                    return Ok(ClientIp(ip.to_string()));
                }
            }
        }

        if let Some(real_ip) = header_str(parts, "X-Real-IP") {
            let ip = real_ip.trim();
            if !ip.is_empty() {
                return Ok(ClientIp(ip.to_string()));
            }
        }

        Ok(ClientIp(UNKNOWN_CLIENT_IP.to_string()))
    }
}

/// Raw `User-Agent` header, if any.
#[derive(Debug, Clone)]
pub struct UserAgent(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for UserAgent
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(UserAgent(
            parts
                .headers
                .get(header::USER_AGENT)
                .and_then(|h| h.to_str().ok())
                .map(str::to_string),
        ))
    }
}

/// Admin key from the `X-API-Key` header.
#[derive(Debug, Clone)]
pub struct AdminKey(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for AdminKey
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(AdminKey(header_str(parts, "X-API-Key").map(str::to_string)))
    }
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|h| h.to_str().ok())
}
