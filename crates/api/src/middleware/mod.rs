//! Request guards shared by the routes.

pub mod auth;
pub mod rate_limit;
