//! HTTP API layer for lead intake.

pub mod extractors;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;

pub use routes::router;
pub use service::{LeadService, RecentSubmissions, ServiceConfig};
pub use state::AppState;
