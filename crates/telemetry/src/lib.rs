//! Telemetry for lead intake: tracing setup, in-process counters, and a
//! health registry for the optional collaborators.

pub mod health;
pub mod metrics;
pub mod tracing_setup;

pub use health::*;
pub use metrics::*;
pub use tracing_setup::*;
